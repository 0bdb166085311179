// src/error.rs
// =============================================================================
// Errors that can stop an extraction before it produces any text.
//
// Every variant maps to an HTTP-style status hint (400, 401, 403, 404, 405,
// 500) and to a short message we can show the user as-is. Per-file problems
// (one blob failing to download, one local file not being UTF-8) never show
// up here - the pipeline absorbs those and keeps going.
//
// Rust concepts:
// - thiserror: derive Display/Error for an enum instead of writing it by hand
// - #[from]: lets `?` convert a reqwest::Error into our error automatically
// =============================================================================

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    /// The request used something other than POST
    #[error("method {0} not allowed")]
    MethodNotAllowed(String),

    /// No repository URL was supplied at all
    #[error("missing repository URL")]
    MissingUrl,

    /// The URL did not match github.com/<owner>/<repo>
    #[error("invalid GitHub URL: {0}")]
    InvalidUrl(String),

    /// No bearer token available
    #[error("no access token provided")]
    Unauthenticated,

    /// GitHub answered 403
    #[error("access to {0} forbidden")]
    Forbidden(String),

    /// GitHub answered 404
    #[error("{0} not found")]
    NotFound(String),

    /// Any other non-2xx answer from GitHub
    #[error("GitHub API error (HTTP {status}): {message}")]
    Upstream { status: u16, message: String },

    /// The response was 2xx but not something we can use
    #[error("unexpected response from GitHub: {0}")]
    InvalidResponse(String),

    /// We couldn't even set up the client (bad API URL, bad token bytes)
    #[error("configuration error: {0}")]
    Config(String),

    /// DNS, TLS, timeouts, connection resets...
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl ExtractError {
    // The status code a web handler would answer with
    pub fn status_hint(&self) -> u16 {
        match self {
            ExtractError::MethodNotAllowed(_) => 405,
            ExtractError::MissingUrl | ExtractError::InvalidUrl(_) => 400,
            ExtractError::Unauthenticated => 401,
            ExtractError::Forbidden(_) => 403,
            ExtractError::NotFound(_) => 404,
            ExtractError::Upstream { .. }
            | ExtractError::InvalidResponse(_)
            | ExtractError::Config(_)
            | ExtractError::Network(_) => 500,
        }
    }

    // Text that is safe to show to the person who made the request
    pub fn user_message(&self) -> String {
        match self {
            ExtractError::MethodNotAllowed(_) => "Method not allowed".to_string(),
            ExtractError::MissingUrl => "Repository URL is required".to_string(),
            ExtractError::InvalidUrl(_) => "Invalid GitHub repository URL".to_string(),
            ExtractError::Unauthenticated => "Authentication required".to_string(),
            ExtractError::Forbidden(_) => {
                "You don't have permission to access this repository".to_string()
            }
            ExtractError::NotFound(_) => {
                "Repository not found or you don't have access to it".to_string()
            }
            // GitHub's own message is usually the most helpful thing we have
            ExtractError::Upstream { message, .. } => message.clone(),
            ExtractError::InvalidResponse(_)
            | ExtractError::Config(_)
            | ExtractError::Network(_) => {
                "Internal server error".to_string()
            }
        }
    }

    /// Denied and not-found are expected outcomes, not operational failures
    pub fn is_access_denied(&self) -> bool {
        matches!(self, ExtractError::Forbidden(_) | ExtractError::NotFound(_))
    }
}
