// src/extract/format.rs
// =============================================================================
// Renders one file into the combined text.
//
// Every file becomes a block shaped like this (note the blank line before
// and the blank line after):
//
//
//   File name: main.rs
//   File path: src/main.rs
//   File Code:
//   fn main() {}
//
//
// Files we deliberately don't read get a fixed marker instead of code.
// =============================================================================

pub const IMAGE_OMITTED: &str = "[Image content omitted]";
pub const BINARY_OMITTED: &str = "[Binary content omitted]";
pub const UNREADABLE: &str = "[Content could not be read]";

// Why a file's content is missing from the output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Omission {
    Image,
    Binary,
    Unreadable,
}

impl Omission {
    pub fn marker(self) -> &'static str {
        match self {
            Omission::Image => IMAGE_OMITTED,
            Omission::Binary => BINARY_OMITTED,
            Omission::Unreadable => UNREADABLE,
        }
    }
}

// What goes under "File Code:"
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    Text(String),
    Omitted(Omission),
}

// Prefixes every line with "<n>: ", counting from 1
//
// Lines are split on '\n' only. A CRLF file keeps its '\r' at the end of
// each numbered line, and a lone '\r' is not treated as a line break.
pub fn number_lines(text: &str) -> String {
    text.split('\n')
        .enumerate()
        .map(|(i, line)| format!("{}: {}", i + 1, line))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_block(name: &str, path: &str, body: &Body, line_numbers: bool) -> String {
    let code = match body {
        Body::Text(text) if line_numbers => number_lines(text),
        Body::Text(text) => text.clone(),
        // Markers are never numbered
        Body::Omitted(reason) => reason.marker().to_string(),
    };

    format!(
        "\nFile name: {}\nFile path: {}\nFile Code:\n{}\n\n",
        name, path, code
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_text_block() {
        let block = format_block("a.txt", "docs/a.txt", &Body::Text("hi".into()), false);
        assert_eq!(
            block,
            "\nFile name: a.txt\nFile path: docs/a.txt\nFile Code:\nhi\n\n"
        );
    }

    #[test]
    fn test_format_image_block_ignores_line_numbers() {
        let block = format_block("b.png", "b.png", &Body::Omitted(Omission::Image), true);
        assert!(block.ends_with("File Code:\n[Image content omitted]\n\n"));
    }

    #[test]
    fn test_number_lines() {
        assert_eq!(number_lines("a\nb\nc"), "1: a\n2: b\n3: c");
        assert_eq!(number_lines(""), "1: ");
        // trailing newline yields a final empty numbered line
        assert_eq!(number_lines("x\n"), "1: x\n2: ");
    }

    #[test]
    fn test_number_lines_crlf_keeps_carriage_returns() {
        assert_eq!(number_lines("a\r\nb"), "1: a\r\n2: b");
        assert_eq!(number_lines("a\rb"), "1: a\rb");
    }

    #[test]
    fn test_line_numbers_applied_to_text() {
        let block = format_block("m.rs", "m.rs", &Body::Text("fn a(){}\nfn b(){}".into()), true);
        assert!(block.contains("File Code:\n1: fn a(){}\n2: fn b(){}\n\n"));
    }

    #[test]
    fn test_markers() {
        assert_eq!(Omission::Binary.marker(), "[Binary content omitted]");
        assert_eq!(Omission::Unreadable.marker(), "[Content could not be read]");
    }
}
