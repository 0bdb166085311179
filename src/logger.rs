// src/logger.rs
// =============================================================================
// Sets up leveled logging on stderr.
//
// stdout is reserved for the extracted text (people pipe it straight into a
// file or clipboard tool), so every diagnostic goes through the `log` macros
// and env_logger writes them to stderr.
//
// Level comes from the number of -v flags, and EXTRACTIFY_LOG wins if set:
//   EXTRACTIFY_LOG=debug extractify github https://github.com/user/repo
// =============================================================================

use env_logger::{Builder, Env};
use log::Level;
use std::io::Write;

pub fn setup_logger(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    let env = Env::default().filter_or("EXTRACTIFY_LOG", level);

    // try_init so that calling this twice (tests) is harmless
    let _ = Builder::from_env(env)
        .format(|buf, record| {
            let level_color = match record.level() {
                Level::Error => "31",
                Level::Warn => "33",
                Level::Info => "32",
                Level::Debug => "36",
                Level::Trace => "35",
            };

            writeln!(
                buf,
                "\x1B[{}m[{}]\x1B[0m {}",
                level_color,
                record.level(),
                record.args()
            )
        })
        .target(env_logger::Target::Stderr)
        .try_init();
}
