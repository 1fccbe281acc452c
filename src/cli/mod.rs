//! CLI module for prospect-stream.
//!
//! - Argument parsing
//! - Version and usage display
//!
//! The dispatcher should be called early in main() to handle informational
//! flags before any network setup:
//!
//! ```ignore
//! use prospect_stream::cli::{parse_args, run_cli_command, CliCommand};
//!
//! let command = parse_args(std::env::args())?;
//! if run_cli_command(&command) {
//!     return Ok(());
//! }
//! // CliCommand::Search continues in main
//! ```

pub mod args;
pub mod version;

pub use args::{parse_args, ArgsError, CliCommand, SearchArgs};
pub use version::{handle_version_command, version_line, USAGE, VERSION};

/// Run an informational command if applicable.
///
/// Returns `false` for [`CliCommand::Search`], which the caller runs itself.
/// The `Version` command never returns as it calls `std::process::exit(0)`.
pub fn run_cli_command(command: &CliCommand) -> bool {
    match command {
        CliCommand::Version => handle_version_command(),
        CliCommand::Help => {
            println!("{}", USAGE);
            true
        }
        CliCommand::Search(_) => false,
    }
}
