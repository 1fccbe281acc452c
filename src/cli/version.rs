//! Version and usage output.

/// The current version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Usage text printed by `--help`.
pub const USAGE: &str = "\
Usage: prospect-stream [OPTIONS] <QUERY>...

Stream AI search results for companies or people.

Options:
      --people        Search people instead of companies
      --page <N>      Page number (default 1)
      --per-page <N>  Results per page (default 25)
      --blank-line    Dispatch frames on blank lines (standard SSE)
  -h, --help          Print this help
  -V, --version       Print version

Environment:
  PROSPECT_API_URL            Search service base URL
  PROSPECT_API_TOKEN          Bearer token
  PROSPECT_IDLE_TIMEOUT_SECS  Max seconds between chunks (0 disables)
  PROSPECT_SSE_BLANK_LINE     Same as --blank-line
  RUST_LOG                    Log filter (default: warn)";

/// Version line printed by `--version`.
pub fn version_line() -> String {
    format!("prospect-stream {}", VERSION)
}

/// Handle the --version command.
///
/// Prints the version string and exits successfully.
pub fn handle_version_command() -> ! {
    println!("{}", version_line());
    std::process::exit(0)
}
