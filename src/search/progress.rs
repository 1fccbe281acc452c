//! Progress message interpretation.

use once_cell::sync::Lazy;
use regex::Regex;

static FOUND_TOTAL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Found (\d+) total").expect("Invalid found-total regex"));

/// Extract the running total from a progress message such as
/// `"Found 128 total prospects"`.
///
/// Returns `None` when the message carries no count, or the count does not
/// fit in a `u64`.
pub fn extract_total(message: &str) -> Option<u64> {
    FOUND_TOTAL_REGEX
        .captures(message)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}
