use serde::Serialize;
use serde_json::Value;

/// Observable state of one search
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SearchSnapshot {
    /// Latest progress message
    pub status: Option<String>,
    /// Running total, from progress messages or the final payload
    pub total: Option<u64>,
    /// Records from the terminal frame
    pub records: Vec<Value>,
    /// Whether a terminal frame (or buffered body) was applied
    pub completed: bool,
}

impl SearchSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }
}

/// Notification for the presentation layer.
///
/// Sent over an unbounded channel so a slow consumer (e.g. a typewriter-style
/// status reveal) never holds up frame ingestion.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchUpdate {
    /// New progress message
    Status {
        message: String,
        total: Option<u64>,
    },
    /// Terminal result set
    Results {
        records: Vec<Value>,
        total: Option<u64>,
    },
}
