//! Frame and line types produced by the event-stream decoder.

/// Event name assumed when a frame carries no `event:` line.
pub const DEFAULT_EVENT_NAME: &str = "message";

/// Represents a classified SSE line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SseLine {
    /// Event type declaration (e.g., "event: progress")
    Event(String),
    /// Data payload (e.g., "data: Found 42 total")
    Data(String),
    /// Empty line
    Empty,
    /// Comment or heartbeat line (starts with ':')
    Comment(String),
    /// Unknown directive (`id:`, `retry:`, anything else)
    Other(String),
}

/// One decoded (event-name, payload) unit.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StreamFrame {
    /// Event name from the last `event:` line before the dispatch point.
    /// Empty when the server sent none.
    pub event: String,
    /// Payload with surrounding whitespace trimmed.
    pub data: String,
}

impl StreamFrame {
    pub fn new(event: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            event: event.into(),
            data: data.into(),
        }
    }

    /// Event name with the SSE default applied.
    pub fn event_name(&self) -> &str {
        if self.event.is_empty() {
            DEFAULT_EVENT_NAME
        } else {
            &self.event
        }
    }

    /// Whether the payload looks like a JSON object.
    pub fn has_json_object(&self) -> bool {
        self.data.starts_with('{')
    }
}

/// When the decoder turns accumulated lines into a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DispatchMode {
    /// Every `data:` line is its own frame. This is what the search backend
    /// relies on.
    #[default]
    PerDataLine,
    /// Standard SSE: `data:` lines accumulate (joined by `\n`) until an empty
    /// line dispatches them.
    BlankLine,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_name_defaults_to_message() {
        let frame = StreamFrame::new("", "tick");
        assert_eq!(frame.event_name(), "message");

        let frame = StreamFrame::new("progress", "tick");
        assert_eq!(frame.event_name(), "progress");
    }

    #[test]
    fn test_has_json_object() {
        assert!(StreamFrame::new("done", r#"{"total":1}"#).has_json_object());
        assert!(!StreamFrame::new("done", "[1,2]").has_json_object());
        assert!(!StreamFrame::new("done", "").has_json_object());
    }

    #[test]
    fn test_dispatch_mode_default() {
        assert_eq!(DispatchMode::default(), DispatchMode::PerDataLine);
    }
}
