//! Per-request search state driven by decoded frames.

use serde_json::Value;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::models::{SearchSnapshot, SearchUpdate};
use crate::search::payload::ResultPayload;
use crate::search::progress::extract_total;
use crate::sse::StreamFrame;
use crate::traits::FrameSink;

/// Event carrying a plain-text status message
pub const PROGRESS_EVENT: &str = "progress";
/// Terminal event carrying the JSON result payload
pub const DONE_EVENT: &str = "done";

/// What applying a frame did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameEffect {
    /// Status (and possibly the running total) changed
    Progress,
    /// Result list replaced
    Results,
    /// Payload could not be parsed; state untouched
    Dropped,
    /// Unknown event or non-JSON `done` payload
    Ignored,
}

/// State of one search request.
///
/// Frames after a `done` are still applied: the decoder does not stop the
/// stream and late `progress` messages only update the status.
#[derive(Debug, Default)]
pub struct SearchSession {
    snapshot: SearchSnapshot,
    updates: Option<mpsc::UnboundedSender<SearchUpdate>>,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session that reports changes on `updates`.
    pub fn with_updates(updates: mpsc::UnboundedSender<SearchUpdate>) -> Self {
        Self {
            snapshot: SearchSnapshot::default(),
            updates: Some(updates),
        }
    }

    pub fn snapshot(&self) -> &SearchSnapshot {
        &self.snapshot
    }

    pub fn into_snapshot(self) -> SearchSnapshot {
        self.snapshot
    }

    pub fn is_completed(&self) -> bool {
        self.snapshot.completed
    }

    /// Interpret one frame.
    pub fn apply_frame(&mut self, frame: &StreamFrame) -> FrameEffect {
        match frame.event.as_str() {
            PROGRESS_EVENT => self.apply_progress(&frame.data),
            DONE_EVENT => self.apply_done(frame),
            other => {
                debug!(event = %other, "Ignoring unrecognized stream event");
                FrameEffect::Ignored
            }
        }
    }

    /// Interpret a non-streaming JSON response body.
    pub fn apply_buffered(&mut self, body: &Value) -> FrameEffect {
        match ResultPayload::from_value(body) {
            Some(payload) => self.apply_payload(payload),
            None => {
                warn!("Buffered search response is not a JSON object, ignoring");
                FrameEffect::Dropped
            }
        }
    }

    fn apply_progress(&mut self, message: &str) -> FrameEffect {
        if let Some(total) = extract_total(message) {
            self.snapshot.total = Some(total);
        }
        self.snapshot.status = Some(message.to_string());
        self.send(SearchUpdate::Status {
            message: message.to_string(),
            total: self.snapshot.total,
        });
        FrameEffect::Progress
    }

    fn apply_done(&mut self, frame: &StreamFrame) -> FrameEffect {
        if !frame.has_json_object() {
            debug!("Ignoring done frame without a JSON object payload");
            return FrameEffect::Ignored;
        }

        match ResultPayload::parse(&frame.data) {
            Ok(payload) => self.apply_payload(payload),
            Err(e) => {
                warn!("Failed to parse done payload, dropping frame: {}", e);
                FrameEffect::Dropped
            }
        }
    }

    fn apply_payload(&mut self, payload: ResultPayload) -> FrameEffect {
        if payload.total.is_some() {
            self.snapshot.total = payload.total;
        }
        self.snapshot.records = payload.records;
        self.snapshot.completed = true;
        self.send(SearchUpdate::Results {
            records: self.snapshot.records.clone(),
            total: self.snapshot.total,
        });
        FrameEffect::Results
    }

    fn send(&self, update: SearchUpdate) {
        if let Some(tx) = &self.updates {
            // A dropped receiver only means nobody is watching
            let _ = tx.send(update);
        }
    }
}

impl FrameSink for SearchSession {
    fn on_frame(&mut self, frame: StreamFrame) {
        self.apply_frame(&frame);
    }

    fn on_buffered(&mut self, body: Value) {
        self.apply_buffered(&body);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_progress_updates_status_and_total() {
        let mut session = SearchSession::new();
        assert_eq!(
            session.apply_frame(&StreamFrame::new("progress", "Initializing...")),
            FrameEffect::Progress
        );
        assert_eq!(session.snapshot().status.as_deref(), Some("Initializing..."));
        assert_eq!(session.snapshot().total, None);

        session.apply_frame(&StreamFrame::new("progress", "Found 128 total prospects"));
        assert_eq!(session.snapshot().total, Some(128));

        session.apply_frame(&StreamFrame::new("progress", "Enriching results"));
        assert_eq!(session.snapshot().total, Some(128));
        assert_eq!(session.snapshot().status.as_deref(), Some("Enriching results"));
    }

    #[test]
    fn test_done_replaces_results() {
        let mut session = SearchSession::new();
        session.apply_frame(&StreamFrame::new("done", r#"{"content":[{"id":"1"},{"id":"2"}]}"#));
        assert_eq!(session.snapshot().record_count(), 2);

        let effect =
            session.apply_frame(&StreamFrame::new("done", r#"{"people":[{"id":"3"}],"total":9}"#));
        assert_eq!(effect, FrameEffect::Results);
        assert_eq!(session.snapshot().records, vec![json!({"id": "3"})]);
        assert_eq!(session.snapshot().total, Some(9));
        assert!(session.is_completed());
    }

    #[test]
    fn test_done_without_total_keeps_running_total() {
        let mut session = SearchSession::new();
        session.apply_frame(&StreamFrame::new("progress", "Found 5 total"));
        session.apply_frame(&StreamFrame::new("done", r#"{"content":[]}"#));
        assert_eq!(session.snapshot().total, Some(5));
    }

    #[test]
    fn test_malformed_done_is_dropped() {
        let mut session = SearchSession::new();
        session.apply_frame(&StreamFrame::new("progress", "Found 3 total"));

        let effect = session.apply_frame(&StreamFrame::new("done", "{not valid json"));
        assert_eq!(effect, FrameEffect::Dropped);
        assert!(session.snapshot().records.is_empty());
        assert!(!session.is_completed());
        assert_eq!(session.snapshot().total, Some(3));
    }

    #[test]
    fn test_non_object_done_is_ignored() {
        let mut session = SearchSession::new();
        let effect = session.apply_frame(&StreamFrame::new("done", "complete"));
        assert_eq!(effect, FrameEffect::Ignored);
        assert!(!session.is_completed());
    }

    #[test]
    fn test_unknown_and_unnamed_events_are_ignored() {
        let mut session = SearchSession::new();
        assert_eq!(
            session.apply_frame(&StreamFrame::new("", "tick")),
            FrameEffect::Ignored
        );
        assert_eq!(
            session.apply_frame(&StreamFrame::new("heartbeat", "{}")),
            FrameEffect::Ignored
        );
        assert_eq!(session.snapshot(), &SearchSnapshot::default());
    }

    #[test]
    fn test_buffered_body() {
        let mut session = SearchSession::new();
        let effect = session.apply_buffered(&json!({"businesses": [{"id": "b"}], "total": 1}));
        assert_eq!(effect, FrameEffect::Results);
        assert_eq!(session.snapshot().total, Some(1));
        assert!(session.is_completed());

        let mut session = SearchSession::new();
        assert_eq!(session.apply_buffered(&json!("nope")), FrameEffect::Dropped);
    }

    #[test]
    fn test_updates_are_sent() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut session = SearchSession::with_updates(tx);
        session.apply_frame(&StreamFrame::new("progress", "Found 2 total"));
        session.apply_frame(&StreamFrame::new("done", r#"{"content":[1,2]}"#));

        assert_eq!(
            rx.try_recv().unwrap(),
            SearchUpdate::Status {
                message: "Found 2 total".to_string(),
                total: Some(2),
            }
        );
        assert_eq!(
            rx.try_recv().unwrap(),
            SearchUpdate::Results {
                records: vec![json!(1), json!(2)],
                total: Some(2),
            }
        );
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_closed_update_channel_is_harmless() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        let mut session = SearchSession::with_updates(tx);
        session.apply_frame(&StreamFrame::new("progress", "Found 1 total"));
        assert_eq!(session.snapshot().total, Some(1));
    }

    #[test]
    fn test_frame_sink_impl() {
        let mut session = SearchSession::new();
        FrameSink::on_frame(&mut session, StreamFrame::new("done", r#"{"data":[{}]}"#));
        assert_eq!(session.into_snapshot().record_count(), 1);
    }
}
