//! Frame sink trait abstraction.
//!
//! The stream read loop hands every decoded frame to a [`FrameSink`]. This
//! keeps the loop independent of where results end up: a private
//! per-request session, a shared search surface, or a test recorder.

use serde_json::Value;

use crate::sse::StreamFrame;

/// Receiver of decoded stream frames.
///
/// # Example
///
/// ```ignore
/// use prospect_stream::sse::StreamFrame;
/// use prospect_stream::traits::FrameSink;
///
/// struct Recorder(Vec<StreamFrame>);
///
/// impl FrameSink for Recorder {
///     fn on_frame(&mut self, frame: StreamFrame) {
///         self.0.push(frame);
///     }
///
///     fn on_buffered(&mut self, _body: serde_json::Value) {}
/// }
/// ```
pub trait FrameSink: Send {
    /// Called once per frame, in stream order.
    fn on_frame(&mut self, frame: StreamFrame);

    /// Called with the whole body when the server answered without
    /// streaming.
    fn on_buffered(&mut self, body: Value);
}

/// Collects frames in memory.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RecordingSink {
    pub frames: Vec<StreamFrame>,
    pub buffered: Option<Value>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FrameSink for RecordingSink {
    fn on_frame(&mut self, frame: StreamFrame) {
        self.frames.push(frame);
    }

    fn on_buffered(&mut self, body: Value) {
        self.buffered = Some(body);
    }
}
