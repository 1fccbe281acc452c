//! Line classification and the incremental frame decoder.

use tracing::trace;

use crate::sse::events::{DispatchMode, SseLine, StreamFrame};
use crate::sse::utf8::Utf8Decoder;

/// Classify a single SSE line (without its trailing newline).
pub fn parse_sse_line(line: &str) -> SseLine {
    if line.is_empty() {
        return SseLine::Empty;
    }

    if let Some(stripped) = line.strip_prefix(':') {
        return SseLine::Comment(stripped.trim().to_string());
    }

    if let Some(rest) = line.strip_prefix("event:") {
        return SseLine::Event(rest.trim().to_string());
    }

    if let Some(rest) = line.strip_prefix("data:") {
        return SseLine::Data(rest.trim().to_string());
    }

    SseLine::Other(line.to_string())
}

/// Incremental decoder turning a chunked byte stream into [`StreamFrame`]s.
///
/// Each instance owns its cursor and must only be fed by one stream. Frames
/// come out in the order their dispatch lines appear, no matter how the
/// bytes were split into chunks.
///
/// # Example
///
/// ```
/// use prospect_stream::sse::{FrameDecoder, StreamFrame};
///
/// let mut decoder = FrameDecoder::new();
/// assert!(decoder.feed(b"event: progress\nda").is_empty());
/// let frames = decoder.feed(b"ta: Found 42 total\n");
/// assert_eq!(frames, vec![StreamFrame::new("progress", "Found 42 total")]);
/// ```
#[derive(Debug, Default)]
pub struct FrameDecoder {
    mode: DispatchMode,
    utf8: Utf8Decoder,
    /// Decoded text after the last newline.
    buffer: String,
    /// Event name waiting for its data line.
    current_event: String,
    /// Data lines accumulated in blank-line mode.
    data_lines: Vec<String>,
}

impl FrameDecoder {
    /// Create a decoder using per-data-line dispatch.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mode: DispatchMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn mode(&self) -> DispatchMode {
        self.mode
    }

    /// Feed the next chunk, returning every frame it completed.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<StreamFrame> {
        // The held-back tail has no newline, so only new text is searched
        let scanned = self.buffer.len();
        self.utf8.decode_into(chunk, &mut self.buffer);

        let mut frames = Vec::new();
        let Some(offset) = self.buffer[scanned..].rfind('\n') else {
            return frames;
        };
        let last_newline = scanned + offset;

        let tail = self.buffer.split_off(last_newline + 1);
        let complete = std::mem::replace(&mut self.buffer, tail);
        for line in complete[..last_newline].split('\n') {
            self.process_line(line, &mut frames);
        }
        frames
    }

    /// Flush state at end of stream.
    ///
    /// Processes a final line that lacked its newline and, in blank-line
    /// mode, dispatches a frame whose terminating empty line never came.
    pub fn finish(&mut self) -> Vec<StreamFrame> {
        let mut frames = Vec::new();
        self.utf8.finish_into(&mut self.buffer);

        if !self.buffer.is_empty() {
            let line = std::mem::take(&mut self.buffer);
            self.process_line(&line, &mut frames);
        }

        if self.mode == DispatchMode::BlankLine {
            self.dispatch_accumulated(&mut frames);
        }
        self.current_event.clear();
        frames
    }

    /// Reset the decoder for a new stream.
    pub fn reset(&mut self) {
        self.utf8.reset();
        self.buffer.clear();
        self.current_event.clear();
        self.data_lines.clear();
    }

    /// Length of the partial line currently held back.
    pub fn buffered_len(&self) -> usize {
        self.buffer.len()
    }

    /// Event name waiting for a data line, if any.
    pub fn pending_event(&self) -> Option<&str> {
        if self.current_event.is_empty() {
            None
        } else {
            Some(&self.current_event)
        }
    }

    fn process_line(&mut self, line: &str, frames: &mut Vec<StreamFrame>) {
        let line = line.strip_suffix('\r').unwrap_or(line);

        match parse_sse_line(line) {
            SseLine::Event(name) => {
                self.current_event = name;
            }
            SseLine::Data(data) => match self.mode {
                DispatchMode::PerDataLine => {
                    let frame = StreamFrame {
                        event: std::mem::take(&mut self.current_event),
                        data,
                    };
                    trace!(event = %frame.event, "frame dispatched");
                    frames.push(frame);
                }
                DispatchMode::BlankLine => self.data_lines.push(data),
            },
            SseLine::Empty => {
                if self.mode == DispatchMode::BlankLine {
                    self.dispatch_accumulated(frames);
                }
            }
            SseLine::Comment(_) | SseLine::Other(_) => {}
        }
    }

    fn dispatch_accumulated(&mut self, frames: &mut Vec<StreamFrame>) {
        let event = std::mem::take(&mut self.current_event);
        if self.data_lines.is_empty() {
            return;
        }

        let data = self.data_lines.join("\n");
        self.data_lines.clear();
        trace!(event = %event, "frame dispatched");
        frames.push(StreamFrame { event, data });
    }
}
