//! Incremental Server-Sent Events decoding.
//!
//! The search backend speaks a simplified SSE dialect:
//! - `event: <name>` - names the next frame
//! - `data: <payload>` - dispatches a frame immediately
//! - Lines starting with `:` - comments / heartbeats (ignored)
//! - Anything else (including empty lines) - ignored
//!
//! Standard blank-line dispatch is available through [`DispatchMode::BlankLine`].
//!
//! # Module structure
//! - `events` - Frame and line types
//! - `parser` - Line classification and the stateful [`FrameDecoder`]
//! - `utf8` - Streaming UTF-8 decoding used by the decoder

mod events;
mod parser;
mod utf8;

pub use events::{DispatchMode, SseLine, StreamFrame, DEFAULT_EVENT_NAME};
pub use parser::{parse_sse_line, FrameDecoder};
pub use utf8::Utf8Decoder;
