//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`HttpClient`] - HTTP transport for the search endpoint
//! - [`FrameSink`] - Receiver of decoded stream frames

pub mod http;
pub mod sse;

pub use http::{
    header_value, ByteStream, Headers, HttpClient, HttpError, Response, StreamingResponse,
    EVENT_STREAM_CONTENT_TYPE,
};
pub use sse::{FrameSink, RecordingSink};
