//! Mock implementations for testing.
//!
//! - [`MockHttpClient`] - HTTP client with configurable responses and event streams

pub mod http;

pub use http::{MockHttpClient, MockResponse, RecordedRequest};
