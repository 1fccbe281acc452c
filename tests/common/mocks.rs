//! Mock implementations for test fixtures.
//!
//! This module re-exports the mock implementations from
//! `prospect_stream::adapters::mock` and provides a builder for common
//! response setups.

pub use prospect_stream::adapters::mock::{MockHttpClient, MockResponse};
#[allow(unused_imports)]
pub use prospect_stream::traits::{Headers, HttpClient, HttpError};

use bytes::Bytes;

/// Configuration for setting up mock HTTP responses.
#[allow(dead_code)]
pub struct MockHttpConfig {
    client: MockHttpClient,
}

#[allow(dead_code)]
impl MockHttpConfig {
    /// Creates a new mock HTTP configuration.
    pub fn new() -> Self {
        Self {
            client: MockHttpClient::new(),
        }
    }

    /// Configures an event stream delivered in the given chunks.
    pub fn with_sse(self, url: &str, chunks: &[&str]) -> Self {
        self.client
            .set_response(url, MockResponse::sse(chunks.iter().copied()));
        self
    }

    /// Configures an event stream from raw byte chunks.
    pub fn with_sse_bytes(self, url: &str, chunks: Vec<Vec<u8>>) -> Self {
        self.client.set_response(
            url,
            MockResponse::Stream(chunks.into_iter().map(Bytes::from).collect()),
        );
        self
    }

    /// Configures a buffered JSON response.
    pub fn with_json_response(self, url: &str, status: u16, json: &str) -> Self {
        self.client.set_response(url, MockResponse::json(status, json));
        self
    }

    /// Queues a stream that sends `chunks` and then never ends.
    pub fn then_pending(self, chunks: &[&str]) -> Self {
        self.client.enqueue_response(MockResponse::StreamPending(
            chunks.iter().map(|c| Bytes::from(c.to_string())).collect(),
        ));
        self
    }

    /// Queues a stream that sends `chunks` and ends.
    pub fn then_sse(self, chunks: &[&str]) -> Self {
        self.client
            .enqueue_response(MockResponse::sse(chunks.iter().copied()));
        self
    }

    /// Builds the configured MockHttpClient.
    pub fn build(self) -> MockHttpClient {
        self.client
    }
}

impl Default for MockHttpConfig {
    fn default() -> Self {
        Self::new()
    }
}
