//! Common test utilities for integration tests.
//!
//! # Example
//!
//! ```ignore
//! use common::{search_client, MockHttpConfig};
//!
//! let mock = MockHttpConfig::new().with_sse(COMPANIES_URL, &[...]).build();
//! let client = search_client(&mock);
//! ```

pub mod mocks;

#[allow(unused_imports)]
pub use mocks::*;

use prospect_stream::client::SearchClient;
use prospect_stream::config::SearchConfig;

/// Base URL used by mock-backed clients.
pub const BASE_URL: &str = "http://search.test";
#[allow(dead_code)]
pub const COMPANIES_URL: &str = "http://search.test/v1/search/companies";
#[allow(dead_code)]
pub const PEOPLE_URL: &str = "http://search.test/v1/search/people";

/// Render one `event:` + `data:` pair the way the backend writes it.
#[allow(dead_code)]
pub fn sse_frame(event: &str, data: &str) -> String {
    format!("event: {}\ndata: {}\n\n", event, data)
}

/// The three-frame exchange used across tests: two progress frames and a
/// `done` with one company and the total.
#[allow(dead_code)]
pub fn standard_stream() -> String {
    [
        sse_frame("progress", "Initializing..."),
        sse_frame("progress", "Found 7 total companies"),
        sse_frame("done", r#"{"content":[{"id":"1"}],"total":7}"#),
    ]
    .concat()
}

/// Split `text` into chunks of `size` bytes, ignoring char boundaries.
#[allow(dead_code)]
pub fn byte_chunks(text: &str, size: usize) -> Vec<Vec<u8>> {
    text.as_bytes().chunks(size).map(<[u8]>::to_vec).collect()
}

/// Client wired to `mock` with test defaults.
#[allow(dead_code)]
pub fn search_client(mock: &MockHttpClient) -> SearchClient<MockHttpClient> {
    prospect_stream::logging::init_test();
    SearchClient::new(mock.clone(), SearchConfig::default().with_base_url(BASE_URL))
}
