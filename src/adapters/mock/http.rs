//! Mock HTTP client for testing.
//!
//! Provides a configurable mock HTTP client that can return predefined
//! responses, event streams or errors for testing purposes.

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream;
use futures_util::StreamExt;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use crate::traits::{
    ByteStream, Headers, HttpClient, HttpError, Response, StreamingResponse,
    EVENT_STREAM_CONTENT_TYPE,
};

/// A recorded HTTP request for verification in tests.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// HTTP method
    pub method: String,
    /// Request URL
    pub url: String,
    /// Request headers
    pub headers: Headers,
    /// Request body
    pub body: Option<String>,
}

/// Configuration for a mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return a buffered response with the given status, headers and body
    Success(Response),
    /// Fail before any response arrives
    Error(HttpError),
    /// `200 text/event-stream` delivering the chunks, then ending
    Stream(Vec<Bytes>),
    /// Deliver the chunks, then fail the body with the error
    StreamError(Vec<Bytes>, HttpError),
    /// Deliver the chunks, then stay open without ending
    StreamPending(Vec<Bytes>),
    /// Send the response's status, headers and body, then stay open
    BodyPending(Response),
    /// `200 text/event-stream` response that exposes no body
    NoBody,
}

impl MockResponse {
    /// Buffered JSON response.
    pub fn json(status: u16, body: &str) -> Self {
        let mut headers = Headers::new();
        headers.insert("content-type".to_string(), "application/json".to_string());
        MockResponse::Success(Response::with_headers(
            status,
            headers,
            Bytes::from(body.to_string()),
        ))
    }

    /// Event stream split into the given text chunks.
    pub fn sse<I, S>(chunks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        MockResponse::Stream(
            chunks
                .into_iter()
                .map(|c| Bytes::from(c.into()))
                .collect(),
        )
    }

    fn into_streaming(self) -> Result<StreamingResponse, HttpError> {
        let chunked =
            |chunks: Vec<Bytes>| stream::iter(chunks.into_iter().map(Ok::<Bytes, HttpError>));

        let response = match self {
            MockResponse::Error(err) => return Err(err),
            MockResponse::Success(Response {
                status,
                headers,
                body,
            }) => {
                let body: ByteStream = Box::pin(stream::once(async move { Ok(body) }));
                StreamingResponse::new(status, headers, body)
            }
            MockResponse::Stream(chunks) => {
                StreamingResponse::new(200, event_stream_headers(), Box::pin(chunked(chunks)))
            }
            MockResponse::StreamError(chunks, err) => {
                let body = chunked(chunks).chain(stream::once(async move { Err(err) }));
                StreamingResponse::new(200, event_stream_headers(), Box::pin(body))
            }
            MockResponse::StreamPending(chunks) => {
                let body = chunked(chunks).chain(stream::pending());
                StreamingResponse::new(200, event_stream_headers(), Box::pin(body))
            }
            MockResponse::BodyPending(Response {
                status,
                headers,
                body,
            }) => {
                let body = stream::once(async move { Ok::<Bytes, HttpError>(body) })
                    .chain(stream::pending());
                StreamingResponse::new(status, headers, Box::pin(body))
            }
            MockResponse::NoBody => StreamingResponse::without_body(200, event_stream_headers()),
        };
        Ok(response)
    }
}

fn event_stream_headers() -> Headers {
    let mut headers = Headers::new();
    headers.insert(
        "content-type".to_string(),
        EVENT_STREAM_CONTENT_TYPE.to_string(),
    );
    headers
}

/// Mock HTTP client for testing.
///
/// Responses are taken from the queue first (in order), then from the
/// per-URL table (exact, then prefix match), then from the default.
///
/// # Example
///
/// ```ignore
/// use prospect_stream::adapters::mock::{MockHttpClient, MockResponse};
/// use prospect_stream::traits::{HttpClient, Headers};
///
/// let client = MockHttpClient::new();
/// client.set_response(
///     "https://api.example.com/v1/search/people",
///     MockResponse::sse(["event: progress\ndata: Searching\n"]),
/// );
///
/// let response = client.post_stream("https://api.example.com/v1/search/people", "{}", &Headers::new()).await?;
/// assert!(response.is_event_stream());
/// assert_eq!(client.get_requests().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct MockHttpClient {
    /// Configured responses by URL pattern
    responses: Arc<Mutex<HashMap<String, MockResponse>>>,
    /// One-shot responses served before anything else
    queued: Arc<Mutex<VecDeque<MockResponse>>>,
    /// Default response when no specific match
    default_response: Arc<Mutex<Option<MockResponse>>>,
    /// Recorded requests for verification
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockHttpClient {
    /// Create a new mock HTTP client.
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            queued: Arc::new(Mutex::new(VecDeque::new())),
            default_response: Arc::new(Mutex::new(None)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Set a response for a specific URL.
    pub fn set_response(&self, url: &str, response: MockResponse) {
        let mut responses = self.responses.lock().unwrap();
        responses.insert(url.to_string(), response);
    }

    /// Queue a response for the next request, whatever its URL.
    pub fn enqueue_response(&self, response: MockResponse) {
        self.queued.lock().unwrap().push_back(response);
    }

    /// Set a default response for URLs without specific matches.
    pub fn set_default_response(&self, response: MockResponse) {
        let mut default = self.default_response.lock().unwrap();
        *default = Some(response);
    }

    /// Get all recorded requests.
    pub fn get_requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Clear all recorded requests.
    pub fn clear_requests(&self) {
        self.requests.lock().unwrap().clear();
    }

    /// Record a request.
    fn record_request(&self, method: &str, url: &str, headers: &Headers, body: Option<String>) {
        let mut requests = self.requests.lock().unwrap();
        requests.push(RecordedRequest {
            method: method.to_string(),
            url: url.to_string(),
            headers: headers.clone(),
            body,
        });
    }

    /// Get the response for a URL.
    fn get_response(&self, url: &str) -> Option<MockResponse> {
        if let Some(response) = self.queued.lock().unwrap().pop_front() {
            return Some(response);
        }

        let responses = self.responses.lock().unwrap();

        // First try exact match
        if let Some(response) = responses.get(url) {
            return Some(response.clone());
        }

        // Then try prefix match (for URL patterns)
        for (pattern, response) in responses.iter() {
            if url.starts_with(pattern) {
                return Some(response.clone());
            }
        }

        // Finally use default
        let default = self.default_response.lock().unwrap();
        default.clone()
    }
}

impl Default for MockHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn post_stream(
        &self,
        url: &str,
        body: &str,
        headers: &Headers,
    ) -> Result<StreamingResponse, HttpError> {
        self.record_request("POST", url, headers, Some(body.to_string()));

        match self.get_response(url) {
            Some(response) => response.into_streaming(),
            None => Err(HttpError::Other(format!("No mock response for URL: {}", url))),
        }
    }
}
