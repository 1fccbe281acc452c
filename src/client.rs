//! Search API client.
//!
//! Sends a search request and feeds the response into a [`FrameSink`]. The
//! backend either streams `text/event-stream` frames or answers with one
//! buffered JSON body; both end up in the same sink.

use std::fmt;
use std::time::Duration;

use bytes::Bytes;
use futures_util::StreamExt;
use serde_json::Value;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::cancel::CancelToken;
use crate::config::SearchConfig;
use crate::error::{NetworkError, SearchResult, StreamError};
use crate::models::{SearchRequest, SearchSnapshot, SearchUpdate};
use crate::search::SearchSession;
use crate::sse::FrameDecoder;
use crate::traits::{
    ByteStream, FrameSink, Headers, HttpClient, HttpError, EVENT_STREAM_CONTENT_TYPE,
};

/// Header carrying the client-generated request id
pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// An accepted search response, body not yet consumed.
pub enum SearchResponse {
    /// Event stream to be decoded incrementally
    Stream(ByteStream),
    /// Whole JSON body of a non-streaming response
    Buffered(Value),
}

impl fmt::Debug for SearchResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchResponse::Stream(_) => f.write_str("SearchResponse::Stream(..)"),
            SearchResponse::Buffered(body) => {
                f.debug_tuple("SearchResponse::Buffered").field(body).finish()
            }
        }
    }
}

/// How a read loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriveOutcome {
    /// The body ended
    Completed,
    /// The token was cancelled first
    Cancelled,
}

/// Result of [`SearchClient::search`].
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    /// State at the time the loop stopped
    pub snapshot: SearchSnapshot,
    pub outcome: DriveOutcome,
}

impl SearchOutcome {
    pub fn is_cancelled(&self) -> bool {
        self.outcome == DriveOutcome::Cancelled
    }
}

/// Client for the AI search endpoint.
///
/// Generic over the transport so tests can inject
/// [`crate::adapters::MockHttpClient`].
#[derive(Debug, Clone)]
pub struct SearchClient<C: HttpClient> {
    http: C,
    config: SearchConfig,
}

impl<C: HttpClient> SearchClient<C> {
    pub fn new(http: C, config: SearchConfig) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    fn request_headers(&self, request: &SearchRequest) -> Headers {
        let mut headers = Headers::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert("Accept".to_string(), EVENT_STREAM_CONTENT_TYPE.to_string());
        headers.insert(REQUEST_ID_HEADER.to_string(), request.request_id.clone());
        if let Some(token) = &self.config.api_token {
            headers.insert("Authorization".to_string(), format!("Bearer {}", token));
        }
        headers
    }

    /// Send the request and classify the response.
    ///
    /// Non-2xx statuses fail with [`NetworkError::HttpStatus`] carrying the
    /// response body. A response without a body fails with
    /// [`StreamError::NoBody`]. Error and buffered bodies are read under the
    /// same idle timeout as event streams.
    pub async fn open(&self, request: &SearchRequest) -> SearchResult<SearchResponse> {
        let url = self.config.endpoint(request.kind);
        let body = serde_json::to_string(request).map_err(|e| NetworkError::Other {
            message: format!("Failed to encode request: {}", e),
        })?;

        info!(
            request_id = %request.request_id,
            kind = request.kind.path_segment(),
            page = request.page,
            "Starting search"
        );

        let response = self
            .http
            .post_stream(&url, &body, &self.request_headers(request))
            .await
            .map_err(|e| NetworkError::from_http(e, &url))?;

        let idle_timeout = self.config.idle_timeout;

        if !response.is_success() {
            let status = response.status;
            let message = match response.collect(idle_timeout).await {
                Ok(r) => r.text_lossy(),
                Err(e) => {
                    debug!("Could not read error body: {}", e);
                    "Unknown error".to_string()
                }
            };
            warn!(request_id = %request.request_id, status, "Search request rejected");
            return Err(NetworkError::HttpStatus { status, message }.into());
        }

        if response.body.is_none() {
            return Err(StreamError::NoBody.into());
        }

        if response.is_event_stream() {
            let body = response.body.ok_or(StreamError::NoBody)?;
            return Ok(SearchResponse::Stream(body));
        }

        debug!(
            content_type = ?response.content_type(),
            "Non-streaming search response, reading body"
        );
        let buffered = response
            .collect(idle_timeout)
            .await
            .map_err(|e| body_error(e, idle_timeout))?;
        let value: Value = buffered.json().map_err(|e| StreamError::InvalidJson {
            message: e.to_string(),
        })?;
        Ok(SearchResponse::Buffered(value))
    }

    /// Run the read loop, handing every frame to `sink` in stream order.
    ///
    /// The token is checked before each chunk read and before each frame is
    /// delivered; once it fires nothing more reaches the sink and the body is
    /// dropped, releasing the connection.
    pub async fn drive<S>(
        &self,
        response: SearchResponse,
        token: &CancelToken,
        sink: &mut S,
    ) -> SearchResult<DriveOutcome>
    where
        S: FrameSink + ?Sized,
    {
        let mut body = match response {
            SearchResponse::Buffered(value) => {
                if token.is_cancelled() {
                    return Ok(DriveOutcome::Cancelled);
                }
                sink.on_buffered(value);
                return Ok(DriveOutcome::Completed);
            }
            SearchResponse::Stream(body) => body,
        };

        let mut decoder = FrameDecoder::with_mode(self.config.dispatch_mode);
        let idle_timeout = self.config.idle_timeout;

        loop {
            let next = tokio::select! {
                biased;
                _ = token.cancelled() => {
                    debug!("Search cancelled, releasing stream");
                    return Ok(DriveOutcome::Cancelled);
                }
                next = next_chunk(&mut body, idle_timeout) => next?,
            };

            let frames = match &next {
                Some(chunk) => decoder.feed(chunk),
                None => decoder.finish(),
            };

            for frame in frames {
                if token.is_cancelled() {
                    debug!("Search cancelled mid-chunk, dropping remaining frames");
                    return Ok(DriveOutcome::Cancelled);
                }
                debug!(event = %frame.event_name(), len = frame.data.len(), "Stream frame");
                sink.on_frame(frame);
            }

            if next.is_none() {
                return Ok(DriveOutcome::Completed);
            }
        }
    }

    /// Open the request and drive it into `sink`.
    ///
    /// Cancelling while the request is still being sent stops it there.
    pub async fn run_into<S>(
        &self,
        request: &SearchRequest,
        token: &CancelToken,
        sink: &mut S,
    ) -> SearchResult<DriveOutcome>
    where
        S: FrameSink + ?Sized,
    {
        let response = tokio::select! {
            biased;
            _ = token.cancelled() => {
                debug!(request_id = %request.request_id, "Search cancelled before response");
                return Ok(DriveOutcome::Cancelled);
            }
            response = self.open(request) => response?,
        };

        let outcome = self.drive(response, token, sink).await?;
        if outcome == DriveOutcome::Completed {
            info!(request_id = %request.request_id, "Search stream finished");
        }
        Ok(outcome)
    }

    /// Run a search into a fresh [`SearchSession`].
    ///
    /// Changes are reported on `updates` when given.
    pub async fn search(
        &self,
        request: &SearchRequest,
        token: &CancelToken,
        updates: Option<mpsc::UnboundedSender<SearchUpdate>>,
    ) -> SearchResult<SearchOutcome> {
        let mut session = match updates {
            Some(tx) => SearchSession::with_updates(tx),
            None => SearchSession::new(),
        };
        let outcome = self.run_into(request, token, &mut session).await?;
        Ok(SearchOutcome {
            snapshot: session.into_snapshot(),
            outcome,
        })
    }
}

async fn next_chunk(
    body: &mut ByteStream,
    idle_timeout: Option<Duration>,
) -> SearchResult<Option<Bytes>> {
    let next = match idle_timeout {
        Some(limit) => tokio::time::timeout(limit, body.next())
            .await
            .map_err(|_| idle_expired(limit))?,
        None => body.next().await,
    };

    match next {
        Some(Ok(chunk)) => Ok(Some(chunk)),
        Some(Err(e)) => Err(connection_lost(e).into()),
        None => Ok(None),
    }
}

fn idle_expired(limit: Duration) -> StreamError {
    warn!(limit = ?limit, "Search response went idle");
    StreamError::Timeout {
        duration_ms: u64::try_from(limit.as_millis()).unwrap_or(u64::MAX),
    }
}

fn body_error(err: HttpError, idle_timeout: Option<Duration>) -> StreamError {
    match (err, idle_timeout) {
        (HttpError::Timeout(_), Some(limit)) => idle_expired(limit),
        (err, _) => connection_lost(err),
    }
}

fn connection_lost(err: HttpError) -> StreamError {
    warn!("Search stream failed: {}", err);
    StreamError::ConnectionLost {
        message: err.to_string(),
    }
}
