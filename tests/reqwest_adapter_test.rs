//! Search client over real HTTP against a wiremock server.

mod common;

use common::standard_stream;
use prospect_stream::adapters::ReqwestHttpClient;
use prospect_stream::cancel::CancelToken;
use prospect_stream::client::{SearchClient, SearchResponse};
use prospect_stream::config::SearchConfig;
use prospect_stream::error::{NetworkError, SearchError};
use prospect_stream::models::{SearchKind, SearchRequest};
use serde_json::json;
use wiremock::matchers::{body_json, header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> SearchClient<ReqwestHttpClient> {
    SearchClient::new(
        ReqwestHttpClient::new(),
        SearchConfig::default()
            .with_base_url(server.uri())
            .with_api_token("test-token"),
    )
}

#[tokio::test]
async fn test_streams_event_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/search/companies"))
        .and(header("accept", "text/event-stream"))
        .and(header("authorization", "Bearer test-token"))
        .and(header_exists("x-request-id"))
        .and(body_json(json!({"query": "solar installers", "page": 1, "per_page": 25})))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(standard_stream(), "text/event-stream"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let outcome = client_for(&server)
        .search(
            &SearchRequest::new("solar installers", SearchKind::Companies),
            &CancelToken::new(),
            None,
        )
        .await
        .unwrap();

    assert!(!outcome.is_cancelled());
    assert_eq!(outcome.snapshot.total, Some(7));
    assert_eq!(outcome.snapshot.records, vec![json!({"id": "1"})]);
}

#[tokio::test]
async fn test_json_response_is_buffered() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/search/people"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"people": [{"id": "p1"}], "total": 12})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let request = SearchRequest::new("cfo", SearchKind::People);

    let response = client.open(&request).await.unwrap();
    assert!(matches!(response, SearchResponse::Buffered(_)));

    let outcome = client
        .search(&request, &CancelToken::new(), None)
        .await
        .unwrap();
    assert_eq!(outcome.snapshot.records, vec![json!({"id": "p1"})]);
    assert_eq!(outcome.snapshot.total, Some(12));
}

#[tokio::test]
async fn test_error_status_surfaces_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database unavailable"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .search(
            &SearchRequest::new("x", SearchKind::Companies),
            &CancelToken::new(),
            None,
        )
        .await
        .unwrap_err();

    assert_eq!(
        err,
        SearchError::Network(NetworkError::HttpStatus {
            status: 500,
            message: "database unavailable".to_string(),
        })
    );
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_connection_refused() {
    let client = SearchClient::new(
        ReqwestHttpClient::new(),
        SearchConfig::default().with_base_url("http://127.0.0.1:59999"),
    );

    let err = client
        .search(
            &SearchRequest::new("x", SearchKind::Companies),
            &CancelToken::new(),
            None,
        )
        .await
        .unwrap_err();

    assert!(matches!(err, SearchError::Network(_)));
}
