use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default page size used by the search backend
pub const DEFAULT_PER_PAGE: u32 = 25;

/// What a search looks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchKind {
    #[default]
    Companies,
    People,
}

impl SearchKind {
    /// Path segment of the search endpoint
    pub fn path_segment(&self) -> &'static str {
        match self {
            SearchKind::Companies => "companies",
            SearchKind::People => "people",
        }
    }
}

/// Request body for the AI search endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchRequest {
    /// Natural-language query
    pub query: String,
    /// Companies or people; selects the endpoint, not sent in the body
    #[serde(skip)]
    pub kind: SearchKind,
    /// 1-based page number
    pub page: u32,
    pub per_page: u32,
    /// Client-generated id, sent as `X-Request-Id`
    #[serde(skip)]
    pub request_id: String,
}

impl SearchRequest {
    /// Create a first-page request
    pub fn new(query: impl Into<String>, kind: SearchKind) -> Self {
        Self {
            query: query.into(),
            kind,
            page: 1,
            per_page: DEFAULT_PER_PAGE,
            request_id: Uuid::new_v4().to_string(),
        }
    }

    /// Set the page (builder pattern). Pages below 1 are clamped to 1.
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    /// Set the page size (builder pattern). Zero is clamped to 1.
    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page.max(1);
        self
    }

    /// Request for the following page of the same query, with a fresh id
    pub fn next_page(&self) -> Self {
        Self {
            query: self.query.clone(),
            kind: self.kind,
            page: self.page.saturating_add(1),
            per_page: self.per_page,
            request_id: Uuid::new_v4().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_kind_default() {
        assert_eq!(SearchKind::default(), SearchKind::Companies);
    }

    #[test]
    fn test_search_kind_path_segment() {
        assert_eq!(SearchKind::Companies.path_segment(), "companies");
        assert_eq!(SearchKind::People.path_segment(), "people");
    }

    #[test]
    fn test_search_request_new() {
        let request = SearchRequest::new("fintech in Berlin", SearchKind::Companies);
        assert_eq!(request.query, "fintech in Berlin");
        assert_eq!(request.page, 1);
        assert_eq!(request.per_page, DEFAULT_PER_PAGE);
        assert!(!request.request_id.is_empty());
    }

    #[test]
    fn test_search_request_serialization() {
        let request = SearchRequest::new("cto", SearchKind::People)
            .with_page(3)
            .with_per_page(50);
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"query": "cto", "page": 3, "per_page": 50})
        );
    }

    #[test]
    fn test_builder_clamps() {
        let request = SearchRequest::new("x", SearchKind::Companies)
            .with_page(0)
            .with_per_page(0);
        assert_eq!(request.page, 1);
        assert_eq!(request.per_page, 1);
    }

    #[test]
    fn test_next_page() {
        let first = SearchRequest::new("saas", SearchKind::People).with_per_page(10);
        let second = first.next_page();
        assert_eq!(second.page, 2);
        assert_eq!(second.per_page, 10);
        assert_eq!(second.kind, SearchKind::People);
        assert_eq!(second.query, "saas");
        assert_ne!(second.request_id, first.request_id);
    }
}
