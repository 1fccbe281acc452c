//! Result type alias for search operations.

use super::search_error::SearchError;

/// Type alias for Results using SearchError.
///
/// # Example
///
/// ```ignore
/// use prospect_stream::error::SearchResult;
///
/// fn load() -> SearchResult<SearchConfig> {
///     SearchConfig::from_env()
/// }
/// ```
pub type SearchResult<T> = Result<T, SearchError>;
