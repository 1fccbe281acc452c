//! Error handling for search requests.
//!
//! - **Error Categories**: High-level classification for handling decisions
//! - **Domain-specific Errors**: Network and Stream errors
//! - **Unified Error Type**: `SearchError` consolidates them with config errors
//! - **Result Type Alias**: `SearchResult<T>` for consistent return types
//!
//! | Category | Description | Retryable |
//! |----------|-------------|-----------|
//! | Network | Connection, timeout, dropped stream | Yes |
//! | Server | Backend errors (5xx), empty or invalid body | Yes |
//! | Client | Rejected request, invalid URL | No |
//! | User | Authentication, permissions | No |
//! | Configuration | Bad environment values | No |
//!
//! Cancellation never produces an error; see `client::DriveOutcome`.

mod category;
mod network;
mod result;
mod search_error;
mod stream;

pub use category::ErrorCategory;
pub use network::NetworkError;
pub use result::SearchResult;
pub use search_error::SearchError;
pub use stream::StreamError;
