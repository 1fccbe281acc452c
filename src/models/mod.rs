mod request;
mod snapshot;

pub use request::{SearchKind, SearchRequest, DEFAULT_PER_PAGE};
pub use snapshot::{SearchSnapshot, SearchUpdate};
