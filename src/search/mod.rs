//! Interpretation of decoded frames into search state.
//!
//! - [`payload`] pulls records and the total out of result JSON
//! - [`progress`] reads the running total from status text
//! - [`SearchSession`] holds the state of one request
//! - [`SearchSurface`] keeps at most one request active per surface

pub mod payload;
pub mod progress;
mod session;
mod surface;

pub use payload::{matched_alias, select_records, ResultPayload, RESULT_ALIASES, TOTAL_KEY};
pub use progress::extract_total;
pub use session::{FrameEffect, SearchSession, DONE_EVENT, PROGRESS_EVENT};
pub use surface::{ActiveSearch, SearchSurface, SurfaceSink};
