//! One logical search surface with at most one active stream.
//!
//! Starting a search on a surface cancels whatever search was running there
//! and resets the shared state. A superseded search may still be draining
//! frames; its sink checks its own token under the state lock, and
//! [`SearchSurface::begin`] cancels that token under the same lock, so a
//! stale frame can never reach the new search's state.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde_json::Value;
use tokio::sync::mpsc;
use tracing::debug;

use crate::cancel::CancelToken;
use crate::client::{SearchClient, SearchOutcome};
use crate::error::SearchResult;
use crate::models::{SearchRequest, SearchSnapshot, SearchUpdate};
use crate::search::session::SearchSession;
use crate::sse::StreamFrame;
use crate::traits::{FrameSink, HttpClient};

#[derive(Debug, Default)]
struct SurfaceState {
    token: CancelToken,
    session: SearchSession,
    generation: u64,
}

type SharedState = Arc<Mutex<SurfaceState>>;

fn lock(state: &SharedState) -> MutexGuard<'_, SurfaceState> {
    // Session updates cannot leave the state half-written, so a poisoned
    // lock is still usable.
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Shared search state, e.g. behind the "companies" tab.
///
/// Cheap to clone; clones share the same state.
#[derive(Debug, Clone, Default)]
pub struct SearchSurface {
    state: SharedState,
    updates: Option<mpsc::UnboundedSender<SearchUpdate>>,
}

impl SearchSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a surface whose searches report changes on `updates`.
    pub fn with_updates(updates: mpsc::UnboundedSender<SearchUpdate>) -> Self {
        Self {
            state: SharedState::default(),
            updates: Some(updates),
        }
    }

    /// Cancel the running search (if any), reset the state and hand out the
    /// token and sink for a new one.
    pub fn begin(&self) -> ActiveSearch {
        let mut state = lock(&self.state);
        state.token.cancel();

        let token = CancelToken::new();
        state.token = token.clone();
        state.session = match &self.updates {
            Some(tx) => SearchSession::with_updates(tx.clone()),
            None => SearchSession::new(),
        };
        state.generation += 1;
        debug!(generation = state.generation, "Search surface reset");

        ActiveSearch {
            token: token.clone(),
            sink: SurfaceSink {
                state: Arc::clone(&self.state),
                token,
            },
        }
    }

    /// Start `request` on this surface and read it to the end.
    ///
    /// Returns `Cancelled` when the search was superseded or
    /// [`cancel`](Self::cancel)led; the snapshot then reflects whatever the
    /// surface holds at that moment.
    pub async fn run<C: HttpClient>(
        &self,
        client: &SearchClient<C>,
        request: &SearchRequest,
    ) -> SearchResult<SearchOutcome> {
        let ActiveSearch { token, mut sink } = self.begin();
        let outcome = client.run_into(request, &token, &mut sink).await?;
        Ok(SearchOutcome {
            snapshot: self.snapshot(),
            outcome,
        })
    }

    /// Cancel the running search without starting another. State is kept.
    pub fn cancel(&self) {
        lock(&self.state).token.cancel();
    }

    pub fn snapshot(&self) -> SearchSnapshot {
        lock(&self.state).session.snapshot().clone()
    }

    /// Number of searches started on this surface.
    pub fn generation(&self) -> u64 {
        lock(&self.state).generation
    }
}

/// Handle for the search most recently started on a surface.
#[derive(Debug)]
pub struct ActiveSearch {
    pub token: CancelToken,
    pub sink: SurfaceSink,
}

/// Sink writing into a surface's shared state while its search is current.
#[derive(Debug)]
pub struct SurfaceSink {
    state: SharedState,
    token: CancelToken,
}

impl FrameSink for SurfaceSink {
    fn on_frame(&mut self, frame: StreamFrame) {
        let mut state = lock(&self.state);
        if self.token.is_cancelled() {
            debug!(event = %frame.event_name(), "Dropping frame from superseded search");
            return;
        }
        state.session.apply_frame(&frame);
    }

    fn on_buffered(&mut self, body: Value) {
        let mut state = lock(&self.state);
        if self.token.is_cancelled() {
            return;
        }
        state.session.apply_buffered(&body);
    }
}
