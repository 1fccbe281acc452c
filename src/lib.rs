//! prospect-stream - streaming client for AI company and people search
//!
//! The search backend answers with a chunked `text/event-stream` of
//! `progress` and `done` events, or with one buffered JSON body. This crate
//! decodes the stream incrementally ([`sse`]), turns frames into search state
//! ([`search`]) and drives the request with explicit cancellation
//! ([`client`]).

pub mod adapters;
pub mod cancel;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod search;
pub mod sse;
pub mod traits;
