//! Suggestion fetch worker
//!
//! Runs provider lookups on a background thread so the session thread never
//! blocks on the network. Each request carries the generation it was issued
//! under; the session applies a response only if that generation is still
//! current.
//!
//! ## Architecture
//!
//! - One thread per attached session, hosting a current-thread tokio runtime
//! - Every request runs as its own task, so a slow lookup never delays a later one
//! - Responses travel back over `std::sync::mpsc` and are drained by `Session::tick`
//! - Dropping the request sender stops the worker

pub mod thread;
pub mod types;

pub use thread::spawn_worker;
pub use types::{FetchRequest, FetchResponse};
