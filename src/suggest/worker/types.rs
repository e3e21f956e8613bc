//! Fetch worker message types

use tokio_util::sync::CancellationToken;

use crate::suggest::suggestion::Suggestions;
use crate::suggest::term::SearchTerm;

/// Lookup to run on the worker
#[derive(Debug)]
pub struct FetchRequest {
    pub term: SearchTerm,
    /// Generation the session was in when it issued this lookup
    pub generation: u64,
    /// Cancelled when the owning session detaches
    pub liveness: CancellationToken,
}

/// Outcome of a lookup
#[derive(Debug)]
pub enum FetchResponse {
    Loaded {
        term: SearchTerm,
        suggestions: Suggestions,
        generation: u64,
    },
    Failed {
        term: SearchTerm,
        message: String,
        generation: u64,
    },
}

impl FetchResponse {
    pub fn generation(&self) -> u64 {
        match self {
            FetchResponse::Loaded { generation, .. } | FetchResponse::Failed { generation, .. } => {
                *generation
            }
        }
    }

    pub fn term(&self) -> &SearchTerm {
        match self {
            FetchResponse::Loaded { term, .. } | FetchResponse::Failed { term, .. } => term,
        }
    }
}
