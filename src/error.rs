use thiserror::Error;

use crate::suggest::ProviderError;

#[derive(Debug, Error)]
pub enum StreetfindError {
    #[error("Suggestion provider unavailable: {0}")]
    Provider(#[from] ProviderError),

    #[error("Failed to start lookup runtime: {0}")]
    Runtime(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
