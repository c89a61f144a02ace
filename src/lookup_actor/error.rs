//! Error types for the lookup service.

use thiserror::Error;

/// Errors that can end a lookup.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LookupError {
    /// Neither search leg produced a listing with a URL.
    #[error("No results found")]
    NotFound,

    /// A network step of the cascade failed.
    #[error("Fetch failed for {url}: {reason}")]
    FetchFailed { url: String, reason: String },

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

/// Coarse classification used as a structured log field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupErrorKind {
    NotFound,
    FetchFailed,
    Channel,
}

impl LookupError {
    pub fn kind(&self) -> LookupErrorKind {
        match self {
            LookupError::NotFound => LookupErrorKind::NotFound,
            LookupError::FetchFailed { .. } => LookupErrorKind::FetchFailed,
            LookupError::ActorCommunicationError(_) => LookupErrorKind::Channel,
        }
    }
}

impl From<String> for LookupError {
    fn from(msg: String) -> Self {
        LookupError::ActorCommunicationError(msg)
    }
}
