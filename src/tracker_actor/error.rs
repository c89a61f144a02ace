//! Error types for the place tracker.

use thiserror::Error;

/// Errors that can occur while tracking the current place.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TrackerError {
    /// The lookup request could not be handed to the background context.
    #[error("Lookup dispatch failed: {0}")]
    DispatchFailed(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for TrackerError {
    fn from(msg: String) -> Self {
        TrackerError::ActorCommunicationError(msg)
    }
}
