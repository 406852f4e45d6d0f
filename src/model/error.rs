//! Error taxonomy for search and collection synchronization

use thiserror::Error;

/// Failure of a search request or a favorites/playlist mutation.
///
/// Every variant is caught at the controller and shown as a toast; none of them
/// reach the render loop.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Transport failure, non-success status, or undecodable body
    #[error("Network error: {0}")]
    Network(String),

    /// The track is already in the target collection
    #[error("{0}")]
    AlreadyExists(String),

    /// A required field was empty
    #[error("{0}")]
    Validation(String),

    /// The addressed playlist or track does not exist on the server
    #[error("Not found: {0}")]
    NotFound(String),

    /// No session, or the backend rejected the token
    #[error("Not signed in")]
    Unauthenticated,
}

impl From<reqwest::Error> for SyncError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            SyncError::Network(format!("Failed to decode response: {}", error))
        } else {
            SyncError::Network(error.to_string())
        }
    }
}

pub type SyncResult<T> = std::result::Result<T, SyncError>;
