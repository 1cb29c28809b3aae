//! Error types for the patient resource.

use crate::framework::FrameworkError;
use thiserror::Error;

/// Errors returned by [`PatientClient`](crate::clients::PatientClient).
///
/// Backend failures are not in here: they are stored in the resource state.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PatientError {
    /// An error occurred while communicating with the resource actor.
    #[error("Resource communication error: {0}")]
    ResourceCommunicationError(#[from] FrameworkError),
}
