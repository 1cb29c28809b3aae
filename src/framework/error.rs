//! # Framework Errors
//!
//! Two families live here. [`FrameworkError`] describes problems talking to the resource
//! actor itself. [`ResourceError`] describes a failed backend call; it never leaves the
//! resource as an `Err`, it is folded into the stored error message instead.

/// Message shown when the backend failed without supplying one of its own.
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred while processing your request.";

/// Message shown when the network task failed for a reason that is not an HTTP problem.
pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred.";

/// Errors that can occur within the actor framework itself.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum FrameworkError {
    #[error("Resource actor closed")]
    ActorClosed,
    #[error("Resource actor dropped response channel")]
    ActorDropped,
    #[error("Resource task failed: {0}")]
    TaskFailed(String),
}

/// A failed backend call.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum ResourceError {
    /// The request never produced a response (connection refused, DNS, timeout).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The backend answered with a non-success status, or with a body we could not decode.
    #[error("API error (status {status}): {}", .message.as_deref().unwrap_or("no message"))]
    Api { status: u16, message: Option<String> },

    /// The task performing the call failed before it could report back.
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl ResourceError {
    /// The human-readable string stored in the resource state.
    ///
    /// A structured message from the backend is surfaced verbatim; everything else maps
    /// to a generic message.
    pub fn user_message(&self) -> String {
        match self {
            ResourceError::Api { message: Some(message), .. } if !message.trim().is_empty() => {
                message.clone()
            }
            ResourceError::Api { .. } | ResourceError::Transport(_) => {
                GENERIC_ERROR_MESSAGE.to_string()
            }
            ResourceError::Unexpected(_) => UNEXPECTED_ERROR_MESSAGE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_is_surfaced_verbatim() {
        let err = ResourceError::Api {
            status: 422,
            message: Some("Age must be positive".into()),
        };
        assert_eq!(err.user_message(), "Age must be positive");
    }

    #[test]
    fn missing_or_blank_message_falls_back_to_generic() {
        let none = ResourceError::Api { status: 500, message: None };
        let blank = ResourceError::Api { status: 500, message: Some("  ".into()) };
        assert_eq!(none.user_message(), GENERIC_ERROR_MESSAGE);
        assert_eq!(blank.user_message(), GENERIC_ERROR_MESSAGE);
        assert_eq!(
            ResourceError::Transport("connection refused".into()).user_message(),
            GENERIC_ERROR_MESSAGE
        );
    }

    #[test]
    fn task_failure_uses_unexpected_message() {
        let err = ResourceError::Unexpected("task panicked".into());
        assert_eq!(err.user_message(), UNEXPECTED_ERROR_MESSAGE);
    }
}
