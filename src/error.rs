//! Error types used by the logvisor listener registry.
//!
//! Only registration can fail. Delivery problems (timeouts, closed endpoints,
//! full queues) are handled internally by eviction and never reach emitters.

use thiserror::Error;

/// # Errors produced when managing listeners.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LogError {
    /// The id already belongs to an active listener; the existing one is untouched.
    #[error("listener {id:?} is already registered")]
    DuplicateListener {
        /// The rejected id.
        id: String,
    },

    /// A caller-provided endpoint was required but none was given.
    #[error("listener {id:?} was registered without an endpoint")]
    MissingEndpoint {
        /// The rejected id.
        id: String,
    },

    /// The delivery worker could not be spawned because no Tokio runtime is running.
    #[error("no tokio runtime available to drive listener delivery")]
    NoRuntime,
}

impl LogError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use logvisor::LogError;
    ///
    /// let err = LogError::DuplicateListener { id: "x".into() };
    /// assert_eq!(err.as_label(), "listener_duplicate");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            LogError::DuplicateListener { .. } => "listener_duplicate",
            LogError::MissingEndpoint { .. } => "listener_missing_endpoint",
            LogError::NoRuntime => "runtime_missing",
        }
    }

    /// Listener id involved in the failure, if any.
    pub fn listener_id(&self) -> Option<&str> {
        match self {
            LogError::DuplicateListener { id } | LogError::MissingEndpoint { id } => Some(id),
            LogError::NoRuntime => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_listener() {
        let err = LogError::MissingEndpoint { id: "tail".into() };
        assert_eq!(
            err.to_string(),
            "listener \"tail\" was registered without an endpoint"
        );
        assert_eq!(err.listener_id(), Some("tail"));
        assert_eq!(err.as_label(), "listener_missing_endpoint");
        assert_eq!(LogError::NoRuntime.listener_id(), None);
    }
}
