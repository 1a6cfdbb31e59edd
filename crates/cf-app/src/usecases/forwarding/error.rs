/// Rejected start/stop requests. Never fatal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ForwardingError {
    #[error("Forwarding is already active")]
    AlreadyActive,

    #[error("Forwarding is not active")]
    NotActive,
}

/// Result of `stop_forwarding`. Stopping an inactive controller is a no-op,
/// not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopOutcome {
    Stopped,
    NotActive,
}

impl StopOutcome {
    /// For callers that treat "nothing to stop" as a failure.
    pub fn into_result(self) -> Result<(), ForwardingError> {
        match self {
            StopOutcome::Stopped => Ok(()),
            StopOutcome::NotActive => Err(ForwardingError::NotActive),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_active_maps_to_error() {
        assert_eq!(StopOutcome::Stopped.into_result(), Ok(()));
        assert_eq!(
            StopOutcome::NotActive.into_result(),
            Err(ForwardingError::NotActive)
        );
    }
}
