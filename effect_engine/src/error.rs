//! Contract violations reported by the scheduler.

use thiserror::Error;

/// Errors raised when a caller breaks the scheduler's preconditions.
///
/// None of these are transient: they point at a bug in the calling code and are
/// never clamped or retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchedulerError {
    #[error("effect and cycle keys must not be empty")]
    EmptyKey,

    #[error("effect '{key}' must have a positive duration")]
    ZeroDuration { key: String },

    #[error("cycle '{key}' must have a positive length")]
    ZeroLength { key: String },

    #[error("cycle '{key}' must have a positive interval")]
    ZeroInterval { key: String },
}

pub type Result<T, E = SchedulerError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_key() {
        let err = SchedulerError::ZeroDuration {
            key: "flash1".to_string(),
        };
        assert_eq!(err.to_string(), "effect 'flash1' must have a positive duration");

        let err = SchedulerError::ZeroLength {
            key: "gridbleed".to_string(),
        };
        assert!(err.to_string().contains("gridbleed"));
    }
}
