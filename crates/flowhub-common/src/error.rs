//! Error types for Flowhub
//!
//! This module defines `FlowhubError`, the application-specific error enum.
//! Semantic errors are raised as enum variants and carried through `anyhow`
//! to the caller.

/// Application-specific error types
#[derive(thiserror::Error, Debug)]
pub enum FlowhubError {
    #[error("caused: {0}")]
    IllegalArgument(String),

    #[error("application '{0}' not exist!")]
    ApplicationNotExist(i64),

    #[error("database error: {0}")]
    DatabaseError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FlowhubError::ApplicationNotExist(42);
        assert_eq!(err.to_string(), "application '42' not exist!");

        let err = FlowhubError::IllegalArgument("page_no must be >= 1".to_string());
        assert_eq!(err.to_string(), "caused: page_no must be >= 1");
    }

    #[test]
    fn test_error_downcast_through_anyhow() {
        let err: anyhow::Error = FlowhubError::ApplicationNotExist(7).into();
        assert!(matches!(
            err.downcast_ref::<FlowhubError>(),
            Some(FlowhubError::ApplicationNotExist(7))
        ));
    }
}
