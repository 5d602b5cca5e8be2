//! Error types for the recommendation core.
//!
//! Only two failure modes are fatal to a caller: an unknown primary user
//! and total store unavailability. Everything else (a failed scorer, a
//! failed extraction method, missing market data) degrades to
//! smaller-but-valid output inside the engine and never surfaces here.

use thiserror::Error;

/// Errors the recommendation core can return to a caller.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The requested user does not exist in the user store.
    #[error("user not found: {user_id}")]
    UserNotFound {
        /// Id that failed to resolve.
        user_id: String,
    },

    /// A backing store could not be reached at all.
    #[error("store unavailable: {store}: {message}")]
    StoreUnavailable {
        /// Which store failed ("users" or "courses").
        store: &'static str,
        /// Upstream failure description.
        message: String,
    },
}

/// Convenience alias used across the engine crates.
pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_include_context() {
        let err = EngineError::UserNotFound {
            user_id: "u42".into(),
        };
        assert_eq!(err.to_string(), "user not found: u42");

        let err = EngineError::StoreUnavailable {
            store: "courses",
            message: "connection refused".into(),
        };
        assert!(err.to_string().contains("courses"));
        assert!(err.to_string().contains("connection refused"));
    }
}
