//! Error reporting shared by the startup path
//!
//! User-actionable errors (bad flags, bad config, bad pattern) are shown
//! verbatim. System errors (AWS, terminal I/O) get a short context line with
//! the detail available at debug level.

/// Errors that can tell whether their message is meant for the user
///
/// When `is_user_actionable()` returns `true`, `user_message()` must return
/// `Some(message)`; otherwise it returns `None`.
pub trait ContextualError: std::error::Error {
    fn is_user_actionable(&self) -> bool;

    fn user_message(&self) -> Option<String>;
}

/// The single line shown to the user for a fatal error
pub fn fatal_message<E: ContextualError>(error: &E, operation_context: &str) -> String {
    match error.user_message() {
        Some(msg) if error.is_user_actionable() => msg,
        _ => format!("{}: {}", operation_context, error),
    }
}

/// Log a fatal error with detail level based on its specificity
pub fn log_error_with_context<E: ContextualError + std::fmt::Debug>(
    error: &E,
    operation_context: &str,
) {
    log::error!("FATAL: {}", fatal_message(error, operation_context));
    log::debug!("DETAIL: {}", error);
    log::debug!("DEBUG_DETAILS: {:?}", error);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;

    #[derive(Debug)]
    struct TestUserError {
        message: String,
    }

    impl fmt::Display for TestUserError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{}", self.message)
        }
    }

    impl std::error::Error for TestUserError {}

    impl ContextualError for TestUserError {
        fn is_user_actionable(&self) -> bool {
            true
        }

        fn user_message(&self) -> Option<String> {
            Some(self.message.clone())
        }
    }

    #[derive(Debug)]
    struct TestSystemError {
        internal_details: String,
    }

    impl fmt::Display for TestSystemError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "service error: {}", self.internal_details)
        }
    }

    impl std::error::Error for TestSystemError {}

    impl ContextualError for TestSystemError {
        fn is_user_actionable(&self) -> bool {
            false
        }

        fn user_message(&self) -> Option<String> {
            None
        }
    }

    #[test]
    fn test_user_actionable_error_shows_specific_message() {
        let error = TestUserError {
            message: "workers must be at least 1".to_string(),
        };
        assert_eq!(
            fatal_message(&error, "Loading configuration"),
            "workers must be at least 1"
        );
    }

    #[test]
    fn test_system_error_uses_context_prefix() {
        let error = TestSystemError {
            internal_details: "Connection refused".to_string(),
        };
        assert_eq!(
            fatal_message(&error, "Listing queues"),
            "Listing queues: service error: Connection refused"
        );
    }

    #[test]
    fn test_log_error_with_context_does_not_panic() {
        let error = TestSystemError {
            internal_details: "timeout".to_string(),
        };
        log_error_with_context(&error, "Listing queues");
    }
}
