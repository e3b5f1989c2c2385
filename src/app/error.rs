//! Errors that end a run before or between poll cycles

use thiserror::Error;

use super::cli::ConfigError;
use crate::core::error_handling::ContextualError;
use crate::queues::QueueError;

/// Status for fatal errors other than a bad pattern
pub const FATAL_EXIT_STATUS: i32 = 2;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid regex pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Could not start logging: {message}")]
    Logging { message: String },

    #[error(transparent)]
    Listing(QueueError),

    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

impl AppError {
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::InvalidPattern { .. } => 1,
            _ => FATAL_EXIT_STATUS,
        }
    }

    /// What was being attempted, for log context
    pub fn context(&self) -> &'static str {
        match self {
            AppError::InvalidPattern { .. } => "Compiling queue name pattern",
            AppError::Config(_) => "Loading configuration",
            AppError::Logging { .. } => "Starting logging",
            AppError::Listing(_) => "Listing queues",
            AppError::Terminal(_) => "Writing to terminal",
        }
    }
}

impl ContextualError for AppError {
    fn is_user_actionable(&self) -> bool {
        match self {
            AppError::InvalidPattern { .. } | AppError::Logging { .. } => true,
            AppError::Config(e) => e.is_user_actionable(),
            AppError::Listing(e) => e.is_user_actionable(),
            AppError::Terminal(_) => false,
        }
    }

    fn user_message(&self) -> Option<String> {
        match self {
            AppError::Config(e) => e.user_message(),
            AppError::Listing(e) => e.user_message(),
            AppError::Terminal(_) => None,
            _ => Some(self.to_string()),
        }
    }
}
