//! Queue Error Types

use crate::core::error_handling::ContextualError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueueError {
    #[error("Queue does not exist: {queue_url}")]
    QueueDoesNotExist { queue_url: String },

    #[error("Attribute {attribute} missing for {queue_url}")]
    MissingAttribute {
        queue_url: String,
        attribute: String,
    },

    #[error("Attribute {attribute} for {queue_url} is not a count: '{value}'")]
    InvalidAttribute {
        queue_url: String,
        attribute: String,
        value: String,
    },

    #[error("Failed to list queues: {message}")]
    ListFailed { message: String },

    #[error("Failed to read attributes of {queue_url}: {message}")]
    AttributesFailed { queue_url: String, message: String },

    #[error("Worker for {queue_url} did not complete: {message}")]
    WorkerFailed { queue_url: String, message: String },
}

impl ContextualError for QueueError {
    fn is_user_actionable(&self) -> bool {
        false
    }

    fn user_message(&self) -> Option<String> {
        None
    }
}

/// Result type for queue operations
pub type QueueResult<T> = Result<T, QueueError>;
