//! The queueing service seen by the rest of the crate
//!
//! Production code talks to SQS through [`crate::queues::sqs::SqsQueueService`];
//! tests plug in in-memory doubles.

use async_trait::async_trait;
use std::collections::HashMap;

use super::error::QueueResult;
use super::types::QueueUrl;

/// Attributes this tool reads from a queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueueAttribute {
    /// Messages available for retrieval
    ApproximateNumberOfMessages,
    /// Messages received but not yet deleted (in flight)
    ApproximateNumberOfMessagesNotVisible,
}

impl QueueAttribute {
    pub fn as_str(self) -> &'static str {
        match self {
            QueueAttribute::ApproximateNumberOfMessages => "ApproximateNumberOfMessages",
            QueueAttribute::ApproximateNumberOfMessagesNotVisible => {
                "ApproximateNumberOfMessagesNotVisible"
            }
        }
    }

    /// Attributes to request for one fetch
    pub fn for_fetch(include_in_flight: bool) -> Vec<QueueAttribute> {
        let mut names = vec![QueueAttribute::ApproximateNumberOfMessages];
        if include_in_flight {
            names.push(QueueAttribute::ApproximateNumberOfMessagesNotVisible);
        }
        names
    }
}

impl std::fmt::Display for QueueAttribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Minimal queue management API
///
/// Implementations must be safe to share across concurrent fetch workers.
#[async_trait]
pub trait QueueService: Send + Sync {
    /// Every queue URL visible to the caller
    async fn list_queues(&self) -> QueueResult<Vec<QueueUrl>>;

    /// Raw attribute values for one queue.
    ///
    /// Fails with [`crate::queues::QueueError::QueueDoesNotExist`] when the
    /// queue is gone.
    async fn get_queue_attributes(
        &self,
        queue_url: &str,
        attributes: &[QueueAttribute],
    ) -> QueueResult<HashMap<QueueAttribute, String>>;
}
