//! Tests for queue discovery and polling

mod fetcher;

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use super::api::{QueueAttribute, QueueService};
use super::error::{QueueError, QueueResult};
use super::types::QueueUrl;

pub(super) const ACCOUNT_BASE: &str = "https://sqs.us-east-1.amazonaws.com/123456789012";

pub(super) fn url(name: &str) -> QueueUrl {
    format!("{ACCOUNT_BASE}/{name}")
}

/// How the fake answers for one queue
#[derive(Debug, Clone)]
pub(super) enum FakeQueue {
    Counts { visible: u64, not_visible: u64 },
    Raw(HashMap<QueueAttribute, String>),
    Deleted,
    Broken(String),
}

/// In-memory queue service that records what was asked of it
#[derive(Default)]
pub(super) struct FakeQueueService {
    queues: Vec<(QueueUrl, FakeQueue)>,
    delay: Option<Duration>,
    requests: Mutex<Vec<(QueueUrl, Vec<QueueAttribute>)>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl FakeQueueService {
    pub(super) fn new() -> Self {
        Self::default()
    }

    pub(super) fn with_queue(mut self, name: &str, visible: u64, not_visible: u64) -> Self {
        self.queues.push((
            url(name),
            FakeQueue::Counts {
                visible,
                not_visible,
            },
        ));
        self
    }

    pub(super) fn with_behaviour(mut self, name: &str, behaviour: FakeQueue) -> Self {
        self.queues.push((url(name), behaviour));
        self
    }

    pub(super) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub(super) fn requests(&self) -> Vec<(QueueUrl, Vec<QueueAttribute>)> {
        self.requests.lock().unwrap().clone()
    }

    pub(super) fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QueueService for FakeQueueService {
    async fn list_queues(&self) -> QueueResult<Vec<QueueUrl>> {
        Ok(self.queues.iter().map(|(u, _)| u.clone()).collect())
    }

    async fn get_queue_attributes(
        &self,
        queue_url: &str,
        attributes: &[QueueAttribute],
    ) -> QueueResult<HashMap<QueueAttribute, String>> {
        self.requests
            .lock()
            .unwrap()
            .push((queue_url.to_string(), attributes.to_vec()));

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        let behaviour = self
            .queues
            .iter()
            .find(|(u, _)| u == queue_url)
            .map(|(_, b)| b.clone())
            .unwrap_or(FakeQueue::Deleted);

        match behaviour {
            FakeQueue::Counts {
                visible,
                not_visible,
            } => {
                let mut values = HashMap::new();
                for attribute in attributes {
                    let value = match attribute {
                        QueueAttribute::ApproximateNumberOfMessages => visible,
                        QueueAttribute::ApproximateNumberOfMessagesNotVisible => not_visible,
                    };
                    values.insert(*attribute, value.to_string());
                }
                Ok(values)
            }
            FakeQueue::Raw(values) => Ok(values),
            FakeQueue::Deleted => Err(QueueError::QueueDoesNotExist {
                queue_url: queue_url.to_string(),
            }),
            FakeQueue::Broken(message) => Err(QueueError::AttributesFailed {
                queue_url: queue_url.to_string(),
                message,
            }),
        }
    }
}
