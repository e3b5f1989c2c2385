//! Shared helpers for integration tests: an in-memory queue service and
//! scripted key input.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;

use sqs_list_filled_queues::app::keys::{Key, KeySource};
use sqs_list_filled_queues::app::watch::{Monitor, MonitorSettings};
use sqs_list_filled_queues::display::{ConsoleLink, Presenter};
use sqs_list_filled_queues::queues::pool::PollOptions;
use sqs_list_filled_queues::queues::{QueueAttribute, QueueError, QueueResult, QueueService, QueueUrl};

pub const REGION: &str = "us-east-1";
const ACCOUNT_BASE: &str = "https://sqs.us-east-1.amazonaws.com/123456789012";

pub fn url(name: &str) -> QueueUrl {
    format!("{ACCOUNT_BASE}/{name}")
}

#[derive(Debug, Clone, Copy)]
enum State {
    Counts(u64, u64),
    Deleted,
    Broken,
}

/// Queues held in memory; counts can change between polls
#[derive(Default)]
pub struct MemoryQueues {
    queues: Mutex<Vec<(QueueUrl, State)>>,
    attribute_calls: AtomicUsize,
    delay: Duration,
}

impl MemoryQueues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_queue(self, name: &str, visible: u64, not_visible: u64) -> Self {
        self.push(name, State::Counts(visible, not_visible));
        self
    }

    /// Listed, but gone by the time attributes are read
    pub fn with_deleted(self, name: &str) -> Self {
        self.push(name, State::Deleted);
        self
    }

    /// Listed, but every attribute read fails
    pub fn with_broken(self, name: &str) -> Self {
        self.push(name, State::Broken);
        self
    }

    /// Every attribute read takes `delay` to answer
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn set_counts(&self, name: &str, visible: u64, not_visible: u64) {
        let target = url(name);
        let mut queues = self.queues.lock().unwrap();
        for (queue_url, state) in queues.iter_mut() {
            if *queue_url == target {
                *state = State::Counts(visible, not_visible);
            }
        }
    }

    pub fn attribute_calls(&self) -> usize {
        self.attribute_calls.load(Ordering::SeqCst)
    }

    fn push(&self, name: &str, state: State) {
        self.queues.lock().unwrap().push((url(name), state));
    }
}

#[async_trait]
impl QueueService for MemoryQueues {
    async fn list_queues(&self) -> QueueResult<Vec<QueueUrl>> {
        Ok(self
            .queues
            .lock()
            .unwrap()
            .iter()
            .map(|(queue_url, _)| queue_url.clone())
            .collect())
    }

    async fn get_queue_attributes(
        &self,
        queue_url: &str,
        attributes: &[QueueAttribute],
    ) -> QueueResult<HashMap<QueueAttribute, String>> {
        self.attribute_calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let state = self
            .queues
            .lock()
            .unwrap()
            .iter()
            .find(|(u, _)| u == queue_url)
            .map(|(_, state)| *state);

        match state {
            Some(State::Counts(visible, not_visible)) => Ok(attributes
                .iter()
                .map(|attribute| {
                    let value = match attribute {
                        QueueAttribute::ApproximateNumberOfMessages => visible,
                        QueueAttribute::ApproximateNumberOfMessagesNotVisible => not_visible,
                    };
                    (*attribute, value.to_string())
                })
                .collect()),
            Some(State::Broken) => Err(QueueError::AttributesFailed {
                queue_url: queue_url.to_string(),
                message: "throttled".to_string(),
            }),
            Some(State::Deleted) | None => Err(QueueError::QueueDoesNotExist {
                queue_url: queue_url.to_string(),
            }),
        }
    }
}

/// Keys delivered through a channel, as if typed at the terminal
pub struct ScriptedKeys {
    rx: mpsc::UnboundedReceiver<Key>,
}

impl ScriptedKeys {
    pub fn new() -> (mpsc::UnboundedSender<Key>, Self) {
        let (tx, rx) = mpsc::unbounded_channel();
        (tx, Self { rx })
    }

    /// Keys that are all waiting before the run starts
    pub fn queued(keys: &[Key]) -> Self {
        let (tx, scripted) = Self::new();
        for key in keys {
            let _ = tx.send(*key);
        }
        scripted
    }
}

#[async_trait]
impl KeySource for ScriptedKeys {
    async fn next_key(&mut self) -> Option<Key> {
        self.rx.recv().await
    }
}

/// Keys typed ahead of the countdown, which the countdown throws away,
/// followed by keys typed once it is running
pub struct TypedAheadKeys {
    stale: Vec<Key>,
    fresh: ScriptedKeys,
}

impl TypedAheadKeys {
    pub fn new(stale: &[Key], fresh: &[Key]) -> Self {
        Self {
            stale: stale.to_vec(),
            fresh: ScriptedKeys::queued(fresh),
        }
    }
}

#[async_trait]
impl KeySource for TypedAheadKeys {
    async fn next_key(&mut self) -> Option<Key> {
        if !self.stale.is_empty() {
            return Some(self.stale.remove(0));
        }
        self.fresh.next_key().await
    }

    fn discard_pending(&mut self) {
        self.stale.clear();
    }
}

pub fn settings(watch: Option<u64>, include_in_flight: bool) -> MonitorSettings {
    MonitorSettings {
        poll: PollOptions {
            concurrency: 2,
            include_in_flight,
        },
        watch,
        interactive: false,
        use_color: false,
    }
}

/// Monitor over every queue in `service`, writing plain text to a buffer
pub async fn monitor(
    service: Arc<MemoryQueues>,
    settings: MonitorSettings,
) -> Monitor<Vec<u8>> {
    let queue_urls = service.list_queues().await.unwrap();
    let presenter = Presenter::new(
        ConsoleLink::new("console.aws.amazon.com", REGION),
        settings.poll.include_in_flight,
        settings.use_color,
    );
    Monitor::new(service, queue_urls, presenter, settings, Vec::new())
}

pub fn output(monitor: Monitor<Vec<u8>>) -> String {
    String::from_utf8(monitor.into_output()).unwrap()
}
