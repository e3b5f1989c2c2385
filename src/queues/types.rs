//! Queue data types

use std::cmp::Ordering;

/// Queue identifier as returned by the service (an SQS queue URL)
pub type QueueUrl = String;

/// Short display name: the last path segment of the queue URL
pub fn display_name(queue_url: &str) -> &str {
    queue_url.rsplit('/').next().unwrap_or(queue_url)
}

/// Message counts for one queue at one poll
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueSnapshot {
    queue_url: QueueUrl,
    visible: u64,
    in_flight: u64,
}

impl QueueSnapshot {
    pub fn new(queue_url: impl Into<QueueUrl>, visible: u64, in_flight: u64) -> Self {
        Self {
            queue_url: queue_url.into(),
            visible,
            in_flight,
        }
    }

    pub fn queue_url(&self) -> &str {
        &self.queue_url
    }

    pub fn name(&self) -> &str {
        display_name(&self.queue_url)
    }

    pub fn visible(&self) -> u64 {
        self.visible
    }

    pub fn in_flight(&self) -> u64 {
        self.in_flight
    }

    pub fn total(&self) -> u64 {
        self.visible.saturating_add(self.in_flight)
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Display order: descending total, then ascending name
    pub fn display_order(a: &Self, b: &Self) -> Ordering {
        b.total()
            .cmp(&a.total())
            .then_with(|| a.name().cmp(b.name()))
    }
}

/// A queue whose attributes could not be read this cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    pub queue_url: QueueUrl,
    pub reason: String,
}

/// Outcome of one poll cycle
///
/// Only non-empty snapshots are ever stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PollResult {
    snapshots: Vec<QueueSnapshot>,
    failures: Vec<FetchFailure>,
    polled: usize,
}

impl PollResult {
    pub fn new(polled: usize) -> Self {
        Self {
            polled,
            ..Self::default()
        }
    }

    /// Record a snapshot; empty snapshots are dropped. Returns whether it was kept.
    pub fn push(&mut self, snapshot: QueueSnapshot) -> bool {
        if snapshot.is_empty() {
            return false;
        }
        self.snapshots.push(snapshot);
        true
    }

    pub fn push_failure(&mut self, failure: FetchFailure) {
        self.failures.push(failure);
    }

    pub fn snapshots(&self) -> &[QueueSnapshot] {
        &self.snapshots
    }

    /// Snapshots in display order
    pub fn sorted(&self) -> Vec<&QueueSnapshot> {
        let mut sorted: Vec<&QueueSnapshot> = self.snapshots.iter().collect();
        sorted.sort_by(|a, b| QueueSnapshot::display_order(a, b));
        sorted
    }

    pub fn failures(&self) -> &[FetchFailure] {
        &self.failures
    }

    /// Number of queues polled this cycle
    pub fn polled(&self) -> usize {
        self.polled
    }

    pub fn has_messages(&self) -> bool {
        !self.snapshots.is_empty()
    }

    pub fn total_messages(&self) -> u64 {
        self.snapshots
            .iter()
            .fold(0u64, |acc, s| acc.saturating_add(s.total()))
    }
}
