//! Bounded fan-out of attribute fetches over all candidate queues

use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use super::api::QueueService;
use super::error::QueueError;
use super::fetcher::fetch_snapshot;
use super::types::{FetchFailure, PollResult, QueueUrl};

/// Worker pool size when none is configured
pub const DEFAULT_WORKERS: usize = 4;

/// Receives `processed/total` after every completed fetch
pub trait ProgressReporter: Send {
    fn update(&mut self, processed: usize, total: usize);

    /// Called once after the pool has drained
    fn finish(&mut self) {}
}

/// Reporter that discards progress
#[derive(Debug, Default)]
pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn update(&mut self, _processed: usize, _total: usize) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollOptions {
    /// Maximum number of fetches in flight at once
    pub concurrency: usize,
    pub include_in_flight: bool,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_WORKERS,
            include_in_flight: false,
        }
    }
}

/// Fetch every queue with at most `options.concurrency` requests in flight.
///
/// Results are gathered in completion order and the pool is always drained
/// before returning. A failing queue is recorded in the result's failures
/// and does not affect the other queues.
pub async fn poll_all(
    service: Arc<dyn QueueService>,
    queue_urls: &[QueueUrl],
    options: PollOptions,
    progress: &mut (dyn ProgressReporter + '_),
) -> PollResult {
    let total = queue_urls.len();
    let mut result = PollResult::new(total);
    let permits = Arc::new(Semaphore::new(options.concurrency.max(1)));
    let mut workers = JoinSet::new();

    log::debug!(
        "Polling {} queues with {} workers",
        total,
        options.concurrency.max(1)
    );

    for queue_url in queue_urls {
        let service = Arc::clone(&service);
        let permits = Arc::clone(&permits);
        let queue_url = queue_url.clone();
        let include_in_flight = options.include_in_flight;

        workers.spawn(async move {
            let _permit = match permits.acquire_owned().await {
                Ok(permit) => permit,
                Err(e) => {
                    let failure = QueueError::WorkerFailed {
                        queue_url: queue_url.clone(),
                        message: e.to_string(),
                    };
                    return (queue_url, Err(failure));
                }
            };

            let outcome = AssertUnwindSafe(fetch_snapshot(
                service.as_ref(),
                &queue_url,
                include_in_flight,
            ))
            .catch_unwind()
            .await
            .unwrap_or_else(|_| {
                Err(QueueError::WorkerFailed {
                    queue_url: queue_url.clone(),
                    message: "fetch panicked".to_string(),
                })
            });

            (queue_url, outcome)
        });
    }

    let mut processed = 0;
    while let Some(joined) = workers.join_next().await {
        processed += 1;
        progress.update(processed, total);

        match joined {
            Ok((_, Ok(Some(snapshot)))) => {
                result.push(snapshot);
            }
            Ok((_, Ok(None))) => {}
            Ok((queue_url, Err(e))) => {
                log::warn!("Skipping {}: {}", queue_url, e);
                result.push_failure(FetchFailure {
                    queue_url,
                    reason: e.to_string(),
                });
            }
            Err(e) => {
                log::warn!("Fetch worker did not complete: {}", e);
                result.push_failure(FetchFailure {
                    queue_url: String::new(),
                    reason: e.to_string(),
                });
            }
        }
    }

    progress.finish();
    log::info!(
        "Poll complete: {} messages in {} of {} queues, {} failed",
        result.total_messages(),
        result.snapshots().len(),
        result.polled(),
        result.failures().len()
    );

    result
}
