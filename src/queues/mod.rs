//! Queue discovery and polling
//!
//! Everything between "list the queues" and "here are the ones holding
//! messages": the service abstraction, the name filter, the per-queue
//! attribute fetch and the bounded worker pool that fans it out.

pub mod api;
pub mod error;
pub mod fetcher;
pub mod filter;
pub mod pool;
pub mod sqs;
pub mod types;

pub use api::{QueueAttribute, QueueService};
pub use error::{QueueError, QueueResult};
pub use types::{display_name, FetchFailure, PollResult, QueueSnapshot, QueueUrl};

#[cfg(test)]
mod tests;
