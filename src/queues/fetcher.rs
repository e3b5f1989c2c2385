//! Per-queue attribute fetch

use std::collections::HashMap;

use super::api::{QueueAttribute, QueueService};
use super::error::{QueueError, QueueResult};
use super::types::QueueSnapshot;

/// Read the message counts of one queue.
///
/// Returns `Ok(None)` when the queue holds no messages or no longer exists
/// (it may have been deleted between listing and polling). Any other failure
/// is returned to the caller untouched and is not retried.
pub async fn fetch_snapshot(
    service: &dyn QueueService,
    queue_url: &str,
    include_in_flight: bool,
) -> QueueResult<Option<QueueSnapshot>> {
    let attributes = QueueAttribute::for_fetch(include_in_flight);

    let values = match service.get_queue_attributes(queue_url, &attributes).await {
        Ok(values) => values,
        Err(QueueError::QueueDoesNotExist { .. }) => {
            log::debug!("Queue {} no longer exists; skipping", queue_url);
            return Ok(None);
        }
        Err(e) => return Err(e),
    };

    let visible = parse_count(
        queue_url,
        &values,
        QueueAttribute::ApproximateNumberOfMessages,
    )?
    .ok_or_else(|| QueueError::MissingAttribute {
        queue_url: queue_url.to_string(),
        attribute: QueueAttribute::ApproximateNumberOfMessages.to_string(),
    })?;

    let in_flight = if include_in_flight {
        parse_count(
            queue_url,
            &values,
            QueueAttribute::ApproximateNumberOfMessagesNotVisible,
        )?
        .unwrap_or(0)
    } else {
        0
    };

    let snapshot = QueueSnapshot::new(queue_url, visible, in_flight);
    log::trace!(
        "{}: {} visible, {} in flight",
        snapshot.name(),
        visible,
        in_flight
    );

    Ok((!snapshot.is_empty()).then_some(snapshot))
}

fn parse_count(
    queue_url: &str,
    values: &HashMap<QueueAttribute, String>,
    attribute: QueueAttribute,
) -> QueueResult<Option<u64>> {
    values
        .get(&attribute)
        .map(|raw| {
            raw.trim()
                .parse::<u64>()
                .map_err(|_| QueueError::InvalidAttribute {
                    queue_url: queue_url.to_string(),
                    attribute: attribute.to_string(),
                    value: raw.clone(),
                })
        })
        .transpose()
}
