use std::collections::HashMap;

use super::{url, FakeQueue, FakeQueueService};
use crate::queues::api::QueueAttribute;
use crate::queues::error::QueueError;
use crate::queues::fetcher::fetch_snapshot;

#[tokio::test]
async fn test_in_flight_excluded_by_default() {
    let service = FakeQueueService::new().with_queue("orders", 3, 7);

    let snapshot = fetch_snapshot(&service, &url("orders"), false)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(snapshot.visible(), 3);
    assert_eq!(snapshot.in_flight(), 0);
    assert_eq!(snapshot.total(), 3);
    assert_eq!(
        service.requests()[0].1,
        vec![QueueAttribute::ApproximateNumberOfMessages]
    );
}

#[tokio::test]
async fn test_in_flight_included_when_enabled() {
    let service = FakeQueueService::new().with_queue("orders", 3, 7);

    let snapshot = fetch_snapshot(&service, &url("orders"), true)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(snapshot.in_flight(), 7);
    assert_eq!(snapshot.total(), 10);
    assert_eq!(service.requests()[0].1.len(), 2);
}

#[tokio::test]
async fn test_empty_queue_is_absent() {
    let service = FakeQueueService::new().with_queue("idle", 0, 0);
    assert_eq!(fetch_snapshot(&service, &url("idle"), true).await, Ok(None));
}

#[tokio::test]
async fn test_in_flight_only_counts_when_enabled() {
    let service = FakeQueueService::new().with_queue("busy", 0, 4);

    assert_eq!(fetch_snapshot(&service, &url("busy"), false).await, Ok(None));
    let snapshot = fetch_snapshot(&service, &url("busy"), true)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(snapshot.total(), 4);
}

#[tokio::test]
async fn test_deleted_queue_is_absent_not_error() {
    let service = FakeQueueService::new().with_behaviour("gone", FakeQueue::Deleted);
    assert_eq!(fetch_snapshot(&service, &url("gone"), false).await, Ok(None));
}

#[tokio::test]
async fn test_other_failures_propagate() {
    let service = FakeQueueService::new()
        .with_behaviour("locked", FakeQueue::Broken("AccessDenied".to_string()));

    let err = fetch_snapshot(&service, &url("locked"), false)
        .await
        .unwrap_err();
    assert!(matches!(err, QueueError::AttributesFailed { .. }));
    assert_eq!(service.requests().len(), 1, "failures are not retried");
}

#[tokio::test]
async fn test_missing_in_flight_attribute_counts_as_zero() {
    let mut values = HashMap::new();
    values.insert(QueueAttribute::ApproximateNumberOfMessages, "2".to_string());
    let service = FakeQueueService::new().with_behaviour("partial", FakeQueue::Raw(values));

    let snapshot = fetch_snapshot(&service, &url("partial"), true)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(snapshot.total(), 2);
}

#[tokio::test]
async fn test_missing_visible_attribute_is_error() {
    let service =
        FakeQueueService::new().with_behaviour("odd", FakeQueue::Raw(HashMap::new()));

    let err = fetch_snapshot(&service, &url("odd"), false)
        .await
        .unwrap_err();
    assert!(matches!(err, QueueError::MissingAttribute { .. }));
}

#[tokio::test]
async fn test_non_numeric_attribute_is_error() {
    let mut values = HashMap::new();
    values.insert(
        QueueAttribute::ApproximateNumberOfMessages,
        "many".to_string(),
    );
    let service = FakeQueueService::new().with_behaviour("odd", FakeQueue::Raw(values));

    let err = fetch_snapshot(&service, &url("odd"), false)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        QueueError::InvalidAttribute {
            queue_url: url("odd"),
            attribute: "ApproximateNumberOfMessages".to_string(),
            value: "many".to_string(),
        }
    );
}
