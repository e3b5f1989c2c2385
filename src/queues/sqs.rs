//! Amazon SQS implementation of [`QueueService`]

use async_trait::async_trait;
use aws_sdk_sqs::error::{DisplayErrorContext, ProvideErrorMetadata};
use aws_sdk_sqs::types::QueueAttributeName;
use std::collections::HashMap;

use super::api::{QueueAttribute, QueueService};
use super::error::{QueueError, QueueResult};
use super::types::QueueUrl;

/// Page size for ListQueues; the service only returns a continuation token
/// when a page size is given.
const LIST_PAGE_SIZE: i32 = 1000;

/// Legacy error code some endpoints still return for a missing queue
const NON_EXISTENT_QUEUE_CODE: &str = "AWS.SimpleQueueService.NonExistentQueue";

/// How to reach the service
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionSettings {
    pub region: Option<String>,
    pub profile: Option<String>,
    pub endpoint_url: Option<String>,
}

/// SQS client wrapper. Cheap to share; the SDK client is reference counted.
#[derive(Debug, Clone)]
pub struct SqsQueueService {
    client: aws_sdk_sqs::Client,
    region: Option<String>,
}

impl SqsQueueService {
    /// Load AWS configuration (environment, profile, overrides) and build a client
    pub async fn connect(settings: &ConnectionSettings) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(region) = &settings.region {
            loader = loader.region(aws_config::Region::new(region.clone()));
        }
        if let Some(profile) = &settings.profile {
            loader = loader.profile_name(profile);
        }
        if let Some(endpoint) = &settings.endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }

        let config = loader.load().await;
        let region = config.region().map(|r| r.to_string());
        log::debug!("AWS configuration loaded (region: {:?})", region);

        Self {
            client: aws_sdk_sqs::Client::new(&config),
            region,
        }
    }

    /// Region the client resolved to, if any
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }
}

fn to_sdk_attribute(attribute: QueueAttribute) -> QueueAttributeName {
    match attribute {
        QueueAttribute::ApproximateNumberOfMessages => {
            QueueAttributeName::ApproximateNumberOfMessages
        }
        QueueAttribute::ApproximateNumberOfMessagesNotVisible => {
            QueueAttributeName::ApproximateNumberOfMessagesNotVisible
        }
    }
}

#[async_trait]
impl QueueService for SqsQueueService {
    async fn list_queues(&self) -> QueueResult<Vec<QueueUrl>> {
        let mut queue_urls = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            let page = self
                .client
                .list_queues()
                .max_results(LIST_PAGE_SIZE)
                .set_next_token(next_token.take())
                .send()
                .await
                .map_err(|e| QueueError::ListFailed {
                    message: DisplayErrorContext(&e).to_string(),
                })?;

            queue_urls.extend(page.queue_urls().iter().cloned());

            match page.next_token() {
                Some(token) if !token.is_empty() => next_token = Some(token.to_string()),
                _ => break,
            }
        }

        log::debug!("Listed {} queues", queue_urls.len());
        Ok(queue_urls)
    }

    async fn get_queue_attributes(
        &self,
        queue_url: &str,
        attributes: &[QueueAttribute],
    ) -> QueueResult<HashMap<QueueAttribute, String>> {
        let names = attributes.iter().copied().map(to_sdk_attribute).collect();

        let output = self
            .client
            .get_queue_attributes()
            .queue_url(queue_url)
            .set_attribute_names(Some(names))
            .send()
            .await
            .map_err(|e| {
                let missing = e.as_service_error().is_some_and(|service_error| {
                    service_error.is_queue_does_not_exist()
                        || service_error.code() == Some(NON_EXISTENT_QUEUE_CODE)
                });
                if missing {
                    QueueError::QueueDoesNotExist {
                        queue_url: queue_url.to_string(),
                    }
                } else {
                    QueueError::AttributesFailed {
                        queue_url: queue_url.to_string(),
                        message: DisplayErrorContext(&e).to_string(),
                    }
                }
            })?;

        let mut values = HashMap::new();
        if let Some(returned) = output.attributes() {
            for attribute in attributes {
                if let Some(value) = returned.get(&to_sdk_attribute(*attribute)) {
                    values.insert(*attribute, value.clone());
                }
            }
        }

        Ok(values)
    }
}
