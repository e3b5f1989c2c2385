//! Deep links into the SQS web console

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

pub const DEFAULT_CONSOLE_HOST: &str = "console.aws.amazon.com";

/// Region used for links when the AWS configuration resolves none
pub const FALLBACK_REGION: &str = "us-east-1";

const SQS_CONSOLE_PATH: &str = "sqs/v2/home";

// Everything except unreserved characters, so the whole queue URL
// survives as a single fragment segment.
const QUEUE_URL_ESCAPE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Builds console links for one region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleLink {
    base: String,
}

impl ConsoleLink {
    pub fn new(console_host: &str, region: &str) -> Self {
        Self {
            base: format!(
                "https://{}/{}?region={}",
                console_host.trim_end_matches('/'),
                SQS_CONSOLE_PATH,
                region
            ),
        }
    }

    /// Link for the default console host, falling back to us-east-1
    pub fn for_region(region: Option<&str>) -> Self {
        Self::new(DEFAULT_CONSOLE_HOST, region.unwrap_or(FALLBACK_REGION))
    }

    /// Link that opens the detail view of `queue_url`
    pub fn for_queue(&self, queue_url: &str) -> String {
        format!(
            "{}#/queues/{}",
            self.base,
            utf8_percent_encode(queue_url, QUEUE_URL_ESCAPE)
        )
    }
}
