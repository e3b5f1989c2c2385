//! Display rows and column alignment

use unicode_width::UnicodeWidthStr;

use super::console::ConsoleLink;
use crate::queues::QueueSnapshot;

/// One rendered queue: name, counts as strings, and console link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    pub name: String,
    pub visible: String,
    pub in_flight: String,
    pub total: String,
    pub link: String,
}

impl DisplayRow {
    pub fn from_snapshot(snapshot: &QueueSnapshot, link: &ConsoleLink) -> Self {
        Self {
            name: snapshot.name().to_string(),
            visible: snapshot.visible().to_string(),
            in_flight: snapshot.in_flight().to_string(),
            total: snapshot.total().to_string(),
            link: link.for_queue(snapshot.queue_url()),
        }
    }
}

/// Widest value of each column across all rows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnWidths {
    pub name: usize,
    pub visible: usize,
    pub in_flight: usize,
    pub total: usize,
}

impl ColumnWidths {
    /// In-flight and total columns are only measured when they are shown
    pub fn measure(rows: &[DisplayRow], include_in_flight: bool) -> Self {
        let widest = |field: fn(&DisplayRow) -> &str| {
            rows.iter()
                .map(|row| field(row).width())
                .max()
                .unwrap_or(0)
        };

        Self {
            name: widest(|r| r.name.as_str()),
            visible: widest(|r| r.visible.as_str()),
            in_flight: if include_in_flight {
                widest(|r| r.in_flight.as_str())
            } else {
                0
            },
            total: if include_in_flight {
                widest(|r| r.total.as_str())
            } else {
                0
            },
        }
    }

    pub fn pad_name(&self, name: &str) -> String {
        pad_right(name, self.name)
    }

    pub fn pad_visible(&self, value: &str) -> String {
        pad_left(value, self.visible)
    }

    pub fn pad_in_flight(&self, value: &str) -> String {
        pad_left(value, self.in_flight)
    }

    pub fn pad_total(&self, value: &str) -> String {
        pad_left(value, self.total)
    }
}

fn padding(text: &str, width: usize) -> String {
    " ".repeat(width.saturating_sub(text.width()))
}

fn pad_right(text: &str, width: usize) -> String {
    format!("{}{}", text, padding(text, width))
}

fn pad_left(text: &str, width: usize) -> String {
    format!("{}{}", padding(text, width), text)
}
