//! Result presentation: sorted, column-aligned queue listing with console links

pub mod console;
pub mod rows;

pub use console::{ConsoleLink, DEFAULT_CONSOLE_HOST};
pub use rows::{ColumnWidths, DisplayRow};

use std::io::Write;

use crate::core::styles::StyleRole;
use crate::queues::PollResult;

pub const NO_MESSAGES: &str = "No messages found in any queue.";

/// Renders poll results to a terminal (or any writer)
#[derive(Debug, Clone)]
pub struct Presenter {
    link: ConsoleLink,
    include_in_flight: bool,
    use_color: bool,
}

impl Presenter {
    pub fn new(link: ConsoleLink, include_in_flight: bool, use_color: bool) -> Self {
        Self {
            link,
            include_in_flight,
            use_color,
        }
    }

    /// Rows in display order
    pub fn rows(&self, result: &PollResult) -> Vec<DisplayRow> {
        result
            .sorted()
            .into_iter()
            .map(|snapshot| DisplayRow::from_snapshot(snapshot, &self.link))
            .collect()
    }

    /// Write the listing: a name line and an indented link line per queue
    pub fn render<W: Write>(&self, out: &mut W, result: &PollResult) -> std::io::Result<()> {
        let rows = self.rows(result);

        if rows.is_empty() {
            writeln!(out, "{}", self.paint(StyleRole::Notice, NO_MESSAGES))?;
        } else {
            let widths = ColumnWidths::measure(&rows, self.include_in_flight);
            for row in &rows {
                writeln!(out, "{}", self.format_counts(row, &widths))?;
                writeln!(out, "    {}", row.link)?;
            }
        }

        if !result.failures().is_empty() {
            let count = result.failures().len();
            let noun = if count == 1 { "queue" } else { "queues" };
            let warning = format!("{} {} could not be read; see log for details", count, noun);
            writeln!(out, "{}", self.paint(StyleRole::Warning, &warning))?;
        }

        out.flush()
    }

    /// Timestamp header shown above each refresh in watch mode
    pub fn render_timestamp<W: Write>(
        &self,
        out: &mut W,
        at: chrono::DateTime<chrono::Local>,
    ) -> std::io::Result<()> {
        let stamp = format!("Last updated: {}", at.format("%H:%M:%S"));
        writeln!(out, "{}", self.paint(StyleRole::Dim, &stamp))
    }

    fn format_counts(&self, row: &DisplayRow, widths: &ColumnWidths) -> String {
        let name = self.paint(StyleRole::Name, &widths.pad_name(&row.name));
        let visible = self.paint(
            StyleRole::Count,
            &format!("{} msgs", widths.pad_visible(&row.visible)),
        );

        if !self.include_in_flight {
            return format!("{}: {}", name, visible);
        }

        let in_flight = self.paint(
            StyleRole::Count,
            &format!("{} in-flight", widths.pad_in_flight(&row.in_flight)),
        );
        let total = self.paint(
            StyleRole::Count,
            &format!("{} total", widths.pad_total(&row.total)),
        );
        format!("{}: {}, {}, {}", name, visible, in_flight, total)
    }

    fn paint(&self, role: StyleRole, text: &str) -> String {
        role.paint(text, self.use_color)
    }
}
