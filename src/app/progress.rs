//! Single-line progress feedback while queues are polled

use std::io::Write;

use crate::core::styles::StyleRole;
use crate::core::terminal;
use crate::queues::pool::ProgressReporter;

/// Rewrites one terminal line with `Processed n out of m queues...`
pub struct ProgressLine<W: Write + Send> {
    out: W,
    use_color: bool,
}

impl<W: Write + Send> ProgressLine<W> {
    pub fn new(out: W, use_color: bool) -> Self {
        Self { out, use_color }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> ProgressReporter for ProgressLine<W> {
    fn update(&mut self, processed: usize, total: usize) {
        let processed = StyleRole::Name.paint(&processed.to_string(), self.use_color);
        let total = StyleRole::Name.paint(&total.to_string(), self.use_color);
        let _ = write!(
            self.out,
            "\rProcessed {} out of {} queues...",
            processed, total
        );
        let _ = self.out.flush();
    }

    fn finish(&mut self) {
        let _ = terminal::clear_line(&mut self.out);
    }
}
