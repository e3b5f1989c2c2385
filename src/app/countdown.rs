//! Cancellable countdown between refreshes
//!
//! Ticks once per second. Each tick waits for a key, a shutdown broadcast or
//! the end of the second, whichever comes first.

use std::io::Write;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::time::{sleep_until, Instant};

use super::keys::{Key, KeySource};
use crate::core::shutdown::wait_for_shutdown;
use crate::core::terminal;

/// Interval used by `--watch` without a value
pub const DEFAULT_WATCH_SECONDS: u64 = 60;

const TICK: Duration = Duration::from_secs(1);

/// How a countdown ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownOutcome {
    /// Reached zero
    Elapsed,
    /// Refresh key pressed
    Refresh,
    /// Quit key pressed
    Quit,
    /// Interrupt key or signal
    Interrupted,
}

#[derive(Debug, Clone, Copy)]
pub struct Countdown {
    seconds: u64,
}

impl Countdown {
    pub fn new(seconds: u64) -> Self {
        Self { seconds }
    }

    /// Run the countdown, rewriting one status line per tick.
    ///
    /// An unrecognised key ends the current tick early; the countdown
    /// continues from the next second.
    pub async fn run<W: Write>(
        &self,
        out: &mut W,
        keys: &mut dyn KeySource,
        shutdown_rx: &mut broadcast::Receiver<()>,
    ) -> std::io::Result<CountdownOutcome> {
        let width = self.seconds.to_string().len();
        let mut keys_open = true;

        for remaining in (1..=self.seconds).rev() {
            write!(
                out,
                "\rRefresh in {:>width$} seconds (press 'R' to force refresh)",
                remaining,
                width = width
            )?;
            out.flush()?;

            let deadline = Instant::now() + TICK;
            loop {
                tokio::select! {
                    _ = wait_for_shutdown(shutdown_rx) => {
                        terminal::clear_line(out)?;
                        return Ok(CountdownOutcome::Interrupted);
                    }
                    _ = sleep_until(deadline) => break,
                    key = keys.next_key(), if keys_open => match key {
                        Some(Key::Refresh) => {
                            terminal::clear_line(out)?;
                            return Ok(CountdownOutcome::Refresh);
                        }
                        Some(Key::Quit) => {
                            terminal::clear_line(out)?;
                            return Ok(CountdownOutcome::Quit);
                        }
                        Some(Key::Interrupt) => {
                            terminal::clear_line(out)?;
                            return Ok(CountdownOutcome::Interrupted);
                        }
                        Some(Key::Other) => {
                            log::trace!("Ignoring unrecognised key");
                            break;
                        }
                        None => {
                            log::debug!("Key input closed; countdown continues on timer only");
                            keys_open = false;
                        }
                    },
                }
            }
        }

        terminal::clear_line(out)?;
        Ok(CountdownOutcome::Elapsed)
    }
}
