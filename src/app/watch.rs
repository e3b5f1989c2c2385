//! Poll / display / countdown cycle
//!
//! ```text
//! Polling ──> Displaying ──(watch)──> CountingDown ──(timer, R)──> Polling
//!                 │                        │
//!                 └──(no watch)──> exit    └──(Q, interrupt)──> Terminated
//! ```
//! An interrupt moves to `Terminated` from any state.

use std::io::Write;
use std::sync::Arc;
use tokio::sync::broadcast;

use super::countdown::{Countdown, CountdownOutcome};
use super::error::FATAL_EXIT_STATUS;
use super::keys::KeySource;
use super::progress::ProgressLine;
use crate::core::shutdown::wait_for_shutdown;
use crate::core::styles::StyleRole;
use crate::core::terminal::{self, RawModeGuard};
use crate::display::Presenter;
use crate::queues::pool::{poll_all, NoProgress, PollOptions, ProgressReporter};
use crate::queues::{PollResult, QueueService, QueueUrl};

pub const FAREWELL: &str = "Program terminated by user.";

/// How a run ended, and the process status it maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Single pass found at least one queue with messages
    MessagesFound,
    /// Single pass found nothing
    Empty,
    /// Single pass found nothing, but some queues could not be read
    Incomplete,
    /// Quit key pressed during a countdown
    Quit,
    /// Interrupt signal or key
    Interrupted,
}

impl RunOutcome {
    pub fn exit_code(self) -> i32 {
        match self {
            RunOutcome::MessagesFound => 1,
            RunOutcome::Incomplete => FATAL_EXIT_STATUS,
            RunOutcome::Empty | RunOutcome::Quit | RunOutcome::Interrupted => 0,
        }
    }
}

/// Blank any status line and print the termination message
pub fn write_farewell<W: Write>(
    out: &mut W,
    interactive: bool,
    use_color: bool,
) -> std::io::Result<()> {
    if interactive {
        terminal::clear_line(out)?;
    }
    writeln!(out, "{}", StyleRole::Farewell.paint(FAREWELL, use_color))?;
    out.flush()
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum LoopState {
    Polling,
    Displaying(PollResult),
    CountingDown,
    Terminated(RunOutcome),
}

#[derive(Debug, Clone, Copy)]
pub struct MonitorSettings {
    pub poll: PollOptions,
    /// Refresh interval in seconds; `None` runs a single pass
    pub watch: Option<u64>,
    /// Output is a terminal: show progress and redraw in place
    pub interactive: bool,
    pub use_color: bool,
}

/// Drives poll cycles for a fixed set of queues
pub struct Monitor<W: Write + Send> {
    service: Arc<dyn QueueService>,
    queue_urls: Vec<QueueUrl>,
    presenter: Presenter,
    settings: MonitorSettings,
    out: W,
}

impl<W: Write + Send> Monitor<W> {
    pub fn new(
        service: Arc<dyn QueueService>,
        queue_urls: Vec<QueueUrl>,
        presenter: Presenter,
        settings: MonitorSettings,
        out: W,
    ) -> Self {
        Self {
            service,
            queue_urls,
            presenter,
            settings,
            out,
        }
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Run until a single pass completes, or (in watch mode) until the user
    /// quits or an interrupt arrives. Raw mode is held only while counting
    /// down and is released on every way out of the countdown.
    pub async fn run(
        &mut self,
        keys: &mut dyn KeySource,
        shutdown_rx: &mut broadcast::Receiver<()>,
    ) -> std::io::Result<RunOutcome> {
        let mut state = LoopState::Polling;

        loop {
            state = match state {
                LoopState::Polling => match self.poll(shutdown_rx).await {
                    Some(result) => LoopState::Displaying(result),
                    None => LoopState::Terminated(RunOutcome::Interrupted),
                },
                LoopState::Displaying(result) => {
                    self.display(&result)?;
                    match self.settings.watch {
                        Some(_) => LoopState::CountingDown,
                        None if result.has_messages() => {
                            return Ok(RunOutcome::MessagesFound);
                        }
                        None if !result.failures().is_empty() => {
                            return Ok(RunOutcome::Incomplete);
                        }
                        None => return Ok(RunOutcome::Empty),
                    }
                }
                LoopState::CountingDown => match self.count_down(keys, shutdown_rx).await? {
                    CountdownOutcome::Elapsed | CountdownOutcome::Refresh => LoopState::Polling,
                    CountdownOutcome::Quit => LoopState::Terminated(RunOutcome::Quit),
                    CountdownOutcome::Interrupted => {
                        LoopState::Terminated(RunOutcome::Interrupted)
                    }
                },
                LoopState::Terminated(outcome) => {
                    write_farewell(
                        &mut self.out,
                        self.settings.interactive,
                        self.settings.use_color,
                    )?;
                    log::info!("Terminated ({:?})", outcome);
                    return Ok(outcome);
                }
            };
        }
    }

    /// One full poll cycle; `None` when interrupted
    async fn poll(&mut self, shutdown_rx: &mut broadcast::Receiver<()>) -> Option<PollResult> {
        let service = Arc::clone(&self.service);
        let options = self.settings.poll;
        let queue_urls = &self.queue_urls;

        let mut progress: Box<dyn ProgressReporter + '_> = if self.settings.interactive {
            Box::new(ProgressLine::new(&mut self.out, self.settings.use_color))
        } else {
            Box::new(NoProgress)
        };

        tokio::select! {
            result = poll_all(service, queue_urls, options, progress.as_mut()) => Some(result),
            _ = wait_for_shutdown(shutdown_rx) => {
                log::debug!("Interrupted while polling");
                None
            }
        }
    }

    fn display(&mut self, result: &PollResult) -> std::io::Result<()> {
        if self.settings.interactive {
            if self.settings.watch.is_some() {
                terminal::clear_screen(&mut self.out)?;
            } else {
                terminal::clear_line(&mut self.out)?;
            }
        }
        if self.settings.watch.is_some() {
            self.presenter
                .render_timestamp(&mut self.out, chrono::Local::now())?;
        }
        self.presenter.render(&mut self.out, result)
    }

    async fn count_down(
        &mut self,
        keys: &mut dyn KeySource,
        shutdown_rx: &mut broadcast::Receiver<()>,
    ) -> std::io::Result<CountdownOutcome> {
        let seconds = self.settings.watch.unwrap_or(0);
        let _raw_mode = if keys.needs_raw_mode() {
            Some(RawModeGuard::acquire()?)
        } else {
            None
        };
        // Keys typed while polling belong to no countdown
        keys.discard_pending();

        Countdown::new(seconds)
            .run(&mut self.out, keys, shutdown_rx)
            .await
    }
}
