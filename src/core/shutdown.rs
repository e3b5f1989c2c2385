//! Shutdown coordination
//!
//! Turns process signals into a broadcast the refresh loop can select on.
//! A second signal forces an immediate exit after restoring the terminal.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::broadcast;

use crate::core::terminal;

/// Exit status used when a repeated signal forces termination
pub const FORCED_EXIT_STATUS: i32 = 130;

/// Coordinates graceful shutdown across the application
pub struct ShutdownCoordinator {
    pub shutdown_tx: broadcast::Sender<()>,
}

impl ShutdownCoordinator {
    pub fn new() -> (Self, broadcast::Receiver<()>) {
        let (shutdown_tx, shutdown_rx) = broadcast::channel(8);
        (Self { shutdown_tx }, shutdown_rx)
    }

    /// Run a future with signal handlers installed, handing it the shutdown receiver.
    pub async fn guard<F, Fut, R>(future_fn: F) -> R
    where
        F: FnOnce(broadcast::Receiver<()>) -> Fut,
        Fut: std::future::Future<Output = R>,
    {
        let (coordinator, shutdown_rx) = Self::new();
        setup_signal_handlers(coordinator.shutdown_tx.clone());
        future_fn(shutdown_rx).await
    }
}

/// Resolve once a shutdown has been broadcast.
///
/// A closed channel can never deliver a shutdown, so it never resolves.
pub async fn wait_for_shutdown(shutdown_rx: &mut broadcast::Receiver<()>) {
    match shutdown_rx.recv().await {
        Ok(()) | Err(broadcast::error::RecvError::Lagged(_)) => {}
        Err(broadcast::error::RecvError::Closed) => std::future::pending::<()>().await,
    }
}

/// Broadcast the shutdown; returns true when this was a repeated signal
fn record_signal(tx: &broadcast::Sender<()>, counter: &AtomicUsize) -> bool {
    let prev = counter.fetch_add(1, Ordering::AcqRel);
    let _ = tx.send(());
    prev >= 1
}

fn force_exit() -> ! {
    log::warn!("Second interrupt received; exiting immediately");
    terminal::restore();
    std::process::exit(FORCED_EXIT_STATUS);
}

fn setup_signal_handlers(shutdown_tx: broadcast::Sender<()>) {
    let signal_count = Arc::new(AtomicUsize::new(0));

    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }

        use tokio::signal::unix::{signal, SignalKind};
        let signals = [
            SignalKind::interrupt(),
            SignalKind::terminate(),
            SignalKind::hangup(),
            SignalKind::quit(),
        ];

        for kind in signals {
            let tx = shutdown_tx.clone();
            let sig_ctr = signal_count.clone();

            tokio::spawn(async move {
                if let Ok(mut sig) = signal(kind) {
                    while sig.recv().await.is_some() {
                        if record_signal(&tx, &sig_ctr) {
                            force_exit();
                        }
                    }
                }
            });
        }
    }

    #[cfg(not(unix))]
    {
        tokio::spawn(async move {
            while tokio::signal::ctrl_c().await.is_ok() {
                if record_signal(&shutdown_tx, &signal_count) {
                    force_exit();
                }
            }
        });
    }
}
