//! Application startup: settings, logging, queue discovery, then the monitor

use std::io::Write;
use std::sync::Arc;
use tokio::sync::broadcast;

use super::cli::settings::resolve_color;
use super::cli::{Args, Environment, FileConfig, Settings};
use super::error::AppError;
use super::keys::{KeySource, NoKeys, TerminalKeys};
use super::watch::{write_farewell, Monitor, MonitorSettings, RunOutcome};
use crate::core::error_handling::{fatal_message, log_error_with_context, ContextualError};
use crate::core::logging::init_logging;
use crate::core::shutdown::{wait_for_shutdown, ShutdownCoordinator};
use crate::core::terminal;
use crate::display::console::{ConsoleLink, FALLBACK_REGION};
use crate::display::Presenter;
use crate::queues::filter::{filter_queues, NameFilter};
use crate::queues::pool::PollOptions;
use crate::queues::sqs::SqsQueueService;
use crate::queues::{QueueService, QueueUrl};

/// Run the application and return the process exit status
pub async fn startup() -> i32 {
    let env = Environment::detect();

    // Help styling can only follow what is known before parsing
    let args = match Args::try_parse_styled(
        std::env::args_os(),
        resolve_color(false, false, None, env),
    ) {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return e.exit_code();
        }
    };

    match run(args, env).await {
        Ok(outcome) => outcome.exit_code(),
        Err(e) => {
            report(&e);
            e.exit_code()
        }
    }
}

async fn run(args: Args, env: Environment) -> Result<RunOutcome, AppError> {
    let file = FileConfig::load(args.config_file.as_deref())?;
    let settings = Settings::resolve(&args, file, env)?;
    start_logging(&settings)?;
    log::debug!("Effective settings: {:?}", settings);

    // A bad pattern is reported before any network traffic
    let filter = NameFilter::from_option(settings.pattern.as_deref()).map_err(|source| {
        AppError::InvalidPattern {
            pattern: settings.pattern.clone().unwrap_or_default(),
            source,
        }
    })?;

    let interactive = env.stdout_is_terminal;
    ShutdownCoordinator::guard(|mut shutdown_rx| async move {
        monitor_queues(settings, filter, interactive, &mut shutdown_rx).await
    })
    .await
}

/// Everything after startup checks; an interrupt at any point ends the run
/// with the termination message.
async fn monitor_queues(
    settings: Settings,
    filter: Option<NameFilter>,
    interactive: bool,
    shutdown_rx: &mut broadcast::Receiver<()>,
) -> Result<RunOutcome, AppError> {
    let mut stdout = std::io::stdout();
    if interactive {
        write!(stdout, "Reading list of queues...")?;
        stdout.flush()?;
    }

    let service = tokio::select! {
        service = SqsQueueService::connect(&settings.connection) => service,
        _ = wait_for_shutdown(shutdown_rx) => {
            write_farewell(&mut stdout, interactive, settings.use_color)?;
            return Ok(RunOutcome::Interrupted);
        }
    };
    let region = service
        .region()
        .unwrap_or_else(|| {
            log::warn!("No AWS region configured; console links use {}", FALLBACK_REGION);
            FALLBACK_REGION
        })
        .to_string();

    let queue_urls = match discover_queues(
        &service,
        filter.as_ref(),
        &mut stdout,
        interactive,
        shutdown_rx,
    )
    .await?
    {
        Some(queue_urls) => queue_urls,
        None => {
            write_farewell(&mut stdout, interactive, settings.use_color)?;
            return Ok(RunOutcome::Interrupted);
        }
    };

    let presenter = Presenter::new(
        ConsoleLink::new(&settings.console_host, &region),
        settings.include_in_flight,
        settings.use_color,
    );
    let monitor_settings = MonitorSettings {
        poll: PollOptions {
            concurrency: settings.workers,
            include_in_flight: settings.include_in_flight,
        },
        watch: settings.watch,
        interactive,
        use_color: settings.use_color,
    };
    let mut monitor = Monitor::new(
        Arc::new(service),
        queue_urls,
        presenter,
        monitor_settings,
        stdout,
    );

    let mut keys: Box<dyn KeySource> = if settings.watch.is_some() && terminal::stdin_is_terminal()
    {
        Box::new(TerminalKeys::new())
    } else {
        Box::new(NoKeys)
    };

    Ok(monitor.run(keys.as_mut(), shutdown_rx).await?)
}

/// List and filter the candidate queues, printing the filter summary.
///
/// Returns `None` when interrupted before the listing completes.
async fn discover_queues<W: Write>(
    service: &dyn QueueService,
    filter: Option<&NameFilter>,
    out: &mut W,
    interactive: bool,
    shutdown_rx: &mut broadcast::Receiver<()>,
) -> Result<Option<Vec<QueueUrl>>, AppError> {
    let queue_urls = tokio::select! {
        listed = service.list_queues() => listed.map_err(AppError::Listing)?,
        _ = wait_for_shutdown(shutdown_rx) => {
            log::debug!("Interrupted while listing queues");
            return Ok(None);
        }
    };
    log::info!("Found {} queues", queue_urls.len());

    let total = queue_urls.len();
    let queue_urls = filter_queues(queue_urls, filter);
    if let Some(filter) = filter {
        if interactive {
            terminal::clear_line(out)?;
        }
        writeln!(
            out,
            "Filtered {} queues to {} matching pattern '{}'",
            total,
            queue_urls.len(),
            filter.pattern()
        )?;
    }
    Ok(Some(queue_urls))
}

fn start_logging(settings: &Settings) -> Result<(), AppError> {
    colored::control::set_override(settings.use_color);
    let log_file = settings
        .log_file
        .as_ref()
        .map(|p| p.to_string_lossy().to_string());
    init_logging(
        Some(&settings.log_level),
        Some(&settings.log_format),
        log_file.as_deref(),
        settings.use_color,
    )
    .map_err(|e| AppError::Logging {
        message: e.to_string(),
    })
}

/// User-actionable errors go straight to stderr; anything else through the log
fn report(error: &AppError) {
    if error.is_user_actionable() {
        eprintln!("Error: {}", fatal_message(error, error.context()));
        log::debug!("DETAIL: {:?}", error);
    } else {
        if terminal::stdout_is_terminal() {
            // End the status line left by "Reading list of queues..."
            eprintln!();
        }
        log_error_with_context(error, error.context());
    }
}
