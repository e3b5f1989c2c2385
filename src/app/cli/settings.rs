//! Effective settings: command line over configuration file over defaults

use std::path::PathBuf;

use super::args::Args;
use super::config::{ConfigError, FileConfig};
use crate::core::logging::resolve_level;
use crate::display::console::DEFAULT_CONSOLE_HOST;
use crate::queues::pool::DEFAULT_WORKERS;
use crate::queues::sqs::ConnectionSettings;

/// Environment variable that disables color when set to any value
pub const NO_COLOR_ENV: &str = "NO_COLOR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub workers: usize,
    pub include_in_flight: bool,
    pub pattern: Option<String>,
    pub watch: Option<u64>,
    pub connection: ConnectionSettings,
    pub console_host: String,
    pub use_color: bool,
    pub log_level: String,
    pub log_format: String,
    pub log_file: Option<PathBuf>,
}

/// Terminal facts that feed into settings
#[derive(Debug, Clone, Copy, Default)]
pub struct Environment {
    pub stdout_is_terminal: bool,
    pub no_color_set: bool,
}

impl Environment {
    pub fn detect() -> Self {
        Self {
            stdout_is_terminal: crate::core::terminal::stdout_is_terminal(),
            no_color_set: std::env::var_os(NO_COLOR_ENV).is_some(),
        }
    }
}

impl Settings {
    pub fn resolve(args: &Args, file: FileConfig, env: Environment) -> Result<Self, ConfigError> {
        let workers = match args.workers.or(file.workers) {
            Some(n) => positive("workers", n)?,
            None => DEFAULT_WORKERS as u64,
        };
        let watch = match args.watch.or(file.watch) {
            Some(n) => Some(positive("watch", n)?),
            None => None,
        };
        let workers = usize::try_from(workers).map_err(|_| ConfigError::Invalid {
            field: "workers".to_string(),
            message: format!("{} is too large", workers),
        })?;

        let log_file = match &args.log_file {
            Some(path) => Some(path.clone()),
            None => file.log_file.as_deref().and_then(log_file_path),
        };

        Ok(Self {
            workers,
            include_in_flight: args.include_in_flight || file.include_in_flight.unwrap_or(false),
            pattern: args.pattern.clone().or(file.pattern),
            watch,
            connection: ConnectionSettings {
                region: args.region.clone().or(file.region),
                profile: args.profile.clone().or(file.profile),
                endpoint_url: args.endpoint_url.clone().or(file.endpoint_url),
            },
            console_host: args
                .console_host
                .clone()
                .or(file.console_host)
                .unwrap_or_else(|| DEFAULT_CONSOLE_HOST.to_string()),
            use_color: resolve_color(args.color, args.no_color, file.color, env),
            log_level: resolve_level(
                args.log_level.as_deref().or(file.log_level.as_deref()),
                args.verbosity(),
            ),
            log_format: args
                .log_format
                .clone()
                .or(file.log_format)
                .unwrap_or_else(|| "text".to_string()),
            log_file,
        })
    }
}

fn positive(field: &str, value: u64) -> Result<u64, ConfigError> {
    if value == 0 {
        return Err(ConfigError::Invalid {
            field: field.to_string(),
            message: "value must be greater than 0".to_string(),
        });
    }
    Ok(value)
}

/// "none" and "-" in the file mean no log file
fn log_file_path(value: &str) -> Option<PathBuf> {
    if value.eq_ignore_ascii_case("none") || value == "-" {
        None
    } else {
        Some(PathBuf::from(value))
    }
}

/// `--no-color` wins, then `--color`, then `NO_COLOR`, then the file, then TTY detection
pub fn resolve_color(
    force_color: bool,
    no_color: bool,
    file_color: Option<bool>,
    env: Environment,
) -> bool {
    if no_color {
        return false;
    }
    if force_color {
        return true;
    }
    if env.no_color_set {
        return false;
    }
    file_color.unwrap_or(env.stdout_is_terminal)
}
