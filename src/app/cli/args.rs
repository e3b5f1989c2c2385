//! Command-line arguments
//!
//! Every option is optional at this level so that values missing from the
//! command line can be filled from the configuration file. Defaults are
//! applied when settings are resolved.

use clap::{ArgAction, CommandFactory, FromArgMatches, Parser};
use std::ffi::OsString;
use std::path::PathBuf;

use crate::app::countdown::DEFAULT_WATCH_SECONDS;
use crate::core::styles::palette_to_clap;
use crate::core::version::long_version;

#[derive(Parser, Debug, Clone, Default, PartialEq)]
#[command(name = "sqs-list-filled-queues")]
#[command(about = "List SQS queues that have at least one message, optionally refreshing periodically")]
#[command(after_help = "Exit status is 1 when a single pass finds messages or the pattern is invalid.")]
pub struct Args {
    /// Update every [n] seconds (60 if no value is given)
    #[arg(
        short = 'w',
        long = "watch",
        value_name = "n",
        num_args = 0..=1,
        default_missing_value = DEFAULT_WATCH_SECONDS.to_string(),
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub watch: Option<u64>,

    /// Number of concurrent attribute fetches (default: 4)
    #[arg(
        short = 't',
        long = "workers",
        value_name = "N",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub workers: Option<u64>,

    /// Include messages in flight (being processed) in the count
    #[arg(short = 'f', long = "include-in-flight", action = ArgAction::SetTrue)]
    pub include_in_flight: bool,

    /// Filter queues by name with a case-insensitive regex (matches the queue name, not the URL)
    #[arg(short = 'p', long = "pattern", value_name = "REGEX")]
    pub pattern: Option<String>,

    /// Configuration file path
    #[arg(short = 'c', long = "config-file", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// AWS region override
    #[arg(long = "region", value_name = "REGION")]
    pub region: Option<String>,

    /// AWS shared-config profile
    #[arg(long = "profile", value_name = "NAME")]
    pub profile: Option<String>,

    /// Custom SQS endpoint, e.g. a local emulator
    #[arg(long = "endpoint-url", value_name = "URL")]
    pub endpoint_url: Option<String>,

    /// Console host used in queue links
    #[arg(long = "console-host", value_name = "HOST")]
    pub console_host: Option<String>,

    /// Force colored output (overrides TTY detection and NO_COLOR)
    #[arg(long = "color", action = ArgAction::SetTrue, conflicts_with = "no_color")]
    pub color: bool,

    /// Disable colored output
    #[arg(long = "no-color", action = ArgAction::SetTrue)]
    pub no_color: bool,

    /// More log output (repeatable)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    /// Less log output (repeatable)
    #[arg(short = 'q', long = "quiet", action = ArgAction::Count)]
    pub quiet: u8,

    /// Log level
    #[arg(long = "log-level", value_name = "LEVEL", value_parser = ["trace", "debug", "info", "warn", "error", "off"])]
    pub log_level: Option<String>,

    /// Log output format
    #[arg(long = "log-format", value_name = "FORMAT", value_parser = ["text", "ext", "json"])]
    pub log_format: Option<String>,

    /// Log file path (use 'none' to disable file logging)
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

impl Args {
    /// The clap command with version metadata and help styling applied
    pub fn styled_command(use_color: bool) -> clap::Command {
        Self::command()
            .version(long_version())
            .styles(palette_to_clap(use_color))
    }

    /// Parse an argument list; `--help` and `--version` come back as errors
    /// carrying their output, like any clap error.
    pub fn try_parse_styled<I, T>(args: I, use_color: bool) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = Self::styled_command(use_color).try_get_matches_from(args)?;
        Self::from_arg_matches(&matches)
    }

    /// Net verbosity: each `-v` adds one, each `-q` removes one
    pub fn verbosity(&self) -> i8 {
        let net = i16::from(self.verbose) - i16::from(self.quiet);
        net.clamp(i16::from(i8::MIN), i16::from(i8::MAX)) as i8
    }
}
