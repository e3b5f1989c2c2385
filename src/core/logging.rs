//! Logging setup on top of flexi_logger
//!
//! Log records go to stderr (or a file) so they never mix with the queue
//! listing written to stdout.

use std::sync::{Mutex, OnceLock};

// Dropping the handle shuts the logger down, so it lives for the process
static LOGGER_HANDLE: OnceLock<Mutex<flexi_logger::LoggerHandle>> = OnceLock::new();

const TARGET_PREFIX: &str = "sqs_list_filled_queues::";

/// Default level when neither `--log-level` nor verbosity flags are given
pub const DEFAULT_LOG_LEVEL: &str = "warn";

const LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

/// Resolve the effective level from an explicit level and `-v`/`-q` counts.
///
/// An explicit level wins. Otherwise each `-v` raises the default by one
/// step and each `-q` lowers it, clamped to `off..=trace`.
pub fn resolve_level(explicit: Option<&str>, verbosity: i8) -> String {
    if let Some(level) = explicit {
        return level.to_lowercase();
    }
    let base = LEVELS
        .iter()
        .position(|l| *l == DEFAULT_LOG_LEVEL)
        .unwrap_or(2) as i16;
    let index = (base + verbosity as i16).clamp(0, LEVELS.len() as i16 - 1);
    LEVELS[index as usize].to_string()
}

/// Start the global logger.
pub fn init_logging(
    log_level: Option<&str>,
    log_format: Option<&str>,
    log_file: Option<&str>,
    color_enabled: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    use flexi_logger::{FileSpec, Logger};

    let level_str = log_level.unwrap_or(DEFAULT_LOG_LEVEL);
    let format_type = log_format.unwrap_or("text");

    let mut logger = Logger::try_with_str(level_str)?;

    logger = match format_type {
        "json" => logger.format(json_format),
        "ext" if color_enabled => logger.format(extended_color_format),
        "ext" => logger.format(extended_format),
        _ if color_enabled => logger.format(simple_color_format),
        _ => logger.format(simple_format),
    };

    if let Some(file_path) = log_file {
        let file_spec = FileSpec::try_from(std::path::Path::new(file_path))?;
        logger = logger.log_to_file(file_spec);
    }

    let handle = logger.start()?;
    let _ = LOGGER_HANDLE.set(Mutex::new(handle));

    Ok(())
}

fn level_abbr(level: log::Level) -> &'static str {
    match level {
        log::Level::Error => "ERR",
        log::Level::Warn => "WRN",
        log::Level::Info => "INF",
        log::Level::Debug => "DBG",
        log::Level::Trace => "TRC",
    }
}

fn level_colored(level: log::Level) -> colored::ColoredString {
    use colored::Colorize;

    match level {
        log::Level::Error => "ERR".red().bold(),
        log::Level::Warn => "WRN".yellow(),
        log::Level::Info => "INF".green(),
        log::Level::Debug => "DBG".blue(),
        log::Level::Trace => "TRC".magenta(),
    }
}

// "YYYY-MM-DD HH:mm:ss.fff INF message"
fn simple_format(
    w: &mut dyn std::io::Write,
    now: &mut flexi_logger::DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    write!(
        w,
        "{} {} {}",
        now.format("%Y-%m-%d %H:%M:%S%.3f"),
        level_abbr(record.level()),
        record.args()
    )
}

fn simple_color_format(
    w: &mut dyn std::io::Write,
    now: &mut flexi_logger::DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    use colored::Colorize;

    write!(
        w,
        "{} {} {}",
        now.format("%Y-%m-%d %H:%M:%S%.3f").to_string().dimmed(),
        level_colored(record.level()),
        record.args()
    )
}

// "YYYY-MM-DD HH:mm:ss.fff INF message (queues/pool.rs:42)"
fn extended_format(
    w: &mut dyn std::io::Write,
    now: &mut flexi_logger::DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    write!(
        w,
        "{} {} {} ({})",
        now.format("%Y-%m-%d %H:%M:%S%.3f"),
        level_abbr(record.level()),
        record.args(),
        format_target_as_path(record.target(), record.line())
    )
}

fn extended_color_format(
    w: &mut dyn std::io::Write,
    now: &mut flexi_logger::DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    use colored::Colorize;

    write!(
        w,
        "{} {} {} ({})",
        now.format("%Y-%m-%d %H:%M:%S%.3f").to_string().dimmed(),
        level_colored(record.level()),
        record.args(),
        format_target_as_path(record.target(), record.line()).dimmed()
    )
}

fn json_format(
    w: &mut dyn std::io::Write,
    now: &mut flexi_logger::DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    use serde_json::{json, to_string};

    let json_obj = json!({
        "timestamp": now.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
        "level": level_abbr(record.level()),
        "message": record.args().to_string(),
        "target": format_target_as_path(record.target(), record.line())
    });

    match to_string(&json_obj) {
        Ok(json_string) => w.write_all(json_string.as_bytes()),
        Err(_) => w.write_all(b"{\"error\":\"Failed to serialize log message\"}"),
    }
}

// sqs_list_filled_queues::queues::pool -> queues/pool.rs
fn format_target_as_path(target: &str, line: Option<u32>) -> String {
    let path_like = if let Some(without_prefix) = target.strip_prefix(TARGET_PREFIX) {
        without_prefix.replace("::", "/") + ".rs"
    } else {
        target.replace("::", "/")
    };

    match line {
        Some(line_num) => format!("{}:{}", path_like, line_num),
        None => path_like,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flexi_logger::DeferredNow;

    fn render(
        formatter: fn(
            &mut dyn std::io::Write,
            &mut DeferredNow,
            &log::Record,
        ) -> Result<(), std::io::Error>,
        level: log::Level,
        target: &str,
    ) -> String {
        let mut buffer = Vec::new();
        let mut now = DeferredNow::new();
        let record = log::Record::builder()
            .level(level)
            .target(target)
            .line(Some(42))
            .args(format_args!("Test message"))
            .build();
        formatter(&mut buffer, &mut now, &record).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_resolve_level_defaults_to_warn() {
        assert_eq!(resolve_level(None, 0), "warn");
    }

    #[test]
    fn test_resolve_level_verbosity_steps() {
        assert_eq!(resolve_level(None, 1), "info");
        assert_eq!(resolve_level(None, 2), "debug");
        assert_eq!(resolve_level(None, 9), "trace");
        assert_eq!(resolve_level(None, -1), "error");
        assert_eq!(resolve_level(None, -5), "off");
    }

    #[test]
    fn test_resolve_level_explicit_wins() {
        assert_eq!(resolve_level(Some("DEBUG"), -3), "debug");
    }

    #[test]
    fn test_simple_format_layout() {
        let output = render(simple_format, log::Level::Info, "anything");
        assert!(output.contains("INF Test message"), "got: {}", output);
        assert!(!output.contains("anything"));
    }

    #[test]
    fn test_extended_format_includes_location() {
        let output = render(
            extended_format,
            log::Level::Warn,
            "sqs_list_filled_queues::queues::pool",
        );
        assert!(output.contains("WRN Test message"), "got: {}", output);
        assert!(output.ends_with("(queues/pool.rs:42)"), "got: {}", output);
    }

    #[test]
    fn test_json_format_fields() {
        let output = render(json_format, log::Level::Error, "aws_config::profile");
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["level"], "ERR");
        assert_eq!(value["message"], "Test message");
        assert_eq!(value["target"], "aws_config/profile:42");
        assert!(value["timestamp"].as_str().unwrap().ends_with('Z'));
    }

    #[test]
    fn test_format_target_without_line() {
        assert_eq!(
            format_target_as_path("sqs_list_filled_queues::app::watch", None),
            "app/watch.rs"
        );
    }
}
