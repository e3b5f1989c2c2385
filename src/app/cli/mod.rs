//! Command line, configuration file and the settings resolved from both

pub mod args;
pub mod config;
pub mod settings;

#[cfg(test)]
mod tests;

pub use args::Args;
pub use config::{ConfigError, FileConfig};
pub use settings::{Environment, Settings};
