//! Application module

pub mod cli;
pub mod countdown;
pub mod error;
pub mod keys;
pub mod progress;
pub mod startup;
pub mod watch;
