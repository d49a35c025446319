//! Logging setup using `tracing` and `tracing-subscriber`.
//!
//! Logs always go to stderr; stdout is reserved for displayed records.
//! `RUST_LOG` takes precedence over the `-v`/`-q` flags when it is set.

use std::io;
use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogConfig {
    pub level: Level,
    pub with_target: bool,
}

impl LogConfig {
    /// - `-q`: errors only
    /// - none: warnings
    /// - `-v`: info, `-vv`: debug, `-vvv`: trace
    pub fn from_flags(verbose: u8, quiet: bool) -> Self {
        let level = if quiet {
            Level::ERROR
        } else {
            match verbose {
                0 => Level::WARN,
                1 => Level::INFO,
                2 => Level::DEBUG,
                _ => Level::TRACE,
            }
        };
        Self {
            level,
            with_target: verbose >= 2,
        }
    }
}

pub fn init_logging(config: &LogConfig) {
    let filter = build_env_filter(config.level);
    let layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(config.with_target)
        .without_time();

    tracing_subscriber::registry().with(filter).with(layer).init();
}

fn build_env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = level.as_str().to_ascii_lowercase();
        EnvFilter::new(format!("warn,lkod_core={level},lkod_files={level},lkod={level}"))
    })
}
