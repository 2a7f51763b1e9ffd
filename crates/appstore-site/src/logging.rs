//! Log output setup
//!
//! Logs go to stderr so that command output on stdout stays clean.
//! `APPSTORE_LOG` takes `EnvFilter` directives and wins over verbosity.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Environment variable holding filter directives
pub const LOG_ENV: &str = "APPSTORE_LOG";

/// Default level for a verbosity count
#[must_use]
pub fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn filter_for(verbosity: u8) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level_for(verbosity)))
}

fn console_layer<S>(verbosity: u8) -> impl Layer<S>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    let debug = verbosity >= 2;
    tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(debug)
        .with_file(debug)
        .with_line_number(debug)
        .with_filter(filter_for(verbosity))
}

/// Install the global subscriber
///
/// A second call is a no-op.
pub fn init(verbosity: u8) {
    if tracing_subscriber::registry()
        .with(console_layer(verbosity))
        .try_init()
        .is_err()
    {
        tracing::debug!("log subscriber already installed");
    }
}
