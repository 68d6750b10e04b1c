//! Diagnostic tracing setup and the request log

pub mod request_log;
pub mod rotating;

pub use request_log::{LogLevel, LogWorker, RequestLogger};
pub use rotating::RotatingFile;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::{Error, Result};

/// Default filter when `RUST_LOG` is not set
pub const DEFAULT_FILTER: &str = "campus_assistant=info,tower_http=info";

/// Install the global tracing subscriber writing to stderr
///
/// Stdout is left to the request log's console mirror.
pub fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .try_init()
        .map_err(|e| Error::Config(format!("Failed to init tracing: {}", e)))
}
