/*!
 * Logging and tracing initialization
 *
 * Logs go to stderr (stdout carries command output) or, with `--log`, to a
 * JSON file. Every crate of the workspace logs under its own target.
 */

use std::fs::File;
use std::path::Path;
use tracing::Level;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    registry::Registry,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

use crate::config::RemoteConfig;
use crate::error::{EsiError, Result};

/// Tracing targets of the workspace: the client, the HTTP transport and the wire types
pub const LOG_TARGETS: [&str; 3] = ["esi_remote", "esi_connect", "esi_core_interface"];

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Build the filter directive for our crates at the given level
pub fn filter_directive(level: Level) -> String {
    LOG_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// `--verbose` wins over the configured level
pub fn effective_level(config: &RemoteConfig) -> Level {
    if config.verbose {
        Level::DEBUG
    } else {
        config.log_level.to_tracing_level()
    }
}

/// Initialize structured logging based on configuration
pub fn init_logging(config: &RemoteConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter_directive(effective_level(config))))
        .map_err(|e| EsiError::Config(format!("Failed to create log filter: {}", e)))?;

    let layer = match config.log_file {
        Some(ref log_path) => json_file_layer(log_path)?,
        None => stderr_layer(),
    };

    tracing_subscriber::registry()
        .with(layer.with_filter(env_filter))
        .try_init()
        .map_err(|e| EsiError::Config(format!("Logging already initialized: {}", e)))
}

fn stderr_layer() -> BoxedLayer {
    fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_span_events(FmtSpan::NONE)
        .compact()
        .boxed()
}

/// One JSON object per event, with the request spans closed out
fn json_file_layer(log_path: &Path) -> Result<BoxedLayer> {
    let file = File::create(log_path)
        .map_err(|e| EsiError::Config(format!("Failed to create log file: {}", e)))?;

    Ok(fmt::layer()
        .with_writer(file)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(false)
        .json()
        .boxed())
}

/// Route logs of every workspace crate into the test harness output
#[cfg(test)]
pub fn init_test_logging() {
    use std::sync::Once;
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(filter_directive(Level::DEBUG)));

        let layer = fmt::layer()
            .with_test_writer()
            .with_target(true)
            .without_time()
            .compact()
            .with_filter(env_filter);

        tracing_subscriber::registry().with(layer).try_init().ok();
    });
}
