//! Structured logging bootstrap.
//!
//! Mirrors the teacher's `init_logger_with_file`, minus the file-rotation
//! machinery that belongs to the persistence layer this engine does not
//! have — logs go to stdout only, pretty or JSON.

use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber. `level` sets the default
/// filter when `RUST_LOG` is unset; `json` selects the JSON formatter.
pub fn init_logger(level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("engine={level},tower_http={level}")));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    if json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}
