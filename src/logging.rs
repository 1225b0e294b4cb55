use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable naming the log file.
pub const LOG_ENV_VAR: &str = "KNIT_COUNTER_LOG";

/// Initialize tracing with optional file output.
///
/// Logging is disabled by default so command output stays clean.
/// Set `KNIT_COUNTER_LOG` to a file path to enable it; `RUST_LOG` picks the
/// filter (default `info`). The file is appended to across runs.
pub fn init_tracing() {
    let Some(log_path) = std::env::var(LOG_ENV_VAR).ok().filter(|p| !p.is_empty()) else {
        return;
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Warning: Failed to open log file '{}': {}", log_path, e);
            return;
        }
    };

    let file_layer = fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::UtcTime::rfc_3339());

    // A second init in the same process (tests) is not an error worth surfacing.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init();
}
