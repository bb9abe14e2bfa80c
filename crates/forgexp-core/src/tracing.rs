use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Directive used when `RUST_LOG` is unset.
const DEFAULT_DIRECTIVE: &str = "info,sqlx=warn";

/// Initialize structured JSON tracing to stdout. Call once at startup.
///
/// Honors `RUST_LOG`; falls back to [`DEFAULT_DIRECTIVE`]. Subsequent calls
/// are silently ignored.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json())
        .try_init();
}
