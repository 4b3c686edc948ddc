use tracing_subscriber::{EnvFilter, fmt};

use crate::shared::infrastructure::config::AppConfig;

const DEFAULT_FILTER: &str = "info,tower_http=info,sqlx=warn";

/// JSON lines in production, human readable output elsewhere. `RUST_LOG` wins.
pub fn init_tracing(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let result = if config.is_production() {
        fmt().with_env_filter(filter).json().try_init()
    } else {
        fmt().with_env_filter(filter).try_init()
    };
    if let Err(err) = result {
        tracing::warn!(error = %err, "tracing init failed");
    }
}
