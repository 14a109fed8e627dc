//! Logging Infrastructure
//!
//! Console logging for the CLI. `RUST_LOG` wins over the level passed in.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize the logger
///
/// # Arguments
/// * `level` - Fallback filter when `RUST_LOG` is unset (e.g. "info", "product_wizard=debug")
/// * `json` - Emit JSON lines instead of human-readable output
pub fn init_logger(level: Option<&str>, json: bool) -> anyhow::Result<()> {
    let level = level.unwrap_or("info");
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(env_filter);

    if json {
        registry
            .with(fmt::layer().json().with_target(false).with_thread_ids(false))
            .try_init()?;
    } else {
        registry
            .with(
                fmt::layer()
                    .with_file(false)
                    .with_line_number(false)
                    .with_thread_ids(false)
                    .with_target(false),
            )
            .try_init()?;
    }

    Ok(())
}
