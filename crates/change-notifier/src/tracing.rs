//! # Observability
//!
//! The notifier logs through `tracing` and never installs a subscriber itself. Hosts pick
//! the subscriber; [`setup_tracing`] is the one the sample application uses.
//!
//! ## What Gets Logged
//!
//! - **error**: an update was dropped because the publisher could not be resolved or
//!   failed. Fields: `topic`, `error`.
//! - **debug**: an update was published. Fields: `topic`, `id`, `format`.
//!
//! ```bash
//! RUST_LOG=change_notifier=debug cargo run -p notifier-sample
//! ```
//!
//! Without `RUST_LOG` the filter falls back to [`DEFAULT_DIRECTIVES`].

use tracing_subscriber::EnvFilter;

/// Directives used when `RUST_LOG` is unset or cannot be parsed.
pub const DEFAULT_DIRECTIVES: &str = "info";

/// `RUST_LOG` if it parses, `fallback` otherwise.
pub fn env_filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Installs a compact `fmt` subscriber as the global default.
///
/// Returns `false` and leaves the existing subscriber alone when the host has already
/// installed one.
pub fn setup_tracing() -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(DEFAULT_DIRECTIVES))
        .compact()
        .try_init()
        .is_ok()
}
