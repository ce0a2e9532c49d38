//! Logging integration using tracing.
//!
//! The codecs emit `tracing` events (buffer growth at `trace`, null-release
//! at `debug`). This module installs a subscriber for them and forwards
//! `log` crate records to tracing as well.
//!
//! # Example
//!
//! ```ignore
//! use seqjson::logger::init_logging;
//!
//! // Honours RUST_LOG, e.g. RUST_LOG=seqjson=trace
//! init_logging("my_tool");
//! ```

use std::sync::OnceLock;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_DIRECTIVE: &str = "info";

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize logging with the [`DEFAULT_DIRECTIVE`] fallback.
///
/// See [`init_logging_with_default`].
pub fn init_logging(name: &str) {
    init_logging_with_default(name, DEFAULT_DIRECTIVE);
}

/// Initialize logging, falling back to `directive` when `RUST_LOG` is unset.
///
/// Installs a compact stderr subscriber and forwards `log` crate records to
/// tracing. Only the first call has an effect; if another global subscriber
/// is already installed it is left in place.
pub fn init_logging_with_default(name: &str, directive: &str) {
    LOGGER_INITIALIZED.get_or_init(|| {
        let installed = tracing_subscriber::registry()
            .with(env_filter(directive))
            .with(fmt::layer().compact().with_target(true).with_writer(std::io::stderr))
            .try_init()
            .is_ok();
        // A no-op when `try_init` already bridged `log`.
        tracing_log::LogTracer::init().ok();
        tracing::debug!(app = name, installed, "seqjson logging ready");
    });
}

fn env_filter(directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive))
}

/// Re-export tracing macros for convenience.
pub use tracing::{debug, error, info, trace, warn};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging() {
        init_logging("test_app");
        // Idempotent
        init_logging("test_app_2");
    }

    #[test]
    fn test_init_logging_with_default() {
        init_logging_with_default("test_directive", "seqjson=trace");
        init_logging("test_after_directive");
    }

    #[test]
    fn test_tracing_macros() {
        init_logging("test_macros");

        trace!("trace message");
        debug!("debug message");
        info!("info message");
        warn!("warn message");
        error!("error message");
    }

    #[test]
    fn test_log_crate_forwarding() {
        init_logging("test_log_forward");

        log::info!("log crate info");
        log::warn!("log crate warn");
    }
}
