#![forbid(unsafe_code)]

//! Structured logging facade.
//!
//! All crates in the workspace log through `tracing`. This module re-exports
//! the macros so downstream crates can `use focusgraph_core::logging::*`
//! without a direct `tracing` dependency, and offers a one-call subscriber
//! setup for hosts that do not install their own.
//!
//! Targets used across the workspace:
//!
//! | Target | Emitted by |
//! |--------|------------|
//! | `focusgraph::graph` | resolution steps (trace) |
//! | `focusgraph::dispatch` | key dispatch outcomes (debug) |
//! | `focusgraph::controller` | focus moves and trap changes (debug) |
//! | `focusgraph::mount` | zone and node registration (debug) |
//! | `focusgraph::diagnostics` | developer warnings (warn) |

pub use tracing::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};

/// Output format for [`init_logging`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable, multi-line output.
    #[default]
    Pretty,
    /// One JSON object per event. Requires the `tracing-json` feature.
    Json,
}

/// Default filter directive when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "focusgraph=info";

/// Install a global subscriber honoring `RUST_LOG`.
///
/// Returns `false` when a subscriber was already installed (for example by
/// the host or by a previous call); the existing subscriber is left alone.
#[cfg(feature = "tracing-json")]
pub fn init_logging(format: LogFormat) -> bool {
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Pretty => builder.try_init().is_ok(),
        LogFormat::Json => builder.json().try_init().is_ok(),
    }
}

#[cfg(all(test, feature = "tracing-json"))]
mod tests {
    use super::*;

    #[test]
    fn second_init_is_rejected() {
        let _ = init_logging(LogFormat::Json);
        assert!(!init_logging(LogFormat::Pretty));
    }
}
