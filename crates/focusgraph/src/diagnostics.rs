#![forbid(unsafe_code)]

//! Developer warnings for invalid configuration.
//!
//! None of these are fatal: the engine ignores the offending piece of
//! configuration and keeps running. Warnings are logged through `tracing`
//! only when developer warnings are enabled (debug builds by default), and
//! the controller keeps every warning it raised so hosts and tests can
//! inspect them regardless of the log level.

use std::fmt;

use tracing::warn;

/// Whether developer warnings are logged when no explicit setting exists.
#[must_use]
pub const fn dev_warnings_default() -> bool {
    cfg!(debug_assertions)
}

/// An advisory configuration problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// A key binding maps to something other than one of the six directions.
    InvalidKeyBinding { key: String, value: String },
    /// A zone asked to trap focus but has no id to trap within.
    TrapFocusWithoutZoneId,
    /// The initial-focus id is not a registered node.
    InitialFocusNotFound { id: String },
    /// An edge from a node to itself was requested and dropped.
    SelfEdge { id: String },
    /// An environment override could not be parsed.
    InvalidEnvValue { var: &'static str, value: String },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidKeyBinding { key, value } => write!(
                f,
                "key binding {key:?}={value:?} is not a valid direction. Use: up, down, left, right, next, prev."
            ),
            Self::TrapFocusWithoutZoneId => {
                f.write_str("zone has trap_focus set but no zone id. Trapping focus requires a zone id.")
            }
            Self::InitialFocusNotFound { id } => {
                write!(f, "initial focus {id:?} but no node with that id is registered.")
            }
            Self::SelfEdge { id } => write!(f, "edge from {id:?} to itself ignored."),
            Self::InvalidEnvValue { var, value } => write!(f, "{var}={value:?} is not understood; using the default."),
        }
    }
}

/// Log a warning with the default dev-warning policy.
pub fn emit(warning: &ConfigWarning) {
    emit_if(dev_warnings_default(), warning);
}

/// Log a warning when `enabled`.
pub fn emit_if(enabled: bool, warning: &ConfigWarning) {
    if enabled {
        warn!(target: "focusgraph::diagnostics", "[focus-graph] {warning}");
    }
}

/// Ordered record of every warning one navigation domain raised.
///
/// Recording never depends on `enabled`; only logging does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WarningLog {
    enabled: bool,
    entries: Vec<ConfigWarning>,
}

impl Default for WarningLog {
    fn default() -> Self {
        Self::new(dev_warnings_default())
    }
}

impl WarningLog {
    #[must_use]
    pub const fn new(enabled: bool) -> Self {
        Self {
            enabled,
            entries: Vec::new(),
        }
    }

    /// Whether reported warnings are also logged.
    #[inline]
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Log `warning` (when enabled) and append it.
    pub fn report(&mut self, warning: ConfigWarning) {
        emit_if(self.enabled, &warning);
        self.entries.push(warning);
    }

    /// Warnings in the order they were reported.
    #[must_use]
    pub fn entries(&self) -> &[ConfigWarning] {
        &self.entries
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offender() {
        let w = ConfigWarning::InvalidKeyBinding {
            key: "j".into(),
            value: "sideways".into(),
        };
        let msg = w.to_string();
        assert!(msg.contains("\"j\""), "{msg}");
        assert!(msg.contains("\"sideways\""), "{msg}");

        let w = ConfigWarning::InitialFocusNotFound { id: "save".into() };
        assert!(w.to_string().contains("\"save\""));
    }

    #[test]
    fn emit_disabled_is_silent() {
        // Nothing observable to assert beyond not panicking without a subscriber.
        emit_if(false, &ConfigWarning::TrapFocusWithoutZoneId);
        emit(&ConfigWarning::TrapFocusWithoutZoneId);
    }

    #[test]
    fn log_records_even_when_disabled() {
        let mut log = WarningLog::new(false);
        assert!(log.is_empty());
        log.report(ConfigWarning::SelfEdge { id: "a".into() });
        log.report(ConfigWarning::TrapFocusWithoutZoneId);
        assert!(!log.is_enabled());
        assert_eq!(
            log.entries(),
            &[
                ConfigWarning::SelfEdge { id: "a".into() },
                ConfigWarning::TrapFocusWithoutZoneId,
            ]
        );
    }
}
