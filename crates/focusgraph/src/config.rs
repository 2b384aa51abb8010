#![forbid(unsafe_code)]

//! Controller configuration.
//!
//! [`FocusConfig`] is accepted once, at controller construction. Every field
//! has a default, so `FocusConfig::default()` gives a working controller:
//! default key bindings, looping navigation, minimal announcements, no
//! transition marker, and nearest/instant scrolling.
//!
//! # Environment
//!
//! | Variable | Values | Field |
//! |----------|--------|-------|
//! | `FOCUS_GRAPH_DEBUG` | bool | `dev_warnings` |
//! | `FOCUS_GRAPH_VERBOSITY` | `off` / `minimal` / `full` | `verbosity` |
//! | `FOCUS_GRAPH_TRANSITION` | bool | `focus_transition` |
//! | `FOCUS_GRAPH_INITIAL_FOCUS` | `first` or a node id | `initial_focus` |
//!
//! Unparseable values are reported as [`ConfigWarning::InvalidEnvValue`] and
//! leave the field at its default.

use std::env;
use std::fmt;
use std::str::FromStr;

use crate::diagnostics::{ConfigWarning, dev_warnings_default};
use crate::graph::ResolveOptions;
use crate::host::{ScrollOptions, ScrollOverrides};
use crate::keymap::KeyBindings;

pub const ENV_DEBUG: &str = "FOCUS_GRAPH_DEBUG";
pub const ENV_VERBOSITY: &str = "FOCUS_GRAPH_VERBOSITY";
pub const ENV_TRANSITION: &str = "FOCUS_GRAPH_TRANSITION";
pub const ENV_INITIAL_FOCUS: &str = "FOCUS_GRAPH_INITIAL_FOCUS";

/// How much the live region says on each focus move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Verbosity {
    Off,
    /// Accessible name only.
    #[default]
    Minimal,
    /// `role: name` when the node has a role.
    Full,
}

/// Error parsing a [`Verbosity`] from a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseVerbosityError(pub String);

impl fmt::Display for ParseVerbosityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?} is not a valid verbosity (expected off, minimal, full)",
            self.0
        )
    }
}

impl std::error::Error for ParseVerbosityError {}

impl FromStr for Verbosity {
    type Err = ParseVerbosityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "off" => Ok(Self::Off),
            "minimal" => Ok(Self::Minimal),
            "full" => Ok(Self::Full),
            _ => Err(ParseVerbosityError(s.to_owned())),
        }
    }
}

/// Which node receives focus when the controller first mounts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum InitialFocus {
    /// First focusable node in registration order.
    First,
    /// An explicit node id.
    Node(String),
}

impl InitialFocus {
    fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "" => None,
            "first" => Some(Self::First),
            id => Some(Self::Node(id.to_owned())),
        }
    }
}

/// Scroll-into-view policy applied on every controller focus move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScrollPolicy {
    Off,
    /// Nearest block, nearest inline, instant.
    #[default]
    Default,
    /// Overrides merged onto the default.
    Custom(ScrollOverrides),
}

impl ScrollPolicy {
    /// Options to pass to the host, or `None` when scrolling is off.
    #[must_use]
    pub fn options(self) -> Option<ScrollOptions> {
        match self {
            Self::Off => None,
            Self::Default => Some(ScrollOptions::default()),
            Self::Custom(overrides) => Some(overrides.resolve()),
        }
    }
}

/// Callback invoked with the node id when Escape is pressed on a node.
pub type EscapeHandler = Box<dyn FnMut(&str)>;

/// Controller configuration.
pub struct FocusConfig {
    /// Overrides merged over the default key bindings.
    pub key_bindings: KeyBindings,
    /// Escape handler. Without one, Escape blurs the focused element.
    pub on_escape: Option<EscapeHandler>,
    pub initial_focus: Option<InitialFocus>,
    pub verbosity: Verbosity,
    /// Mark newly focused elements with a short-lived "just focused" flag.
    pub focus_transition: bool,
    pub scroll_into_view: ScrollPolicy,
    /// Log developer warnings. Defaults to on in debug builds.
    pub dev_warnings: bool,
    /// Base options for keyboard resolution. `within_zone` is set per event
    /// by trap scoping.
    pub resolve: ResolveOptions,
}

impl Default for FocusConfig {
    fn default() -> Self {
        Self {
            key_bindings: KeyBindings::new(),
            on_escape: None,
            initial_focus: None,
            verbosity: Verbosity::default(),
            focus_transition: false,
            scroll_into_view: ScrollPolicy::default(),
            dev_warnings: dev_warnings_default(),
            resolve: ResolveOptions::default().with_looping(true),
        }
    }
}

impl fmt::Debug for FocusConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FocusConfig")
            .field("key_bindings", &self.key_bindings)
            .field("on_escape", &self.on_escape.as_ref().map(|_| "<fn>"))
            .field("initial_focus", &self.initial_focus)
            .field("verbosity", &self.verbosity)
            .field("focus_transition", &self.focus_transition)
            .field("scroll_into_view", &self.scroll_into_view)
            .field("dev_warnings", &self.dev_warnings)
            .field("resolve", &self.resolve)
            .finish()
    }
}

/// Configuration parsed from the environment, plus anything that could not
/// be parsed.
#[derive(Debug)]
pub struct ConfigParse {
    pub config: FocusConfig,
    pub warnings: Vec<ConfigWarning>,
}

impl FocusConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden from process environment variables.
    #[must_use]
    pub fn from_env() -> ConfigParse {
        Self::from_env_with(|key| env::var(key).ok())
    }

    /// Defaults overridden through a custom environment lookup.
    pub fn from_env_with<F>(mut get: F) -> ConfigParse
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let mut warnings = Vec::new();
        let mut invalid = |var: &'static str, value: String| {
            warnings.push(ConfigWarning::InvalidEnvValue { var, value });
        };

        if let Some(value) = get(ENV_DEBUG) {
            match parse_bool(&value) {
                Some(on) => config.dev_warnings = on,
                None => invalid(ENV_DEBUG, value),
            }
        }
        if let Some(value) = get(ENV_VERBOSITY) {
            match value.parse() {
                Ok(verbosity) => config.verbosity = verbosity,
                Err(_) => invalid(ENV_VERBOSITY, value),
            }
        }
        if let Some(value) = get(ENV_TRANSITION) {
            match parse_bool(&value) {
                Some(on) => config.focus_transition = on,
                None => invalid(ENV_TRANSITION, value),
            }
        }
        if let Some(value) = get(ENV_INITIAL_FOCUS) {
            config.initial_focus = InitialFocus::parse(&value);
        }

        ConfigParse { config, warnings }
    }

    /// Builder: key-binding overrides.
    #[must_use]
    pub fn key_bindings(mut self, bindings: KeyBindings) -> Self {
        self.key_bindings = bindings;
        self
    }

    /// Builder: bind one key name to a direction name.
    #[must_use]
    pub fn bind(mut self, key: impl Into<String>, direction: impl Into<String>) -> Self {
        self.key_bindings.insert(key.into(), direction.into());
        self
    }

    /// Builder: Escape handler.
    #[must_use]
    pub fn on_escape(mut self, handler: impl FnMut(&str) + 'static) -> Self {
        self.on_escape = Some(Box::new(handler));
        self
    }

    /// Builder: initial focus strategy.
    #[must_use]
    pub fn initial_focus(mut self, initial: InitialFocus) -> Self {
        self.initial_focus = Some(initial);
        self
    }

    /// Builder: announcement verbosity.
    #[must_use]
    pub fn verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Builder: transient "just focused" marker.
    #[must_use]
    pub fn focus_transition(mut self, on: bool) -> Self {
        self.focus_transition = on;
        self
    }

    /// Builder: scroll policy.
    #[must_use]
    pub fn scroll_into_view(mut self, policy: ScrollPolicy) -> Self {
        self.scroll_into_view = policy;
        self
    }

    /// Builder: developer warnings.
    #[must_use]
    pub fn dev_warnings(mut self, on: bool) -> Self {
        self.dev_warnings = on;
        self
    }

    /// Builder: base resolve options for keyboard navigation.
    #[must_use]
    pub fn resolve(mut self, options: ResolveOptions) -> Self {
        self.resolve = options;
        self
    }
}

#[inline]
fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
