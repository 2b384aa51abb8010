#![forbid(unsafe_code)]

//! Focus controller: one navigation domain.
//!
//! The controller owns the [`FocusGraph`], the last-focused node id, and the
//! set of trapping zones. It turns key presses into focus moves and applies
//! every move's side effects through a [`FocusHost`].
//!
//! Side effects run after the state update, in this order: clear the
//! previous "current" marker, focus, scroll, mark current, announce, mark
//! "just focused". The "just focused" marker clears itself once
//! [`FOCUS_TRANSITION`] has elapsed and the host calls [`FocusController::tick`].

use std::collections::HashSet;
use std::time::Duration;

use focusgraph_core::{ElementId, FocusInEvent, KeyEvent};
use tracing::debug;
use web_time::Instant;

use crate::a11y;
use crate::config::{ConfigParse, EscapeHandler, FocusConfig, InitialFocus, ScrollPolicy, Verbosity};
use crate::diagnostics::{ConfigWarning, WarningLog};
use crate::dispatch::{KeyAction, KeyDispatcher, KeyOutcome};
use crate::graph::FocusGraph;
use crate::host::FocusHost;
use crate::keymap::KeyMap;

/// How long the "just focused" marker stays on an element.
pub const FOCUS_TRANSITION: Duration = Duration::from_millis(200);

/// Central focus coordinator for one navigation domain.
pub struct FocusController<H: FocusHost> {
    graph: FocusGraph,
    host: H,
    last_focused: Option<String>,
    /// Element carrying the "current" marker.
    current: Option<ElementId>,
    trap_zones: HashSet<String>,
    dispatcher: KeyDispatcher,
    on_escape: Option<EscapeHandler>,
    verbosity: Verbosity,
    focus_transition: bool,
    scroll: ScrollPolicy,
    just_focused: Vec<(ElementId, Instant)>,
    initial_focus: Option<InitialFocus>,
    initial_applied: bool,
}

impl<H: FocusHost> FocusController<H> {
    /// Build a controller. Invalid key bindings are reported as warnings
    /// and otherwise ignored.
    pub fn new(config: FocusConfig, host: H) -> Self {
        let log = WarningLog::new(config.dev_warnings);
        Self::with_log(config, host, log)
    }

    /// Build a controller from [`FocusConfig::from_env`] output. The parse
    /// warnings are recorded first, then any raised by the config itself.
    pub fn from_parse(parse: ConfigParse, host: H) -> Self {
        let ConfigParse { config, warnings } = parse;
        let mut log = WarningLog::new(config.dev_warnings);
        for warning in warnings {
            log.report(warning);
        }
        Self::with_log(config, host, log)
    }

    fn with_log(config: FocusConfig, host: H, log: WarningLog) -> Self {
        let (keymap, binding_warnings) = KeyMap::with_overrides(&config.key_bindings);
        let mut graph = FocusGraph::new();
        *graph.warning_log_mut() = log;
        let mut controller = Self {
            graph,
            host,
            last_focused: None,
            current: None,
            trap_zones: HashSet::new(),
            dispatcher: KeyDispatcher::new(keymap, config.resolve),
            on_escape: config.on_escape,
            verbosity: config.verbosity,
            focus_transition: config.focus_transition,
            scroll: config.scroll_into_view,
            just_focused: Vec::new(),
            initial_focus: config.initial_focus,
            initial_applied: false,
        };
        for warning in binding_warnings {
            controller.report(warning);
        }
        controller
    }

    #[must_use]
    pub fn graph(&self) -> &FocusGraph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut FocusGraph {
        &mut self.graph
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    #[must_use]
    pub fn dispatcher(&self) -> &KeyDispatcher {
        &self.dispatcher
    }

    /// Id of the node that most recently received focus.
    #[inline]
    #[must_use]
    pub fn last_focused(&self) -> Option<&str> {
        self.last_focused.as_deref()
    }

    /// Warnings raised since construction, oldest first. Includes wiring
    /// warnings from [`FocusGraph::connect`].
    #[must_use]
    pub fn warnings(&self) -> &[ConfigWarning] {
        self.graph.warnings()
    }

    #[must_use]
    pub fn dev_warnings(&self) -> bool {
        self.graph.warning_log().is_enabled()
    }

    /// Record a warning and log it when developer warnings are on.
    pub fn report(&mut self, warning: ConfigWarning) {
        self.graph.warning_log_mut().report(warning);
    }

    // --- Focus ---

    /// Move focus to node `id`.
    ///
    /// Returns `false` (and changes nothing) when the node is unknown or has
    /// no element.
    pub fn focus_node(&mut self, id: &str) -> bool {
        let Some(node) = self.graph.get_node(id) else {
            return false;
        };
        let Some(element) = node.element else {
            debug!(target: "focusgraph::controller", id, "node has no element");
            return false;
        };
        let role = node.metadata.role.clone();
        let previous = self.current.replace(element);

        self.last_focused = Some(id.to_owned());
        debug!(target: "focusgraph::controller", id, %element, "focus");

        if let Some(prev) = previous.filter(|&prev| prev != element) {
            self.host.set_current(prev, false);
        }
        self.host.focus(element);
        if let Some(options) = self.scroll.options() {
            self.host.scroll_into_view(element, options);
        }
        self.host.set_current(element, true);

        if self.verbosity != Verbosity::Off {
            let name = self.host.accessible_name(element);
            if let Some(text) = a11y::announcement(&name, id, role.as_deref(), self.verbosity) {
                self.host.announce(&text);
            }
        }

        if self.focus_transition && !self.host.prefers_reduced_motion() {
            self.host.set_just_focused(element, true);
            self.just_focused.retain(|&(el, _)| el != element);
            self.just_focused
                .push((element, Instant::now() + FOCUS_TRANSITION));
        }
        true
    }

    /// Re-apply host focus to the last focused node, if it still has an
    /// element.
    pub fn restore_focus(&mut self) -> bool {
        let element = self
            .last_focused
            .as_deref()
            .and_then(|id| self.graph.get_node(id))
            .and_then(|node| node.element);
        match element {
            Some(element) => {
                self.host.focus(element);
                true
            }
            None => false,
        }
    }

    /// Clear "just focused" markers whose deadline is at or before `now`.
    ///
    /// Returns how many markers were cleared.
    pub fn tick(&mut self, now: Instant) -> usize {
        let before = self.just_focused.len();
        let host = &mut self.host;
        self.just_focused.retain(|&(element, deadline)| {
            if deadline <= now {
                host.set_just_focused(element, false);
                false
            } else {
                true
            }
        });
        before - self.just_focused.len()
    }

    /// Elements currently carrying the "just focused" marker.
    #[must_use]
    pub fn pending_transitions(&self) -> usize {
        self.just_focused.len()
    }

    /// Focus the configured initial node. Only the first call has any
    /// effect.
    pub fn apply_initial_focus(&mut self) -> bool {
        if self.initial_applied {
            return false;
        }
        self.initial_applied = true;
        match self.initial_focus.clone() {
            None => false,
            Some(InitialFocus::First) => {
                match self.graph.get_first_focusable_node_id().map(str::to_owned) {
                    Some(id) => self.focus_node(&id),
                    None => false,
                }
            }
            Some(InitialFocus::Node(id)) => {
                if self.graph.has_node(&id) {
                    self.focus_node(&id)
                } else {
                    self.report(ConfigWarning::InitialFocusNotFound { id });
                    false
                }
            }
        }
    }

    // --- Traps ---

    /// Scope navigation from members of `zone_id` to that zone.
    pub fn register_trap_zone(&mut self, zone_id: impl Into<String>) -> bool {
        let zone_id = zone_id.into();
        debug!(target: "focusgraph::controller", zone = %zone_id, "trap registered");
        self.trap_zones.insert(zone_id)
    }

    pub fn unregister_trap_zone(&mut self, zone_id: &str) -> bool {
        debug!(target: "focusgraph::controller", zone = zone_id, "trap unregistered");
        self.trap_zones.remove(zone_id)
    }

    #[must_use]
    pub fn is_trap_zone(&self, zone_id: &str) -> bool {
        self.trap_zones.contains(zone_id)
    }

    #[must_use]
    pub fn trap_zones(&self) -> &HashSet<String> {
        &self.trap_zones
    }

    // --- Input ---

    /// Handle a key press. [`KeyOutcome::Handled`] means the host should
    /// suppress the key's default behavior.
    pub fn handle_key_down(&mut self, event: &KeyEvent) -> KeyOutcome {
        let Some(action) = self.dispatcher.plan(&self.graph, &self.trap_zones, event) else {
            return KeyOutcome::Unhandled;
        };
        match action {
            KeyAction::Escape { node_id, element } => match self.on_escape.as_mut() {
                Some(handler) => handler(node_id.as_str()),
                None => self.host.blur(element),
            },
            KeyAction::Move { to, .. } => {
                self.focus_node(&to);
                self.last_focused = Some(to);
            }
        }
        KeyOutcome::Handled
    }

    /// Track focus that arrived without going through the controller.
    pub fn handle_focus_in(&mut self, event: &FocusInEvent) {
        if let Some(id) = self.graph.get_node_id_by_element(event.target) {
            if self.last_focused.as_deref() != Some(id) {
                debug!(target: "focusgraph::controller", id, "focus in");
                self.last_focused = Some(id.to_owned());
            }
        }
    }
}

impl<H: FocusHost + std::fmt::Debug> std::fmt::Debug for FocusController<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FocusController")
            .field("graph", &self.graph)
            .field("host", &self.host)
            .field("last_focused", &self.last_focused)
            .field("trap_zones", &self.trap_zones)
            .field("verbosity", &self.verbosity)
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}
