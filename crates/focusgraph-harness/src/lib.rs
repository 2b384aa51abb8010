#![forbid(unsafe_code)]

//! Test harness for focusgraph.
//!
//! [`RecordingHost`] implements [`FocusHost`] by appending every side effect
//! to an in-memory log, so tests can assert the exact sequence the
//! controller produced. The scenario builders wire common layouts (a linear
//! tab chain, a modal over a page) into a fresh controller.
//!
//! Set `E2E_JSONL=1` to print each recorded effect as a JSON line on stderr.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use focusgraph::{
    FocusConfig, FocusController, FocusHost, MountScope, NavDirection, NodeProps, ScrollOptions,
    ZoneProps,
};
use focusgraph_core::ElementId;
use focusgraph_core::logging::DEFAULT_FILTER;
use serde_json::json;
use tracing_subscriber::EnvFilter;

/// One side effect requested of the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEffect {
    Focus(ElementId),
    Blur(ElementId),
    Scroll(ElementId, ScrollOptions),
    SetCurrent(ElementId, bool),
    JustFocused(ElementId, bool),
    Announce(String),
}

impl HostEffect {
    /// JSON form used for JSONL effect logs.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Focus(el) => json!({ "effect": "focus", "element": el.raw() }),
            Self::Blur(el) => json!({ "effect": "blur", "element": el.raw() }),
            Self::Scroll(el, opts) => json!({
                "effect": "scroll",
                "element": el.raw(),
                "options": serde_json::to_value(opts).unwrap_or_default(),
            }),
            Self::SetCurrent(el, on) => json!({ "effect": "current", "element": el.raw(), "on": on }),
            Self::JustFocused(el, on) => {
                json!({ "effect": "just_focused", "element": el.raw(), "on": on })
            }
            Self::Announce(text) => json!({ "effect": "announce", "text": text }),
        }
    }
}

/// A host that records instead of rendering.
#[derive(Debug, Default)]
pub struct RecordingHost {
    effects: Vec<HostEffect>,
    names: HashMap<ElementId, String>,
    focused: Option<ElementId>,
    reduced_motion: bool,
    jsonl: bool,
}

impl RecordingHost {
    #[must_use]
    pub fn new() -> Self {
        Self {
            jsonl: jsonl_enabled(),
            ..Self::default()
        }
    }

    /// Builder: accessible name reported for `element`.
    #[must_use]
    pub fn with_name(mut self, element: ElementId, name: impl Into<String>) -> Self {
        self.names.insert(element, name.into());
        self
    }

    /// Builder: reduced-motion preference.
    #[must_use]
    pub fn with_reduced_motion(mut self, on: bool) -> Self {
        self.reduced_motion = on;
        self
    }

    /// Every recorded effect, oldest first.
    #[must_use]
    pub fn effects(&self) -> &[HostEffect] {
        &self.effects
    }

    /// Drain the log.
    pub fn take_effects(&mut self) -> Vec<HostEffect> {
        std::mem::take(&mut self.effects)
    }

    /// Element that currently holds host focus.
    #[must_use]
    pub fn focused(&self) -> Option<ElementId> {
        self.focused
    }

    /// Announcement texts, oldest first.
    #[must_use]
    pub fn announcements(&self) -> Vec<&str> {
        self.effects
            .iter()
            .filter_map(|fx| match fx {
                HostEffect::Announce(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    fn record(&mut self, effect: HostEffect) {
        if self.jsonl {
            log_jsonl(&effect);
        }
        self.effects.push(effect);
    }
}

impl FocusHost for RecordingHost {
    fn focus(&mut self, element: ElementId) {
        self.focused = Some(element);
        self.record(HostEffect::Focus(element));
    }

    fn blur(&mut self, element: ElementId) {
        if self.focused == Some(element) {
            self.focused = None;
        }
        self.record(HostEffect::Blur(element));
    }

    fn scroll_into_view(&mut self, element: ElementId, options: ScrollOptions) {
        self.record(HostEffect::Scroll(element, options));
    }

    fn set_current(&mut self, element: ElementId, current: bool) {
        self.record(HostEffect::SetCurrent(element, current));
    }

    fn set_just_focused(&mut self, element: ElementId, on: bool) {
        self.record(HostEffect::JustFocused(element, on));
    }

    fn announce(&mut self, text: &str) {
        self.record(HostEffect::Announce(text.to_owned()));
    }

    fn accessible_name(&self, element: ElementId) -> String {
        self.names.get(&element).cloned().unwrap_or_default()
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion
    }
}

fn jsonl_enabled() -> bool {
    std::env::var("E2E_JSONL").is_ok()
}

fn log_jsonl(effect: &HostEffect) {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    let mut line = effect.to_json();
    line["ts"] = json!(format!("T{n:06}"));
    eprintln!("{line}");
}

/// Install a test-writer subscriber. `RUST_LOG` overrides
/// [`DEFAULT_FILTER`]. Safe to call from every test.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(filter)
        .try_init();
}

// ── Scenarios ───────────────────────────────────────────────────────────

/// Element handle used for node `i` in the scenarios.
#[must_use]
pub fn element(i: u64) -> ElementId {
    ElementId(i)
}

/// Nodes `ids` with elements `1..`, connected next/prev in order. Looping
/// (on by default) provides the wrap from the last node back to the first.
#[must_use]
pub fn linear_chain(ids: &[&str], config: FocusConfig) -> FocusController<RecordingHost> {
    let mut controller = FocusController::new(config, RecordingHost::new());
    {
        let mut scope = MountScope::new(&mut controller);
        for (i, id) in ids.iter().enumerate() {
            scope
                .mount_node(NodeProps::new(*id, element(i as u64 + 1)))
                .expect("attached scope");
        }
    }
    let graph = controller.graph_mut();
    for pair in ids.windows(2) {
        graph.connect(pair[0], pair[1], NavDirection::Next, None);
        graph.connect(pair[1], pair[0], NavDirection::Prev, None);
    }
    controller
}

/// Element ids of the modal scenario.
pub mod modal {
    use focusgraph_core::ElementId;

    pub const R1: ElementId = ElementId(1);
    pub const M1: ElementId = ElementId(2);
    pub const M2: ElementId = ElementId(3);
    pub const R2: ElementId = ElementId(4);
}

/// Page nodes `r1`, `r2` around a trapping zone `"modal"` holding `m1`, `m2`.
///
/// The next chain runs r1, m1, m2, r2, so only the trap keeps navigation
/// inside the modal.
#[must_use]
pub fn modal_scenario(config: FocusConfig) -> FocusController<RecordingHost> {
    let mut controller = FocusController::new(config, RecordingHost::new());
    {
        let mut scope = MountScope::new(&mut controller);
        scope.mount_node(NodeProps::new("r1", modal::R1)).expect("attached scope");
        scope.mount_node(NodeProps::new("r2", modal::R2)).expect("attached scope");
        // The zone stays open: the modal is still mounted when the scope ends.
        scope.enter_zone(ZoneProps::new("modal").trap_focus(true));
        scope.mount_node(NodeProps::new("m1", modal::M1)).expect("attached scope");
        scope.mount_node(NodeProps::new("m2", modal::M2)).expect("attached scope");
    }
    let graph = controller.graph_mut();
    for (from, to) in [("r1", "m1"), ("m1", "m2"), ("m2", "r2")] {
        graph.connect(from, to, NavDirection::Next, None);
        graph.connect(to, from, NavDirection::Prev, None);
    }
    controller
}
