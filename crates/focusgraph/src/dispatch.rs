#![forbid(unsafe_code)]

//! Keyboard dispatch: key press → navigation decision.
//!
//! The dispatcher is pure. [`KeyDispatcher::plan`] looks at a key event, the
//! graph, and the trap-zone set, and returns the [`KeyAction`] to perform.
//! The controller applies the action and reports a [`KeyOutcome`] to the
//! host. Keeping the decision separate from the side effects lets the graph
//! be borrowed immutably while planning and mutably while applying.
//!
//! # Outcomes
//!
//! | Situation | Action | Outcome |
//! |-----------|--------|---------|
//! | Escape on a tracked element | `Escape` | handled |
//! | Escape elsewhere | none | unhandled |
//! | Unmapped key | none | unhandled |
//! | Target not tracked | none | unhandled |
//! | No resolved target | none | unhandled |
//! | Resolved target | `Move` | handled |
//!
//! Unhandled keys keep their default host behavior, so Tab can leave the
//! tracked domain when nothing lies ahead and no trap is active.

use std::collections::HashSet;

use focusgraph_core::{ElementId, KeyEvent};
use tracing::debug;

use crate::graph::{FocusGraph, NavDirection, ResolveOptions};
use crate::keymap::{KeyIntent, KeyMap};

/// Whether the host should suppress the key's default behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Handled,
    Unhandled,
}

impl KeyOutcome {
    #[must_use]
    pub const fn is_handled(self) -> bool {
        matches!(self, Self::Handled)
    }
}

/// A dispatch decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// Escape pressed on a tracked node.
    Escape { node_id: String, element: ElementId },
    /// Move focus along a resolved edge (or wrap).
    Move {
        from: String,
        to: String,
        direction: NavDirection,
    },
}

/// Maps key events to navigation actions.
#[derive(Debug, Clone)]
pub struct KeyDispatcher {
    keymap: KeyMap,
    resolve: ResolveOptions,
}

impl Default for KeyDispatcher {
    fn default() -> Self {
        Self::new(KeyMap::default(), ResolveOptions::default().with_looping(true))
    }
}

impl KeyDispatcher {
    /// Dispatcher with the given bindings and base resolve options.
    ///
    /// `resolve.within_zone` is overwritten per event by trap scoping.
    #[must_use]
    pub fn new(keymap: KeyMap, resolve: ResolveOptions) -> Self {
        Self { keymap, resolve }
    }

    #[must_use]
    pub fn keymap(&self) -> &KeyMap {
        &self.keymap
    }

    #[must_use]
    pub fn resolve_options(&self) -> &ResolveOptions {
        &self.resolve
    }

    /// Decide what a key press should do.
    #[must_use]
    pub fn plan(
        &self,
        graph: &FocusGraph,
        trap_zones: &HashSet<String>,
        event: &KeyEvent,
    ) -> Option<KeyAction> {
        let intent = self.keymap.intent_for(event)?;
        let Some(target) = event.target else {
            debug!(target: "focusgraph::dispatch", key = %event.code, "no target element");
            return None;
        };
        let origin = graph.get_node_id_by_element(target);

        let direction = match intent {
            KeyIntent::Escape => {
                let node_id = origin?;
                debug!(target: "focusgraph::dispatch", node_id, "escape");
                return Some(KeyAction::Escape {
                    node_id: node_id.to_owned(),
                    element: target,
                });
            }
            KeyIntent::Navigate(direction) => direction,
        };

        let Some(from) = origin else {
            debug!(target: "focusgraph::dispatch", %target, "target is not a tracked node");
            return None;
        };

        let options = self.scoped_options(graph, trap_zones, from);
        let Some(to) = graph.resolve(from, direction, &options) else {
            debug!(
                target: "focusgraph::dispatch",
                from,
                %direction,
                zone = ?options.within_zone,
                "nowhere to go"
            );
            return None;
        };
        Some(KeyAction::Move {
            from: from.to_owned(),
            to,
            direction,
        })
    }

    /// Base options, scoped to the origin's zone when that zone traps.
    fn scoped_options(
        &self,
        graph: &FocusGraph,
        trap_zones: &HashSet<String>,
        from: &str,
    ) -> ResolveOptions {
        let trap = graph
            .get_node(from)
            .and_then(|n| n.zone_id.as_ref())
            .filter(|zone| trap_zones.contains(zone.as_str()));
        ResolveOptions {
            within_zone: trap.cloned(),
            ..self.resolve.clone()
        }
    }
}
