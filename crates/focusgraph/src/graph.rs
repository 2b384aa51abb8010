#![forbid(unsafe_code)]

//! Directed graph for focus navigation relationships.
//!
//! Each node represents a focusable element identified by a string id.
//! Edges encode navigation direction (up/down/left/right/next/prev) and
//! carry a weight; when several edges leave the same node in the same
//! direction, the lowest weight wins.
//!
//! # Invariants
//!
//! 1. Node ids are unique; the first registration of an id wins.
//! 2. Nodes keep insertion order. That order defines the wrap-around
//!    targets ("first/last focusable node").
//! 3. Edges reference only nodes that exist in the graph. Removing a node
//!    removes every edge incident on it (both incoming and outgoing).
//! 4. For a `(from, direction)` group, resolution picks the lowest weight,
//!    breaking ties by edge insertion order.
//! 5. Looping never produces a self-transition.
//!
//! # Failure Modes
//!
//! Missing ids are never errors. `connect` to an unregistered node, `resolve`
//! from an unknown origin, and `remove_node` of an absent id are silent
//! no-ops, so UI wiring that races with element mounting degrades to "no
//! edge yet" instead of failing. [`FocusGraph::try_connect`] reports the same
//! situations as [`GraphError`] for callers that want to catch wiring bugs.
//!
//! # Complexity
//!
//! | Operation | Time |
//! |-----------|------|
//! | add_node | O(1) |
//! | remove_node | O(V + E) |
//! | connect / disconnect | O(E) |
//! | resolve | O(E · k) where k = disabled nodes skipped |
//! | get_node_id_by_element | O(V) |

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use focusgraph_core::ElementId;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::diagnostics::{ConfigWarning, WarningLog};

/// Weight given to edges connected without an explicit weight.
pub const DEFAULT_WEIGHT: f64 = 0.0;

/// Navigation direction for focus traversal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavDirection {
    Up,
    Down,
    Left,
    Right,
    /// Tab order: forward.
    Next,
    /// Tab order: backward.
    Prev,
}

impl NavDirection {
    /// All six directions.
    pub const ALL: [NavDirection; 6] = [
        NavDirection::Up,
        NavDirection::Down,
        NavDirection::Left,
        NavDirection::Right,
        NavDirection::Next,
        NavDirection::Prev,
    ];

    /// Directions that wrap to the last node instead of the first.
    #[must_use]
    pub const fn is_backward(self) -> bool {
        matches!(self, Self::Prev | Self::Left | Self::Up)
    }

    /// Lowercase name, as used in binding tables and snapshots.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
            Self::Next => "next",
            Self::Prev => "prev",
        }
    }
}

impl fmt::Display for NavDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not one of the six direction names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDirectionError(pub String);

impl fmt::Display for ParseDirectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?} is not a valid direction (expected up, down, left, right, next, prev)",
            self.0
        )
    }
}

impl std::error::Error for ParseDirectionError {}

impl FromStr for NavDirection {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|dir| dir.as_str() == s)
            .ok_or_else(|| ParseDirectionError(s.to_owned()))
    }
}

/// Behavioral and accessibility metadata attached to a node.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeMetadata {
    /// Disabled nodes stay registered but are skipped by resolution.
    pub disabled: bool,
    /// Informational only; resolution does not consult it.
    pub priority: Option<f64>,
    /// Role used to prefix announcements at full verbosity.
    pub role: Option<String>,
}

impl NodeMetadata {
    /// Builder: set disabled flag.
    #[must_use]
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Builder: set priority.
    #[must_use]
    pub fn with_priority(mut self, priority: f64) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Builder: set role.
    #[must_use]
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }
}

/// A focusable node in the graph.
#[derive(Clone, Debug, PartialEq)]
pub struct FocusNode {
    /// Unique identifier.
    pub id: String,
    /// Host element handle. Non-owning; the host clears it on teardown.
    pub element: Option<ElementId>,
    /// Optional zone (grouping label).
    pub zone_id: Option<String>,
    pub metadata: NodeMetadata,
}

impl FocusNode {
    /// Create an enabled node with no element and no zone.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            element: None,
            zone_id: None,
            metadata: NodeMetadata::default(),
        }
    }

    /// Builder: attach an element handle.
    #[must_use]
    pub fn with_element(mut self, element: ElementId) -> Self {
        self.element = Some(element);
        self
    }

    /// Builder: set zone.
    #[must_use]
    pub fn with_zone(mut self, zone: impl Into<String>) -> Self {
        self.zone_id = Some(zone.into());
        self
    }

    /// Builder: set metadata.
    #[must_use]
    pub fn with_metadata(mut self, metadata: NodeMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Builder: set disabled flag.
    #[must_use]
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.metadata.disabled = disabled;
        self
    }

    /// Whether resolution may land on this node.
    #[inline]
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        !self.metadata.disabled
    }

    fn in_zone(&self, zone: Option<&str>) -> bool {
        zone.is_none_or(|zone| self.zone_id.as_deref() == Some(zone))
    }
}

/// A directed, weighted edge. Lower weight = higher priority.
#[derive(Clone, Debug, PartialEq)]
pub struct FocusEdge {
    pub from_id: String,
    pub to_id: String,
    pub direction: NavDirection,
    pub weight: f64,
}

/// Constraints for [`FocusGraph::resolve`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Wrap to the first/last focusable node when no edge leads anywhere.
    pub looping: bool,
    /// Step over disabled nodes along the same direction.
    pub skip_disabled: bool,
    /// Only consider nodes in this zone. The origin must be a member.
    pub within_zone: Option<String>,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            looping: false,
            skip_disabled: true,
            within_zone: None,
        }
    }
}

impl ResolveOptions {
    /// Builder: set looping.
    #[must_use]
    pub fn with_looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    /// Builder: set disabled skipping.
    #[must_use]
    pub fn with_skip_disabled(mut self, skip: bool) -> Self {
        self.skip_disabled = skip;
        self
    }

    /// Builder: scope resolution to a zone.
    #[must_use]
    pub fn within(mut self, zone: impl Into<String>) -> Self {
        self.within_zone = Some(zone.into());
        self
    }
}

/// Wiring errors reported by [`FocusGraph::try_connect`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// An endpoint is not registered.
    UnknownNode(String),
    /// Both endpoints are the same node.
    SelfEdge(String),
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownNode(id) => write!(f, "no node registered with id {id:?}"),
            Self::SelfEdge(id) => write!(f, "edge from {id:?} to itself"),
        }
    }
}

impl std::error::Error for GraphError {}

/// Directed graph for focus navigation.
#[derive(Debug, Default)]
pub struct FocusGraph {
    nodes: HashMap<String, FocusNode>,
    /// Node ids in registration order.
    order: Vec<String>,
    /// Edges in insertion order.
    edges: Vec<FocusEdge>,
    /// Wiring warnings. Survives [`clear`](Self::clear).
    warnings: WarningLog,
}

impl FocusGraph {
    /// Create an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node. No-op if the id is already present.
    pub fn add_node(&mut self, node: FocusNode) {
        if self.nodes.contains_key(&node.id) {
            trace!(target: "focusgraph::graph", id = %node.id, "duplicate add_node ignored");
            return;
        }
        self.order.push(node.id.clone());
        self.nodes.insert(node.id.clone(), node);
    }

    /// Remove a node and all edges incident on it. No-op if absent.
    pub fn remove_node(&mut self, id: &str) {
        if self.nodes.remove(id).is_none() {
            return;
        }
        self.order.retain(|n| n != id);
        self.edges.retain(|e| e.from_id != id && e.to_id != id);
    }

    /// Connect two nodes: navigating `direction` from `from` leads to `to`.
    ///
    /// Replaces any existing edge with the same `(from, to, direction)`.
    /// No-ops if either node is missing. A self-edge is dropped and recorded
    /// as [`ConfigWarning::SelfEdge`] in [`warnings`](Self::warnings).
    pub fn connect(&mut self, from: &str, to: &str, direction: NavDirection, weight: Option<f64>) {
        match self.try_connect(from, to, direction, weight) {
            Ok(()) => {}
            Err(GraphError::SelfEdge(id)) => {
                self.warnings.report(ConfigWarning::SelfEdge { id });
            }
            Err(err) => {
                trace!(target: "focusgraph::graph", %err, "connect ignored");
            }
        }
    }

    /// Strict variant of [`connect`](Self::connect) that reports why an
    /// edge was not created.
    pub fn try_connect(
        &mut self,
        from: &str,
        to: &str,
        direction: NavDirection,
        weight: Option<f64>,
    ) -> Result<(), GraphError> {
        for id in [from, to] {
            if !self.nodes.contains_key(id) {
                return Err(GraphError::UnknownNode(id.to_owned()));
            }
        }
        if from == to {
            return Err(GraphError::SelfEdge(from.to_owned()));
        }
        self.disconnect(from, Some(to), Some(direction));
        self.edges.push(FocusEdge {
            from_id: from.to_owned(),
            to_id: to.to_owned(),
            direction,
            weight: weight.unwrap_or(DEFAULT_WEIGHT),
        });
        Ok(())
    }

    /// Remove every edge leaving `from` that matches the filter.
    ///
    /// `None` for `to` or `direction` acts as a wildcard.
    pub fn disconnect(&mut self, from: &str, to: Option<&str>, direction: Option<NavDirection>) {
        self.edges.retain(|e| {
            e.from_id != from
                || to.is_some_and(|to| e.to_id != to)
                || direction.is_some_and(|dir| e.direction != dir)
        });
    }

    /// Look up a node by id.
    #[must_use = "use the returned node (if any)"]
    pub fn get_node(&self, id: &str) -> Option<&FocusNode> {
        self.nodes.get(id)
    }

    /// Whether a node with this id is registered.
    #[must_use]
    pub fn has_node(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Reverse lookup by element handle, first match in insertion order.
    #[must_use]
    pub fn get_node_id_by_element(&self, element: ElementId) -> Option<&str> {
        self.nodes_in_order()
            .find(|n| n.element == Some(element))
            .map(|n| n.id.as_str())
    }

    /// First enabled node in insertion order.
    #[must_use]
    pub fn get_first_focusable_node_id(&self) -> Option<&str> {
        self.first_focusable_in_zone(None)
    }

    /// First enabled node in insertion order, optionally restricted to a zone.
    #[must_use]
    pub fn first_focusable_in_zone(&self, zone: Option<&str>) -> Option<&str> {
        self.nodes_in_order()
            .find(|n| n.is_enabled() && n.in_zone(zone))
            .map(|n| n.id.as_str())
    }

    /// Last enabled node in insertion order, optionally restricted to a zone.
    #[must_use]
    pub fn last_focusable_in_zone(&self, zone: Option<&str>) -> Option<&str> {
        self.nodes_in_order()
            .rev()
            .find(|n| n.is_enabled() && n.in_zone(zone))
            .map(|n| n.id.as_str())
    }

    /// Whether `id` is registered and not disabled.
    #[must_use]
    pub fn is_enabled(&self, id: &str) -> bool {
        self.nodes.get(id).is_some_and(FocusNode::is_enabled)
    }

    /// Toggle a node's disabled flag without re-registering it.
    pub fn set_disabled(&mut self, id: &str, disabled: bool) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.metadata.disabled = disabled;
        }
    }

    /// Drop a node's element handle (host teardown). The node stays
    /// registered but can no longer receive host focus.
    pub fn detach_element(&mut self, id: &str) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.element = None;
        }
    }

    /// Compute the next node from `from` in `direction`.
    ///
    /// Returns `None` when there is nowhere to go. See the module docs for
    /// the ordering rules; disabled nodes are stepped over along the same
    /// direction, and looping applies only after the direct chain is
    /// exhausted.
    #[must_use = "use the returned target id (if any)"]
    pub fn resolve(
        &self,
        from: &str,
        direction: NavDirection,
        options: &ResolveOptions,
    ) -> Option<String> {
        let origin = self.nodes.get(from)?;
        let zone = options.within_zone.as_deref();
        if !origin.in_zone(zone) {
            trace!(target: "focusgraph::graph", from, ?zone, "origin outside zone");
            return None;
        }

        if let Some(target) = self.follow_edges(from, direction, zone, options.skip_disabled) {
            return Some(target.to_owned());
        }

        if !options.looping {
            return None;
        }
        let wrap = if direction.is_backward() {
            self.last_focusable_in_zone(zone)
        } else {
            self.first_focusable_in_zone(zone)
        };
        trace!(target: "focusgraph::graph", from, %direction, ?wrap, "wrap-around");
        wrap.filter(|&id| id != from).map(str::to_owned)
    }

    /// Follow best edges from `from`, stepping over disabled nodes.
    ///
    /// A chain of disabled nodes that revisits a node yields `None`.
    fn follow_edges<'a>(
        &'a self,
        from: &'a str,
        direction: NavDirection,
        zone: Option<&str>,
        skip_disabled: bool,
    ) -> Option<&'a str> {
        let mut skipped: Vec<&str> = Vec::new();
        let mut current = from;
        loop {
            let candidate = self.best_edge(current, direction, zone)?;
            if !skip_disabled || self.is_enabled(candidate) {
                return Some(candidate);
            }
            if skipped.contains(&candidate) {
                trace!(target: "focusgraph::graph", candidate, "disabled cycle");
                return None;
            }
            trace!(target: "focusgraph::graph", candidate, "skipping disabled");
            skipped.push(candidate);
            current = candidate;
        }
    }

    /// Lowest-weight edge target; ties go to the earliest edge.
    fn best_edge(&self, from: &str, direction: NavDirection, zone: Option<&str>) -> Option<&str> {
        self.edges
            .iter()
            .filter(|e| e.from_id == from && e.direction == direction)
            .filter(|e| self.nodes.get(&e.to_id).is_some_and(|n| n.in_zone(zone)))
            .min_by(|a, b| a.weight.total_cmp(&b.weight))
            .map(|e| e.to_id.as_str())
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Whether the graph is empty (no nodes).
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node ids in insertion order.
    pub fn node_ids(&self) -> impl DoubleEndedIterator<Item = &str> + '_ {
        self.order.iter().map(String::as_str)
    }

    /// Nodes in insertion order.
    pub fn nodes_in_order(&self) -> impl DoubleEndedIterator<Item = &FocusNode> + '_ {
        self.order.iter().filter_map(|id| self.nodes.get(id))
    }

    /// Edges in insertion order.
    #[must_use]
    pub fn edges(&self) -> &[FocusEdge] {
        &self.edges
    }

    /// Clear all nodes and edges.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.order.clear();
        self.edges.clear();
    }

    /// Warnings raised against this graph, oldest first.
    #[must_use]
    pub fn warnings(&self) -> &[ConfigWarning] {
        self.warnings.entries()
    }

    #[must_use]
    pub fn warning_log(&self) -> &WarningLog {
        &self.warnings
    }

    /// The log the owning controller reports into.
    pub fn warning_log_mut(&mut self) -> &mut WarningLog {
        &mut self.warnings
    }

    /// Read-only snapshot for inspectors and debugging.
    #[must_use]
    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot {
            nodes: self
                .nodes_in_order()
                .map(|n| NodeSnapshot {
                    id: n.id.clone(),
                    zone_id: n.zone_id.clone(),
                    disabled: n.metadata.disabled,
                    priority: n.metadata.priority,
                    role: n.metadata.role.clone(),
                })
                .collect(),
            edges: self
                .edges
                .iter()
                .map(|e| EdgeSnapshot {
                    from_id: e.from_id.clone(),
                    to_id: e.to_id.clone(),
                    direction: e.direction,
                    weight: e.weight,
                })
                .collect(),
        }
    }

    /// Snapshot serialized as JSON.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        // Non-finite weights serialize as null; nothing else can fail.
        serde_json::to_value(self.snapshot()).unwrap_or(serde_json::Value::Null)
    }
}

/// Serializable view of a [`FocusGraph`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub nodes: Vec<NodeSnapshot>,
    pub edges: Vec<EdgeSnapshot>,
}

/// Node entry of a [`GraphSnapshot`]; metadata is flattened.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeSnapshot {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone_id: Option<String>,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Edge entry of a [`GraphSnapshot`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeSnapshot {
    pub from_id: String,
    pub to_id: String,
    pub direction: NavDirection,
    pub weight: f64,
}

// =========================================================================
// Tests
// =========================================================================
