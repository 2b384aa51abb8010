#![forbid(unsafe_code)]

//! Directional keyboard focus navigation.
//!
//! # Role in focusgraph
//! This crate is the engine. A [`FocusGraph`] holds focusable nodes and the
//! weighted, directional edges between them. A [`FocusController`] owns one
//! graph per navigation domain, maps key presses onto directions, resolves
//! the next node, and drives the host's focus through a [`FocusHost`].
//!
//! # How it fits in the system
//! Hosts describe their elements with `focusgraph_core` handles and feed
//! key and focus-in events into the controller. Registration from a UI tree
//! goes through [`MountScope`], which tracks enclosing zones, disabled
//! zones, and focus traps.
//!
//! ```
//! use focusgraph::{FocusConfig, FocusController, FocusHost, NavDirection, NodeProps};
//! use focusgraph::MountScope;
//! use focusgraph_core::{ElementId, KeyCode, KeyEvent};
//!
//! #[derive(Default)]
//! struct Host(Vec<ElementId>);
//!
//! impl FocusHost for Host {
//!     fn focus(&mut self, element: ElementId) {
//!         self.0.push(element);
//!     }
//!     fn blur(&mut self, _element: ElementId) {}
//! }
//!
//! let mut controller = FocusController::new(FocusConfig::default(), Host::default());
//! {
//!     let mut scope = MountScope::new(&mut controller);
//!     scope.mount_node(NodeProps::new("a", ElementId(1))).unwrap();
//!     scope.mount_node(NodeProps::new("b", ElementId(2))).unwrap();
//! }
//! controller.graph_mut().connect("a", "b", NavDirection::Next, None);
//!
//! let tab = KeyEvent::new(KeyCode::Tab).with_target(ElementId(1));
//! assert!(controller.handle_key_down(&tab).is_handled());
//! assert_eq!(controller.last_focused(), Some("b"));
//! ```

pub mod a11y;
pub mod config;
pub mod controller;
pub mod diagnostics;
pub mod dispatch;
pub mod graph;
pub mod host;
pub mod keymap;
pub mod mount;

pub use a11y::{LabelSource, accessible_name, announcement};
pub use config::{
    ConfigParse, EscapeHandler, FocusConfig, InitialFocus, ParseVerbosityError, ScrollPolicy,
    Verbosity,
};
pub use controller::{FOCUS_TRANSITION, FocusController};
pub use diagnostics::{ConfigWarning, WarningLog};
pub use dispatch::{KeyAction, KeyDispatcher, KeyOutcome};
pub use graph::{
    DEFAULT_WEIGHT, EdgeSnapshot, FocusEdge, FocusGraph, FocusNode, GraphError, GraphSnapshot,
    NavDirection, NodeMetadata, NodeSnapshot, ParseDirectionError, ResolveOptions,
};
pub use host::{FocusHost, ScrollBehavior, ScrollOptions, ScrollOverrides, ScrollPosition};
pub use keymap::{DEFAULT_KEY_BINDINGS, ESCAPE_KEY, KeyBindings, KeyIntent, KeyMap};
pub use mount::{MountScope, NodeProps, ScopeError, ZoneProps};
