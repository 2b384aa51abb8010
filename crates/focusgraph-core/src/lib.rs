#![forbid(unsafe_code)]

//! Core: element handles, input events, and logging for focusgraph.
//!
//! # Role in focusgraph
//! `focusgraph-core` is the host boundary vocabulary. Hosts (a DOM bridge,
//! a terminal UI, a native toolkit) translate their element objects into
//! [`ElementId`] handles and their native input into [`KeyEvent`] and
//! [`FocusInEvent`] values.
//!
//! # How it fits in the system
//! The `focusgraph` crate consumes these types: its graph stores
//! `ElementId` handles on nodes, and its controller dispatches `KeyEvent`s
//! into navigation. Nothing here knows about graphs or zones.

pub mod event;
pub mod logging;

pub use event::{ElementId, FocusInEvent, KeyCode, KeyEvent, Modifiers};
