#![forbid(unsafe_code)]

//! Registration layer: zones and nodes mounted from a UI tree.
//!
//! A [`MountScope`] walks alongside the host's component tree. Zones are
//! entered and exited in tree order; nodes mounted while a zone is open
//! inherit it. The scope borrows the controller it registers into. A scope
//! built with [`MountScope::detached`] still tracks zones, but every
//! operation that needs the controller fails with [`ScopeError::NoProvider`].

use std::fmt;

use focusgraph_core::ElementId;
use tracing::debug;

use crate::controller::FocusController;
use crate::diagnostics::{self, ConfigWarning};
use crate::graph::{FocusNode, NodeMetadata};
use crate::host::FocusHost;

/// Declared properties of a zone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZoneProps {
    pub zone_id: Option<String>,
    /// Every node mounted inside is disabled.
    pub disabled: bool,
    /// Navigation from members stays inside the zone.
    pub trap_focus: bool,
}

impl ZoneProps {
    #[must_use]
    pub fn new(zone_id: impl Into<String>) -> Self {
        Self {
            zone_id: Some(zone_id.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    #[must_use]
    pub fn trap_focus(mut self, trap: bool) -> Self {
        self.trap_focus = trap;
        self
    }
}

/// Declared properties of a node.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeProps {
    pub id: String,
    pub element: Option<ElementId>,
    /// Explicit zone; overrides the enclosing one.
    pub zone: Option<String>,
    pub metadata: NodeMetadata,
}

impl NodeProps {
    #[must_use]
    pub fn new(id: impl Into<String>, element: ElementId) -> Self {
        Self {
            id: id.into(),
            element: Some(element),
            zone: None,
            metadata: NodeMetadata::default(),
        }
    }

    #[must_use]
    pub fn zone(mut self, zone: impl Into<String>) -> Self {
        self.zone = Some(zone.into());
        self
    }

    #[must_use]
    pub fn metadata(mut self, metadata: NodeMetadata) -> Self {
        self.metadata = metadata;
        self
    }
}

/// Registration without an enclosing controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeError {
    NoProvider { operation: &'static str },
}

impl fmt::Display for ScopeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoProvider { operation } => {
                write!(f, "{operation} called outside a focus controller scope")
            }
        }
    }
}

impl std::error::Error for ScopeError {}

#[derive(Debug, Clone)]
struct ZoneFrame {
    zone_id: Option<String>,
    disabled: bool,
    trapping: bool,
}

/// Zone stack plus an optional controller to register into.
pub struct MountScope<'c, H: FocusHost> {
    controller: Option<&'c mut FocusController<H>>,
    zones: Vec<ZoneFrame>,
}

impl<'c, H: FocusHost> MountScope<'c, H> {
    #[must_use]
    pub fn new(controller: &'c mut FocusController<H>) -> Self {
        Self {
            controller: Some(controller),
            zones: Vec::new(),
        }
    }

    /// A scope with no controller.
    #[must_use]
    pub fn detached() -> Self {
        Self {
            controller: None,
            zones: Vec::new(),
        }
    }

    /// The controller this scope registers into.
    pub fn controller(&mut self) -> Result<&mut FocusController<H>, ScopeError> {
        self.controller_for("controller")
    }

    fn controller_for(
        &mut self,
        operation: &'static str,
    ) -> Result<&mut FocusController<H>, ScopeError> {
        self.controller
            .as_deref_mut()
            .ok_or(ScopeError::NoProvider { operation })
    }

    /// Innermost enclosing zone id.
    #[must_use]
    pub fn current_zone(&self) -> Option<&str> {
        self.zones.last().and_then(|z| z.zone_id.as_deref())
    }

    /// Open a zone. A trapping zone registers its trap with the controller.
    pub fn enter_zone(&mut self, props: ZoneProps) {
        let trapping = match (&props.zone_id, props.trap_focus) {
            (None, true) => {
                self.warn(ConfigWarning::TrapFocusWithoutZoneId);
                false
            }
            (Some(zone_id), true) => {
                if let Some(controller) = self.controller.as_deref_mut() {
                    controller.register_trap_zone(zone_id.as_str());
                }
                true
            }
            (_, false) => false,
        };
        debug!(target: "focusgraph::mount", zone = ?props.zone_id, trapping, "enter zone");
        self.zones.push(ZoneFrame {
            zone_id: props.zone_id,
            disabled: props.disabled,
            trapping,
        });
    }

    /// Close the innermost zone. Returns `false` when none is open.
    pub fn exit_zone(&mut self) -> bool {
        let Some(frame) = self.zones.pop() else {
            return false;
        };
        if !frame.trapping {
            return true;
        }
        if let (Some(zone_id), Some(controller)) =
            (frame.zone_id.as_deref(), self.controller.as_deref_mut())
        {
            controller.unregister_trap_zone(zone_id);
        }
        true
    }

    /// Register a node with the controller.
    ///
    /// The node's zone is the explicit one, else the innermost open zone. A
    /// disabled innermost zone disables the node.
    pub fn mount_node(&mut self, props: NodeProps) -> Result<(), ScopeError> {
        let zone = props
            .zone
            .or_else(|| self.current_zone().map(str::to_owned));
        let zone_disabled = self.zones.last().is_some_and(|z| z.disabled);

        let mut node = FocusNode::new(props.id).with_metadata(props.metadata);
        node.element = props.element;
        node.zone_id = zone;
        if zone_disabled {
            node.metadata.disabled = true;
        }

        let controller = self.controller_for("mount_node")?;
        debug!(target: "focusgraph::mount", id = %node.id, zone = ?node.zone_id, "mount node");
        controller.graph_mut().add_node(node);
        Ok(())
    }

    /// Remove a node from the controller.
    pub fn unmount_node(&mut self, id: &str) -> Result<(), ScopeError> {
        let controller = self.controller_for("unmount_node")?;
        debug!(target: "focusgraph::mount", id, "unmount node");
        controller.graph_mut().remove_node(id);
        Ok(())
    }

    fn warn(&mut self, warning: ConfigWarning) {
        match self.controller.as_deref_mut() {
            Some(controller) => controller.report(warning),
            None => diagnostics::emit(&warning),
        }
    }
}

impl<H: FocusHost> fmt::Debug for MountScope<'_, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MountScope")
            .field("attached", &self.controller.is_some())
            .field("zones", &self.zones)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FocusConfig;

    #[derive(Debug, Default)]
    struct NullHost;

    impl FocusHost for NullHost {
        fn focus(&mut self, _element: ElementId) {}
        fn blur(&mut self, _element: ElementId) {}
    }

    fn controller() -> FocusController<NullHost> {
        FocusController::new(FocusConfig::new().dev_warnings(false), NullHost)
    }

    #[test]
    fn nodes_inherit_innermost_zone() {
        let mut c = controller();
        {
            let mut scope = MountScope::new(&mut c);
            scope.mount_node(NodeProps::new("top", ElementId(1))).unwrap();
            scope.enter_zone(ZoneProps::new("outer"));
            scope.enter_zone(ZoneProps::new("inner"));
            scope.mount_node(NodeProps::new("deep", ElementId(2))).unwrap();
            scope
                .mount_node(NodeProps::new("pinned", ElementId(3)).zone("outer"))
                .unwrap();
            assert!(scope.exit_zone());
            scope.mount_node(NodeProps::new("mid", ElementId(4))).unwrap();
        }
        let zone_of = |id: &str| c.graph().get_node(id).and_then(|n| n.zone_id.clone());
        assert_eq!(zone_of("top"), None);
        assert_eq!(zone_of("deep").as_deref(), Some("inner"));
        assert_eq!(zone_of("pinned").as_deref(), Some("outer"));
        assert_eq!(zone_of("mid").as_deref(), Some("outer"));
    }

    #[test]
    fn disabled_zone_disables_members() {
        let mut c = controller();
        {
            let mut scope = MountScope::new(&mut c);
            scope.enter_zone(ZoneProps::new("toolbar").disabled(true));
            scope.mount_node(NodeProps::new("bold", ElementId(1))).unwrap();
            scope.exit_zone();
            scope.mount_node(NodeProps::new("body", ElementId(2))).unwrap();
        }
        assert!(!c.graph().is_enabled("bold"));
        assert!(c.graph().is_enabled("body"));
    }

    #[test]
    fn trapping_zone_registers_and_unregisters() {
        let mut c = controller();
        {
            let mut scope = MountScope::new(&mut c);
            scope.enter_zone(ZoneProps::new("modal").trap_focus(true));
            assert!(scope.controller().unwrap().is_trap_zone("modal"));
            scope.exit_zone();
            assert!(!scope.controller().unwrap().is_trap_zone("modal"));
        }
        assert!(c.trap_zones().is_empty());
    }

    #[test]
    fn trap_without_id_warns() {
        let mut c = controller();
        {
            let mut scope = MountScope::new(&mut c);
            scope.enter_zone(ZoneProps::default().trap_focus(true));
            assert_eq!(scope.current_zone(), None);
            scope.exit_zone();
        }
        assert_eq!(c.warnings(), &[ConfigWarning::TrapFocusWithoutZoneId]);
        assert!(c.trap_zones().is_empty());
    }

    #[test]
    fn unmount_removes_node() {
        let mut c = controller();
        {
            let mut scope = MountScope::new(&mut c);
            scope.mount_node(NodeProps::new("a", ElementId(1))).unwrap();
            scope.unmount_node("a").unwrap();
        }
        assert!(!c.graph().has_node("a"));
    }

    #[test]
    fn detached_scope_rejects_registration() {
        let mut scope = MountScope::<NullHost>::detached();
        scope.enter_zone(ZoneProps::new("z"));
        assert_eq!(scope.current_zone(), Some("z"));
        assert_eq!(
            scope.mount_node(NodeProps::new("a", ElementId(1))),
            Err(ScopeError::NoProvider { operation: "mount_node" })
        );
        assert_eq!(
            scope.unmount_node("a"),
            Err(ScopeError::NoProvider { operation: "unmount_node" })
        );
        let err = scope.controller().unwrap_err();
        assert!(err.to_string().contains("outside a focus controller scope"));
    }

    #[test]
    fn exit_without_zone_is_false() {
        let mut scope = MountScope::<NullHost>::detached();
        assert!(!scope.exit_zone());
    }
}
