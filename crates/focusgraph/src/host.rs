#![forbid(unsafe_code)]

//! Host side effects.
//!
//! The controller never touches UI elements directly. Every effect of a
//! focus move goes through a [`FocusHost`] implementation supplied by the
//! embedding UI layer. Only `focus` and `blur` are required; a host that
//! has no notion of scrolling, live regions, or transition markers can
//! ignore the rest.

use focusgraph_core::ElementId;
use serde::{Deserialize, Serialize};

/// Alignment of an element within its scroll container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollPosition {
    Start,
    Center,
    End,
    #[default]
    Nearest,
}

/// How a scroll is animated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollBehavior {
    Auto,
    #[default]
    Instant,
    Smooth,
}

/// Scroll-into-view parameters passed to the host.
///
/// The default is nearest/nearest/instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ScrollOptions {
    pub block: ScrollPosition,
    pub inline: ScrollPosition,
    pub behavior: ScrollBehavior,
}

/// Partial scroll override; unset fields keep the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ScrollOverrides {
    pub block: Option<ScrollPosition>,
    pub inline: Option<ScrollPosition>,
    pub behavior: Option<ScrollBehavior>,
}

impl ScrollOverrides {
    /// Apply the overrides on top of [`ScrollOptions::default`].
    #[must_use]
    pub fn resolve(self) -> ScrollOptions {
        let base = ScrollOptions::default();
        ScrollOptions {
            block: self.block.unwrap_or(base.block),
            inline: self.inline.unwrap_or(base.inline),
            behavior: self.behavior.unwrap_or(base.behavior),
        }
    }
}

/// Side effects the controller asks of the embedding UI.
pub trait FocusHost {
    /// Give host focus to `element`.
    fn focus(&mut self, element: ElementId);

    /// Take host focus away from `element`.
    fn blur(&mut self, element: ElementId);

    /// Scroll `element` into view.
    fn scroll_into_view(&mut self, element: ElementId, options: ScrollOptions) {
        let _ = (element, options);
    }

    /// Set or clear the "current" marker (`aria-current`).
    fn set_current(&mut self, element: ElementId, current: bool) {
        let _ = (element, current);
    }

    /// Set or clear the transient "just focused" marker.
    fn set_just_focused(&mut self, element: ElementId, on: bool) {
        let _ = (element, on);
    }

    /// Publish text to the assistive-technology live region.
    fn announce(&mut self, text: &str) {
        let _ = text;
    }

    /// Human-readable label of `element`; empty when it has none.
    ///
    /// Hosts with attribute access can build this with
    /// [`crate::a11y::accessible_name`].
    fn accessible_name(&self, element: ElementId) -> String {
        let _ = element;
        String::new()
    }

    /// Whether the user asked for reduced motion.
    fn prefers_reduced_motion(&self) -> bool {
        false
    }
}

impl<H: FocusHost + ?Sized> FocusHost for &mut H {
    fn focus(&mut self, element: ElementId) {
        (**self).focus(element);
    }

    fn blur(&mut self, element: ElementId) {
        (**self).blur(element);
    }

    fn scroll_into_view(&mut self, element: ElementId, options: ScrollOptions) {
        (**self).scroll_into_view(element, options);
    }

    fn set_current(&mut self, element: ElementId, current: bool) {
        (**self).set_current(element, current);
    }

    fn set_just_focused(&mut self, element: ElementId, on: bool) {
        (**self).set_just_focused(element, on);
    }

    fn announce(&mut self, text: &str) {
        (**self).announce(text);
    }

    fn accessible_name(&self, element: ElementId) -> String {
        (**self).accessible_name(element)
    }

    fn prefers_reduced_motion(&self) -> bool {
        (**self).prefers_reduced_motion()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_scroll_is_nearest_instant() {
        let opts = ScrollOptions::default();
        assert_eq!(opts.block, ScrollPosition::Nearest);
        assert_eq!(opts.inline, ScrollPosition::Nearest);
        assert_eq!(opts.behavior, ScrollBehavior::Instant);
    }

    #[test]
    fn overrides_merge_field_by_field() {
        let opts = ScrollOverrides {
            block: Some(ScrollPosition::Center),
            behavior: Some(ScrollBehavior::Smooth),
            ..ScrollOverrides::default()
        }
        .resolve();
        assert_eq!(opts.block, ScrollPosition::Center);
        assert_eq!(opts.inline, ScrollPosition::Nearest);
        assert_eq!(opts.behavior, ScrollBehavior::Smooth);
    }

    #[derive(Default)]
    struct Minimal {
        focused: Vec<ElementId>,
    }

    impl FocusHost for Minimal {
        fn focus(&mut self, element: ElementId) {
            self.focused.push(element);
        }

        fn blur(&mut self, _element: ElementId) {}
    }

    #[test]
    fn optional_effects_default_to_noop() {
        let mut host = Minimal::default();
        host.scroll_into_view(ElementId(1), ScrollOptions::default());
        host.announce("hello");
        assert_eq!(host.accessible_name(ElementId(1)), "");
        assert!(!host.prefers_reduced_motion());

        fn drive<H: FocusHost>(mut host: H) {
            host.focus(ElementId(4));
        }
        drive(&mut host);
        assert_eq!(host.focused, vec![ElementId(4)]);
    }
}
