#![forbid(unsafe_code)]

//! Host input vocabulary: element handles, key codes, and focus events.
//!
//! The navigation engine never touches real UI elements. Hosts hand it an
//! [`ElementId`] per mounted element and translate their native keyboard and
//! focus notifications into [`KeyEvent`] / [`FocusInEvent`] values.
//!
//! # Invariants
//!
//! 1. `KeyCode::from_key_name(code.key_name())` round-trips for every code
//!    except [`KeyCode::BackTab`], which normalizes to `Tab` + shift.
//! 2. [`KeyEvent::shift_pressed`] is true whenever the code is `BackTab`,
//!    regardless of the modifier bits.

use std::borrow::Cow;
use std::fmt;

use bitflags::bitflags;

// ---------------------------------------------------------------------------
// ElementId
// ---------------------------------------------------------------------------

/// Opaque, non-owning handle to a host element.
///
/// The host allocates these and keeps the mapping to its own element
/// objects. The engine only compares handles for identity and passes them
/// back to the host when a side effect is required.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElementId(pub u64);

impl ElementId {
    /// Create a handle from a raw host value.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw host value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl From<u64> for ElementId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "el#{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Modifiers
// ---------------------------------------------------------------------------

bitflags! {
    /// Modifier keys held during a key press.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0001;
        const CTRL = 0b0010;
        const ALT = 0b0100;
        const SUPER = 0b1000;
    }
}

// ---------------------------------------------------------------------------
// KeyCode
// ---------------------------------------------------------------------------

/// A pressed key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Up,
    Down,
    Left,
    Right,
    Tab,
    /// Terminal-style Shift+Tab. Reports the key name `Tab` with shift held.
    BackTab,
    Escape,
    Enter,
    Home,
    End,
    PageUp,
    PageDown,
    Char(char),
    /// Function key `F1`..`F24`.
    F(u8),
    /// Any other DOM-style key name (for example `"MediaPlayPause"`).
    Named(String),
}

impl KeyCode {
    /// DOM-style key name used as the lookup key in binding tables.
    #[must_use]
    pub fn key_name(&self) -> Cow<'_, str> {
        match self {
            Self::Up => Cow::Borrowed("ArrowUp"),
            Self::Down => Cow::Borrowed("ArrowDown"),
            Self::Left => Cow::Borrowed("ArrowLeft"),
            Self::Right => Cow::Borrowed("ArrowRight"),
            Self::Tab | Self::BackTab => Cow::Borrowed("Tab"),
            Self::Escape => Cow::Borrowed("Escape"),
            Self::Enter => Cow::Borrowed("Enter"),
            Self::Home => Cow::Borrowed("Home"),
            Self::End => Cow::Borrowed("End"),
            Self::PageUp => Cow::Borrowed("PageUp"),
            Self::PageDown => Cow::Borrowed("PageDown"),
            Self::Char(c) => Cow::Owned(c.to_string()),
            Self::F(n) => Cow::Owned(format!("F{n}")),
            Self::Named(name) => Cow::Borrowed(name.as_str()),
        }
    }

    /// Parse a DOM-style key name.
    ///
    /// Single characters become [`KeyCode::Char`]; unrecognized names are
    /// kept verbatim as [`KeyCode::Named`].
    #[must_use]
    pub fn from_key_name(name: &str) -> Self {
        match name {
            "ArrowUp" => Self::Up,
            "ArrowDown" => Self::Down,
            "ArrowLeft" => Self::Left,
            "ArrowRight" => Self::Right,
            "Tab" => Self::Tab,
            "Escape" => Self::Escape,
            "Enter" => Self::Enter,
            "Home" => Self::Home,
            "End" => Self::End,
            "PageUp" => Self::PageUp,
            "PageDown" => Self::PageDown,
            _ => {
                let mut chars = name.chars();
                if let (Some(c), None) = (chars.next(), chars.next()) {
                    return Self::Char(c);
                }
                if let Some(n) = name
                    .strip_prefix('F')
                    .and_then(|digits| digits.parse::<u8>().ok())
                    .filter(|n| (1..=24).contains(n))
                {
                    return Self::F(n);
                }
                Self::Named(name.to_owned())
            }
        }
    }

    /// Whether this is the escape key.
    #[must_use]
    pub fn is_escape(&self) -> bool {
        matches!(self, Self::Escape)
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key_name())
    }
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// A key-down notification forwarded by the host.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: Modifiers,
    /// Element that had host focus when the key was pressed.
    pub target: Option<ElementId>,
}

impl KeyEvent {
    /// Key press without modifiers or target.
    #[must_use]
    pub fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::empty(),
            target: None,
        }
    }

    /// Builder: set modifiers.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Builder: hold shift.
    #[must_use]
    pub fn with_shift(mut self) -> Self {
        self.modifiers |= Modifiers::SHIFT;
        self
    }

    /// Builder: set the target element.
    #[must_use]
    pub fn with_target(mut self, target: ElementId) -> Self {
        self.target = Some(target);
        self
    }

    /// Whether shift is held (explicitly or implied by `BackTab`).
    #[must_use]
    pub fn shift_pressed(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT) || matches!(self.code, KeyCode::BackTab)
    }
}

/// Host focus landed on an element (pointer click, programmatic focus, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FocusInEvent {
    pub target: ElementId,
}

impl FocusInEvent {
    #[must_use]
    pub const fn new(target: ElementId) -> Self {
        Self { target }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_keys_round_trip() {
        for code in [
            KeyCode::Up,
            KeyCode::Down,
            KeyCode::Left,
            KeyCode::Right,
            KeyCode::Tab,
            KeyCode::Escape,
            KeyCode::Enter,
            KeyCode::Home,
            KeyCode::End,
            KeyCode::PageUp,
            KeyCode::PageDown,
            KeyCode::Char('j'),
            KeyCode::F(5),
            KeyCode::Named("MediaPlayPause".into()),
        ] {
            assert_eq!(KeyCode::from_key_name(&code.key_name()), code);
        }
    }

    #[test]
    fn back_tab_reports_tab_with_shift() {
        let event = KeyEvent::new(KeyCode::BackTab);
        assert_eq!(event.code.key_name(), "Tab");
        assert!(event.shift_pressed());
    }

    #[test]
    fn shift_modifier_detected() {
        assert!(!KeyEvent::new(KeyCode::Tab).shift_pressed());
        assert!(KeyEvent::new(KeyCode::Tab).with_shift().shift_pressed());
        assert!(
            !KeyEvent::new(KeyCode::Tab)
                .with_modifiers(Modifiers::CTRL)
                .shift_pressed()
        );
    }

    #[test]
    fn out_of_range_function_key_is_named() {
        assert_eq!(KeyCode::from_key_name("F99"), KeyCode::Named("F99".into()));
        assert_eq!(KeyCode::from_key_name("F12"), KeyCode::F(12));
    }

    #[test]
    fn element_id_display() {
        assert_eq!(ElementId::new(7).to_string(), "el#7");
        assert_eq!(ElementId::from(3).raw(), 3);
    }

    #[test]
    fn escape_detection() {
        assert!(KeyCode::Escape.is_escape());
        assert!(!KeyCode::Char('q').is_escape());
    }

    mod property {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn any_char_round_trips(c in any::<char>()) {
                let code = KeyCode::Char(c);
                prop_assert_eq!(KeyCode::from_key_name(&code.key_name()), code);
            }

            #[test]
            fn function_keys_round_trip(n in 1u8..=24) {
                prop_assert_eq!(KeyCode::from_key_name(&format!("F{n}")), KeyCode::F(n));
            }

            #[test]
            fn shift_always_reported(bits in any::<u8>()) {
                let mods = Modifiers::from_bits_truncate(bits);
                let event = KeyEvent::new(KeyCode::Tab).with_modifiers(mods);
                prop_assert_eq!(event.shift_pressed(), mods.contains(Modifiers::SHIFT));
            }
        }
    }
}
