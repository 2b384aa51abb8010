#![forbid(unsafe_code)]

//! Key-to-direction mapping.
//!
//! A [`KeyMap`] turns a key press into a [`KeyIntent`]: either one of the six
//! navigation directions or the escape intent. Lookup keys are DOM-style key
//! names; shift transforms the key identity itself (`Tab` becomes
//! `Shift+Tab`), so override tables can target `Tab` and `Shift+Tab`
//! independently.
//!
//! Escape is not part of the binding table and cannot be rebound.

use std::borrow::Cow;
use std::collections::HashMap;

use focusgraph_core::KeyEvent;

use crate::diagnostics::ConfigWarning;
use crate::graph::NavDirection;

/// Key name of the escape key.
pub const ESCAPE_KEY: &str = "Escape";

/// Built-in bindings, applied beneath any overrides.
pub const DEFAULT_KEY_BINDINGS: [(&str, NavDirection); 6] = [
    ("ArrowUp", NavDirection::Up),
    ("ArrowDown", NavDirection::Down),
    ("ArrowLeft", NavDirection::Left),
    ("ArrowRight", NavDirection::Right),
    ("Tab", NavDirection::Next),
    ("Shift+Tab", NavDirection::Prev),
];

/// Caller-supplied overrides: key name → direction name.
///
/// Values are kept as strings so that invalid entries can be reported
/// rather than rejected at construction.
pub type KeyBindings = HashMap<String, String>;

/// What a key press asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyIntent {
    Escape,
    Navigate(NavDirection),
}

/// Lookup key for a key press: `Shift+Tab` for shifted Tab, otherwise the
/// key name.
#[must_use]
pub fn binding_key(event: &KeyEvent) -> Cow<'_, str> {
    let name = event.code.key_name();
    if event.shift_pressed() && name == "Tab" {
        Cow::Borrowed("Shift+Tab")
    } else {
        name
    }
}

/// Resolved binding table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMap {
    bindings: HashMap<String, NavDirection>,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            bindings: DEFAULT_KEY_BINDINGS
                .iter()
                .map(|&(key, dir)| (key.to_owned(), dir))
                .collect(),
        }
    }
}

impl KeyMap {
    /// Default bindings only.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge `overrides` over the defaults.
    ///
    /// Entries whose value is not a direction name are skipped (the default
    /// for that key, if any, survives) and reported as warnings.
    #[must_use]
    pub fn with_overrides(overrides: &KeyBindings) -> (Self, Vec<ConfigWarning>) {
        let mut map = Self::default();
        let mut warnings = Vec::new();
        let mut entries: Vec<_> = overrides.iter().collect();
        // Deterministic warning order.
        entries.sort_by(|a, b| a.0.cmp(b.0));
        for (key, value) in entries {
            match value.parse::<NavDirection>() {
                Ok(dir) => map.bind(key.clone(), dir),
                Err(_) => warnings.push(ConfigWarning::InvalidKeyBinding {
                    key: key.clone(),
                    value: value.clone(),
                }),
            }
        }
        (map, warnings)
    }

    /// Bind (or rebind) a key name.
    pub fn bind(&mut self, key: impl Into<String>, direction: NavDirection) {
        self.bindings.insert(key.into(), direction);
    }

    /// Direction bound to a key name.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<NavDirection> {
        self.bindings.get(key).copied()
    }

    /// Direction for a key press, if bound.
    #[must_use]
    pub fn direction_for(&self, event: &KeyEvent) -> Option<NavDirection> {
        self.get(&binding_key(event))
    }

    /// Escape or a bound direction; `None` for unmapped keys.
    #[must_use]
    pub fn intent_for(&self, event: &KeyEvent) -> Option<KeyIntent> {
        if event.code.key_name() == ESCAPE_KEY {
            return Some(KeyIntent::Escape);
        }
        self.direction_for(event).map(KeyIntent::Navigate)
    }

    /// Number of bound keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use focusgraph_core::{KeyCode, Modifiers};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code)
    }

    fn overrides(pairs: &[(&str, &str)]) -> KeyBindings {
        pairs
            .iter()
            .map(|&(k, v)| (k.to_owned(), v.to_owned()))
            .collect()
    }

    #[test]
    fn defaults_cover_arrows_and_tab() {
        let map = KeyMap::new();
        assert_eq!(map.direction_for(&press(KeyCode::Up)), Some(NavDirection::Up));
        assert_eq!(map.direction_for(&press(KeyCode::Down)), Some(NavDirection::Down));
        assert_eq!(map.direction_for(&press(KeyCode::Left)), Some(NavDirection::Left));
        assert_eq!(map.direction_for(&press(KeyCode::Right)), Some(NavDirection::Right));
        assert_eq!(map.direction_for(&press(KeyCode::Tab)), Some(NavDirection::Next));
        assert_eq!(
            map.direction_for(&press(KeyCode::Tab).with_shift()),
            Some(NavDirection::Prev)
        );
        assert_eq!(map.direction_for(&press(KeyCode::BackTab)), Some(NavDirection::Prev));
        assert_eq!(map.len(), 6);
    }

    #[test]
    fn shift_only_transforms_tab() {
        let map = KeyMap::new();
        let shifted_arrow = press(KeyCode::Down).with_shift();
        assert_eq!(binding_key(&shifted_arrow), "ArrowDown");
        assert_eq!(map.direction_for(&shifted_arrow), Some(NavDirection::Down));
    }

    #[test]
    fn unmapped_key_has_no_intent() {
        let map = KeyMap::new();
        assert_eq!(map.intent_for(&press(KeyCode::Char('x'))), None);
        assert_eq!(map.intent_for(&press(KeyCode::Enter)), None);
    }

    #[test]
    fn escape_is_its_own_intent() {
        let map = KeyMap::new();
        assert_eq!(map.intent_for(&press(KeyCode::Escape)), Some(KeyIntent::Escape));
        assert_eq!(
            map.intent_for(&press(KeyCode::Escape).with_modifiers(Modifiers::SHIFT)),
            Some(KeyIntent::Escape)
        );
    }

    #[test]
    fn overrides_merge_over_defaults() {
        let (map, warnings) = KeyMap::with_overrides(&overrides(&[
            ("j", "down"),
            ("k", "up"),
            ("Tab", "right"),
        ]));
        assert!(warnings.is_empty());
        assert_eq!(map.direction_for(&press(KeyCode::Char('j'))), Some(NavDirection::Down));
        assert_eq!(map.direction_for(&press(KeyCode::Tab)), Some(NavDirection::Right));
        // Untouched defaults survive.
        assert_eq!(
            map.direction_for(&press(KeyCode::Tab).with_shift()),
            Some(NavDirection::Prev)
        );
        assert_eq!(map.direction_for(&press(KeyCode::Up)), Some(NavDirection::Up));
    }

    #[test]
    fn shift_tab_can_be_overridden_independently() {
        let (map, _) = KeyMap::with_overrides(&overrides(&[("Shift+Tab", "up")]));
        assert_eq!(map.direction_for(&press(KeyCode::Tab)), Some(NavDirection::Next));
        assert_eq!(map.direction_for(&press(KeyCode::BackTab)), Some(NavDirection::Up));
    }

    #[test]
    fn invalid_override_warns_and_keeps_default() {
        let (map, warnings) = KeyMap::with_overrides(&overrides(&[
            ("ArrowUp", "sideways"),
            ("x", "bogus"),
        ]));
        assert_eq!(map.direction_for(&press(KeyCode::Up)), Some(NavDirection::Up));
        assert_eq!(map.get("x"), None);
        assert_eq!(
            warnings,
            vec![
                ConfigWarning::InvalidKeyBinding {
                    key: "ArrowUp".into(),
                    value: "sideways".into(),
                },
                ConfigWarning::InvalidKeyBinding {
                    key: "x".into(),
                    value: "bogus".into(),
                },
            ]
        );
    }
}
