//! Property-based tests over random key sequences.
//!
//! 1. Inside a trapping zone, no key sequence moves host focus outside it.
//! 2. In a looping linear chain, N forward presses land on index N mod len.
//! 3. Forward then backward returns to the start when every node is enabled.

use focusgraph::{FocusConfig, KeyOutcome};
use focusgraph_core::{KeyCode, KeyEvent};
use focusgraph_harness::{element, linear_chain, modal, modal_scenario};
use proptest::prelude::*;

fn nav_key() -> impl Strategy<Value = KeyCode> {
    prop_oneof![
        Just(KeyCode::Tab),
        Just(KeyCode::BackTab),
        Just(KeyCode::Up),
        Just(KeyCode::Down),
        Just(KeyCode::Left),
        Just(KeyCode::Right),
        Just(KeyCode::Enter),
        Just(KeyCode::Char('x')),
    ]
}

const IDS: [&str; 6] = ["n0", "n1", "n2", "n3", "n4", "n5"];

proptest! {
    #[test]
    fn trap_holds_for_any_sequence(keys in proptest::collection::vec(nav_key(), 1..40)) {
        let mut c = modal_scenario(FocusConfig::new().dev_warnings(false));
        c.focus_node("m1");
        for code in keys {
            let target = c.host().focused();
            let mut event = KeyEvent::new(code);
            if let Some(target) = target {
                event = event.with_target(target);
            }
            c.handle_key_down(&event);
            let focused = c.host().focused();
            prop_assert!(focused == Some(modal::M1) || focused == Some(modal::M2));
        }
    }

    #[test]
    fn forward_presses_count_modulo_len(len in 2usize..=6, presses in 0usize..20) {
        let mut c = linear_chain(&IDS[..len], FocusConfig::new().dev_warnings(false));
        c.focus_node(IDS[0]);
        for _ in 0..presses {
            let target = c.host().focused().unwrap_or(element(0));
            let outcome = c.handle_key_down(&KeyEvent::new(KeyCode::Tab).with_target(target));
            prop_assert_eq!(outcome, KeyOutcome::Handled);
        }
        prop_assert_eq!(c.last_focused(), Some(IDS[presses % len]));
    }

    #[test]
    fn forward_then_back_is_identity(len in 2usize..=6, start in 0usize..6, steps in 0usize..10) {
        let start = start % len;
        let mut c = linear_chain(&IDS[..len], FocusConfig::new().dev_warnings(false));
        c.focus_node(IDS[start]);
        for code in std::iter::repeat_n(KeyCode::Tab, steps).chain(std::iter::repeat_n(KeyCode::BackTab, steps)) {
            let target = c.host().focused().unwrap_or(element(0));
            c.handle_key_down(&KeyEvent::new(code).with_target(target));
        }
        prop_assert_eq!(c.last_focused(), Some(IDS[start]));
    }
}
