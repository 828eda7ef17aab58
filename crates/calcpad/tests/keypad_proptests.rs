//! Property-based tests for the keypad layout and keyboard mapping

use calcpad::core::Operation;
use calcpad::keypad::{Keypad, KeypadAction};
use proptest::prelude::*;

// ===== Strategy definitions =====

/// Generate any valid digit (0-9)
fn digit_strategy() -> impl Strategy<Value = u8> {
    0u8..=9u8
}

/// Generate any operation
fn operation_strategy() -> impl Strategy<Value = Operation> {
    prop::sample::select(Operation::ALL.to_vec())
}

/// Generate any keypad action
fn keypad_action_strategy() -> impl Strategy<Value = KeypadAction> {
    prop_oneof![
        digit_strategy().prop_map(KeypadAction::Digit),
        Just(KeypadAction::Decimal),
        operation_strategy().prop_map(KeypadAction::Operator),
        Just(KeypadAction::Equals),
        Just(KeypadAction::Clear),
        Just(KeypadAction::Sign),
        Just(KeypadAction::Percent),
        Just(KeypadAction::Backspace),
    ]
}

/// Generate valid grid positions
fn grid_position_strategy() -> impl Strategy<Value = (usize, usize)> {
    (0usize..5usize, 0usize..4usize)
}

proptest! {
    /// Every action has a non-empty label and a button-style element id
    #[test]
    fn prop_action_has_label_and_id(action in keypad_action_strategy()) {
        prop_assert!(!action.label().is_empty());
        prop_assert!(action.element_id().starts_with("btn-"));
    }

    /// Every grid cell is covered by exactly one button
    #[test]
    fn prop_every_cell_has_button((row, col) in grid_position_strategy()) {
        let keypad = Keypad::new();
        let button = keypad.get_button_at(row, col);
        prop_assert!(button.is_some());
        let button = button.unwrap();
        prop_assert_eq!(button.row, row);
        prop_assert!(button.covers(col));
    }

    /// Clicking a button's element id yields its action
    #[test]
    fn prop_click_round_trips((row, col) in grid_position_strategy()) {
        let keypad = Keypad::new();
        let button = keypad.get_button_at(row, col).unwrap();
        prop_assert_eq!(keypad.handle_click(&button.id), Some(button.action));
    }

    /// Digit keys map to digit actions
    #[test]
    fn prop_digit_keys(d in digit_strategy()) {
        prop_assert_eq!(
            Keypad::key_to_action(&d.to_string()),
            Some(KeypadAction::Digit(d))
        );
    }

    /// Operator keys map to operator actions and back to the same key
    #[test]
    fn prop_operator_keys(op in operation_strategy()) {
        let action = Keypad::key_to_action(op.symbol());
        prop_assert_eq!(action, Some(KeypadAction::Operator(op)));
    }

    /// Multi-letter keys other than the named keys are unmapped
    #[test]
    fn prop_unmapped_keys_return_none(key in "[a-zA-Z]{2,8}") {
        prop_assume!(!["Enter", "Escape", "Backspace"].contains(&key.as_str()));
        prop_assert_eq!(Keypad::key_to_action(&key), None);
    }

    /// Out-of-range cells have no button
    #[test]
    fn prop_out_of_range(row in 5usize..100, col in 4usize..100) {
        let keypad = Keypad::new();
        prop_assert!(keypad.get_button_at(row, 0).is_none());
        prop_assert!(keypad.get_button_at(0, col).is_none());
    }
}
