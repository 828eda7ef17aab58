//! Keypad layout and keyboard mapping
//!
//! Layout:
//! ```text
//! [ AC ] [ +/- ] [ % ] [ ÷ ]
//! [ 7  ] [  8  ] [ 9 ] [ × ]
//! [ 4  ] [  5  ] [ 6 ] [ − ]
//! [ 1  ] [  2  ] [ 3 ] [ + ]
//! [      0     ] [ . ] [ = ]
//! ```

use crate::core::Operation;
use crate::web::dom::DomElement;

/// Discrete user actions understood by the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeypadAction {
    /// Enter a digit (0-9)
    Digit(u8),
    /// Enter a decimal point
    Decimal,
    /// Select an operator
    Operator(Operation),
    /// Resolve the pending operation
    Equals,
    /// Reset everything
    Clear,
    /// Negate the display
    Sign,
    /// Divide the display by 100
    Percent,
    /// Delete the last character
    Backspace,
}

impl KeypadAction {
    /// Returns the button label for this action
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Digit(d) => d.to_string(),
            Self::Decimal => ".".to_string(),
            Self::Operator(op) => op.label().to_string(),
            Self::Equals => "=".to_string(),
            Self::Clear => "AC".to_string(),
            Self::Sign => "+/-".to_string(),
            Self::Percent => "%".to_string(),
            Self::Backspace => "⌫".to_string(),
        }
    }

    /// Returns the DOM element id of the button for this action
    #[must_use]
    pub fn element_id(&self) -> String {
        match self {
            Self::Digit(d) => format!("btn-{d}"),
            Self::Decimal => "btn-decimal".to_string(),
            Self::Operator(op) => format!("btn-{}", op.name()),
            Self::Equals => "btn-equals".to_string(),
            Self::Clear => "btn-clear".to_string(),
            Self::Sign => "btn-sign".to_string(),
            Self::Percent => "btn-percent".to_string(),
            Self::Backspace => "btn-backspace".to_string(),
        }
    }
}

/// Visual role of a button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonVariant {
    /// Digits 1-9 and the decimal point
    Digit,
    /// The double-width zero
    Zero,
    /// Clear, sign and percent
    Function,
    /// The four operators
    Operator,
    /// Equals
    Equals,
}

impl ButtonVariant {
    /// CSS class for the variant
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Digit => "btn-digit",
            Self::Zero => "btn-zero",
            Self::Function => "btn-function",
            Self::Operator => "btn-operator",
            Self::Equals => "btn-equals-key",
        }
    }

    fn for_action(action: KeypadAction) -> Self {
        match action {
            KeypadAction::Digit(0) => Self::Zero,
            KeypadAction::Digit(_) | KeypadAction::Decimal => Self::Digit,
            KeypadAction::Operator(_) => Self::Operator,
            KeypadAction::Equals => Self::Equals,
            KeypadAction::Clear
            | KeypadAction::Sign
            | KeypadAction::Percent
            | KeypadAction::Backspace => Self::Function,
        }
    }
}

/// A single keypad button definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeypadButtonDef {
    /// The action this button performs
    pub action: KeypadAction,
    /// The DOM element ID for this button
    pub id: String,
    /// Button label
    pub label: String,
    /// Visual role
    pub variant: ButtonVariant,
    /// Grid row (0-indexed)
    pub row: usize,
    /// Grid column (0-indexed)
    pub col: usize,
    /// Number of columns covered
    pub span: usize,
}

impl KeypadButtonDef {
    /// Creates a single-width button
    #[must_use]
    pub fn new(action: KeypadAction, row: usize, col: usize) -> Self {
        Self {
            action,
            id: action.element_id(),
            label: action.label(),
            variant: ButtonVariant::for_action(action),
            row,
            col,
            span: 1,
        }
    }

    /// Sets the column span
    #[must_use]
    pub const fn with_span(mut self, span: usize) -> Self {
        self.span = span;
        self
    }

    /// Whether the button covers `col`
    #[must_use]
    pub const fn covers(&self, col: usize) -> bool {
        col >= self.col && col < self.col + self.span
    }
}

/// Calculator keypad
#[derive(Debug, Clone)]
pub struct Keypad {
    buttons: Vec<KeypadButtonDef>,
    rows: usize,
    cols: usize,
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}

impl Keypad {
    /// Creates the standard keypad
    #[must_use]
    pub fn new() -> Self {
        use KeypadAction::{Clear, Decimal, Digit, Equals, Operator, Percent, Sign};

        let buttons = vec![
            // Row 0: AC +/- % ÷
            KeypadButtonDef::new(Clear, 0, 0),
            KeypadButtonDef::new(Sign, 0, 1),
            KeypadButtonDef::new(Percent, 0, 2),
            KeypadButtonDef::new(Operator(Operation::Divide), 0, 3),
            // Row 1: 7 8 9 ×
            KeypadButtonDef::new(Digit(7), 1, 0),
            KeypadButtonDef::new(Digit(8), 1, 1),
            KeypadButtonDef::new(Digit(9), 1, 2),
            KeypadButtonDef::new(Operator(Operation::Multiply), 1, 3),
            // Row 2: 4 5 6 −
            KeypadButtonDef::new(Digit(4), 2, 0),
            KeypadButtonDef::new(Digit(5), 2, 1),
            KeypadButtonDef::new(Digit(6), 2, 2),
            KeypadButtonDef::new(Operator(Operation::Subtract), 2, 3),
            // Row 3: 1 2 3 +
            KeypadButtonDef::new(Digit(1), 3, 0),
            KeypadButtonDef::new(Digit(2), 3, 1),
            KeypadButtonDef::new(Digit(3), 3, 2),
            KeypadButtonDef::new(Operator(Operation::Add), 3, 3),
            // Row 4: 0 (double) . =
            KeypadButtonDef::new(Digit(0), 4, 0).with_span(2),
            KeypadButtonDef::new(Decimal, 4, 2),
            KeypadButtonDef::new(Equals, 4, 3),
        ];

        Self {
            buttons,
            rows: 5,
            cols: 4,
        }
    }

    /// Returns the number of buttons
    #[must_use]
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    /// Returns the grid dimensions (rows, cols)
    #[must_use]
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Gets all button definitions
    #[must_use]
    pub fn buttons(&self) -> &[KeypadButtonDef] {
        &self.buttons
    }

    /// Gets the button covering a grid cell
    #[must_use]
    pub fn get_button_at(&self, row: usize, col: usize) -> Option<&KeypadButtonDef> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.buttons
            .iter()
            .find(|b| b.row == row && b.covers(col))
    }

    /// Finds a button by element ID
    #[must_use]
    pub fn find_button_by_id(&self, id: &str) -> Option<&KeypadButtonDef> {
        self.buttons.iter().find(|b| b.id == id)
    }

    /// Finds the button for an action
    #[must_use]
    pub fn find_button(&self, action: KeypadAction) -> Option<&KeypadButtonDef> {
        self.buttons.iter().find(|b| b.action == action)
    }

    /// Processes a button click event and returns the action
    #[must_use]
    pub fn handle_click(&self, element_id: &str) -> Option<KeypadAction> {
        self.find_button_by_id(element_id).map(|btn| btn.action)
    }

    /// Maps a keyboard key to a keypad action
    #[must_use]
    pub fn key_to_action(key: &str) -> Option<KeypadAction> {
        match key {
            "." => Some(KeypadAction::Decimal),
            "Enter" | "=" => Some(KeypadAction::Equals),
            "Escape" => Some(KeypadAction::Clear),
            "Backspace" => Some(KeypadAction::Backspace),
            _ => {
                if let Some(op) = Operation::from_key(key) {
                    return Some(KeypadAction::Operator(op));
                }
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => ch
                        .to_digit(10)
                        .map(|d| KeypadAction::Digit(d as u8)),
                    _ => None,
                }
            }
        }
    }

    /// Creates DOM elements for all keypad buttons
    pub fn create_dom_elements(&self) -> Vec<DomElement> {
        self.buttons
            .iter()
            .map(|btn| {
                DomElement::new("button")
                    .with_id(&btn.id)
                    .with_text(&btn.label)
                    .with_class("keypad-btn")
                    .with_class(btn.variant.css_class())
                    .with_class(&format!("keypad-row-{}", btn.row))
                    .with_class(&format!("keypad-col-{}", btn.col))
                    .with_attr("data-span", &btn.span.to_string())
            })
            .collect()
    }

    /// Creates a keypad container element with all buttons
    #[must_use]
    pub fn create_keypad_element(&self) -> DomElement {
        self.create_dom_elements().into_iter().fold(
            DomElement::new("div")
                .with_id("calc-keypad")
                .with_class("keypad"),
            DomElement::with_child,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    // ===== KeypadAction =====

    #[test]
    fn test_action_labels() {
        assert_eq!(KeypadAction::Digit(5).label(), "5");
        assert_eq!(KeypadAction::Decimal.label(), ".");
        assert_eq!(KeypadAction::Operator(Operation::Divide).label(), "÷");
        assert_eq!(KeypadAction::Operator(Operation::Subtract).label(), "−");
        assert_eq!(KeypadAction::Equals.label(), "=");
        assert_eq!(KeypadAction::Clear.label(), "AC");
        assert_eq!(KeypadAction::Sign.label(), "+/-");
        assert_eq!(KeypadAction::Percent.label(), "%");
    }

    #[test]
    fn test_action_element_ids() {
        assert_eq!(KeypadAction::Digit(0).element_id(), "btn-0");
        assert_eq!(
            KeypadAction::Operator(Operation::Multiply).element_id(),
            "btn-multiply"
        );
        assert_eq!(KeypadAction::Equals.element_id(), "btn-equals");
        assert_eq!(KeypadAction::Backspace.element_id(), "btn-backspace");
    }

    // ===== Layout =====

    #[test]
    fn test_keypad_dimensions() {
        let keypad = Keypad::new();
        assert_eq!(keypad.dimensions(), (5, 4));
        assert_eq!(keypad.button_count(), 19);
    }

    #[test]
    fn test_every_cell_covered_once() {
        let keypad = Keypad::default();
        let (rows, cols) = keypad.dimensions();
        for row in 0..rows {
            for col in 0..cols {
                let covering = keypad
                    .buttons()
                    .iter()
                    .filter(|b| b.row == row && b.covers(col))
                    .count();
                assert_eq!(covering, 1, "cell ({row}, {col})");
            }
        }
    }

    #[test]
    fn test_zero_spans_two_columns() {
        let keypad = Keypad::new();
        let zero = keypad.get_button_at(4, 0).unwrap();
        assert_eq!(zero.action, KeypadAction::Digit(0));
        assert_eq!(zero.variant, ButtonVariant::Zero);
        assert_eq!(keypad.get_button_at(4, 1), Some(zero));
        assert_eq!(
            keypad.get_button_at(4, 2).unwrap().action,
            KeypadAction::Decimal
        );
    }

    #[test]
    fn test_top_row_and_operator_column() {
        let keypad = Keypad::new();
        let top: Vec<_> = (0..4)
            .map(|c| keypad.get_button_at(0, c).unwrap().label.clone())
            .collect();
        assert_eq!(top, ["AC", "+/-", "%", "÷"]);
        let ops: Vec<_> = (0..4)
            .map(|r| keypad.get_button_at(r, 3).unwrap().label.clone())
            .collect();
        assert_eq!(ops, ["÷", "×", "−", "+"]);
    }

    #[test]
    fn test_out_of_bounds() {
        let keypad = Keypad::new();
        assert!(keypad.get_button_at(5, 0).is_none());
        assert!(keypad.get_button_at(0, 4).is_none());
    }

    #[test]
    fn test_ids_unique() {
        let keypad = Keypad::new();
        let ids: HashSet<_> = keypad.buttons().iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids.len(), keypad.button_count());
    }

    #[test]
    fn test_handle_click() {
        let keypad = Keypad::new();
        assert_eq!(keypad.handle_click("btn-7"), Some(KeypadAction::Digit(7)));
        assert_eq!(
            keypad.handle_click("btn-add"),
            Some(KeypadAction::Operator(Operation::Add))
        );
        assert_eq!(keypad.handle_click("btn-missing"), None);
        assert!(keypad.find_button(KeypadAction::Backspace).is_none());
    }

    // ===== Keyboard =====

    #[test]
    fn test_key_to_action_digits() {
        for d in 0..=9u8 {
            assert_eq!(
                Keypad::key_to_action(&d.to_string()),
                Some(KeypadAction::Digit(d))
            );
        }
    }

    #[test]
    fn test_key_to_action_controls() {
        assert_eq!(Keypad::key_to_action("."), Some(KeypadAction::Decimal));
        assert_eq!(Keypad::key_to_action("Enter"), Some(KeypadAction::Equals));
        assert_eq!(Keypad::key_to_action("="), Some(KeypadAction::Equals));
        assert_eq!(Keypad::key_to_action("Escape"), Some(KeypadAction::Clear));
        assert_eq!(
            Keypad::key_to_action("Backspace"),
            Some(KeypadAction::Backspace)
        );
        assert_eq!(
            Keypad::key_to_action("/"),
            Some(KeypadAction::Operator(Operation::Divide))
        );
    }

    #[test]
    fn test_key_to_action_unmapped() {
        for key in ["a", "12", "", "Tab", "^", "%", "×"] {
            assert_eq!(Keypad::key_to_action(key), None, "{key:?}");
        }
    }

    // ===== DOM =====

    #[test]
    fn test_create_keypad_element() {
        let keypad = Keypad::new();
        let element = keypad.create_keypad_element();
        assert_eq!(element.id, "calc-keypad");
        assert_eq!(element.children.len(), 19);
        let zero = element.children.iter().find(|c| c.id == "btn-0").unwrap();
        assert!(zero.has_class("btn-zero"));
        assert_eq!(zero.attr("data-span"), Some("2"));
    }
}
