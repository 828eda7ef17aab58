//! The display string being edited

use crate::core::format::parse_operand;

/// Digit entry is ignored once the display reaches this many characters
pub const MAX_DISPLAY_LEN: usize = 12;

/// Placeholder shown when nothing has been typed
const PLACEHOLDER: &str = "0";

/// The number on the calculator display, exactly as typed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayValue(String);

impl Default for DisplayValue {
    fn default() -> Self {
        Self(PLACEHOLDER.to_string())
    }
}

impl DisplayValue {
    /// Creates a display showing the placeholder `0`
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the display text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the numeric value, if the text is a number
    #[must_use]
    pub fn value(&self) -> Option<f64> {
        parse_operand(&self.0)
    }

    /// Returns the length in characters
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    /// Returns true if the display holds no text
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns true while the placeholder is shown
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.0 == PLACEHOLDER
    }

    /// Replaces the whole display
    pub fn replace(&mut self, text: impl Into<String>) {
        self.0 = text.into();
    }

    /// Resets to the placeholder
    pub fn reset(&mut self) {
        self.replace(PLACEHOLDER);
    }

    /// Appends a digit, replacing the placeholder
    pub fn push_digit(&mut self, digit: u8) {
        let Some(ch) = char::from_digit(u32::from(digit), 10) else {
            return;
        };
        if self.is_placeholder() {
            self.0 = ch.to_string();
        } else if self.len() < MAX_DISPLAY_LEN {
            self.0.push(ch);
        }
    }

    /// Appends a decimal point unless one is already present
    pub fn push_decimal(&mut self) {
        if !self.0.contains('.') {
            self.0.push('.');
        }
    }

    /// Removes the last character, falling back to the placeholder
    pub fn pop(&mut self) {
        if self.len() <= 1 {
            self.reset();
            return;
        }
        self.0.pop();
        if self.0 == "-" {
            self.reset();
        }
    }
}

impl std::fmt::Display for DisplayValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
