//! Unified calculator driver
//!
//! Write the test logic once, run it against any front end. [`Session`] is
//! the bare driver; [`DomDriver`](crate::web::DomDriver) drives the same
//! session through mock DOM events.

use async_trait::async_trait;

use crate::gateway::ArithmeticGateway;
use crate::keypad::KeypadAction;
use crate::machine::{DIVIDE_BY_ZERO_TOKEN, ERROR_TOKEN};
use crate::session::Session;

/// Abstract driver for calculator interactions
///
/// # Example
///
/// ```rust
/// use calcpad::prelude::*;
///
/// let mut driver = Session::new(LocalGateway::new());
/// futures::executor::block_on(async {
///     driver.type_keys("12+8=").await;
/// });
/// assert_eq!(CalculatorDriver::display(&driver), "20");
/// ```
#[async_trait]
pub trait CalculatorDriver: Send {
    /// Performs one keypad action
    async fn press(&mut self, action: KeypadAction);

    /// Presses a keyboard key; returns `false` if it has no mapping
    async fn press_key(&mut self, key: &str) -> bool;

    /// Types each character as a keyboard key
    async fn type_keys(&mut self, keys: &str) {
        for ch in keys.chars() {
            self.press_key(&ch.to_string()).await;
        }
    }

    /// Gets the display text
    fn display(&self) -> String;

    /// Gets the expression line
    fn expression(&self) -> String;

    /// Whether an error token is shown
    fn is_error(&self) -> bool;

    /// Returns to the initial state
    fn clear(&mut self);
}

#[async_trait]
impl<G: ArithmeticGateway> CalculatorDriver for Session<G> {
    async fn press(&mut self, action: KeypadAction) {
        Self::press(self, action).await;
    }

    async fn press_key(&mut self, key: &str) -> bool {
        Self::press_key(self, key).await
    }

    fn display(&self) -> String {
        self.state().display().to_string()
    }

    fn expression(&self) -> String {
        self.state().expression().to_string()
    }

    fn is_error(&self) -> bool {
        self.state().is_error()
    }

    fn clear(&mut self) {
        self.reset();
    }
}

// ===== Shared verification routines =====
// These work with ANY CalculatorDriver backed by a working gateway

/// Digit sequences without operators display their literal concatenation
pub async fn verify_digit_entry<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.type_keys("123.45").await;
    assert_eq!(driver.display(), "123.45");
    driver.clear();

    // Single decimal point
    driver.type_keys("1.2.3").await;
    assert_eq!(driver.display(), "1.23");
    driver.clear();

    // Twelve character cap
    driver.type_keys("123456789012345").await;
    assert_eq!(driver.display(), "123456789012");
    driver.clear();
}

/// Clear always restores the initial state
pub async fn verify_clear<D: CalculatorDriver>(driver: &mut D) {
    driver.type_keys("12+8").await;
    driver.clear();
    assert_eq!(driver.display(), "0");
    assert_eq!(driver.expression(), "");
    assert!(!driver.is_error());

    // Nothing pending survives
    driver.type_keys("5=").await;
    assert_eq!(driver.display(), "5");
    driver.clear();

    driver.type_keys("5/0=").await;
    driver.clear();
    assert_eq!(driver.display(), "0");
    assert!(!driver.is_error());
}

/// `12 + 8 =` shows 20 and the full expression
pub async fn verify_basic_arithmetic<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.type_keys("12+8=").await;
    assert_eq!(driver.display(), "20");
    assert_eq!(driver.expression(), "12 + 8 =");
    driver.clear();

    driver.type_keys("10-4=").await;
    assert_eq!(driver.display(), "6");
    driver.clear();

    driver.type_keys("6*7=").await;
    assert_eq!(driver.display(), "42");
    driver.clear();

    driver.type_keys("3/2=").await;
    assert_eq!(driver.display(), "1.5");
    driver.clear();
}

/// `a + b + c =` resolves left to right
pub async fn verify_chaining<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.type_keys("2+3*").await;
    assert_eq!(driver.display(), "5");
    assert_eq!(driver.expression(), "5 ×");
    driver.type_keys("4=").await;
    assert_eq!(driver.display(), "20");
    driver.clear();
}

/// Division by zero shows its own token and clears pending state
pub async fn verify_division_by_zero<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.type_keys("7/0=").await;
    assert_eq!(driver.display(), DIVIDE_BY_ZERO_TOKEN);
    assert_ne!(driver.display(), ERROR_TOKEN);
    assert!(driver.is_error());
    assert_eq!(driver.expression(), "");

    // Nothing left to resolve
    driver.press(KeypadAction::Equals).await;
    assert_eq!(driver.display(), DIVIDE_BY_ZERO_TOKEN);

    // Next digit recovers
    driver.type_keys("3").await;
    assert_eq!(driver.display(), "3");
    assert!(!driver.is_error());
    driver.clear();
}

/// Sign twice is the identity for non-zero values
pub async fn verify_sign_toggle<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.type_keys("42.5").await;
    driver.press(KeypadAction::Sign).await;
    assert_eq!(driver.display(), "-42.5");
    driver.press(KeypadAction::Sign).await;
    assert_eq!(driver.display(), "42.5");
    driver.clear();

    driver.press(KeypadAction::Sign).await;
    assert_eq!(driver.display(), "0");
    driver.clear();
}

/// Equals with nothing pending changes nothing
pub async fn verify_equals_noop<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.type_keys("7").await;
    driver.press(KeypadAction::Equals).await;
    assert_eq!(driver.display(), "7");
    assert_eq!(driver.expression(), "");
    driver.clear();
}

/// Backspace on a single digit or an error resets to 0
pub async fn verify_backspace<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.type_keys("7").await;
    driver.press_key("Backspace").await;
    assert_eq!(driver.display(), "0");

    driver.type_keys("1/0=").await;
    driver.press_key("Backspace").await;
    assert_eq!(driver.display(), "0");
    assert!(!driver.is_error());
    driver.clear();
}

/// Complete verification suite
pub async fn run_full_suite<D: CalculatorDriver>(driver: &mut D) {
    verify_digit_entry(driver).await;
    verify_clear(driver).await;
    verify_basic_arithmetic(driver).await;
    verify_chaining(driver).await;
    verify_division_by_zero(driver).await;
    verify_sign_toggle(driver).await;
    verify_equals_noop(driver).await;
    verify_backspace(driver).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::{LocalGateway, RecordingGateway};
    use futures::executor::block_on;

    #[test]
    fn test_session_full_suite() {
        let mut driver = Session::new(LocalGateway::new());
        block_on(run_full_suite(&mut driver));
    }

    #[test]
    fn test_type_keys_skips_unmapped() {
        let mut driver = Session::new(LocalGateway::new());
        block_on(driver.type_keys("1x2"));
        assert_eq!(CalculatorDriver::display(&driver), "12");
    }

    #[test]
    fn test_driver_clear() {
        let mut driver = Session::new(RecordingGateway::new(LocalGateway::new()));
        block_on(driver.type_keys("9*9="));
        assert_eq!(CalculatorDriver::display(&driver), "81");
        CalculatorDriver::clear(&mut driver);
        assert_eq!(CalculatorDriver::display(&driver), "0");
        assert_eq!(driver.gateway().call_count(), 1);
    }

    #[test]
    fn test_boxed_driver() {
        let mut driver: Box<dyn CalculatorDriver> = Box::new(Session::new(LocalGateway::new()));
        block_on(driver.type_keys("2*21="));
        assert_eq!(driver.display(), "42");
    }
}
