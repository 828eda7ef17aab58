//! DOM driver: runs a [`Session`] from mock DOM events and mirrors its state
//! back into the page

use async_trait::async_trait;

use super::dom::{DomEvent, MockDom, BUSY_ID, DISPLAY_ID, EXPRESSION_ID};
use crate::core::format::{render_display, DisplaySize};
use crate::core::Operation;
use crate::driver::CalculatorDriver;
use crate::gateway::ArithmeticGateway;
use crate::keypad::{Keypad, KeypadAction};
use crate::machine::Computation;
use crate::session::Session;

/// Class set on operator buttons while their operator is pending
pub const ACTIVE_CLASS: &str = "active";
/// Class set on the display while it shows an error token
pub const ERROR_CLASS: &str = "is-error";

/// Session driven through the mock DOM
#[derive(Debug)]
pub struct DomDriver<G> {
    session: Session<G>,
    keypad: Keypad,
    dom: MockDom,
}

impl<G: ArithmeticGateway> DomDriver<G> {
    /// Creates a driver with a fresh page
    pub fn new(gateway: G) -> Self {
        let keypad = Keypad::new();
        let dom = MockDom::calculator(&keypad);
        let mut driver = Self {
            session: Session::new(gateway),
            keypad,
            dom,
        };
        driver.sync_dom();
        driver
    }

    /// The underlying session
    pub const fn session(&self) -> &Session<G> {
        &self.session
    }

    /// The keypad layout
    pub const fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    /// Returns a reference to the DOM
    pub const fn dom(&self) -> &MockDom {
        &self.dom
    }

    /// Simulates clicking an element; returns `false` if it is not a keypad
    /// button or is disabled
    pub async fn click(&mut self, element_id: &str) -> bool {
        self.dom.record(DomEvent::click(element_id));
        let Some(action) = self.clickable(element_id) else {
            return false;
        };
        self.run(action).await;
        true
    }

    /// Clicks an element but stops once the local part of the action is
    /// applied and rendered.
    ///
    /// Returns the outstanding computation, if the click started one. The
    /// page shows the busy indicator with equals disabled until it is
    /// passed to [`finish`](Self::finish).
    pub fn begin_click(&mut self, element_id: &str) -> Option<Computation> {
        self.dom.record(DomEvent::click(element_id));
        let action = self.clickable(element_id)?;
        self.begin(action)
    }

    /// Resolves a computation started by [`begin_click`](Self::begin_click)
    /// and re-renders; returns `false` if it was stale
    pub async fn finish(&mut self, computation: Computation) -> bool {
        let applied = self.session.finish(computation).await;
        self.sync_dom();
        applied
    }

    /// Simulates a key down on the document; returns `false` for unmapped keys
    pub async fn key_down(&mut self, key: &str) -> bool {
        self.dom.record(DomEvent::key_down(key));
        let Some(action) = Keypad::key_to_action(key) else {
            return false;
        };
        self.run(action).await;
        true
    }

    /// Gets the display element's text
    pub fn display_text(&self) -> Option<&str> {
        self.dom.text(DISPLAY_ID)
    }

    /// Gets the expression element's text
    pub fn expression_text(&self) -> Option<&str> {
        self.dom.text(EXPRESSION_ID)
    }

    /// Whether an element carries a class
    pub fn element_has_class(&self, id: &str, class: &str) -> bool {
        self.dom.element(id).is_some_and(|e| e.has_class(class))
    }

    /// The action behind an enabled keypad button
    fn clickable(&self, element_id: &str) -> Option<KeypadAction> {
        let disabled = self
            .dom
            .element(element_id)
            .is_some_and(|e| e.attr("disabled").is_some());
        self.keypad.handle_click(element_id).filter(|_| !disabled)
    }

    fn begin(&mut self, action: KeypadAction) -> Option<Computation> {
        let computation = self.session.begin(action);
        self.sync_dom();
        computation
    }

    async fn run(&mut self, action: KeypadAction) {
        if let Some(computation) = self.begin(action) {
            self.finish(computation).await;
        }
    }

    /// Synchronizes DOM state with calculator state
    fn sync_dom(&mut self) {
        let state = self.session.state();
        let shown = render_display(state.display());
        let size = DisplaySize::for_text(&shown);
        let error = state.is_error();
        let busy = state.is_busy();
        let expression = state.expression().to_string();
        let active: Vec<(Operation, bool)> = Operation::ALL
            .into_iter()
            .map(|op| (op, state.is_operator_active(op)))
            .collect();

        self.dom.set_text(EXPRESSION_ID, &expression);

        if let Some(display) = self.dom.element_mut(DISPLAY_ID) {
            display.set_text(&shown);
            for candidate in DisplaySize::ALL {
                display.toggle_class(candidate.css_class(), candidate == size);
            }
            display.toggle_class(ERROR_CLASS, error);
        }

        if let Some(indicator) = self.dom.element_mut(BUSY_ID) {
            indicator.visible = busy;
        }

        if let Some(equals) = self
            .dom
            .element_mut(&KeypadAction::Equals.element_id())
        {
            equals.set_flag("disabled", busy);
        }

        for (op, on) in active {
            let id = KeypadAction::Operator(op).element_id();
            if let Some(button) = self.dom.element_mut(&id) {
                button.toggle_class(ACTIVE_CLASS, on);
            }
        }
    }
}

#[async_trait]
impl<G: ArithmeticGateway> CalculatorDriver for DomDriver<G> {
    async fn press(&mut self, action: KeypadAction) {
        let id = self.keypad.find_button(action).map(|b| b.id.clone());
        match id {
            Some(id) => {
                self.click(&id).await;
            }
            // Keyboard-only actions
            None => self.run(action).await,
        }
    }

    async fn press_key(&mut self, key: &str) -> bool {
        self.key_down(key).await
    }

    fn display(&self) -> String {
        self.session.state().display().to_string()
    }

    fn expression(&self) -> String {
        self.expression_text().unwrap_or_default().to_string()
    }

    fn is_error(&self) -> bool {
        self.element_has_class(DISPLAY_ID, ERROR_CLASS)
    }

    fn clear(&mut self) {
        self.session.reset();
        self.sync_dom();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::run_full_suite;
    use crate::gateway::{LocalGateway, RecordingGateway};
    use crate::machine::DIVIDE_BY_ZERO_TOKEN;
    use futures::executor::block_on;

    fn driver() -> DomDriver<LocalGateway> {
        DomDriver::new(LocalGateway::new())
    }

    fn click_all(driver: &mut DomDriver<LocalGateway>, ids: &[&str]) {
        block_on(async {
            for id in ids {
                assert!(driver.click(id).await, "click {id}");
            }
        });
    }

    #[test]
    fn test_initial_page() {
        let driver = driver();
        assert_eq!(driver.display_text(), Some("0"));
        assert_eq!(driver.expression_text(), Some(""));
        assert!(driver.element_has_class(DISPLAY_ID, "text-5xl"));
        assert!(!driver.element_has_class(DISPLAY_ID, ERROR_CLASS));
    }

    #[test]
    fn test_click_twelve_plus_eight() {
        let mut driver = driver();
        click_all(&mut driver, &["btn-1", "btn-2", "btn-add", "btn-8", "btn-equals"]);
        assert_eq!(driver.display_text(), Some("20"));
        assert_eq!(driver.expression_text(), Some("12 + 8 ="));
    }

    #[test]
    fn test_click_divide_by_zero() {
        let mut driver = driver();
        click_all(&mut driver, &["btn-7", "btn-divide", "btn-0", "btn-equals"]);
        assert_eq!(driver.display_text(), Some(DIVIDE_BY_ZERO_TOKEN));
        assert!(driver.element_has_class(DISPLAY_ID, ERROR_CLASS));
        assert!(driver.element_has_class(DISPLAY_ID, "text-3xl"));
    }

    #[test]
    fn test_operator_highlight() {
        let mut driver = driver();
        click_all(&mut driver, &["btn-6", "btn-multiply"]);
        assert!(!driver.element_has_class("btn-multiply", ACTIVE_CLASS));
        click_all(&mut driver, &["btn-3"]);
        assert!(driver.element_has_class("btn-multiply", ACTIVE_CLASS));
        assert!(!driver.element_has_class("btn-add", ACTIVE_CLASS));
        click_all(&mut driver, &["btn-equals"]);
        assert!(!driver.element_has_class("btn-multiply", ACTIVE_CLASS));
    }

    #[test]
    fn test_display_size_shrinks() {
        let mut driver = driver();
        click_all(&mut driver, &["btn-1"; 8]);
        assert!(driver.element_has_class(DISPLAY_ID, "text-4xl"));
        assert!(!driver.element_has_class(DISPLAY_ID, "text-5xl"));
    }

    #[test]
    fn test_large_result_rendered_exponential() {
        let mut driver = driver();
        block_on(driver.type_keys("123456*10000000="));
        assert_eq!(CalculatorDriver::display(&driver), "1.234560e+12");
        assert_eq!(driver.display_text(), Some("1.2346e+12"));
    }

    #[test]
    fn test_unknown_click_and_key() {
        let mut driver = driver();
        assert!(!block_on(driver.click("calc-display")));
        assert!(!block_on(driver.key_down("Tab")));
        assert_eq!(driver.dom().events().len(), 2);
    }

    #[test]
    fn test_keyboard_backspace() {
        let mut driver = driver();
        block_on(driver.type_keys("123"));
        assert!(block_on(driver.key_down("Backspace")));
        assert_eq!(driver.display_text(), Some("12"));
    }

    #[test]
    fn test_press_records_click_events() {
        let mut driver = DomDriver::new(RecordingGateway::new(LocalGateway::new()));
        block_on(driver.press(KeypadAction::Digit(4)));
        assert_eq!(
            driver.dom().events(),
            &[DomEvent::click("btn-4")]
        );
    }

    #[test]
    fn test_busy_while_computing() {
        let mut driver = driver();
        click_all(&mut driver, &["btn-1", "btn-add", "btn-2"]);
        let equals = KeypadAction::Equals.element_id();

        let computation = driver.begin_click(&equals).expect("equals computes");
        assert!(driver.dom().element(BUSY_ID).unwrap().visible);
        assert_eq!(driver.dom().element(&equals).unwrap().attr("disabled"), Some(""));
        assert!(!block_on(driver.click(&equals)));
        assert!(driver.begin_click(&equals).is_none());

        assert!(block_on(driver.finish(computation)));
        assert_eq!(driver.display_text(), Some("3"));
        assert!(!driver.dom().element(BUSY_ID).unwrap().visible);
        assert_eq!(driver.dom().element(&equals).unwrap().attr("disabled"), None);
    }

    #[test]
    fn test_busy_rendered_for_each_computation() {
        let mut driver = driver();
        let ids = [
            "btn-1", "btn-add", "btn-2", "btn-add", "btn-3", "btn-equals",
            "btn-multiply", "btn-4", "btn-equals",
        ];
        let mut busy_renders = 0;
        for id in ids {
            if let Some(computation) = driver.begin_click(id) {
                assert!(driver.dom().element(BUSY_ID).unwrap().visible, "{id}");
                busy_renders += 1;
                assert!(block_on(driver.finish(computation)));
            }
            assert!(!driver.dom().element(BUSY_ID).unwrap().visible, "{id}");
        }
        assert_eq!(busy_renders, 3);
        assert_eq!(driver.display_text(), Some("24"));
    }

    #[test]
    fn test_clear_while_busy_drops_result() {
        let mut driver = driver();
        click_all(&mut driver, &["btn-9", "btn-subtract", "btn-4"]);
        let computation = driver.begin_click("btn-equals").expect("equals computes");
        click_all(&mut driver, &["btn-clear"]);
        assert!(!block_on(driver.finish(computation)));
        assert_eq!(driver.display_text(), Some("0"));
        assert!(!driver.dom().element(BUSY_ID).unwrap().visible);
    }

    #[test]
    fn test_page_tree_tracks_display() {
        let mut driver = driver();
        click_all(&mut driver, &["btn-1", "btn-2", "btn-add", "btn-8", "btn-equals"]);
        let display = &driver.dom().root().children[1];
        assert_eq!(display.id, DISPLAY_ID);
        assert_eq!(display.text, "20");
    }

    #[test]
    fn test_dom_full_suite() {
        let mut driver = driver();
        block_on(run_full_suite(&mut driver));
    }
}
