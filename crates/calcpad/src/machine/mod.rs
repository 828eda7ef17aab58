//! Input/display state machine
//!
//! [`CalculatorState`] turns keypad actions into display transitions. It never
//! calls the arithmetic backend itself: an action that needs a result returns
//! a [`Computation`], the caller resolves its request through an
//! [`ArithmeticGateway`](crate::gateway::ArithmeticGateway), and hands the
//! outcome back through [`CalculatorState::complete`].
//!
//! ```text
//!   apply(action) ──► Some(Computation) ──► gateway.compute(request)
//!        ▲                                          │
//!        └──────────── complete(computation, outcome) ◄┘
//! ```
//!
//! At most one computation is in flight. While one is outstanding, operator
//! and equals actions are refused.

mod display;

pub use display::{DisplayValue, MAX_DISPLAY_LEN};

use crate::core::format::{format_result, number_to_string};
use crate::core::Operation;
use crate::gateway::{ComputeRequest, GatewayError, GatewayResult};
use crate::keypad::KeypadAction;

/// Display token for any failed computation
pub const ERROR_TOKEN: &str = "Error";

/// Display token for a division by zero
pub const DIVIDE_BY_ZERO_TOKEN: &str = "Cannot ÷ 0";

/// A stored left-hand operand together with the operator waiting for its
/// right-hand side. One cannot exist without the other.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingOperation {
    /// The stored left-hand operand
    pub operand: f64,
    /// The operator awaiting a right-hand operand
    pub operator: Operation,
}

/// What to do with a result once it arrives
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// An operator was pressed mid-chain; the result becomes the new left
    /// operand of this operator.
    Chain(Operation),
    /// Equals was pressed; the expression line is shown on success.
    Equals {
        /// Expression line, e.g. `12 + 8 =`
        expression: String,
    },
}

/// A gateway call requested by the state machine
#[derive(Debug, Clone, PartialEq)]
pub struct Computation {
    id: u64,
    request: ComputeRequest,
    resolution: Resolution,
}

impl Computation {
    /// The request to send to the gateway
    #[must_use]
    pub const fn request(&self) -> ComputeRequest {
        self.request
    }

    /// How the outcome will be applied
    #[must_use]
    pub const fn resolution(&self) -> &Resolution {
        &self.resolution
    }

    /// Sequence number; completions for anything but the in-flight id are
    /// discarded
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }
}

/// Calculator state: display, pending operation, flags and expression line
#[derive(Debug, Clone, PartialEq)]
pub struct CalculatorState {
    display: DisplayValue,
    pending: Option<PendingOperation>,
    waiting_for_operand: bool,
    error: bool,
    expression: String,
    in_flight: Option<u64>,
    next_id: u64,
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorState {
    /// Creates the initial state: display `0`, nothing pending
    #[must_use]
    pub fn new() -> Self {
        Self {
            display: DisplayValue::new(),
            pending: None,
            waiting_for_operand: false,
            error: false,
            expression: String::new(),
            in_flight: None,
            next_id: 0,
        }
    }

    /// Applies a keypad action.
    ///
    /// Returns a [`Computation`] when the action needs the arithmetic
    /// backend; the state then waits for [`complete`](Self::complete).
    pub fn apply(&mut self, action: KeypadAction) -> Option<Computation> {
        match action {
            KeypadAction::Digit(digit) => self.input_digit(digit),
            KeypadAction::Decimal => self.input_decimal(),
            KeypadAction::Sign => self.toggle_sign(),
            KeypadAction::Percent => self.percent(),
            KeypadAction::Clear => self.clear(),
            KeypadAction::Backspace => self.backspace(),
            KeypadAction::Operator(op) => return self.press_operator(op),
            KeypadAction::Equals => return self.press_equals(),
        }
        None
    }

    /// Feeds the outcome of a gateway call back into the state.
    ///
    /// Returns `false` if the computation is no longer the one in flight
    /// (for example after a clear), in which case nothing changes.
    pub fn complete(&mut self, computation: Computation, outcome: GatewayResult<f64>) -> bool {
        if self.in_flight != Some(computation.id) {
            tracing::debug!(id = computation.id, "discarding stale computation");
            return false;
        }
        self.in_flight = None;

        match (outcome, computation.resolution) {
            (Ok(result), Resolution::Chain(next)) => {
                let text = number_to_string(result);
                self.expression = format!("{text} {}", next.label());
                self.display.replace(text);
                self.pending = Some(PendingOperation {
                    operand: result,
                    operator: next,
                });
                self.waiting_for_operand = true;
            }
            (Ok(result), Resolution::Equals { expression }) => {
                self.display.replace(format_result(result));
                self.expression = expression;
                self.pending = None;
                self.waiting_for_operand = true;
            }
            (Err(err), _) => self.fail(&err),
        }
        true
    }

    // ----- Accessors -----

    /// The display text
    #[must_use]
    pub fn display(&self) -> &str {
        self.display.as_str()
    }

    /// The expression line above the display
    #[must_use]
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// The pending operand/operator pair, if any
    #[must_use]
    pub const fn pending(&self) -> Option<PendingOperation> {
        self.pending
    }

    /// The pending operator, if any
    #[must_use]
    pub fn pending_operator(&self) -> Option<Operation> {
        self.pending.map(|p| p.operator)
    }

    /// The stored left-hand operand, if any
    #[must_use]
    pub fn stored_operand(&self) -> Option<f64> {
        self.pending.map(|p| p.operand)
    }

    /// Whether the next digit starts a fresh number
    #[must_use]
    pub const fn is_waiting_for_operand(&self) -> bool {
        self.waiting_for_operand
    }

    /// Whether the display shows an error token
    #[must_use]
    pub const fn is_error(&self) -> bool {
        self.error
    }

    /// Whether a computation is in flight
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Whether the operator button for `op` should be highlighted
    #[must_use]
    pub fn is_operator_active(&self, op: Operation) -> bool {
        self.pending_operator() == Some(op) && !self.waiting_for_operand
    }

    // ----- Transitions -----

    fn input_digit(&mut self, digit: u8) {
        if digit > 9 {
            return;
        }
        if self.waiting_for_operand || self.error {
            self.display.replace(digit.to_string());
            self.waiting_for_operand = false;
            self.error = false;
        } else {
            self.display.push_digit(digit);
        }
    }

    fn input_decimal(&mut self) {
        if self.waiting_for_operand || self.error {
            self.display.replace("0.");
            self.waiting_for_operand = false;
            self.error = false;
        } else {
            self.display.push_decimal();
        }
    }

    fn toggle_sign(&mut self) {
        if self.error {
            return;
        }
        if let Some(value) = self.display.value().filter(|v| *v != 0.0) {
            self.display.replace(number_to_string(-value));
        }
    }

    fn percent(&mut self) {
        if self.error {
            return;
        }
        if let Some(value) = self.display.value() {
            self.display.replace(number_to_string(value / 100.0));
        }
    }

    fn clear(&mut self) {
        // Keep the sequence counter so late completions stay stale
        *self = Self {
            next_id: self.next_id,
            ..Self::new()
        };
    }

    fn backspace(&mut self) {
        if self.error {
            self.display.reset();
            self.error = false;
        } else {
            self.display.pop();
        }
    }

    fn press_operator(&mut self, op: Operation) -> Option<Computation> {
        if self.error || self.is_busy() {
            return None;
        }
        let value = self.display.value()?;

        match self.pending {
            Some(pending) if !self.waiting_for_operand => {
                let request = ComputeRequest::new(pending.operator, pending.operand, value);
                Some(self.dispatch(request, Resolution::Chain(op)))
            }
            _ => {
                self.expression = format!("{} {}", self.display, op.label());
                self.pending = Some(PendingOperation {
                    operand: value,
                    operator: op,
                });
                self.waiting_for_operand = true;
                None
            }
        }
    }

    fn press_equals(&mut self) -> Option<Computation> {
        if self.is_busy() {
            return None;
        }
        let pending = self.pending?;
        let value = self.display.value()?;
        self.error = false;

        let expression = format!(
            "{} {} {} =",
            number_to_string(pending.operand),
            pending.operator.label(),
            self.display
        );
        let request = ComputeRequest::new(pending.operator, pending.operand, value);
        Some(self.dispatch(request, Resolution::Equals { expression }))
    }

    fn dispatch(&mut self, request: ComputeRequest, resolution: Resolution) -> Computation {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        self.in_flight = Some(id);
        tracing::debug!(id, %request, "computation dispatched");
        Computation {
            id,
            request,
            resolution,
        }
    }

    fn fail(&mut self, err: &GatewayError) {
        let token = if err.is_division_by_zero() {
            DIVIDE_BY_ZERO_TOKEN
        } else {
            ERROR_TOKEN
        };
        self.display.replace(token);
        self.error = true;
        self.pending = None;
        self.waiting_for_operand = false;
        self.expression.clear();
    }
}
