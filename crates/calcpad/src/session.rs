//! A calculator state paired with the gateway that resolves its computations

use crate::gateway::ArithmeticGateway;
use crate::keypad::{Keypad, KeypadAction};
use crate::machine::{CalculatorState, Computation};

/// Runs keypad actions to completion against a gateway
#[derive(Debug)]
pub struct Session<G> {
    state: CalculatorState,
    gateway: G,
}

impl<G: ArithmeticGateway> Session<G> {
    /// Creates a session in the initial state
    pub fn new(gateway: G) -> Self {
        Self {
            state: CalculatorState::new(),
            gateway,
        }
    }

    /// Current calculator state
    pub const fn state(&self) -> &CalculatorState {
        &self.state
    }

    /// The gateway computations are sent to
    pub const fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Applies one action, awaiting the gateway if the action needs it
    pub async fn press(&mut self, action: KeypadAction) {
        if let Some(computation) = self.begin(action) {
            self.finish(computation).await;
        }
    }

    /// Applies the local part of an action.
    ///
    /// Returns the computation the gateway still has to resolve; until it is
    /// passed to [`finish`](Self::finish) the state reports itself busy.
    pub fn begin(&mut self, action: KeypadAction) -> Option<Computation> {
        self.state.apply(action)
    }

    /// Resolves a computation through the gateway and feeds the outcome
    /// back; returns `false` if the state had moved on (e.g. a clear)
    pub async fn finish(&mut self, computation: Computation) -> bool {
        let request = computation.request();
        let outcome = self.gateway.compute(request).await;
        if let Err(err) = &outcome {
            tracing::debug!(%request, error = %err, "computation failed");
        }
        self.state.complete(computation, outcome)
    }

    /// Applies the action mapped to a keyboard key.
    ///
    /// Returns `false` for keys with no mapping.
    pub async fn press_key(&mut self, key: &str) -> bool {
        match Keypad::key_to_action(key) {
            Some(action) => {
                self.press(action).await;
                true
            }
            None => false,
        }
    }

    /// Applies a sequence of actions in order
    pub async fn press_all(&mut self, actions: impl IntoIterator<Item = KeypadAction>) {
        for action in actions {
            self.press(action).await;
        }
    }

    /// Returns to the initial state
    pub fn reset(&mut self) {
        self.state.apply(KeypadAction::Clear);
    }
}
