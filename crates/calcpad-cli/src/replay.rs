//! Key sequence replay for the `keys` command

use calcpad::core::format::render_display;
use calcpad::core::Operation;
use calcpad::gateway::ArithmeticGateway;
use calcpad::keypad::{Keypad, KeypadAction};
use calcpad::machine::CalculatorState;
use calcpad::session::Session;

use crate::error::{CliError, CliResult};

/// Maps one typed character to a keypad action.
///
/// Besides the keyboard keys the keypad already understands, `c` clears,
/// `n` toggles the sign, `%` is percent and `<` is backspace. The keypad
/// glyphs `×`, `÷` and `−` are accepted as operators.
#[must_use]
pub fn action_for_char(ch: char) -> Option<KeypadAction> {
    match ch {
        'c' | 'C' => Some(KeypadAction::Clear),
        'n' | 'N' => Some(KeypadAction::Sign),
        '%' => Some(KeypadAction::Percent),
        '<' => Some(KeypadAction::Backspace),
        _ => {
            let mut buf = [0; 4];
            let key: &str = ch.encode_utf8(&mut buf);
            Keypad::key_to_action(key).or_else(|| {
                Operation::ALL
                    .into_iter()
                    .find(|op| op.label() == key)
                    .map(KeypadAction::Operator)
            })
        }
    }
}

/// Parses a key sequence; whitespace is ignored
pub fn parse_sequence(sequence: &str) -> CliResult<Vec<KeypadAction>> {
    sequence
        .chars()
        .enumerate()
        .filter(|(_, ch)| !ch.is_whitespace())
        .map(|(position, ch)| action_for_char(ch).ok_or_else(|| CliError::invalid_key(ch, position)))
        .collect()
}

/// What the calculator shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    /// Expression line
    pub expression: String,
    /// Main display, rendered
    pub display: String,
    /// Whether the display holds an error token
    pub error: bool,
}

impl Screen {
    /// Captures the screen for a state
    #[must_use]
    pub fn capture(state: &CalculatorState) -> Self {
        Self {
            expression: state.expression().to_string(),
            display: render_display(state.display()),
            error: state.is_error(),
        }
    }
}

/// Runs the actions through a fresh session and returns the final screen
pub async fn replay<G: ArithmeticGateway>(gateway: G, actions: Vec<KeypadAction>) -> Screen {
    let mut session = Session::new(gateway);
    tracing::debug!(count = actions.len(), "replaying key sequence");
    session.press_all(actions).await;
    Screen::capture(session.state())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use calcpad::gateway::LocalGateway;
    use calcpad::machine::{DIVIDE_BY_ZERO_TOKEN, ERROR_TOKEN};
    use tokio::runtime::Runtime;

    fn run(sequence: &str) -> Screen {
        let actions = parse_sequence(sequence).unwrap();
        Runtime::new()
            .unwrap()
            .block_on(replay(LocalGateway::new(), actions))
    }

    mod parse_tests {
        use super::*;

        #[test]
        fn test_keyboard_characters() {
            assert_eq!(
                parse_sequence("1.+=").unwrap(),
                vec![
                    KeypadAction::Digit(1),
                    KeypadAction::Decimal,
                    KeypadAction::Operator(Operation::Add),
                    KeypadAction::Equals,
                ]
            );
        }

        #[test]
        fn test_extra_characters() {
            assert_eq!(
                parse_sequence("cn%<").unwrap(),
                vec![
                    KeypadAction::Clear,
                    KeypadAction::Sign,
                    KeypadAction::Percent,
                    KeypadAction::Backspace,
                ]
            );
        }

        #[test]
        fn test_glyph_operators() {
            assert_eq!(
                parse_sequence("×÷−").unwrap(),
                vec![
                    KeypadAction::Operator(Operation::Multiply),
                    KeypadAction::Operator(Operation::Divide),
                    KeypadAction::Operator(Operation::Subtract),
                ]
            );
        }

        #[test]
        fn test_whitespace_skipped() {
            assert_eq!(parse_sequence(" 1 2 ").unwrap().len(), 2);
        }

        #[test]
        fn test_unknown_character_reports_position() {
            let err = parse_sequence("12x").unwrap_err();
            assert!(matches!(
                err,
                CliError::InvalidKey {
                    character: 'x',
                    position: 2
                }
            ));
        }
    }

    mod replay_tests {
        use super::*;

        #[test]
        fn test_addition() {
            let screen = run("12+8=");
            assert_eq!(screen.expression, "12 + 8 =");
            assert_eq!(screen.display, "20");
            assert!(!screen.error);
        }

        #[test]
        fn test_divide_by_zero() {
            let screen = run("7/0=");
            assert_eq!(screen.display, DIVIDE_BY_ZERO_TOKEN);
            assert!(screen.error);
        }

        #[test]
        fn test_sign_and_percent() {
            assert_eq!(run("50n").display, "-50");
            assert_eq!(run("50%").display, "0.5");
        }

        #[test]
        fn test_large_result_is_rendered() {
            assert_eq!(run("123456*10000000=").display, "1.2346e+12");
        }

        #[test]
        fn test_not_ready_gateway() {
            let actions = parse_sequence("1+1=").unwrap();
            let screen = Runtime::new()
                .unwrap()
                .block_on(replay(LocalGateway::not_ready(), actions));
            assert_eq!(screen.display, ERROR_TOKEN);
        }

        #[test]
        fn test_empty_sequence() {
            assert_eq!(run("").display, "0");
        }
    }
}
