//! Interactive keypad in raw terminal mode

use std::io::{self, Write};

use calcpad::core::format::render_display;
use calcpad::gateway::ArithmeticGateway;
use calcpad::keypad::KeypadAction;
use calcpad::machine::CalculatorState;
use calcpad::session::Session;
use crossterm::cursor::MoveToColumn;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::Print;
use crossterm::terminal::{self, ClearType};
use crossterm::execute;
use tokio::runtime::Runtime;

use crate::error::CliResult;
use crate::replay::action_for_char;

/// What a key press means to the interactive loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalInput {
    /// Forward to the calculator
    Action(KeypadAction),
    /// Leave the loop
    Quit,
    /// Nothing to do
    Ignored,
}

/// Maps a terminal key event
#[must_use]
pub fn map_key(key: KeyEvent) -> TerminalInput {
    if key.kind == KeyEventKind::Release {
        return TerminalInput::Ignored;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => TerminalInput::Quit,
        KeyCode::Char('q') => TerminalInput::Quit,
        KeyCode::Char(ch) => action_for_char(ch).map_or(TerminalInput::Ignored, TerminalInput::Action),
        KeyCode::Enter => TerminalInput::Action(KeypadAction::Equals),
        KeyCode::Esc => TerminalInput::Action(KeypadAction::Clear),
        KeyCode::Backspace => TerminalInput::Action(KeypadAction::Backspace),
        _ => TerminalInput::Ignored,
    }
}

/// One-line rendering: expression on the left, display on the right
#[must_use]
pub fn render_line(state: &CalculatorState) -> String {
    format!(
        "{:>24} │ {:>12}",
        state.expression(),
        render_display(state.display())
    )
}

/// Leaves raw mode when dropped
struct RawMode;

impl RawMode {
    fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

fn draw(out: &mut impl Write, state: &CalculatorState) -> io::Result<()> {
    execute!(
        out,
        MoveToColumn(0),
        terminal::Clear(ClearType::CurrentLine),
        Print(render_line(state))
    )
}

/// Runs the keypad until `q` or Ctrl+C
pub fn run<G: ArithmeticGateway>(runtime: &Runtime, gateway: G) -> CliResult<()> {
    let mut session = Session::new(gateway);
    let mut stdout = io::stdout();

    let raw = RawMode::enable()?;
    execute!(
        stdout,
        Print("digits . + - * / = | Enter equals | Esc clear | n sign | % percent | q quit\r\n")
    )?;
    draw(&mut stdout, session.state())?;

    loop {
        let Event::Key(key) = event::read()? else {
            continue;
        };
        match map_key(key) {
            TerminalInput::Quit => break,
            TerminalInput::Ignored => {}
            TerminalInput::Action(action) => {
                runtime.block_on(session.press(action));
                draw(&mut stdout, session.state())?;
            }
        }
    }

    execute!(stdout, Print("\r\n"))?;
    drop(raw);
    tracing::debug!("terminal keypad closed");
    Ok(())
}
