//! Calcpad command line front end
//!
//! Replays key sequences, runs an interactive terminal keypad and hosts the
//! arithmetic service.

#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

mod backend;
mod commands;
mod config;
mod error;
pub mod logging;
mod output;
pub mod replay;
pub mod terminal;

pub use backend::select_gateway;
pub use commands::{
    Cli, ColorArg, Commands, GatewayArgs, KeysArgs, RunArgs, ServeArgs, REMOTE_ENV,
};
pub use config::{CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult};
pub use output::{print_screen, print_serve_banner, screen_lines};
pub use replay::{action_for_char, parse_sequence, replay, Screen};
