//! CLI command definitions using clap

use std::net::{IpAddr, Ipv4Addr};

use calcpad::service::DEFAULT_PORT;
use clap::{Args, Parser, Subcommand, ValueEnum};

/// Environment variable naming a remote arithmetic service
pub const REMOTE_ENV: &str = "CALCPAD_REMOTE";

/// Calcpad: keypad calculator with a pluggable arithmetic gateway
#[derive(Parser, Debug)]
#[command(name = "calcpad")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (print only the result)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Write logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the arithmetic HTTP service
    Serve(ServeArgs),

    /// Replay a key sequence and print the final screen
    ///
    /// Digits, `.`, `+ - * /` behave as on the keypad. `=` is equals, `c`
    /// clears, `n` toggles the sign, `%` is percent and `<` is backspace.
    Keys(KeysArgs),

    /// Interactive keypad in the terminal
    Run(RunArgs),
}

/// Arguments for the serve command
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to bind
    #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    pub host: IpAddr,

    /// Port to bind
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Allow cross-origin requests from any origin
    #[arg(long)]
    pub cors: bool,
}

/// Where computations are sent
#[derive(Args, Debug, Clone, Default)]
pub struct GatewayArgs {
    /// Base URL of a remote arithmetic service (in-process when absent)
    #[arg(long, env = REMOTE_ENV)]
    pub remote: Option<String>,
}

/// Arguments for the keys command
#[derive(Args, Debug)]
pub struct KeysArgs {
    /// Key sequence, e.g. "12+8=" or "-3="
    #[arg(allow_hyphen_values = true)]
    pub sequence: String,

    /// Gateway selection
    #[command(flatten)]
    pub gateway: GatewayArgs,
}

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Gateway selection
    #[command(flatten)]
    pub gateway: GatewayArgs,
}

/// Color argument for CLI
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}
