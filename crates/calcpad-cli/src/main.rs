//! Calcpad CLI
//!
//! ## Usage
//!
//! ```bash
//! calcpad keys "12+8="                  # Replay keys, print the screen
//! calcpad run                           # Interactive terminal keypad
//! calcpad serve --port 4100 --cors      # Arithmetic HTTP service
//! calcpad keys "7/0=" --remote http://127.0.0.1:4100
//! ```

use std::process::ExitCode;

use calcpad::service::{ArithmeticService, ServiceConfig};
use calcpad_cli::{
    logging, parse_sequence, print_screen, print_serve_banner, replay, select_gateway, terminal,
    Cli, CliConfig, CliResult, Commands, KeysArgs, RunArgs, ServeArgs, Verbosity,
};
use clap::Parser;
use tokio::runtime::Runtime;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let config = build_config(&cli);

    logging::init(&config);
    console::set_colors_enabled(config.color.should_color());

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    match cli.command {
        Commands::Serve(args) => run_serve(&runtime, &config, &args),
        Commands::Keys(args) => run_keys(&runtime, &config, &args),
        Commands::Run(args) => run_interactive(&runtime, &args),
    }
}

fn build_config(cli: &Cli) -> CliConfig {
    CliConfig::new()
        .with_verbosity(Verbosity::from_flags(cli.quiet, cli.verbose))
        .with_color(cli.color.into())
        .with_log_json(cli.log_json)
}

fn run_serve(runtime: &Runtime, config: &CliConfig, args: &ServeArgs) -> CliResult<()> {
    let service_config = ServiceConfig::builder()
        .host(args.host)
        .port(args.port)
        .cors(args.cors)
        .build();
    print_serve_banner(&service_config, config.verbosity);

    let service = ArithmeticService::new(service_config);
    runtime.block_on(service.run_until(async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    }))?;
    Ok(())
}

fn run_keys(runtime: &Runtime, config: &CliConfig, args: &KeysArgs) -> CliResult<()> {
    let actions = parse_sequence(&args.sequence)?;
    let gateway = select_gateway(args.gateway.remote.as_deref())?;
    let screen = runtime.block_on(replay(gateway, actions));
    print_screen(&screen, config.verbosity);
    Ok(())
}

fn run_interactive(runtime: &Runtime, args: &RunArgs) -> CliResult<()> {
    let gateway = select_gateway(args.gateway.remote.as_deref())?;
    terminal::run(runtime, gateway)
}
