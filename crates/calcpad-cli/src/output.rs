//! Terminal output

use calcpad::service::ServiceConfig;
use console::style;

use crate::config::Verbosity;
use crate::replay::Screen;

/// Lines printed for a screen, unstyled
#[must_use]
pub fn screen_lines(screen: &Screen, verbosity: Verbosity) -> Vec<String> {
    let mut lines = Vec::with_capacity(2);
    if !verbosity.is_quiet() && !screen.expression.is_empty() {
        lines.push(screen.expression.clone());
    }
    lines.push(screen.display.clone());
    lines
}

/// Prints a screen to stdout: the expression line dimmed, the display bold
pub fn print_screen(screen: &Screen, verbosity: Verbosity) {
    let mut lines = screen_lines(screen, verbosity);
    let display = lines.pop().unwrap_or_default();
    for line in lines {
        println!("{}", style(line).dim());
    }
    if screen.error {
        println!("{}", style(display).red().bold());
    } else {
        println!("{}", style(display).bold());
    }
}

/// Prints the service banner to stderr
pub fn print_serve_banner(config: &ServiceConfig, verbosity: Verbosity) {
    if verbosity.is_quiet() {
        return;
    }
    eprintln!(
        "{} arithmetic service on {}",
        style("calcpad").cyan().bold(),
        style(config.base_url()).underlined()
    );
    eprintln!("  POST /api/v1/{{add,subtract,multiply,divide}}");
    eprintln!("  GET  /health");
    if config.cors {
        eprintln!("  CORS: any origin");
    }
    eprintln!("{}", style("Press Ctrl+C to stop").dim());
}
