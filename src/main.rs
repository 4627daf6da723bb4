use clap::Parser;
use eyre::Result;
use std::io::{self, IsTerminal};
use tasklist::{Session, SessionConfig};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let config = SessionConfig::parse();

    // Setup tracing on stderr so it never mixes with session output
    let default_level = if config.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    if config.no_color {
        colored::control::set_override(false);
    }

    let mut session = Session::new(&config)?;

    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    if interactive {
        println!("tasklist {} - type `help` for commands", env!("CARGO_PKG_VERSION"));
    }

    session.run(stdin.lock(), &mut io::stdout(), &mut io::stderr(), interactive)
}
