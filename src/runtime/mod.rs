use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::app::App;

mod commands;
mod settings;
mod startup;

pub use commands::{Cli, Command};

/// Parse the process arguments, run one command and report its outcome.
pub fn run() -> ExitCode {
    init_tracing();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let settings = settings::load_settings();
    let mut app = App::open(&settings);
    startup::apply_playback_defaults(&mut app, &settings);

    let outcome = commands::execute(&mut app, cli.command);
    println!("{outcome}");
    if outcome.is_done() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Log to stderr, filtered by `RUST_LOG` (default `warn`).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
