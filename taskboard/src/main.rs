//! `taskboard` entry point: loads settings, builds the board, runs one command.

use std::ffi::OsString;
use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use ortho_config::OrthoConfig;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use taskboard::TaskBoard;
use taskboard::inbound::cli::{self, Cli};
use taskboard::settings::TaskboardSettings;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let mut settings = TaskboardSettings::load_from_iter([OsString::from("taskboard")])
        .wrap_err("failed to load taskboard settings")?;
    cli.apply_overrides(&mut settings);
    init_tracing(settings.log_json);

    let board = TaskBoard::from_settings(&settings).wrap_err("failed to start taskboard")?;
    let mut stdout = io::stdout().lock();
    match cli::run(&board, cli.command, &mut stdout).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            if let Err(write_err) = writeln!(io::stderr().lock(), "error: {err}") {
                drop(write_err);
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

fn init_tracing(json: bool) {
    // Command output owns stdout; logs always go to stderr.
    let builder = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr);
    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(e) = result {
        warn!(error = %e, "tracing init failed");
    }
}
