use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use quiz_pi::config::{Cli, EXIT_INPUT_CLOSED, EXIT_INTERRUPTED};
use quiz_pi::hal::BoxedDevice;
use quiz_pi::{CleanupSlot, DeviceConfig, Quiz, QuizError, SharedIndicator, hal, run_session};

/// Main Entry Point
///
/// Lädt Konfiguration, installiert den Ctrl+C Handler, wählt den Treiber
/// und startet die Quiz-Schleife.
fn main() -> ExitCode {
    // .env ist optional, QUIZ_* Variablen können auch direkt gesetzt sein
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("quiz_pi=info,quiz_core=info")),
        )
        .init();

    if let Err(e) = dotenv {
        if !e.not_found() {
            warn!("Failed to load .env: {}", e);
        }
    }

    let cli = Cli::parse();

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            if let Some(QuizError::InputClosed) = e.downcast_ref::<QuizError>() {
                return ExitCode::from(EXIT_INPUT_CLOSED);
            }
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn goodbye() {
    let mut stdout = io::stdout();
    let _ = writeln!(stdout, "\n\n👋 Quiz ended. Goodbye!");
    let _ = stdout.flush();
}

fn run(cli: &Cli) -> Result<ExitCode> {
    cli.validate().map_err(|e| anyhow!(e))?;
    let config = DeviceConfig::from(cli);

    // Ctrl+C / SIGTERM: LEDs aus, GPIO freigeben, beenden.
    // Installiert vor dem Belegen der Pins, damit kein Zeitfenster ohne Cleanup bleibt.
    let slot: CleanupSlot<BoxedDevice> = CleanupSlot::new();
    let handler = slot.clone();
    ctrlc::set_handler(move || {
        if handler.interrupt() {
            goodbye();
            std::process::exit(i32::from(EXIT_INTERRUPTED));
        }
    })
    .context("failed to install interrupt handler")?;

    let indicator = hal::initialize(config, cli.simulate).context("failed to set up LEDs")?;
    let indicator = SharedIndicator::new(indicator);
    if !slot.fill(indicator.clone()) {
        goodbye();
        return Ok(ExitCode::from(EXIT_INTERRUPTED));
    }

    let stdin = io::stdin();
    let mut quiz = Quiz::new(stdin.lock(), io::stdout());
    let summary = run_session(&mut quiz, &indicator)?;
    info!("Session done: {} rounds", summary.rounds);
    Ok(ExitCode::SUCCESS)
}
