//! Headless dossier host.
//!
//! Reads one command per line from stdin and prints a frame as a JSON line on
//! stdout every `tick_ms`, plus one right after each command. Logs go to stderr;
//! set `RUST_LOG` to change the level.
//!
//! Usage: `dossier [config.toml]`

use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use dossier_core::{DossierConfig, DossierSession, FrameSnapshot, Result};
use effect_engine::{Clock, MonotonicClock};
use tracing_subscriber::filter::EnvFilter;

fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();
}

/// Forward stdin lines to the frame loop until EOF or a read error.
fn spawn_input_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "stdin closed");
                    break;
                }
            }
        }
    });
    rx
}

/// Write one frame. `Ok(false)` means stdout is gone and the host should stop.
fn emit(out: &mut impl Write, frame: &FrameSnapshot) -> Result<bool> {
    let line = frame.to_json_line()?;
    match writeln!(out, "{}", line).and_then(|()| out.flush()) {
        Ok(()) => Ok(true),
        Err(e) => {
            tracing::info!(error = %e, "stdout closed");
            Ok(false)
        }
    }
}

fn run() -> Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => {
            tracing::info!(path = %path, "loading dossier config");
            DossierConfig::load(path)?
        }
        None => DossierConfig::default_embedded()?,
    };

    let mut session = DossierSession::new(config)?;
    tracing::info!(commands = ?session.registry().names(), "commands available");

    let tick = Duration::from_millis(session.tick_ms());
    let clock = MonotonicClock::new();
    let input = spawn_input_reader();
    let mut stdout = io::stdout().lock();

    loop {
        match input.recv_timeout(tick) {
            Ok(line) => {
                session.submit(&line, clock.now())?;
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }

        let frame = session.frame(clock.now())?;
        if !emit(&mut stdout, &frame)? {
            break;
        }
    }

    tracing::info!("dossier closed");
    Ok(())
}

fn main() -> ExitCode {
    init_logging();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "dossier failed");
            ExitCode::FAILURE
        }
    }
}
