//! Headless driver for the switchboard console.
//!
//! Reads one JSON `ConsoleCommand` per line from stdin and writes one JSON
//! `ConsoleEvent` per line to stdout. Logs go to stderr.

mod driver;

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use switchboard_engine::{ConsoleConfig, SessionFile};

use crate::driver::{pump, write_event, Driver};

/// Drive a switchboard console session from the command line.
#[derive(Debug, Parser)]
#[command(name = "switchboard", version, about)]
struct Args {
    /// Session file to resume (JSON). Defaults to a built-in demo session.
    #[arg(long)]
    session: Option<PathBuf>,

    /// Configuration file (JSON). Overrides the session's configuration.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the rendered console as JSON after the session ends.
    #[arg(long)]
    render: bool,
}

/// Initialize logging.
fn init_logging() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            "switchboard=debug,switchboard_engine=debug,switchboard_views=debug".into()
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn load_session(args: &Args) -> Result<SessionFile> {
    let session = match &args.session {
        Some(path) => SessionFile::load(path)
            .with_context(|| format!("Failed to load session {}", path.display()))?,
        None => SessionFile::demo(),
    };

    match &args.config {
        Some(path) => {
            let config = ConsoleConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?;
            Ok(session.with_config(config))
        }
        None => Ok(session),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging();
    info!("Switchboard starting");

    let session = load_session(&args)?;
    info!(
        sources = session.state.sources.len(),
        channels = session.state.channels.len(),
        "Session loaded"
    );

    let driver = Driver::start(session);
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    pump(&driver, io::stdin().lock(), &mut out)?;

    let (engine, trailing) = driver.shutdown()?;
    for event in &trailing {
        write_event(&mut out, event)?;
    }

    if args.render {
        serde_json::to_writer_pretty(&mut out, &engine.console().render())
            .context("Failed to encode console view")?;
        writeln!(out)?;
    }
    out.flush()?;

    info!("Switchboard stopped");
    Ok(())
}
