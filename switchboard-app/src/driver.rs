//! JSON-lines bridge between stdin/stdout and the console engine.

use std::io::{BufRead, Write};
use std::thread::{self, JoinHandle};

use anyhow::{anyhow, Context, Result};
use crossbeam_channel::{Receiver, Sender};
use tracing::{debug, info, warn};

use switchboard_engine::{create_console, ConsoleEngine, SessionFile};
use switchboard_ipc::{command_channel, event_channel, ConsoleCommand, ConsoleEvent};

/// Owns the engine thread and both ends of its channels.
pub struct Driver {
    command_tx: Sender<ConsoleCommand>,
    event_rx: Receiver<ConsoleEvent>,
    engine: JoinHandle<ConsoleEngine>,
}

impl Driver {
    /// Start the engine thread for a session.
    pub fn start(session: SessionFile) -> Self {
        let (command_tx, command_rx) = command_channel();
        let (event_tx, event_rx) = event_channel();

        let engine = thread::spawn(move || {
            info!("Console thread starting");
            let mut engine = create_console(command_rx, event_tx, session);
            engine.run();
            info!("Console thread stopped");
            engine
        });

        Self {
            command_tx,
            event_rx,
            engine,
        }
    }

    /// Forward one command to the engine.
    pub fn send(&self, command: ConsoleCommand) -> Result<()> {
        self.command_tx
            .send(command)
            .map_err(|e| anyhow!("Failed to send command: {}", e))
    }

    /// Collect all available events without blocking.
    pub fn poll_events(&self) -> Vec<ConsoleEvent> {
        self.event_rx.try_iter().collect()
    }

    /// Block for the next event.
    pub fn next_event(&self) -> Result<ConsoleEvent> {
        self.event_rx
            .recv()
            .map_err(|_| anyhow!("Event channel disconnected"))
    }

    /// Stop the engine and return it with any events it emitted on the way out.
    pub fn shutdown(self) -> Result<(ConsoleEngine, Vec<ConsoleEvent>)> {
        // The engine may already have stopped on its own.
        let _ = self.command_tx.send(ConsoleCommand::Shutdown);
        drop(self.command_tx);

        let engine = self
            .engine
            .join()
            .map_err(|_| anyhow!("Console thread panicked"))?;
        Ok((engine, self.event_rx.try_iter().collect()))
    }
}

/// Parse one input line. Blank lines and `#` comments yield None.
pub fn parse_command(line: &str) -> Option<Result<ConsoleCommand, serde_json::Error>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    Some(serde_json::from_str(line))
}

/// Write one event as a JSON line.
pub fn write_event(out: &mut impl Write, event: &ConsoleEvent) -> Result<()> {
    serde_json::to_writer(&mut *out, event).context("Failed to encode event")?;
    writeln!(out).context("Failed to write event")?;
    Ok(())
}

/// Feed every command from `input` to the engine, echoing events to `out`.
///
/// Each command is answered before the next is read, so output stays in
/// command order.
pub fn pump(driver: &Driver, input: impl BufRead, out: &mut impl Write) -> Result<()> {
    for (n, line) in input.lines().enumerate() {
        let line = line.context("Failed to read command")?;
        let command = match parse_command(&line) {
            None => continue,
            Some(Ok(command)) => command,
            Some(Err(e)) => {
                warn!(line = n + 1, error = %e, "Unparseable command");
                write_event(
                    out,
                    &ConsoleEvent::Error {
                        message: format!("line {}: {}", n + 1, e),
                    },
                )?;
                continue;
            }
        };

        debug!(line = n + 1, command = command.name(), "Forwarding command");
        let stop = matches!(command, ConsoleCommand::Shutdown);
        let requested_state = matches!(command, ConsoleCommand::GetState);
        driver.send(command)?;
        if stop {
            break;
        }

        // A state reply marks the point where every event this command
        // caused has been emitted.
        if !requested_state {
            driver.send(ConsoleCommand::GetState)?;
        }
        loop {
            match driver.next_event()? {
                event @ ConsoleEvent::State(_) => {
                    if requested_state {
                        write_event(out, &event)?;
                    }
                    break;
                }
                event => write_event(out, &event)?,
            }
        }
    }

    for event in driver.poll_events() {
        write_event(out, &event)?;
    }
    out.flush().context("Failed to flush output")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command_skips_blanks_and_comments() {
        assert!(parse_command("").is_none());
        assert!(parse_command("   ").is_none());
        assert!(parse_command("# cut to drone").is_none());
        assert_eq!(
            parse_command(r#"{"SelectProgram":"drone"}"#).unwrap().unwrap(),
            ConsoleCommand::SelectProgram("drone".to_string())
        );
        assert_eq!(
            parse_command(r#""TriggerTestAlert""#).unwrap().unwrap(),
            ConsoleCommand::TriggerTestAlert
        );
        assert!(parse_command("{bogus").unwrap().is_err());
    }

    #[test]
    fn test_pump_echoes_events_in_order() {
        let driver = Driver::start(SessionFile::demo());
        let script = "\n{\"SelectScene\":\"Gameplay\"}\nnot json\n{\"SelectProgram\":\"ghost\"}\n";
        let mut out = Vec::new();
        pump(&driver, script.as_bytes(), &mut out).unwrap();
        let (engine, _) = driver.shutdown().unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert!(lines[0].contains("Ready"));
        assert!(lines[1].contains("StateChanged"));
        assert!(lines[2].contains("line 3"));
        assert!(lines[3].contains("ghost"));
        assert_eq!(lines.len(), 4);

        assert_eq!(
            engine.console().state().streamer.active_scene,
            switchboard_ipc::Scene::Gameplay
        );
    }
}
