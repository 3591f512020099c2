//! Console command loop.

use crossbeam_channel::{Receiver, Sender};
use tracing::{debug, info, instrument, warn};

use switchboard_ipc::{ConsoleCommand, ConsoleEvent, ConsoleState};

use crate::config::SessionFile;
use crate::console::{ControlConsole, Outcome, UpdateCallback};

/// Runs a [`ControlConsole`] on one thread, fed by a command channel.
///
/// Commands are applied strictly in arrival order; every state replacement
/// is published as [`ConsoleEvent::StateChanged`].
pub struct ConsoleEngine {
    command_rx: Receiver<ConsoleCommand>,
    event_tx: Sender<ConsoleEvent>,
    console: ControlConsole,
}

impl ConsoleEngine {
    /// Create an engine for a session.
    pub fn new(
        command_rx: Receiver<ConsoleCommand>,
        event_tx: Sender<ConsoleEvent>,
        session: SessionFile,
    ) -> Self {
        let updates = event_tx.clone();
        let on_update: UpdateCallback =
            Box::new(move |previous: &ConsoleState, current: &ConsoleState| {
                let event = ConsoleEvent::StateChanged {
                    previous: Box::new(previous.clone()),
                    current: Box::new(current.clone()),
                };
                if let Err(e) = updates.try_send(event) {
                    warn!("Failed to send event: {}", e);
                }
            });

        Self {
            command_rx,
            event_tx,
            console: ControlConsole::new(session.state, session.config, on_update),
        }
    }

    /// The console being driven.
    pub fn console(&self) -> &ControlConsole {
        &self.console
    }

    /// Run the loop until shutdown or until every command sender is dropped.
    #[instrument(name = "console_run", skip(self))]
    pub fn run(&mut self) {
        info!("Console starting");
        self.send_event(ConsoleEvent::Ready);

        loop {
            match self.command_rx.recv() {
                Ok(command) => {
                    if !self.handle_command(command) {
                        break;
                    }
                }
                Err(_) => {
                    info!("Command channel disconnected, shutting down");
                    break;
                }
            }
        }

        info!("Console stopped");
    }

    /// Handle a command. Returns false if the loop should stop.
    fn handle_command(&mut self, command: ConsoleCommand) -> bool {
        debug!(command = command.name(), "Handling command");

        match command {
            ConsoleCommand::GetState => {
                let state = self.console.state().clone();
                self.send_event(ConsoleEvent::State(Box::new(state)));
            }
            ConsoleCommand::Shutdown => {
                self.send_event(ConsoleEvent::Shutdown);
                return false;
            }
            command => match self.console.handle(command) {
                Ok(Outcome::SettingsRequested(source_id)) => {
                    self.send_event(ConsoleEvent::SettingsRequested { source_id });
                }
                Ok(Outcome::TransitionRequested(kind)) => {
                    self.send_event(ConsoleEvent::TransitionRequested { kind });
                }
                Ok(Outcome::Updated | Outcome::Unchanged) => {}
                Err(e) => {
                    warn!(error = %e, "Command rejected");
                    self.send_event(ConsoleEvent::Error {
                        message: e.to_string(),
                    });
                }
            },
        }

        true
    }

    fn send_event(&self, event: ConsoleEvent) {
        if let Err(e) = self.event_tx.try_send(event) {
            warn!("Failed to send event: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use switchboard_ipc::{command_channel, event_channel, Scene, TransitionKind};

    fn run_script(commands: Vec<ConsoleCommand>) -> Vec<ConsoleEvent> {
        let (command_tx, command_rx) = command_channel();
        let (event_tx, event_rx) = event_channel();
        let mut engine = ConsoleEngine::new(command_rx, event_tx, SessionFile::demo());

        let handle = thread::spawn(move || engine.run());
        for command in commands {
            let _ = command_tx.send(command);
        }
        drop(command_tx);
        handle.join().unwrap();

        event_rx.try_iter().collect()
    }

    #[test]
    fn test_scene_change_publishes_previous_and_current() {
        let events = run_script(vec![ConsoleCommand::SelectScene(Scene::Gameplay)]);

        assert!(matches!(events[0], ConsoleEvent::Ready));
        match &events[1] {
            ConsoleEvent::StateChanged { previous, current } => {
                assert_eq!(previous.streamer.active_scene, Scene::Starting);
                assert_eq!(current.streamer.active_scene, Scene::Gameplay);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_rejected_command_reports_error_and_keeps_running() {
        let events = run_script(vec![
            ConsoleCommand::SelectProgram("ghost".to_string()),
            ConsoleCommand::GetState,
        ]);

        assert!(matches!(&events[1], ConsoleEvent::Error { message } if message.contains("ghost")));
        match &events[2] {
            ConsoleEvent::State(state) => assert_eq!(state.program_id.as_deref(), Some("cam2")),
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_settings_and_transitions_are_forwarded() {
        let events = run_script(vec![
            ConsoleCommand::OpenSourceSettings("drone".to_string()),
            ConsoleCommand::Transition(TransitionKind::Wipe),
            ConsoleCommand::AutoTransition,
        ]);

        assert!(matches!(
            &events[1],
            ConsoleEvent::SettingsRequested { source_id } if source_id == "drone"
        ));
        assert!(matches!(
            events[2],
            ConsoleEvent::TransitionRequested {
                kind: Some(TransitionKind::Wipe)
            }
        ));
        assert!(matches!(
            events[3],
            ConsoleEvent::TransitionRequested { kind: None }
        ));
        assert_eq!(events.len(), 4);
    }

    #[test]
    fn test_shutdown_stops_loop() {
        let events = run_script(vec![
            ConsoleCommand::Shutdown,
            ConsoleCommand::SelectScene(Scene::Ending),
        ]);

        assert!(matches!(events.last(), Some(ConsoleEvent::Shutdown)));
        assert_eq!(events.len(), 2);
    }
}
