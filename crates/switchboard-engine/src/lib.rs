//! Console state owner and command loop for the switchboard.
//!
//! [`ControlConsole`] reduces view intents into whole-value state
//! replacements; [`ConsoleEngine`] drives a console from a command channel
//! and publishes the results as events.

mod config;
mod console;
mod engine;
mod error;

pub use config::{ConsoleConfig, SessionFile, DEFAULT_ALERT_HISTORY};
pub use console::{
    reduce, ConsoleView, ControlConsole, Outcome, SidePanelTab, SidePanelView, UpdateCallback,
};
pub use engine::ConsoleEngine;
pub use error::{ConfigError, ConsoleError};

use crossbeam_channel::{Receiver, Sender};
use switchboard_ipc::{ConsoleCommand, ConsoleEvent};

/// Result type for console intents.
pub type ConsoleResult<T> = Result<T, ConsoleError>;

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Create a console engine for a session with IPC channels.
pub fn create_console(
    command_rx: Receiver<ConsoleCommand>,
    event_tx: Sender<ConsoleEvent>,
    session: SessionFile,
) -> ConsoleEngine {
    ConsoleEngine::new(command_rx, event_tx, session)
}
