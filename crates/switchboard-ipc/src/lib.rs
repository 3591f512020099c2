//! Typed console state, intents and events for the switchboard.
//!
//! This crate defines the data model shared by the views, the console and
//! the owning application, plus the channels that connect them.

mod commands;
mod events;
mod state;
mod types;

pub use commands::{ConsoleCommand, TransitionKind};
pub use events::ConsoleEvent;
pub use state::{ConsoleState, SafeMode, SafeModeKey, Scene, StreamerState};
pub use types::{
    AlertType, AudioChannel, EngagementAlert, SourceHealth, SourceType, VideoSource,
};

use crossbeam_channel::{Receiver, Sender};

/// Channel capacity for commands (views → console).
pub const COMMAND_CHANNEL_CAPACITY: usize = 64;

/// Channel capacity for events (console → application).
pub const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Creates a bounded command channel.
pub fn command_channel() -> (Sender<ConsoleCommand>, Receiver<ConsoleCommand>) {
    crossbeam_channel::bounded(COMMAND_CHANNEL_CAPACITY)
}

/// Creates a bounded event channel.
pub fn event_channel() -> (Sender<ConsoleEvent>, Receiver<ConsoleEvent>) {
    crossbeam_channel::bounded(EVENT_CHANNEL_CAPACITY)
}
