//! Events sent from the console to the owning application.

use serde::{Deserialize, Serialize};

use crate::commands::TransitionKind;
use crate::state::ConsoleState;

/// Events that the console loop can send to the application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ConsoleEvent {
    /// Console state was replaced.
    StateChanged {
        /// Previous state.
        previous: Box<ConsoleState>,

        /// Current state.
        current: Box<ConsoleState>,
    },

    /// Current state, in answer to a state request.
    State(Box<ConsoleState>),

    /// A source tile asked for its settings surface.
    SettingsRequested { source_id: String },

    /// A transition button was pressed. No state was changed.
    TransitionRequested {
        /// Requested style, or None for the auto-transition button.
        kind: Option<TransitionKind>,
    },

    /// An intent was rejected. State is unchanged.
    Error {
        /// Error message.
        message: String,
    },

    /// Console loop is ready.
    Ready,

    /// Console loop has shut down.
    Shutdown,
}
