//! Intents sent from the views to the console.

use serde::{Deserialize, Serialize};

use crate::state::{SafeModeKey, Scene};
use crate::types::{AudioChannel, EngagementAlert, VideoSource};

/// Intents that a view (or the owning application) can send to the console.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ConsoleCommand {
    /// Put a scene on air.
    SelectScene(Scene),

    /// Flip one safe-mode toggle.
    ToggleSafeMode(SafeModeKey),

    /// Replace one mixer channel record, matched by id.
    UpdateChannel(AudioChannel),

    /// Stage a source in preview.
    SelectPreview(String),

    /// Cut a source straight to program, bypassing preview.
    SelectProgram(String),

    /// Assign the game capture source.
    SetGameSource(String),

    /// Replace the source collection.
    SetSources(Vec<VideoSource>),

    /// Append an alert from the ingestion collaborator.
    PushAlert(EngagementAlert),

    /// Append a locally generated test alert.
    TriggerTestAlert,

    /// Ask the application to open the settings surface for a source.
    OpenSourceSettings(String),

    /// Transition-bar button. Inert unless the application supplies semantics.
    Transition(TransitionKind),

    /// Auto-transition button. Inert unless the application supplies semantics.
    AutoTransition,

    /// Request the current console state.
    GetState,

    /// Shut the console loop down.
    Shutdown,
}

impl ConsoleCommand {
    /// Returns a short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SelectScene(_) => "SelectScene",
            Self::ToggleSafeMode(_) => "ToggleSafeMode",
            Self::UpdateChannel(_) => "UpdateChannel",
            Self::SelectPreview(_) => "SelectPreview",
            Self::SelectProgram(_) => "SelectProgram",
            Self::SetGameSource(_) => "SetGameSource",
            Self::SetSources(_) => "SetSources",
            Self::PushAlert(_) => "PushAlert",
            Self::TriggerTestAlert => "TriggerTestAlert",
            Self::OpenSourceSettings(_) => "OpenSourceSettings",
            Self::Transition(_) => "Transition",
            Self::AutoTransition => "AutoTransition",
            Self::GetState => "GetState",
            Self::Shutdown => "Shutdown",
        }
    }
}

/// Transition-bar styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransitionKind {
    /// Instant switch.
    Cut,

    /// Crossfade.
    Fade,

    /// Directional wipe.
    Wipe,

    /// Animated stinger clip.
    Stinger,
}

impl TransitionKind {
    /// All transition styles, in bar order.
    pub const ALL: [TransitionKind; 4] = [Self::Cut, Self::Fade, Self::Wipe, Self::Stinger];

    /// Returns the button label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Cut => "CUT",
            Self::Fade => "FADE",
            Self::Wipe => "WIPE",
            Self::Stinger => "STINGER",
        }
    }
}
