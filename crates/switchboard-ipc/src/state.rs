//! Console session state.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::types::{AudioChannel, EngagementAlert, VideoSource};

/// Scenes the switcher can put on air. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scene {
    /// Pre-show holding screen.
    #[default]
    Starting,

    /// Full-screen gameplay with camera overlay.
    Gameplay,

    /// Camera-only talking segment.
    JustChatting,

    /// Be-right-back screen.
    Brb,

    /// End-of-stream screen.
    Ending,
}

impl Scene {
    /// All scenes, in selector order.
    pub const ALL: [Scene; 5] = [
        Self::Starting,
        Self::Gameplay,
        Self::JustChatting,
        Self::Brb,
        Self::Ending,
    ];

    /// Returns the display name for this scene.
    pub fn name(self) -> &'static str {
        match self {
            Self::Starting => "Starting Soon",
            Self::Gameplay => "Gameplay",
            Self::JustChatting => "Just Chatting",
            Self::Brb => "Be Right Back",
            Self::Ending => "Ending",
        }
    }
}

/// Safe-mode toggles that suppress sensitive on-screen content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SafeMode {
    /// Blur the captured screen.
    pub blur_screen: bool,

    /// Hide the chat overlay.
    pub hide_chat: bool,

    /// Mute the microphone on air.
    pub mute_mic: bool,

    /// Suppress on-screen alerts.
    pub hide_alerts: bool,
}

/// Addresses one boolean of [`SafeMode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SafeModeKey {
    /// [`SafeMode::blur_screen`].
    BlurScreen,

    /// [`SafeMode::hide_chat`].
    HideChat,

    /// [`SafeMode::mute_mic`].
    MuteMic,

    /// [`SafeMode::hide_alerts`].
    HideAlerts,
}

impl SafeModeKey {
    /// All keys, in panel order.
    pub const ALL: [SafeModeKey; 4] = [
        Self::BlurScreen,
        Self::HideChat,
        Self::MuteMic,
        Self::HideAlerts,
    ];

    /// Returns the display name for this toggle.
    pub fn name(self) -> &'static str {
        match self {
            Self::BlurScreen => "Blur Screen",
            Self::HideChat => "Hide Chat",
            Self::MuteMic => "Mute Mic",
            Self::HideAlerts => "Hide Alerts",
        }
    }
}

impl SafeMode {
    /// Read a toggle by key.
    pub fn get(&self, key: SafeModeKey) -> bool {
        match key {
            SafeModeKey::BlurScreen => self.blur_screen,
            SafeModeKey::HideChat => self.hide_chat,
            SafeModeKey::MuteMic => self.mute_mic,
            SafeModeKey::HideAlerts => self.hide_alerts,
        }
    }

    /// Returns a copy with exactly one toggle flipped.
    pub fn toggled(mut self, key: SafeModeKey) -> Self {
        let flag = match key {
            SafeModeKey::BlurScreen => &mut self.blur_screen,
            SafeModeKey::HideChat => &mut self.hide_chat,
            SafeModeKey::MuteMic => &mut self.mute_mic,
            SafeModeKey::HideAlerts => &mut self.hide_alerts,
        };
        *flag = !*flag;
        self
    }
}

/// Streamer-facing aggregate: scene, game capture, safe mode and recent alerts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamerState {
    /// Scene currently on air.
    pub active_scene: Scene,

    /// Source used as the game capture, if one is assigned.
    pub game_source_id: Option<String>,

    /// Safe-mode toggles.
    pub safe_mode: SafeMode,

    /// Recent alerts, oldest first.
    pub alerts: Vec<EngagementAlert>,
}

/// The whole console session value.
///
/// The console replaces this value on every transition. Channels are held
/// behind `Arc` so entries untouched by an update keep their identity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleState {
    /// Scene, safe mode and alerts.
    pub streamer: StreamerState,

    /// Available video sources, in grid order.
    pub sources: Vec<VideoSource>,

    /// Mixer channels, in strip order.
    pub channels: Vec<Arc<AudioChannel>>,

    /// Source staged to go live next.
    pub preview_id: Option<String>,

    /// Source currently on air.
    pub program_id: Option<String>,
}

impl ConsoleState {
    /// Look up a source by id.
    pub fn source(&self, id: &str) -> Option<&VideoSource> {
        self.sources.iter().find(|s| s.id == id)
    }

    /// Returns true if a source with this id exists.
    pub fn has_source(&self, id: &str) -> bool {
        self.source(id).is_some()
    }

    /// Look up a mixer channel by id.
    pub fn channel(&self, id: &str) -> Option<&Arc<AudioChannel>> {
        self.channels.iter().find(|c| c.id == id)
    }

    /// The source staged in preview, or None if unset or dangling.
    pub fn preview_source(&self) -> Option<&VideoSource> {
        self.preview_id.as_deref().and_then(|id| self.source(id))
    }

    /// The source on program, or None if unset or dangling.
    pub fn program_source(&self) -> Option<&VideoSource> {
        self.program_id.as_deref().and_then(|id| self.source(id))
    }
}
