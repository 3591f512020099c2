//! Common types used across console state, commands and events.

use serde::{Deserialize, Serialize};

/// A video source available to the switcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoSource {
    /// Unique identifier for this source.
    pub id: String,

    /// Display name for the UI.
    pub name: String,

    /// Kind of device or feed behind this source.
    pub source_type: SourceType,

    /// Latest health telemetry, if the source reports any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health: Option<SourceHealth>,
}

impl VideoSource {
    /// Create a source with no health telemetry.
    pub fn new(id: impl Into<String>, name: impl Into<String>, source_type: SourceType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            source_type,
            health: None,
        }
    }

    /// Attach a health snapshot.
    pub fn with_health(mut self, health: SourceHealth) -> Self {
        self.health = Some(health);
        self
    }
}

/// Type of video source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceType {
    /// A locally attached camera.
    Camera,

    /// A media file or playlist.
    Media,

    /// A pan-tilt-zoom camera.
    Ptz,

    /// An NDI network feed.
    Ndi,

    /// A remote guest feed.
    Remote,

    /// A drone camera.
    Drone,
}

impl SourceType {
    /// All source types, in display order.
    pub const ALL: [SourceType; 6] = [
        Self::Camera,
        Self::Media,
        Self::Ptz,
        Self::Ndi,
        Self::Remote,
        Self::Drone,
    ];
}

/// Health telemetry reported by a source. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceHealth {
    /// Battery charge percentage (0-100).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub battery_level: Option<u8>,

    /// Signal strength percentage (0-100).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signal_strength: Option<u8>,

    /// Device temperature in degrees Celsius.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

/// One strip of the audio mixer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioChannel {
    /// Unique identifier for this channel.
    pub id: String,

    /// Display label.
    pub label: String,

    /// Fader level (0.0 - 1.0).
    pub level: f32,

    /// Whether this channel is muted.
    pub is_muted: bool,

    /// Whether this channel is soloed.
    pub is_solo: bool,
}

impl AudioChannel {
    /// Create an unmuted, unsoloed channel at full level.
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            level: 1.0,
            is_muted: false,
            is_solo: false,
        }
    }
}

/// A viewer engagement notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngagementAlert {
    /// Unique identifier for this alert.
    pub id: String,

    /// What the viewer did.
    pub alert_type: AlertType,

    /// Viewer display name.
    pub user: String,
}

/// Type of engagement alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlertType {
    /// New or renewed subscription.
    Sub,

    /// Monetary donation.
    Donation,

    /// New follower.
    Follow,

    /// Incoming raid.
    Raid,

    /// Cheered bits.
    Bits,
}

impl AlertType {
    /// Returns the display name for this alert type.
    pub fn name(self) -> &'static str {
        match self {
            Self::Sub => "Subscription",
            Self::Donation => "Donation",
            Self::Follow => "Follow",
            Self::Raid => "Raid",
            Self::Bits => "Bits",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_health_fields_deserialize_as_none() {
        let source: VideoSource = serde_json::from_str(
            r#"{"id":"cam1","name":"Camera 1","source_type":"Camera","health":{"battery_level":42}}"#,
        )
        .unwrap();

        let health = source.health.unwrap();
        assert_eq!(health.battery_level, Some(42));
        assert_eq!(health.signal_strength, None);
        assert_eq!(health.temperature, None);
    }

    #[test]
    fn test_source_without_health() {
        let source: VideoSource =
            serde_json::from_str(r#"{"id":"m1","name":"Intro","source_type":"Media"}"#).unwrap();
        assert_eq!(source, VideoSource::new("m1", "Intro", SourceType::Media));
    }
}
