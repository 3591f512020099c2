//! Console configuration and session bootstrap.

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use switchboard_ipc::{
    AudioChannel, ConsoleState, Scene, SourceHealth, SourceType, StreamerState, VideoSource,
};
use switchboard_views::DEFAULT_FEED_LEN;

use crate::console::first_duplicate;
use crate::error::ConfigError;
use crate::ConfigResult;

/// Default number of alerts kept in history.
pub const DEFAULT_ALERT_HISTORY: usize = 50;

/// Tunables for the console.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Alerts shown in the feed.
    pub alert_feed_len: usize,

    /// Alerts retained in state; older ones are dropped.
    pub alert_history_capacity: usize,

    /// Viewer name used for test alerts.
    pub test_alert_user: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            alert_feed_len: DEFAULT_FEED_LEN,
            alert_history_capacity: DEFAULT_ALERT_HISTORY,
            test_alert_user: "TestUser".to_string(),
        }
    }
}

impl ConsoleConfig {
    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        Self::from_json(&read(path.as_ref())?)
    }

    /// Check that the values are usable together.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.alert_feed_len == 0 {
            return Err(ConfigError::Invalid(
                "alert_feed_len must be at least 1".to_string(),
            ));
        }
        if self.alert_history_capacity < self.alert_feed_len {
            return Err(ConfigError::Invalid(format!(
                "alert_history_capacity ({}) is smaller than alert_feed_len ({})",
                self.alert_history_capacity, self.alert_feed_len
            )));
        }
        Ok(())
    }
}

/// A saved console session: configuration plus the state to resume from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionFile {
    /// Console tunables.
    pub config: ConsoleConfig,

    /// State to resume from.
    pub state: ConsoleState,
}

impl SessionFile {
    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let mut session: Self = serde_json::from_str(json)?;
        session.validate()?;
        session.trim_alerts();
        Ok(session)
    }

    /// Check the configuration and that source and channel ids are unique.
    pub fn validate(&self) -> ConfigResult<()> {
        self.config.validate()?;

        let state = &self.state;
        if let Some(id) = first_duplicate(state.sources.iter().map(|s| s.id.as_str())) {
            return Err(ConfigError::Invalid(format!("duplicate source id '{id}'")));
        }
        if let Some(id) = first_duplicate(state.channels.iter().map(|c| c.id.as_str())) {
            return Err(ConfigError::Invalid(format!("duplicate channel id '{id}'")));
        }
        Ok(())
    }

    /// Replace the configuration and re-apply its history limit.
    pub fn with_config(mut self, config: ConsoleConfig) -> Self {
        self.config = config;
        self.trim_alerts();
        self
    }

    /// Drop the oldest alerts beyond `alert_history_capacity`.
    fn trim_alerts(&mut self) {
        let capacity = self.config.alert_history_capacity;
        let alerts = &mut self.state.streamer.alerts;
        if alerts.len() > capacity {
            let excess = alerts.len() - capacity;
            debug!(excess, "Trimming alert history");
            alerts.drain(..excess);
        }
    }

    /// Load and validate a JSON file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        Self::from_json(&read(path.as_ref())?)
    }

    /// A small multi-camera session for trying the console out.
    pub fn demo() -> Self {
        let config = ConsoleConfig::default();

        let sources = vec![
            VideoSource::new("cam1", "Camera 1", SourceType::Camera),
            VideoSource::new("cam2", "Camera 2", SourceType::Ptz).with_health(SourceHealth {
                signal_strength: Some(88),
                ..Default::default()
            }),
            VideoSource::new("game", "Game Capture", SourceType::Media),
            VideoSource::new("drone", "Drone", SourceType::Drone).with_health(SourceHealth {
                battery_level: Some(34),
                signal_strength: Some(61),
                temperature: Some(64.0),
            }),
        ];

        let channels = ["Mic", "Game", "Music", "Alerts"]
            .iter()
            .map(|label| Arc::new(AudioChannel::new(label.to_lowercase(), *label)))
            .collect();

        let state = ConsoleState {
            streamer: StreamerState {
                active_scene: Scene::Starting,
                game_source_id: Some("game".to_string()),
                ..Default::default()
            },
            sources,
            channels,
            preview_id: Some("cam1".to_string()),
            program_id: Some("cam2".to_string()),
        };

        Self { config, state }
    }
}

fn read(path: &Path) -> ConfigResult<String> {
    debug!(path = %path.display(), "Reading configuration");
    std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use switchboard_ipc::{AlertType, EngagementAlert};

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = ConsoleConfig::from_json("{}").unwrap();
        assert_eq!(config, ConsoleConfig::default());
        assert_eq!(config.alert_feed_len, 5);
    }

    #[test]
    fn test_history_smaller_than_feed_is_rejected() {
        let err = ConsoleConfig::from_json(r#"{"alert_feed_len":5,"alert_history_capacity":3}"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_zero_feed_is_rejected() {
        assert!(ConsoleConfig::from_json(r#"{"alert_feed_len":0}"#).is_err());
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = SessionFile::from_json("{not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = ConsoleConfig::load("/nonexistent/switchboard.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_demo_session_round_trips() {
        let demo = SessionFile::demo();
        let json = serde_json::to_string(&demo).unwrap();
        assert_eq!(SessionFile::from_json(&json).unwrap(), demo);
        assert!(demo.state.program_source().is_some());
    }

    #[test]
    fn test_duplicate_ids_in_session_rejected() {
        let mut session = SessionFile::demo();
        let cam = session.state.sources[0].clone();
        session.state.sources.push(cam);
        let json = serde_json::to_string(&session).unwrap();
        let err = SessionFile::from_json(&json).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(ref m) if m.contains("cam1")));

        let mut session = SessionFile::demo();
        let mic = session.state.channels[0].clone();
        session.state.channels.push(mic);
        let json = serde_json::to_string(&session).unwrap();
        let err = SessionFile::from_json(&json).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(ref m) if m.contains("mic")));
    }

    #[test]
    fn test_loaded_alert_history_is_trimmed() {
        let mut session = SessionFile::demo();
        session.config.alert_history_capacity = 6;
        session.state.streamer.alerts = (0..10)
            .map(|i| EngagementAlert {
                id: format!("a{i}"),
                alert_type: AlertType::Follow,
                user: "viewer".to_string(),
            })
            .collect();
        let json = serde_json::to_string(&session).unwrap();

        let loaded = SessionFile::from_json(&json).unwrap();
        let ids: Vec<_> = loaded
            .state
            .streamer
            .alerts
            .iter()
            .map(|a| a.id.as_str())
            .collect();
        assert_eq!(ids, ["a4", "a5", "a6", "a7", "a8", "a9"]);

        let overridden = loaded.with_config(ConsoleConfig {
            alert_history_capacity: 5,
            ..ConsoleConfig::default()
        });
        assert_eq!(overridden.state.streamer.alerts.len(), 5);
        assert_eq!(overridden.state.streamer.alerts[0].id, "a5");
    }
}
