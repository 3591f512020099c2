//! Audio mixer strips.

use serde::Serialize;

use switchboard_ipc::AudioChannel;

/// One rendered mixer strip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MixerStripView {
    /// Channel id.
    pub id: String,

    /// Strip caption.
    pub label: String,

    /// Fader position as a whole percentage.
    pub level_percent: u8,

    /// Mute button state.
    pub is_muted: bool,

    /// Solo button state.
    pub is_solo: bool,

    /// Whether this channel reaches the output given mute and solo state.
    pub is_audible: bool,
}

/// Render all strips in channel order.
pub fn render_mixer<'a, I>(channels: I) -> Vec<MixerStripView>
where
    I: IntoIterator<Item = &'a AudioChannel>,
    I::IntoIter: Clone,
{
    let channels = channels.into_iter();
    let any_solo = channels.clone().any(|c| c.is_solo);

    channels
        .map(|c| MixerStripView {
            id: c.id.clone(),
            label: c.label.clone(),
            level_percent: (c.level.clamp(0.0, 1.0) * 100.0).round() as u8,
            is_muted: c.is_muted,
            is_solo: c.is_solo,
            is_audible: !c.is_muted && (!any_solo || c.is_solo),
        })
        .collect()
}

/// Builds the full replacement record a strip sends on each interaction.
pub trait ChannelEdit {
    /// Fader moved. Level is clamped to 0.0 - 1.0.
    fn with_level(&self, level: f32) -> AudioChannel;

    /// Mute button pressed.
    fn toggle_mute(&self) -> AudioChannel;

    /// Solo button pressed.
    fn toggle_solo(&self) -> AudioChannel;
}

impl ChannelEdit for AudioChannel {
    fn with_level(&self, level: f32) -> AudioChannel {
        AudioChannel {
            level: level.clamp(0.0, 1.0),
            ..self.clone()
        }
    }

    fn toggle_mute(&self) -> AudioChannel {
        AudioChannel {
            is_muted: !self.is_muted,
            ..self.clone()
        }
    }

    fn toggle_solo(&self) -> AudioChannel {
        AudioChannel {
            is_solo: !self.is_solo,
            ..self.clone()
        }
    }
}
