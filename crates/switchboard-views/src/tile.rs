//! A single source tile.

use serde::{Deserialize, Serialize};
use tracing::debug;

use switchboard_ipc::{SourceHealth, SourceType, VideoSource};

use crate::gesture::bubble;
use crate::urgency::{is_overheating, urgency_band, UrgencyBand};

/// Switcher bus a view is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Staged to go live next.
    Preview,

    /// Currently on air.
    Program,
}

impl Role {
    /// Returns the short bus label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Preview => "PVW",
            Self::Program => "PGM",
        }
    }
}

/// Icon and label shown for a source type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TypeDescriptor {
    /// Icon glyph name.
    pub icon: &'static str,

    /// Type label.
    pub label: &'static str,
}

/// Map a source type to its display descriptor.
pub fn describe(source_type: SourceType) -> TypeDescriptor {
    let (icon, label) = match source_type {
        SourceType::Camera => ("camera", "Camera"),
        SourceType::Media => ("film", "Media"),
        SourceType::Ptz => ("move", "PTZ"),
        SourceType::Ndi => ("wifi", "NDI"),
        SourceType::Remote => ("globe", "Remote"),
        SourceType::Drone => ("plane", "Drone"),
    };
    TypeDescriptor { icon, label }
}

/// Battery readout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatteryIndicator {
    /// Charge percentage.
    pub level: u8,

    /// Styling band.
    pub band: UrgencyBand,
}

/// Signal readout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalIndicator {
    /// Strength percentage.
    pub strength: u8,

    /// Lit bars, 0-4.
    pub bars: u8,
}

/// Over-temperature readout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureIndicator {
    /// Degrees Celsius.
    pub celsius: f32,
}

/// Inputs to a tile.
#[derive(Debug, Clone, Copy)]
pub struct SourceTileProps<'a> {
    /// Source the tile draws.
    pub source: &'a VideoSource,

    /// Whether the source is on the bus named by `role`.
    pub is_active: bool,

    /// Bus the tile is marked for.
    pub role: Role,
}

/// Rendered tile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceTileView {
    /// Source id.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Icon and label for the source type.
    pub descriptor: TypeDescriptor,

    /// Bus the tile is marked for.
    pub role: Role,

    /// Whether the source is on that bus.
    pub is_active: bool,

    /// Battery readout, when reported.
    pub battery: Option<BatteryIndicator>,

    /// Signal readout, when reported.
    pub signal: Option<SignalIndicator>,

    /// Temperature readout, only when overheating.
    pub temperature: Option<TemperatureIndicator>,
}

impl SourceTileView {
    /// Returns true if any health readout is in an alerting band.
    pub fn needs_attention(&self) -> bool {
        self.temperature.is_some() || self.battery.is_some_and(|b| b.band.is_alerting())
    }
}

/// Render a tile from its props.
pub fn render_tile(props: SourceTileProps<'_>) -> SourceTileView {
    let health = props.source.health.clone().unwrap_or_default();
    let (battery, signal, temperature) = health_indicators(&health);

    SourceTileView {
        id: props.source.id.clone(),
        name: props.source.name.clone(),
        descriptor: describe(props.source.source_type),
        role: props.role,
        is_active: props.is_active,
        battery,
        signal,
        temperature,
    }
}

fn health_indicators(
    health: &SourceHealth,
) -> (
    Option<BatteryIndicator>,
    Option<SignalIndicator>,
    Option<TemperatureIndicator>,
) {
    let battery = health.battery_level.map(|level| BatteryIndicator {
        level,
        band: urgency_band(Some(level)),
    });

    let signal = health.signal_strength.map(|strength| SignalIndicator {
        strength,
        bars: strength.div_ceil(25).min(4),
    });

    let temperature = health
        .temperature
        .filter(|&c| is_overheating(c))
        .map(|celsius| TemperatureIndicator { celsius });

    (battery, signal, temperature)
}

/// Hit targets within a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileTarget {
    /// The tile itself.
    Body,

    /// The settings button.
    Settings,

    /// The cut-to-program button.
    Cut,
}

impl TileTarget {
    /// Bubbling path from this target out to the tile body.
    pub fn path(self) -> &'static [TileTarget] {
        match self {
            Self::Body => &[Self::Body],
            Self::Settings => &[Self::Settings, Self::Body],
            Self::Cut => &[Self::Cut, Self::Body],
        }
    }
}

/// Receives a tile's outbound intents.
pub trait TileHandler {
    /// Tile body clicked: make this source the preview candidate.
    fn on_click(&mut self);

    /// Settings button clicked.
    fn on_settings(&mut self) {}

    /// Cut button clicked.
    fn on_cut(&mut self) {}
}

/// Route a click on `target` through the tile's handlers.
///
/// Buttons inside the tile stop propagation, so the body never sees their
/// clicks.
pub fn dispatch_tile<H: TileHandler + ?Sized>(target: TileTarget, handler: &mut H) {
    debug!(?target, "Tile click");
    bubble(target.path(), |node, event| match node {
        TileTarget::Body => handler.on_click(),
        TileTarget::Settings => {
            event.stop_propagation();
            handler.on_settings();
        }
        TileTarget::Cut => {
            event.stop_propagation();
            handler.on_cut();
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counts {
        click: u32,
        settings: u32,
        cut: u32,
    }

    impl TileHandler for Counts {
        fn on_click(&mut self) {
            self.click += 1;
        }

        fn on_settings(&mut self) {
            self.settings += 1;
        }

        fn on_cut(&mut self) {
            self.cut += 1;
        }
    }

    fn drone(health: SourceHealth) -> VideoSource {
        VideoSource::new("d1", "Drone", SourceType::Drone).with_health(health)
    }

    #[test]
    fn test_settings_click_does_not_select() {
        let mut counts = Counts::default();
        dispatch_tile(TileTarget::Settings, &mut counts);
        assert_eq!(counts.settings, 1);
        assert_eq!(counts.click, 0);
        assert_eq!(counts.cut, 0);
    }

    #[test]
    fn test_body_click_only_selects() {
        let mut counts = Counts::default();
        dispatch_tile(TileTarget::Body, &mut counts);
        assert_eq!(counts.click, 1);
        assert_eq!(counts.settings, 0);
        assert_eq!(counts.cut, 0);
    }

    #[test]
    fn test_missing_telemetry_omits_indicators() {
        let source = VideoSource::new("cam1", "Camera 1", SourceType::Camera);
        let view = render_tile(SourceTileProps {
            source: &source,
            is_active: false,
            role: Role::Preview,
        });

        assert!(view.battery.is_none());
        assert!(view.signal.is_none());
        assert!(view.temperature.is_none());
        assert!(!view.needs_attention());
    }

    #[test]
    fn test_temperature_only_above_threshold() {
        let cool = drone(SourceHealth {
            temperature: Some(60.0),
            ..Default::default()
        });
        let hot = drone(SourceHealth {
            temperature: Some(72.5),
            ..Default::default()
        });

        fn props(source: &VideoSource) -> SourceTileProps<'_> {
            SourceTileProps {
                source,
                is_active: true,
                role: Role::Program,
            }
        }

        assert!(render_tile(props(&cool)).temperature.is_none());
        let view = render_tile(props(&hot));
        assert_eq!(view.temperature, Some(TemperatureIndicator { celsius: 72.5 }));
        assert!(view.needs_attention());
    }

    #[test]
    fn test_battery_and_signal_indicators() {
        let source = drone(SourceHealth {
            battery_level: Some(15),
            signal_strength: Some(60),
            temperature: None,
        });
        let view = render_tile(SourceTileProps {
            source: &source,
            is_active: false,
            role: Role::Preview,
        });

        assert_eq!(
            view.battery,
            Some(BatteryIndicator {
                level: 15,
                band: UrgencyBand::Critical
            })
        );
        assert_eq!(view.signal.map(|s| s.bars), Some(3));
        assert_eq!(view.descriptor.label, "Drone");
    }

    #[test]
    fn test_every_type_has_distinct_icon() {
        let mut icons: Vec<_> = SourceType::ALL.iter().map(|t| describe(*t).icon).collect();
        icons.sort_unstable();
        icons.dedup();
        assert_eq!(icons.len(), SourceType::ALL.len());
    }
}
