//! Threshold-based urgency styling for health telemetry.

use serde::{Deserialize, Serialize};

/// Battery levels below this are critical.
pub const BATTERY_CRITICAL_BELOW: u8 = 20;

/// Battery levels below this (and at or above critical) are a warning.
pub const BATTERY_WARNING_BELOW: u8 = 50;

/// Temperatures above this (degrees Celsius) are shown at all.
pub const TEMPERATURE_ALERT_ABOVE_C: f32 = 60.0;

/// Styling band for a percentage reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UrgencyBand {
    /// No reading; neutral styling.
    None,

    /// Healthy.
    Normal,

    /// Needs attention soon.
    Warning,

    /// Attention-grabbing.
    Critical,
}

impl UrgencyBand {
    /// Returns true if the band should draw attention.
    pub fn is_alerting(self) -> bool {
        matches!(self, Self::Warning | Self::Critical)
    }

    /// Returns the style class name for this band.
    pub fn class(self) -> &'static str {
        match self {
            Self::None => "neutral",
            Self::Normal => "normal",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }
}

/// Classify a battery level into an urgency band.
pub fn urgency_band(level: Option<u8>) -> UrgencyBand {
    match level {
        None => UrgencyBand::None,
        Some(l) if l < BATTERY_CRITICAL_BELOW => UrgencyBand::Critical,
        Some(l) if l < BATTERY_WARNING_BELOW => UrgencyBand::Warning,
        Some(_) => UrgencyBand::Normal,
    }
}

/// Returns true if a temperature reading should be displayed.
pub fn is_overheating(celsius: f32) -> bool {
    celsius > TEMPERATURE_ALERT_ABOVE_C
}
