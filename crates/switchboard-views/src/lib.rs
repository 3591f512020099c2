//! View models and gesture routing for the switchboard console.
//!
//! Every view here is a pure function from a read-only slice of console
//! state to a renderable view model. Views never mutate state; they report
//! user gestures to caller-supplied handlers.

mod alerts;
mod bars;
mod gesture;
mod grid;
mod mixer;
mod monitor;
mod tile;
mod urgency;

pub use alerts::{render_feed, AlertRow, DEFAULT_FEED_LEN};
pub use bars::{
    render_safe_mode, render_scene_bar, render_transition_bar, SafeModeToggle, SceneButton,
    TransitionButton,
};
pub use gesture::{bubble, PointerEvent};
pub use grid::{
    dispatch_grid, render_grid, tile_role, GridHandler, GridTile, GridUi, SourceGridProps,
};
pub use mixer::{render_mixer, ChannelEdit, MixerStripView};
pub use monitor::{
    monitor_props, resolve_monitor, MonitorProps, MonitorRenderer, MonitorView, SlotRenderer,
};
pub use tile::{
    describe, dispatch_tile, render_tile, BatteryIndicator, Role, SignalIndicator,
    SourceTileProps, SourceTileView, TemperatureIndicator, TileHandler, TileTarget,
    TypeDescriptor,
};
pub use urgency::{
    is_overheating, urgency_band, UrgencyBand, BATTERY_CRITICAL_BELOW, BATTERY_WARNING_BELOW,
    TEMPERATURE_ALERT_ABOVE_C,
};
