//! Preview/program monitor slots.
//!
//! Frame rendering belongs to the application; this module resolves which
//! source a monitor shows and guarantees a defined "no signal" state.

use serde::Serialize;

use switchboard_ipc::{StreamerState, VideoSource};

use crate::tile::Role;

/// Inputs handed to a monitor renderer.
#[derive(Debug, Clone, Copy)]
pub struct MonitorProps<'a> {
    /// Source to show, or None for no signal.
    pub source: Option<&'a VideoSource>,

    /// Bus this monitor is attached to.
    pub role: Role,

    /// Console context for overlays, if the renderer wants it.
    pub console: Option<&'a StreamerState>,

    /// Every known source, for multiview renderers.
    pub all_sources: &'a [VideoSource],
}

/// What a monitor slot displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum MonitorView {
    /// Nothing routed, or the routed source no longer exists.
    NoSignal { role: Role },

    /// A live source.
    Live {
        role: Role,
        source_id: String,
        name: String,
    },
}

impl MonitorView {
    /// Returns the bus this view belongs to.
    pub fn role(&self) -> Role {
        match self {
            Self::NoSignal { role } | Self::Live { role, .. } => *role,
        }
    }

    /// Returns true if a source is being shown.
    pub fn has_signal(&self) -> bool {
        matches!(self, Self::Live { .. })
    }

    /// Caption for the monitor header.
    pub fn caption(&self) -> String {
        match self {
            Self::NoSignal { role } => format!("{} - NO SIGNAL", role.label()),
            Self::Live { role, name, .. } => format!("{} - {}", role.label(), name),
        }
    }
}

/// Build monitor props, resolving `id` against the source collection.
pub fn monitor_props<'a>(
    id: Option<&str>,
    role: Role,
    console: Option<&'a StreamerState>,
    all_sources: &'a [VideoSource],
) -> MonitorProps<'a> {
    MonitorProps {
        source: id.and_then(|id| all_sources.iter().find(|s| s.id == id)),
        role,
        console,
        all_sources,
    }
}

/// Resolve a monitor slot. Unset or dangling ids yield [`MonitorView::NoSignal`].
pub fn resolve_monitor(props: &MonitorProps<'_>) -> MonitorView {
    match props.source {
        Some(source) => MonitorView::Live {
            role: props.role,
            source_id: source.id.clone(),
            name: source.name.clone(),
        },
        None => MonitorView::NoSignal { role: props.role },
    }
}

/// Draws frames for a monitor slot. Implemented by the application.
pub trait MonitorRenderer {
    /// Output of one render pass.
    type Output;

    /// Render the slot. Must produce a no-signal frame when `props.source` is None.
    fn render(&mut self, props: &MonitorProps<'_>) -> Self::Output;
}

/// Renderer that only resolves the slot, with no frame output.
#[derive(Debug, Default, Clone, Copy)]
pub struct SlotRenderer;

impl MonitorRenderer for SlotRenderer {
    type Output = MonitorView;

    fn render(&mut self, props: &MonitorProps<'_>) -> MonitorView {
        resolve_monitor(props)
    }
}
