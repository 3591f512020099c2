//! The control console: sole owner of the session state.
//!
//! Views emit intents; the console reduces each one to a complete next
//! state, swaps it in, and hands the previous and next values to the
//! owning application's update callback.

use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use switchboard_ipc::{
    AlertType, AudioChannel, ConsoleCommand, ConsoleState, EngagementAlert, SafeModeKey, Scene,
    TransitionKind,
};
use switchboard_views::{
    dispatch_grid, monitor_props, render_feed, render_grid, render_mixer, render_safe_mode,
    render_scene_bar, render_transition_bar, AlertRow, ChannelEdit, GridHandler, GridTile, GridUi,
    MixerStripView, MonitorRenderer, MonitorView, Role, SafeModeToggle, SceneButton,
    SlotRenderer, SourceGridProps, TileTarget, TransitionButton,
};

use crate::config::ConsoleConfig;
use crate::error::ConsoleError;
use crate::ConsoleResult;

/// Receives `(previous, next)` after every state replacement.
pub type UpdateCallback = Box<dyn FnMut(&ConsoleState, &ConsoleState) + Send>;

/// What a handled command produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// State was replaced and the update callback fired.
    Updated,

    /// A source asked for its settings surface.
    SettingsRequested(String),

    /// A transition button was pressed.
    TransitionRequested(Option<TransitionKind>),

    /// Nothing to do.
    Unchanged,
}

/// Side panel tabs. Local to the console, never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum SidePanelTab {
    /// Live chat.
    #[default]
    Chat,

    /// Recent alerts feed.
    Alerts,
}

/// Side panel contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SidePanelView {
    /// Chat is drawn by the chat collaborator.
    Chat {
        /// Whether safe mode hides the on-stream chat overlay.
        overlay_hidden: bool,
    },

    /// Recent alerts, most recent first.
    Alerts(Vec<AlertRow>),
}

/// Everything the console draws in one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsoleView {
    /// Scene bar.
    pub scenes: Vec<SceneButton>,

    /// Preview monitor.
    pub preview: MonitorView,

    /// Program monitor.
    pub program: MonitorView,

    /// Transition bar.
    pub transitions: Vec<TransitionButton>,

    /// Source grid, in source order.
    pub grid: Vec<GridTile>,

    /// Selected side panel tab.
    pub tab: SidePanelTab,

    /// Contents of the selected tab.
    pub side_panel: SidePanelView,

    /// Mixer strips, in channel order.
    pub mixer: Vec<MixerStripView>,

    /// Safe-mode switches.
    pub safe_mode: Vec<SafeModeToggle>,
}

/// Top-level console composition.
pub struct ControlConsole<U = UpdateCallback> {
    state: ConsoleState,
    config: ConsoleConfig,
    tab: SidePanelTab,
    grid_ui: GridUi,
    test_alerts: u64,
    on_update: U,
}

impl<U> ControlConsole<U>
where
    U: FnMut(&ConsoleState, &ConsoleState),
{
    /// Create a console over an initial state.
    pub fn new(state: ConsoleState, config: ConsoleConfig, on_update: U) -> Self {
        Self {
            state,
            config,
            tab: SidePanelTab::default(),
            grid_ui: GridUi::default(),
            test_alerts: 0,
            on_update,
        }
    }

    /// Current session state.
    pub fn state(&self) -> &ConsoleState {
        &self.state
    }

    /// Active configuration.
    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    /// Handle one intent.
    ///
    /// A rejected intent leaves state untouched and does not fire the
    /// update callback.
    pub fn handle(&mut self, command: ConsoleCommand) -> ConsoleResult<Outcome> {
        let command = match command {
            ConsoleCommand::TriggerTestAlert => ConsoleCommand::PushAlert(self.next_test_alert()),
            ConsoleCommand::OpenSourceSettings(id) => {
                if !self.state.has_source(&id) {
                    return Err(ConsoleError::UnknownSource(id));
                }
                debug!(source_id = %id, "Settings requested");
                return Ok(Outcome::SettingsRequested(id));
            }
            ConsoleCommand::Transition(kind) => {
                debug!(?kind, "Transition pressed; no transition engine attached");
                return Ok(Outcome::TransitionRequested(Some(kind)));
            }
            ConsoleCommand::AutoTransition => {
                debug!("Auto transition pressed; no transition engine attached");
                return Ok(Outcome::TransitionRequested(None));
            }
            ConsoleCommand::GetState | ConsoleCommand::Shutdown => return Ok(Outcome::Unchanged),
            other => other,
        };

        let next = reduce(&self.state, command, &self.config)?;
        let previous = std::mem::replace(&mut self.state, next);
        (self.on_update)(&previous, &self.state);
        Ok(Outcome::Updated)
    }

    /// Scene button clicked.
    pub fn click_scene(&mut self, scene: Scene) -> ConsoleResult<Outcome> {
        self.handle(ConsoleCommand::SelectScene(scene))
    }

    /// Safe-mode switch clicked.
    pub fn click_safe_mode(&mut self, key: SafeModeKey) -> ConsoleResult<Outcome> {
        self.handle(ConsoleCommand::ToggleSafeMode(key))
    }

    /// Transition-bar button clicked; None is AUTO TRANSITION.
    pub fn click_transition(&mut self, kind: Option<TransitionKind>) -> ConsoleResult<Outcome> {
        match kind {
            Some(kind) => self.handle(ConsoleCommand::Transition(kind)),
            None => self.handle(ConsoleCommand::AutoTransition),
        }
    }

    /// Click inside a grid tile.
    pub fn click_tile(&mut self, id: &str, target: TileTarget) -> ConsoleResult<Outcome> {
        let mut intents = Intents::default();
        if !dispatch_grid(self.grid_props(), id, target, &mut intents) {
            return Err(ConsoleError::UnknownSource(id.to_string()));
        }

        intents
            .0
            .into_iter()
            .try_fold(Outcome::Unchanged, |_, command| self.handle(command))
    }

    /// Pointer moved over a tile, or off the grid.
    pub fn hover_tile(&mut self, id: Option<&str>) {
        self.grid_ui.hover(id);
    }

    /// Keyboard focus moved to a tile, or off the grid.
    pub fn focus_tile(&mut self, id: Option<&str>) {
        self.grid_ui.focus(id);
    }

    /// Fader moved on a mixer strip.
    pub fn set_channel_level(&mut self, id: &str, level: f32) -> ConsoleResult<Outcome> {
        let record = self.channel(id)?.with_level(level);
        self.handle(ConsoleCommand::UpdateChannel(record))
    }

    /// Mute pressed on a mixer strip.
    pub fn toggle_mute(&mut self, id: &str) -> ConsoleResult<Outcome> {
        let record = self.channel(id)?.toggle_mute();
        self.handle(ConsoleCommand::UpdateChannel(record))
    }

    /// Solo pressed on a mixer strip.
    pub fn toggle_solo(&mut self, id: &str) -> ConsoleResult<Outcome> {
        let record = self.channel(id)?.toggle_solo();
        self.handle(ConsoleCommand::UpdateChannel(record))
    }

    /// Switch the side panel tab.
    pub fn select_tab(&mut self, tab: SidePanelTab) {
        self.tab = tab;
    }

    /// Current side panel tab.
    pub fn tab(&self) -> SidePanelTab {
        self.tab
    }

    /// Render the whole console.
    pub fn render(&self) -> ConsoleView {
        let state = &self.state;
        let streamer = &state.streamer;

        let side_panel = match self.tab {
            SidePanelTab::Chat => SidePanelView::Chat {
                overlay_hidden: streamer.safe_mode.hide_chat,
            },
            SidePanelTab::Alerts => {
                SidePanelView::Alerts(render_feed(&streamer.alerts, self.config.alert_feed_len))
            }
        };

        ConsoleView {
            scenes: render_scene_bar(streamer.active_scene),
            preview: self.monitor(state.preview_id.as_deref(), Role::Preview),
            program: self.monitor(state.program_id.as_deref(), Role::Program),
            transitions: render_transition_bar(),
            grid: render_grid(self.grid_props(), &self.grid_ui),
            tab: self.tab,
            side_panel,
            mixer: render_mixer(state.channels.iter().map(|c| &**c)),
            safe_mode: render_safe_mode(&streamer.safe_mode),
        }
    }

    fn monitor(&self, id: Option<&str>, role: Role) -> MonitorView {
        let props = monitor_props(id, role, Some(&self.state.streamer), &self.state.sources);
        SlotRenderer.render(&props)
    }

    fn grid_props(&self) -> SourceGridProps<'_> {
        SourceGridProps {
            sources: &self.state.sources,
            preview_id: self.state.preview_id.as_deref(),
            program_id: self.state.program_id.as_deref(),
        }
    }

    fn channel(&self, id: &str) -> ConsoleResult<&Arc<AudioChannel>> {
        self.state
            .channel(id)
            .ok_or_else(|| ConsoleError::UnknownChannel(id.to_string()))
    }

    fn next_test_alert(&mut self) -> EngagementAlert {
        let alert_type = if self.test_alerts % 2 == 0 {
            AlertType::Sub
        } else {
            AlertType::Donation
        };
        self.test_alerts += 1;

        EngagementAlert {
            id: Uuid::new_v4().to_string(),
            alert_type,
            user: self.config.test_alert_user.clone(),
        }
    }
}

/// Collects the intents a grid click produces.
#[derive(Default)]
struct Intents(Vec<ConsoleCommand>);

impl GridHandler for Intents {
    fn on_select_preview(&mut self, id: &str) {
        self.0.push(ConsoleCommand::SelectPreview(id.to_string()));
    }

    fn on_select_program(&mut self, id: &str) {
        self.0.push(ConsoleCommand::SelectProgram(id.to_string()));
    }

    fn on_settings(&mut self, id: &str) {
        self.0.push(ConsoleCommand::OpenSourceSettings(id.to_string()));
    }
}

/// Compute the state that follows `state` under a state-changing command.
///
/// Returns a new value; `state` is never modified. Commands that carry no
/// state change are returned unchanged as a clone.
pub fn reduce(
    state: &ConsoleState,
    command: ConsoleCommand,
    config: &ConsoleConfig,
) -> ConsoleResult<ConsoleState> {
    let mut next = state.clone();

    match command {
        ConsoleCommand::SelectScene(scene) => {
            if scene != state.streamer.active_scene {
                info!(from = ?state.streamer.active_scene, to = ?scene, "Scene change");
            }
            next.streamer.active_scene = scene;
        }
        ConsoleCommand::ToggleSafeMode(key) => {
            next.streamer.safe_mode = state.streamer.safe_mode.toggled(key);
            debug!(?key, enabled = next.streamer.safe_mode.get(key), "Safe mode toggled");
        }
        ConsoleCommand::UpdateChannel(record) => {
            if !(0.0..=1.0).contains(&record.level) {
                return Err(ConsoleError::LevelOutOfRange {
                    id: record.id,
                    level: record.level,
                });
            }
            let slot = next
                .channels
                .iter_mut()
                .find(|c| c.id == record.id)
                .ok_or_else(|| ConsoleError::UnknownChannel(record.id.clone()))?;
            *slot = Arc::new(record);
        }
        ConsoleCommand::SelectPreview(id) => {
            require_source(state, &id)?;
            debug!(source_id = %id, "Preview selected");
            next.preview_id = Some(id);
        }
        ConsoleCommand::SelectProgram(id) => {
            require_source(state, &id)?;
            info!(source_id = %id, "Cut to program");
            next.program_id = Some(id);
        }
        ConsoleCommand::SetGameSource(id) => {
            require_source(state, &id)?;
            next.streamer.game_source_id = Some(id);
        }
        ConsoleCommand::SetSources(sources) => {
            if let Some(dup) = first_duplicate(sources.iter().map(|s| s.id.as_str())) {
                return Err(ConsoleError::DuplicateSource(dup));
            }
            next.sources = sources;

            for slot in [
                &mut next.preview_id,
                &mut next.program_id,
                &mut next.streamer.game_source_id,
            ] {
                if let Some(id) = slot.as_deref() {
                    if !next.sources.iter().any(|s| s.id == id) {
                        debug!(source_id = %id, "Clearing reference to removed source");
                        *slot = None;
                    }
                }
            }
        }
        ConsoleCommand::PushAlert(alert) => {
            debug!(alert_id = %alert.id, alert_type = ?alert.alert_type, "Alert received");
            let alerts = &mut next.streamer.alerts;
            alerts.push(alert);
            if alerts.len() > config.alert_history_capacity {
                let excess = alerts.len() - config.alert_history_capacity;
                alerts.drain(..excess);
            }
        }
        ConsoleCommand::TriggerTestAlert
        | ConsoleCommand::OpenSourceSettings(_)
        | ConsoleCommand::Transition(_)
        | ConsoleCommand::AutoTransition
        | ConsoleCommand::GetState
        | ConsoleCommand::Shutdown => {}
    }

    Ok(next)
}

/// First id that appears more than once.
pub(crate) fn first_duplicate<'a>(ids: impl IntoIterator<Item = &'a str>) -> Option<String> {
    let mut seen = HashSet::new();
    ids.into_iter()
        .find(|id| !seen.insert(*id))
        .map(str::to_string)
}

fn require_source(state: &ConsoleState, id: &str) -> ConsoleResult<()> {
    if state.has_source(id) {
        Ok(())
    } else {
        Err(ConsoleError::UnknownSource(id.to_string()))
    }
}
