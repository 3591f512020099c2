//! Scene selector, transition bar and safe-mode panel.

use serde::Serialize;

use switchboard_ipc::{SafeMode, SafeModeKey, Scene, TransitionKind};

/// One scene button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SceneButton {
    /// Scene selected by the button.
    pub scene: Scene,

    /// Button caption.
    pub label: &'static str,

    /// Whether this is the active scene.
    pub is_active: bool,
}

/// Render one button per scene; exactly one is active.
pub fn render_scene_bar(active: Scene) -> Vec<SceneButton> {
    Scene::ALL
        .iter()
        .map(|&scene| SceneButton {
            scene,
            label: scene.name(),
            is_active: scene == active,
        })
        .collect()
}

/// One transition-bar button. Buttons carry no behaviour of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TransitionButton {
    /// Style, or None for the auto-transition button.
    pub kind: Option<TransitionKind>,

    /// Button caption.
    pub label: &'static str,
}

/// Render the transition bar: one button per style, then AUTO TRANSITION.
pub fn render_transition_bar() -> Vec<TransitionButton> {
    TransitionKind::ALL
        .iter()
        .map(|&kind| TransitionButton {
            kind: Some(kind),
            label: kind.label(),
        })
        .chain(std::iter::once(TransitionButton {
            kind: None,
            label: "AUTO TRANSITION",
        }))
        .collect()
}

/// One safe-mode switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SafeModeToggle {
    /// Flag the switch flips.
    pub key: SafeModeKey,

    /// Switch caption.
    pub label: &'static str,

    /// Current flag value.
    pub enabled: bool,
}

/// Render the safe-mode panel.
pub fn render_safe_mode(safe_mode: &SafeMode) -> Vec<SafeModeToggle> {
    SafeModeKey::ALL
        .iter()
        .map(|&key| SafeModeToggle {
            key,
            label: key.name(),
            enabled: safe_mode.get(key),
        })
        .collect()
}
