//! The source grid: one tile per source, with preview/program marking.

use serde::Serialize;
use tracing::{debug, warn};

use switchboard_ipc::VideoSource;

use crate::tile::{
    dispatch_tile, render_tile, Role, SourceTileProps, SourceTileView, TileHandler, TileTarget,
};

/// Inputs to the grid.
#[derive(Debug, Clone, Copy)]
pub struct SourceGridProps<'a> {
    /// Sources in display order.
    pub sources: &'a [VideoSource],

    /// Source staged on the preview bus.
    pub preview_id: Option<&'a str>,

    /// Source live on the program bus.
    pub program_id: Option<&'a str>,
}

/// Ephemeral hover/focus state. Never part of the console session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridUi {
    hovered: Option<String>,
    focused: Option<String>,
}

impl GridUi {
    /// Pointer entered a tile, or left the grid when `id` is None.
    pub fn hover(&mut self, id: Option<&str>) {
        self.hovered = id.map(str::to_owned);
    }

    /// Keyboard focus moved to a tile, or left the grid when `id` is None.
    pub fn focus(&mut self, id: Option<&str>) {
        self.focused = id.map(str::to_owned);
    }

    /// Returns true if the cut affordance is shown on this tile.
    pub fn shows_cut(&self, id: &str) -> bool {
        self.hovered.as_deref() == Some(id) || self.focused.as_deref() == Some(id)
    }
}

/// A tile as placed in the grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridTile {
    /// Rendered tile.
    pub tile: SourceTileView,

    /// Whether the cut-to-program button is shown.
    pub cut_visible: bool,
}

/// Role and active flag for a source id.
///
/// Program wins when a source is on both buses; tiles on neither bus are
/// inactive preview candidates.
pub fn tile_role(id: &str, preview_id: Option<&str>, program_id: Option<&str>) -> (Role, bool) {
    if program_id == Some(id) {
        (Role::Program, true)
    } else if preview_id == Some(id) {
        (Role::Preview, true)
    } else {
        (Role::Preview, false)
    }
}

/// Render the grid in source collection order.
pub fn render_grid(props: SourceGridProps<'_>, ui: &GridUi) -> Vec<GridTile> {
    props
        .sources
        .iter()
        .map(|source| {
            let (role, is_active) = tile_role(&source.id, props.preview_id, props.program_id);
            GridTile {
                tile: render_tile(SourceTileProps {
                    source,
                    is_active,
                    role,
                }),
                cut_visible: ui.shows_cut(&source.id),
            }
        })
        .collect()
}

/// Receives the grid's outbound intents.
pub trait GridHandler {
    /// Stage a source in preview.
    fn on_select_preview(&mut self, id: &str);

    /// Cut a source straight to program.
    fn on_select_program(&mut self, id: &str);

    /// Open the settings surface for a source.
    fn on_settings(&mut self, _id: &str) {}
}

struct BoundTile<'a, H: ?Sized> {
    id: &'a str,
    handler: &'a mut H,
}

impl<H: GridHandler + ?Sized> TileHandler for BoundTile<'_, H> {
    fn on_click(&mut self) {
        self.handler.on_select_preview(self.id);
    }

    fn on_settings(&mut self) {
        self.handler.on_settings(self.id);
    }

    fn on_cut(&mut self) {
        self.handler.on_select_program(self.id);
    }
}

/// Route a click on a tile in the grid.
///
/// Returns false, without calling the handler, if no tile has this id.
pub fn dispatch_grid<H: GridHandler + ?Sized>(
    props: SourceGridProps<'_>,
    id: &str,
    target: TileTarget,
    handler: &mut H,
) -> bool {
    let Some(source) = props.sources.iter().find(|s| s.id == id) else {
        warn!(id, "Click on unknown tile ignored");
        return false;
    };

    debug!(id, ?target, "Grid click");
    dispatch_tile(
        target,
        &mut BoundTile {
            id: &source.id,
            handler,
        },
    );
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use switchboard_ipc::SourceType;

    #[derive(Default)]
    struct Recorder {
        preview: Vec<String>,
        program: Vec<String>,
        settings: Vec<String>,
    }

    impl GridHandler for Recorder {
        fn on_select_preview(&mut self, id: &str) {
            self.preview.push(id.to_string());
        }

        fn on_select_program(&mut self, id: &str) {
            self.program.push(id.to_string());
        }

        fn on_settings(&mut self, id: &str) {
            self.settings.push(id.to_string());
        }
    }

    fn cameras() -> Vec<VideoSource> {
        vec![
            VideoSource::new("cam1", "Camera 1", SourceType::Camera),
            VideoSource::new("cam2", "Camera 2", SourceType::Camera),
        ]
    }

    fn props(sources: &[VideoSource]) -> SourceGridProps<'_> {
        SourceGridProps {
            sources,
            preview_id: Some("cam1"),
            program_id: Some("cam2"),
        }
    }

    #[test]
    fn test_preview_and_program_marking() {
        let sources = cameras();
        let tiles = render_grid(props(&sources), &GridUi::default());

        assert_eq!(tiles.len(), 2);
        assert_eq!(tiles[0].tile.id, "cam1");
        assert_eq!(tiles[0].tile.role, Role::Preview);
        assert!(tiles[0].tile.is_active);
        assert_eq!(tiles[1].tile.id, "cam2");
        assert_eq!(tiles[1].tile.role, Role::Program);
        assert!(tiles[1].tile.is_active);
    }

    #[test]
    fn test_cut_calls_only_select_program() {
        let sources = cameras();
        let mut ui = GridUi::default();
        ui.hover(Some("cam1"));
        assert!(render_grid(props(&sources), &ui)[0].cut_visible);

        let mut rec = Recorder::default();
        assert!(dispatch_grid(props(&sources), "cam1", TileTarget::Cut, &mut rec));

        assert_eq!(rec.program, vec!["cam1".to_string()]);
        assert!(rec.preview.is_empty());
        assert!(rec.settings.is_empty());
    }

    #[test]
    fn test_body_calls_only_select_preview() {
        let sources = cameras();
        let mut rec = Recorder::default();
        dispatch_grid(props(&sources), "cam2", TileTarget::Body, &mut rec);

        assert_eq!(rec.preview, vec!["cam2".to_string()]);
        assert!(rec.program.is_empty());
        assert!(rec.settings.is_empty());
    }

    #[test]
    fn test_settings_calls_only_on_settings() {
        let sources = cameras();
        let mut rec = Recorder::default();
        dispatch_grid(props(&sources), "cam1", TileTarget::Settings, &mut rec);

        assert_eq!(rec.settings, vec!["cam1".to_string()]);
        assert!(rec.preview.is_empty());
        assert!(rec.program.is_empty());
    }

    #[test]
    fn test_unknown_tile_click_is_ignored() {
        let sources = cameras();
        let mut rec = Recorder::default();
        assert!(!dispatch_grid(props(&sources), "nope", TileTarget::Cut, &mut rec));
        assert!(rec.program.is_empty());
    }

    #[test]
    fn test_empty_grid() {
        let tiles = render_grid(
            SourceGridProps {
                sources: &[],
                preview_id: Some("cam1"),
                program_id: None,
            },
            &GridUi::default(),
        );
        assert!(tiles.is_empty());
    }

    #[test]
    fn test_dangling_ids_mark_nothing() {
        let sources = cameras();
        let tiles = render_grid(
            SourceGridProps {
                sources: &sources,
                preview_id: Some("ghost"),
                program_id: Some("phantom"),
            },
            &GridUi::default(),
        );
        assert!(tiles.iter().all(|t| !t.tile.is_active));
    }

    #[test]
    fn test_at_most_one_tile_per_bus() {
        let sources = cameras();
        let ids = [None, Some("cam1"), Some("cam2"), Some("ghost")];

        for preview_id in ids {
            for program_id in ids {
                let tiles = render_grid(
                    SourceGridProps {
                        sources: &sources,
                        preview_id,
                        program_id,
                    },
                    &GridUi::default(),
                );
                let active = |role: Role| {
                    tiles
                        .iter()
                        .filter(|t| t.tile.is_active && t.tile.role == role)
                        .count()
                };
                assert!(active(Role::Program) <= 1);
                assert!(active(Role::Preview) <= 1);
                if let Some(pgm) = program_id.filter(|id| sources.iter().any(|s| s.id == *id)) {
                    assert!(tiles
                        .iter()
                        .any(|t| t.tile.id == pgm && t.tile.role == Role::Program));
                }
            }
        }
    }

    #[test]
    fn test_focus_also_shows_cut() {
        let sources = cameras();
        let mut ui = GridUi::default();
        ui.focus(Some("cam2"));
        let tiles = render_grid(props(&sources), &ui);
        assert!(!tiles[0].cut_visible);
        assert!(tiles[1].cut_visible);

        ui.focus(None);
        assert!(!ui.shows_cut("cam2"));
    }
}
