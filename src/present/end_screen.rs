//! End-of-game modal.

use serde::{Deserialize, Serialize};

use crate::board::{Point, Viewport};
use crate::machine::Outcome;

/// Text of the restart control.
pub const RESTART_LABEL: &str = "Restart";

/// Axis-aligned rectangle given by its center.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub center: Point,
    pub width: f32,
    pub height: f32,
}

/// Modal shown once a session is over.
///
/// The panel covers 60 % × 30 % of the viewport and sits in its center.
/// The title goes a quarter of the panel above center, the restart
/// control a sixth below. Activating the control should call
/// `Game::restart`.
#[derive(Clone, Debug, PartialEq)]
pub struct EndScreen {
    pub outcome: Outcome,
    pub panel: Rect,
    pub title: &'static str,
    pub title_at: Point,
    pub title_font_px: u32,
    pub restart_label: &'static str,
    pub restart_at: Point,
    pub restart_font_px: u32,
}

impl EndScreen {
    /// Lay out the end screen for `outcome`.
    #[must_use]
    pub fn new(outcome: Outcome, viewport: Viewport) -> Self {
        let center = viewport.center();
        let panel = Rect {
            center,
            width: viewport.width * 0.6,
            height: viewport.height * 0.3,
        };
        Self {
            outcome,
            panel,
            title: outcome.message(),
            title_at: Point::new(center.x, center.y - panel.height / 4.0),
            title_font_px: (viewport.width * 0.035).round() as u32,
            restart_label: RESTART_LABEL,
            restart_at: Point::new(center.x, center.y + panel.height / 6.0),
            restart_font_px: (viewport.width * 0.025).round() as u32,
        }
    }
}
