//! Countdown label.

use serde::{Deserialize, Serialize};

use crate::board::{Point, Viewport};

/// Smallest timer font, in pixels.
const MIN_FONT_PX: u32 = 16;

/// "Time: N" label in the top-left margin.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimerLabel {
    pub remaining_secs: u32,
    pub text: String,
    pub anchor: Point,
    pub font_px: u32,
}

impl TimerLabel {
    /// Label for `remaining_secs` in `viewport`.
    #[must_use]
    pub fn new(remaining_secs: u32, viewport: Viewport) -> Self {
        Self {
            remaining_secs,
            text: format!("Time: {}", remaining_secs),
            anchor: Point::new(viewport.width * 0.05, viewport.height * 0.05),
            font_px: ((viewport.width * 0.035).round() as u32).max(MIN_FONT_PX),
        }
    }
}
