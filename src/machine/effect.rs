//! Side-effects requested by the state machine.
//!
//! Transitions never touch the engine. They return a list of effects and
//! the controller carries them out, so a transition can be tested without
//! a renderer.

use smallvec::SmallVec;

use super::event::Cue;
use super::phase::Outcome;
use crate::board::Face;
use crate::core::TileId;

/// Effects from one transition. Rarely more than three.
pub type Effects = SmallVec<[Effect; 4]>;

/// A single requested side-effect.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Tween the horizontal scale of `tiles` together, as a fraction of
    /// each tile's fitted scale, then report `cue`.
    Animate {
        tiles: SmallVec<[TileId; 2]>,
        from: f32,
        to: f32,
        duration_ms: u32,
        cue: Cue,
    },
    /// Swap the sprite image. `squash` is the horizontal fraction of the
    /// new face's fitted scale to apply immediately.
    SetFace { tile: TileId, face: Face, squash: f32 },
    /// Report `cue` after `delay_ms`.
    Schedule { delay_ms: u32, cue: Cue },
    /// A pair was matched.
    PairMatched { pair: [TileId; 2], matched_pairs: usize },
    /// The countdown changed.
    UpdateTimer { remaining_secs: u32 },
    /// Cancel the countdown interval without firing it.
    StopTimer,
    /// Make every tile non-interactive.
    DisableInput,
    /// Present the end screen.
    ShowEndScreen(Outcome),
}
