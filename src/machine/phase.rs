//! Session phases.
//!
//! ```text
//! Idle ──tap──▶ Animating(Reveal) ──▶ AwaitingPartner ──tap──▶ Animating(Reveal)
//!   ▲                                                                │
//!   │                                                                ▼
//!   ├──────── match (pairs left) ◀──────── Resolving ◀──── settle delay
//!   │                                          │
//!   └── Animating(Conceal) ◀──── mismatch ─────┘
//!
//! Resolving ── last match ──▶ Finished(Won)
//! any       ── time is up ──▶ Finished(TimedOut)
//! ```

use serde::{Deserialize, Serialize};

use crate::core::TileId;

/// Which half of a flip is playing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlipStage {
    /// Horizontal scale shrinking to the collapsed width.
    Collapse,
    /// Horizontal scale growing back to the fitted width.
    Expand,
}

/// An animation sequence in flight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sequence {
    /// One tile turning face-up.
    Reveal { tile: TileId, stage: FlipStage },
    /// Both tiles of a mismatched pair turning face-down together.
    Conceal { pair: [TileId; 2], stage: FlipStage },
}

/// How a session ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Every pair matched.
    Won,
    /// The countdown reached zero first.
    TimedOut,
}

impl Outcome {
    /// End-screen title.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Outcome::Won => "You Win!",
            Outcome::TimedOut => "Time's Up!",
        }
    }

    #[must_use]
    pub const fn is_win(self) -> bool {
        matches!(self, Outcome::Won)
    }
}

/// Session phase. Input is open only in `Idle` and `AwaitingPartner`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// No selection, waiting for the first tap.
    Idle,
    /// One tile selected and face-up, waiting for its partner.
    AwaitingPartner,
    /// A reveal or conceal animation is playing.
    Animating(Sequence),
    /// Both tiles revealed, settle delay running before the comparison.
    Resolving { first: TileId, second: TileId },
    /// Terminal.
    Finished(Outcome),
}

impl Phase {
    /// Whether taps may be accepted in this phase.
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Phase::Idle | Phase::AwaitingPartner)
    }

    /// The outcome if the phase is terminal.
    #[must_use]
    pub const fn outcome(self) -> Option<Outcome> {
        match self {
            Phase::Finished(outcome) => Some(outcome),
            _ => None,
        }
    }
}
