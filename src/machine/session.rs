//! Session state.
//!
//! One `Session` holds everything that changes during play: the tiles, the
//! selection, the input gate, the pair counter and the countdown. It is
//! rebuilt from scratch on every restart.
//!
//! Tiles live in an `im::Vector` so that the pure transition function can
//! clone the whole session in O(1).

use im::Vector;
use serde::{Deserialize, Serialize};

use super::phase::{Outcome, Phase};
use crate::board::Tile;
use crate::core::{GameConfig, TileId};

/// Animation timings captured from the configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timing {
    pub flip_half_ms: u32,
    pub settle_delay_ms: u32,
}

impl From<&GameConfig> for Timing {
    fn from(config: &GameConfig) -> Self {
        Self {
            flip_half_ms: config.flip_half_ms,
            settle_delay_ms: config.settle_delay_ms,
        }
    }
}

/// Mutable state of one play session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub(super) tiles: Vector<Tile>,
    pub(super) pair_count: usize,
    pub(super) time_limit_secs: u32,
    pub(super) timing: Timing,
    pub(super) generation: u32,

    pub(super) phase: Phase,
    pub(super) selected: Option<TileId>,
    pub(super) input_locked: bool,
    pub(super) matched_pairs: usize,
    pub(super) remaining_secs: u32,

    /// Flip or settle still playing out visually after a timeout.
    pub(super) trailing: Option<Phase>,
}

impl Session {
    /// Start a session over freshly dealt tiles.
    ///
    /// `tiles` must hold a non-zero, even number of tiles, each token
    /// exactly twice, as dealt by the board builder. An empty board would
    /// count as won on the first tick.
    #[must_use]
    pub fn new(tiles: impl IntoIterator<Item = Tile>, config: &GameConfig, generation: u32) -> Self {
        let tiles: Vector<Tile> = tiles.into_iter().collect();
        debug_assert!(
            !tiles.is_empty() && tiles.len() % 2 == 0,
            "a session needs a non-zero, even tile count, got {}",
            tiles.len()
        );
        let pair_count = tiles.len() / 2;
        Self {
            tiles,
            pair_count,
            time_limit_secs: config.time_limit_secs,
            timing: Timing::from(config),
            generation,
            phase: Phase::Idle,
            selected: None,
            input_locked: false,
            matched_pairs: 0,
            remaining_secs: config.time_limit_secs,
            trailing: None,
        }
    }

    // === Tiles ===

    /// All tiles in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    /// Number of tiles.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Look up a tile.
    #[must_use]
    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(id.index())
    }

    // === Progress ===

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The tile waiting for a partner, if any.
    #[must_use]
    pub fn selected(&self) -> Option<TileId> {
        self.selected
    }

    #[must_use]
    pub fn is_input_locked(&self) -> bool {
        self.input_locked
    }

    #[must_use]
    pub fn matched_pairs(&self) -> usize {
        self.matched_pairs
    }

    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.pair_count
    }

    #[must_use]
    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    #[must_use]
    pub fn time_limit_secs(&self) -> u32 {
        self.time_limit_secs
    }

    /// Restart counter this session was created under.
    #[must_use]
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Outcome once the session is over.
    #[must_use]
    pub fn outcome(&self) -> Option<Outcome> {
        self.phase.outcome()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.outcome().is_some()
    }

    /// Whether a tap on a hidden tile would be accepted right now.
    #[must_use]
    pub fn accepts_taps(&self) -> bool {
        self.phase.is_open() && !self.input_locked && self.remaining_secs > 0
    }

    /// Terminal outcome implied by the counters, win first.
    ///
    /// A session whose last pair is matched is won even if the countdown
    /// also reads zero.
    #[must_use]
    pub fn terminal_outcome(&self) -> Option<Outcome> {
        if self.matched_pairs == self.pair_count {
            Some(Outcome::Won)
        } else if self.remaining_secs == 0 {
            Some(Outcome::TimedOut)
        } else {
            None
        }
    }
}
