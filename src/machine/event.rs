//! Inputs to the state machine.

use serde::{Deserialize, Serialize};

use crate::core::TileId;

/// Which completion a cue reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CueKind {
    RevealCollapsed,
    RevealExpanded,
    Settled,
    ConcealCollapsed,
    ConcealExpanded,
}

/// Completion of an animation or delay, handed back by the engine.
///
/// Tagged with the session generation so completions scheduled before a
/// restart are recognized and dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cue {
    pub generation: u32,
    pub kind: CueKind,
}

impl Cue {
    /// Create a new cue.
    #[must_use]
    pub const fn new(generation: u32, kind: CueKind) -> Self {
        Self { generation, kind }
    }
}

/// Everything that can happen to a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// Pointer released over a tile.
    Tap(TileId),
    /// One countdown interval elapsed.
    Tick,
    /// An animation or delay finished.
    Cue(Cue),
}

impl From<Cue> for Event {
    fn from(cue: Cue) -> Self {
        Event::Cue(cue)
    }
}
