//! Tiles: one board slot each.

use serde::{Deserialize, Serialize};

use super::layout::Cell;
use crate::core::{TileId, Token, BACK_FACE_KEY};

/// The image shown on a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Face {
    /// Hidden side.
    Back,
    /// Revealed side showing the pair token.
    Front(Token),
}

impl Face {
    /// Asset key of the image for this face.
    #[must_use]
    pub fn asset_key(self) -> String {
        match self {
            Face::Back => BACK_FACE_KEY.to_string(),
            Face::Front(token) => token.asset_key(),
        }
    }
}

/// A board slot.
///
/// `id`, `token` and `cell` are fixed at placement. Only the state
/// machine flips `face_up` and `matched`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub id: TileId,
    pub token: Token,
    pub cell: Cell,
    pub face_up: bool,
    pub matched: bool,
}

impl Tile {
    /// Create a face-down, unmatched tile.
    #[must_use]
    pub fn new(id: TileId, token: Token, cell: Cell) -> Self {
        Self {
            id,
            token,
            cell,
            face_up: false,
            matched: false,
        }
    }

    /// The face currently showing.
    #[must_use]
    pub fn face(&self) -> Face {
        if self.face_up {
            Face::Front(self.token)
        } else {
            Face::Back
        }
    }

    /// Whether a tap may start revealing this tile.
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        !self.face_up && !self.matched
    }
}
