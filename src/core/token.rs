//! Tile and pair identifiers.
//!
//! A `Token` names a pair: both tiles of a pair carry the same token.
//! A `TileId` names a board slot in row-major order.

use serde::{Deserialize, Serialize};

/// Asset key of the hidden card face.
pub const BACK_FACE_KEY: &str = "back";

/// Pair identity. Tokens are `1..=pair_count`.
///
/// ```
/// use concentric_pairs::core::Token;
///
/// let token = Token::new(3);
/// assert_eq!(token.asset_key(), "card3");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Token(pub u16);

impl Token {
    /// Create a new token.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the raw token value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Asset key of this token's face image (`card1`, `card2`, ...).
    #[must_use]
    pub fn asset_key(self) -> String {
        format!("card{}", self.0)
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "card{}", self.0)
    }
}

/// Board slot identifier, the row-major index of the tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileId(pub u16);

impl TileId {
    /// Create a new tile ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the index into the board's tile list.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for TileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tile({})", self.0)
    }
}
