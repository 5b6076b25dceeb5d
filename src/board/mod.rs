//! Board building: grid shape, geometry, deck and tiles.
//!
//! Runs once per session. The resulting [`Board`] hands its tiles to the
//! state machine and keeps the geometry and sprite scales for the
//! controller.

mod builder;
mod deck;
mod layout;
mod tile;

pub use builder::{Board, BoardBuilder};
pub use deck::Deck;
pub use layout::{Cell, GridGeometry, GridShape, Point, Viewport, MIN_TILE_SIZE};
pub use tile::{Face, Tile};
