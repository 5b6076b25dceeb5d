//! Core types: identifiers, configuration, RNG.
//!
//! These are shared by the board builder, the state machine and the
//! game controller.

pub mod config;
pub mod rng;
pub mod token;

pub use config::{ConfigError, GameConfig, COLLAPSED_SCALE};
pub use rng::GameRng;
pub use token::{TileId, Token, BACK_FACE_KEY};
