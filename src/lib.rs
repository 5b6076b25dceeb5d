//! # concentric-pairs
//!
//! Core of a memory-matching card game, independent of any renderer.
//!
//! ## Design Principles
//!
//! 1. **Engine-Agnostic**: Rendering, tweens and timers are reached only
//!    through the `Scheduler`/`Renderer` capability traits.
//!
//! 2. **Pure Transitions**: The flip/match state machine is a pure
//!    `(Session, Event) -> (Session, Effects)` function. Animation steps
//!    are explicit phases completed by cues, not nested callbacks.
//!
//! 3. **Deterministic**: Decks are shuffled from a seeded ChaCha8 stream,
//!    so any session can be replayed from its seed and event log.
//!
//! ## Architecture
//!
//! - The board builder deals 20 tiles (4×5 below the mobile breakpoint,
//!   5×4 otherwise) and fits them, square, into the viewport.
//!
//! - A single input gate serializes play: every accepted tap locks input
//!   until its reveal, comparison and any mismatch recovery have finished.
//!
//! - Win takes precedence over timeout: a session whose last pair matches
//!   is won even if the countdown reads zero at the same instant.
//!
//! ## Modules
//!
//! - `core`: Tokens, tile IDs, configuration, RNG
//! - `assets`: Texture sizes and scale fitting
//! - `board`: Grid shape, geometry, deck, tiles
//! - `machine`: Session state and the flip/match transition function
//! - `engine`: Capability traits and a deterministic virtual engine
//! - `present`: Timer label and end-screen models
//! - `game`: Controller wiring the machine to an engine, plus replay logs

pub mod core;
pub mod assets;
pub mod board;
pub mod machine;
pub mod engine;
pub mod present;
pub mod game;

// Re-export commonly used types
pub use crate::core::{ConfigError, GameConfig, GameRng, TileId, Token};

pub use crate::assets::{AssetCatalog, Scale, StaticCatalog, TextureSize};

pub use crate::board::{Board, BoardBuilder, Deck, Face, GridGeometry, GridShape, Tile, Viewport};

pub use crate::machine::{transition, Cue, CueKind, Effect, Effects, Event, Outcome, Phase, Session};

pub use crate::engine::{Engine, Renderer, Scheduler, TimerHandle, Tween, VirtualEngine};

pub use crate::present::{EndScreen, TimerLabel};

pub use crate::game::{Game, ReplayError, ReplayLog};
