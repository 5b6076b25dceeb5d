//! Capability interface to the host rendering engine.
//!
//! The game never calls a renderer or a clock directly. It talks to two
//! traits:
//!
//! - [`Scheduler`]: delays, scale tweens and the repeating countdown timer.
//!   Completions come back as [`Cue`]s that the host feeds to
//!   `Game::on_cue`; timer ticks come back through `Game::on_timer`.
//! - [`Renderer`]: tile sprites, the timer label and the end screen.
//!
//! Anything implementing both is an [`Engine`]. [`VirtualEngine`] is a
//! deterministic in-memory implementation driven by a virtual clock.

mod virtual_engine;

pub use virtual_engine::{Fired, Sprite, VirtualEngine};

use serde::{Deserialize, Serialize};

use crate::assets::Scale;
use crate::board::Point;
use crate::core::TileId;
use crate::machine::Cue;
use crate::present::{EndScreen, TimerLabel};

/// Handle of a repeating timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerHandle(pub u32);

/// Horizontal scale tween of one tile sprite.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    pub tile: TileId,
    pub from_x: f32,
    pub to_x: f32,
}

/// Time-based primitives.
pub trait Scheduler {
    /// Report `cue` once `delay_ms` has elapsed.
    fn schedule(&mut self, delay_ms: u32, cue: Cue);

    /// Tween every sprite in `tweens` over `duration_ms`, then report `cue`
    /// once for the whole group.
    fn animate(&mut self, tweens: &[Tween], duration_ms: u32, cue: Cue);

    /// Start a repeating timer firing every `period_ms`.
    fn start_interval(&mut self, period_ms: u32) -> TimerHandle;

    /// Stop a repeating timer. Pending fires are discarded.
    fn cancel_interval(&mut self, handle: TimerHandle);
}

/// Drawing primitives.
pub trait Renderer {
    /// Create an interactive sprite for a tile.
    fn spawn_tile(&mut self, tile: TileId, at: Point, face: &str, scale: Scale);

    /// Swap a tile's image and set its scale.
    fn set_face(&mut self, tile: TileId, face: &str, scale: Scale);

    /// Enable or disable pointer input on a tile.
    fn set_interactive(&mut self, tile: TileId, enabled: bool);

    /// Draw or update the countdown label.
    fn show_timer(&mut self, label: &TimerLabel);

    /// Present the end-of-game modal.
    fn show_end_screen(&mut self, screen: &EndScreen);

    /// Remove every sprite, the label and the end screen.
    fn clear(&mut self);
}

/// A full host engine.
pub trait Engine: Scheduler + Renderer {}

impl<T: Scheduler + Renderer> Engine for T {}
