//! Flip/match state machine.
//!
//! ## Overview
//!
//! - [`Session`]: tiles, selection, input gate, pair counter, countdown
//! - [`Event`]: taps, countdown ticks, animation/delay completions
//! - [`Effect`]: what the controller must do in response
//! - [`transition`]: the pure `(Session, Event) -> (Session, Effects)` step
//!
//! ## Example
//!
//! ```
//! use concentric_pairs::board::{Cell, Tile};
//! use concentric_pairs::core::{GameConfig, TileId, Token};
//! use concentric_pairs::machine::{transition, Event, Phase, Session};
//!
//! let tiles = (0..4u16).map(|i| {
//!     Tile::new(TileId::new(i), Token::new(i / 2 + 1), Cell { row: 0, col: i })
//! });
//! let session = Session::new(tiles, &GameConfig::default(), 0);
//!
//! let step = transition(&session, Event::Tap(TileId::new(0)));
//! assert!(step.session.is_input_locked());
//! assert_eq!(session.phase(), Phase::Idle);
//! ```

mod effect;
mod event;
mod phase;
mod session;
mod transition;

pub use effect::{Effect, Effects};
pub use event::{Cue, CueKind, Event};
pub use phase::{FlipStage, Outcome, Phase, Sequence};
pub use session::{Session, Timing};
pub use transition::{transition, Transition};
