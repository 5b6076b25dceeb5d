//! Presentation models: timer label and end screen.
//!
//! These are plain data computed from the viewport. Renderers draw them
//! however they like.

mod end_screen;
mod hud;

pub use end_screen::{EndScreen, Rect, RESTART_LABEL};
pub use hud::TimerLabel;
