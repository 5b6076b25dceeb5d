//! Deterministic in-memory engine.
//!
//! `VirtualEngine` keeps a scene model (sprites, label, end screen) and a
//! queue of pending completions on a virtual millisecond clock. Nothing
//! fires on its own: the owner pops due items with [`VirtualEngine::pop_due`]
//! and routes them back into the game.
//!
//! ## Ordering
//!
//! Items due at the same instant fire in the order they were scheduled,
//! except that interval ticks fire after cues due at the same instant.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use super::{Renderer, Scheduler, TimerHandle, Tween};
use crate::assets::Scale;
use crate::board::Point;
use crate::core::TileId;
use crate::machine::Cue;
use crate::present::{EndScreen, TimerLabel};

/// Something that came due on the virtual clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fired {
    /// An animation or delay completed.
    Cue(Cue),
    /// A repeating timer fired.
    Tick(TimerHandle),
}

impl Fired {
    fn rank(self) -> u8 {
        match self {
            Fired::Cue(_) => 0,
            Fired::Tick(_) => 1,
        }
    }
}

/// Scene-model state of one tile sprite.
#[derive(Clone, Debug, PartialEq)]
pub struct Sprite {
    pub position: Point,
    pub face: String,
    pub scale: Scale,
    pub interactive: bool,
}

#[derive(Clone, Debug)]
struct Pending {
    due_ms: u64,
    seq: u64,
    fired: Fired,
    tweens: SmallVec<[Tween; 2]>,
}

impl Pending {
    fn key(&self) -> (u64, u8, u64) {
        (self.due_ms, self.fired.rank(), self.seq)
    }
}

/// Engine with a virtual clock and an inspectable scene.
#[derive(Clone, Debug, Default)]
pub struct VirtualEngine {
    now_ms: u64,
    next_seq: u64,
    next_handle: u32,
    pending: Vec<Pending>,
    intervals: FxHashMap<TimerHandle, u32>,
    sprites: FxHashMap<TileId, Sprite>,
    timer_label: Option<TimerLabel>,
    end_screen: Option<EndScreen>,
}

impl VirtualEngine {
    /// Create an empty engine at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Move the clock forward without firing anything.
    ///
    /// The clock never moves backwards.
    pub fn set_now(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
    }

    /// Due time of the earliest pending cue (ticks excluded).
    #[must_use]
    pub fn next_cue_due(&self) -> Option<u64> {
        self.pending
            .iter()
            .filter(|p| matches!(p.fired, Fired::Cue(_)))
            .map(|p| p.due_ms)
            .min()
    }

    /// Pop the earliest item due at or before `until_ms`.
    ///
    /// Advances the clock to the item's due time and applies the final
    /// scale of any tween that completes with it.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<Fired> {
        let index = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due_ms <= until_ms)
            .min_by_key(|(_, p)| p.key())
            .map(|(index, _)| index)?;

        let item = self.pending.swap_remove(index);
        self.set_now(item.due_ms);

        for tween in &item.tweens {
            if let Some(sprite) = self.sprites.get_mut(&tween.tile) {
                sprite.scale.x = tween.to_x;
            }
        }

        if let Fired::Tick(handle) = item.fired {
            if let Some(&period) = self.intervals.get(&handle) {
                self.push(item.due_ms + u64::from(period), item.fired, SmallVec::new());
            }
        }
        Some(item.fired)
    }

    /// Number of items waiting to fire.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Number of running repeating timers.
    #[must_use]
    pub fn active_intervals(&self) -> usize {
        self.intervals.len()
    }

    // === Scene ===

    /// Sprite of a tile, if spawned.
    #[must_use]
    pub fn sprite(&self, tile: TileId) -> Option<&Sprite> {
        self.sprites.get(&tile)
    }

    /// Number of spawned sprites.
    #[must_use]
    pub fn sprite_count(&self) -> usize {
        self.sprites.len()
    }

    /// The countdown label as last drawn.
    #[must_use]
    pub fn timer_label(&self) -> Option<&TimerLabel> {
        self.timer_label.as_ref()
    }

    /// The end screen, if shown.
    #[must_use]
    pub fn end_screen(&self) -> Option<&EndScreen> {
        self.end_screen.as_ref()
    }

    fn push(&mut self, due_ms: u64, fired: Fired, tweens: SmallVec<[Tween; 2]>) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Pending {
            due_ms,
            seq,
            fired,
            tweens,
        });
    }
}

impl Scheduler for VirtualEngine {
    fn schedule(&mut self, delay_ms: u32, cue: Cue) {
        self.push(self.now_ms + u64::from(delay_ms), Fired::Cue(cue), SmallVec::new());
    }

    fn animate(&mut self, tweens: &[Tween], duration_ms: u32, cue: Cue) {
        for tween in tweens {
            if let Some(sprite) = self.sprites.get_mut(&tween.tile) {
                sprite.scale.x = tween.from_x;
            }
        }
        self.push(
            self.now_ms + u64::from(duration_ms),
            Fired::Cue(cue),
            tweens.iter().copied().collect(),
        );
    }

    fn start_interval(&mut self, period_ms: u32) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        self.intervals.insert(handle, period_ms);
        self.push(self.now_ms + u64::from(period_ms), Fired::Tick(handle), SmallVec::new());
        handle
    }

    fn cancel_interval(&mut self, handle: TimerHandle) {
        self.intervals.remove(&handle);
        self.pending.retain(|p| p.fired != Fired::Tick(handle));
    }
}

impl Renderer for VirtualEngine {
    fn spawn_tile(&mut self, tile: TileId, at: Point, face: &str, scale: Scale) {
        self.sprites.insert(
            tile,
            Sprite {
                position: at,
                face: face.to_string(),
                scale,
                interactive: true,
            },
        );
    }

    fn set_face(&mut self, tile: TileId, face: &str, scale: Scale) {
        if let Some(sprite) = self.sprites.get_mut(&tile) {
            sprite.face = face.to_string();
            sprite.scale = scale;
        }
    }

    fn set_interactive(&mut self, tile: TileId, enabled: bool) {
        if let Some(sprite) = self.sprites.get_mut(&tile) {
            sprite.interactive = enabled;
        }
    }

    fn show_timer(&mut self, label: &TimerLabel) {
        self.timer_label = Some(label.clone());
    }

    fn show_end_screen(&mut self, screen: &EndScreen) {
        self.end_screen = Some(screen.clone());
    }

    fn clear(&mut self) {
        self.sprites.clear();
        self.timer_label = None;
        self.end_screen = None;
        self.pending.retain(|p| matches!(p.fired, Fired::Tick(_)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::CueKind;

    fn cue(kind: CueKind) -> Cue {
        Cue::new(0, kind)
    }

    #[test]
    fn test_schedule_fires_when_due() {
        let mut engine = VirtualEngine::new();
        engine.schedule(150, cue(CueKind::Settled));

        assert_eq!(engine.pop_due(149), None);
        assert_eq!(engine.pop_due(150), Some(Fired::Cue(cue(CueKind::Settled))));
        assert_eq!(engine.now_ms(), 150);
        assert_eq!(engine.pending_len(), 0);
    }

    #[test]
    fn test_same_instant_fifo() {
        let mut engine = VirtualEngine::new();
        engine.schedule(100, cue(CueKind::RevealCollapsed));
        engine.schedule(100, cue(CueKind::Settled));

        assert_eq!(engine.pop_due(100), Some(Fired::Cue(cue(CueKind::RevealCollapsed))));
        assert_eq!(engine.pop_due(100), Some(Fired::Cue(cue(CueKind::Settled))));
    }

    #[test]
    fn test_tick_after_cue_at_same_instant() {
        let mut engine = VirtualEngine::new();
        let handle = engine.start_interval(1000);
        engine.schedule(1000, cue(CueKind::Settled));

        assert_eq!(engine.pop_due(1000), Some(Fired::Cue(cue(CueKind::Settled))));
        assert_eq!(engine.pop_due(1000), Some(Fired::Tick(handle)));
    }

    #[test]
    fn test_interval_repeats() {
        let mut engine = VirtualEngine::new();
        let handle = engine.start_interval(1000);

        let mut ticks = 0;
        while let Some(fired) = engine.pop_due(3500) {
            assert_eq!(fired, Fired::Tick(handle));
            ticks += 1;
        }
        assert_eq!(ticks, 3);
        assert_eq!(engine.now_ms(), 3000);
    }

    #[test]
    fn test_cancel_interval_discards_pending() {
        let mut engine = VirtualEngine::new();
        let handle = engine.start_interval(1000);
        engine.cancel_interval(handle);

        assert_eq!(engine.active_intervals(), 0);
        assert_eq!(engine.pop_due(10_000), None);
    }

    #[test]
    fn test_tween_applies_final_scale() {
        let mut engine = VirtualEngine::new();
        let tile = TileId::new(0);
        engine.spawn_tile(tile, Point::new(10.0, 10.0), "back", Scale::new(0.5, 0.5));

        engine.animate(
            &[Tween { tile, from_x: 0.5, to_x: 0.005 }],
            150,
            cue(CueKind::RevealCollapsed),
        );
        assert_eq!(engine.sprite(tile).unwrap().scale.x, 0.5);

        engine.pop_due(150);
        assert_eq!(engine.sprite(tile).unwrap().scale.x, 0.005);
        assert_eq!(engine.sprite(tile).unwrap().scale.y, 0.5);
    }

    #[test]
    fn test_clear_keeps_timers() {
        let mut engine = VirtualEngine::new();
        engine.spawn_tile(TileId::new(0), Point::new(0.0, 0.0), "back", Scale::UNIT);
        engine.start_interval(1000);
        engine.schedule(10, cue(CueKind::Settled));

        engine.clear();
        assert_eq!(engine.sprite_count(), 0);
        assert_eq!(engine.pending_len(), 1);
        assert_eq!(engine.active_intervals(), 1);
    }
}
