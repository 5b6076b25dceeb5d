//! The flip/match dispatcher.
//!
//! [`transition`] is a pure function from `(Session, Event)` to the next
//! session plus the effects the controller must perform. Every animation
//! step is its own phase, and the engine reports the end of each step
//! with a [`Cue`], so there is no callback nesting.
//!
//! ## Input gate
//!
//! Taps are accepted only in `Idle`/`AwaitingPartner` with input unlocked
//! and time remaining. Every accepted tap locks input until the whole
//! reveal (and, for a second tile, the comparison and any conceal) has
//! played out, so at most one flip/compare cycle is ever in flight.
//!
//! ## Timeout
//!
//! A tick that empties the countdown finishes the session immediately. A
//! flip or settle that was in flight keeps receiving its completion cues,
//! which only update the visuals: a pending comparison still runs, and a
//! mismatched pair is flipped back, but nothing is counted.

use smallvec::smallvec;

use super::effect::{Effect, Effects};
use super::event::{Cue, CueKind, Event};
use super::phase::{FlipStage, Outcome, Phase, Sequence};
use super::session::Session;
use crate::board::Face;
use crate::core::{TileId, COLLAPSED_SCALE};

/// Result of applying one event.
#[derive(Clone, Debug)]
pub struct Transition {
    pub session: Session,
    pub effects: Effects,
}

/// Apply `event` to a copy of `session`.
#[must_use]
pub fn transition(session: &Session, event: Event) -> Transition {
    let mut next = session.clone();
    let effects = next.apply(event);
    Transition {
        session: next,
        effects,
    }
}

impl Session {
    /// Apply `event` in place and return the requested effects.
    pub fn apply(&mut self, event: Event) -> Effects {
        match event {
            Event::Tap(tile) => self.on_tap(tile),
            Event::Tick => self.on_tick(),
            Event::Cue(cue) => self.on_cue(cue),
        }
    }

    fn on_tap(&mut self, id: TileId) -> Effects {
        if !self.accepts_taps() {
            log::trace!("tap on {} ignored in {:?}", id, self.phase);
            return Effects::new();
        }
        match self.tiles.get(id.index()) {
            Some(tile) if tile.is_hidden() => {}
            _ => {
                log::trace!("tap on {} ignored: not a hidden tile", id);
                return Effects::new();
            }
        }

        self.input_locked = true;
        self.phase = Phase::Animating(Sequence::Reveal {
            tile: id,
            stage: FlipStage::Collapse,
        });
        smallvec![self.animate(&[id], 1.0, COLLAPSED_SCALE, CueKind::RevealCollapsed)]
    }

    fn on_tick(&mut self) -> Effects {
        if self.is_finished() {
            log::debug!("tick after session end ignored");
            return Effects::new();
        }

        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        let mut effects: Effects = smallvec![Effect::UpdateTimer {
            remaining_secs: self.remaining_secs,
        }];

        if let Some(outcome) = self.terminal_outcome() {
            if matches!(self.phase, Phase::Animating(_) | Phase::Resolving { .. }) {
                self.trailing = Some(self.phase);
            }
            effects.extend(self.finish(outcome));
        }
        effects
    }

    fn on_cue(&mut self, cue: Cue) -> Effects {
        if cue.generation != self.generation {
            log::debug!(
                "dropping {:?} from generation {} (current {})",
                cue.kind,
                cue.generation,
                self.generation
            );
            return Effects::new();
        }

        match (self.phase, cue.kind) {
            (
                Phase::Animating(Sequence::Reveal { tile, stage: FlipStage::Collapse }),
                CueKind::RevealCollapsed,
            ) => {
                self.phase = Phase::Animating(Sequence::Reveal {
                    tile,
                    stage: FlipStage::Expand,
                });
                self.show_front(tile)
            }
            (
                Phase::Animating(Sequence::Reveal { tile, stage: FlipStage::Expand }),
                CueKind::RevealExpanded,
            ) => self.revealed(tile),
            (Phase::Resolving { first, second }, CueKind::Settled) => self.resolve(first, second),
            (
                Phase::Animating(Sequence::Conceal { pair, stage: FlipStage::Collapse }),
                CueKind::ConcealCollapsed,
            ) => {
                self.phase = Phase::Animating(Sequence::Conceal {
                    pair,
                    stage: FlipStage::Expand,
                });
                self.show_backs(pair)
            }
            (
                Phase::Animating(Sequence::Conceal { stage: FlipStage::Expand, .. }),
                CueKind::ConcealExpanded,
            ) => {
                self.selected = None;
                self.input_locked = false;
                self.phase = Phase::Idle;
                Effects::new()
            }
            (Phase::Finished(_), kind) => self.finish_trailing(kind),
            (phase, kind) => {
                log::debug!("unexpected {:?} in {:?}", kind, phase);
                Effects::new()
            }
        }
    }

    /// Second half of a reveal has finished.
    fn revealed(&mut self, tile: TileId) -> Effects {
        match self.selected {
            None => {
                self.selected = Some(tile);
                self.input_locked = false;
                self.phase = Phase::AwaitingPartner;
                Effects::new()
            }
            Some(first) => {
                self.phase = Phase::Resolving {
                    first,
                    second: tile,
                };
                smallvec![Effect::Schedule {
                    delay_ms: self.timing.settle_delay_ms,
                    cue: self.cue(CueKind::Settled),
                }]
            }
        }
    }

    /// Settle delay is over: compare the two revealed tokens.
    fn resolve(&mut self, first: TileId, second: TileId) -> Effects {
        let token_of = |id: TileId| self.tiles.get(id.index()).map(|tile| tile.token);
        if token_of(first) != token_of(second) {
            log::debug!("{} and {} differ", first, second);
            self.phase = Phase::Animating(Sequence::Conceal {
                pair: [first, second],
                stage: FlipStage::Collapse,
            });
            return smallvec![self.animate(
                &[first, second],
                1.0,
                COLLAPSED_SCALE,
                CueKind::ConcealCollapsed
            )];
        }

        for id in [first, second] {
            if let Some(tile) = self.tiles.get_mut(id.index()) {
                tile.matched = true;
            }
        }
        self.matched_pairs += 1;
        self.selected = None;
        log::debug!("matched {} and {} ({}/{})", first, second, self.matched_pairs, self.pair_count);

        let mut effects: Effects = smallvec![Effect::PairMatched {
            pair: [first, second],
            matched_pairs: self.matched_pairs,
        }];
        match self.terminal_outcome() {
            Some(outcome) => effects.extend(self.finish(outcome)),
            None => {
                self.input_locked = false;
                self.phase = Phase::Idle;
            }
        }
        effects
    }

    /// Visual-only continuation of a flip or settle cut short by the end
    /// of the session. Tiles are turned but never matched or counted.
    fn finish_trailing(&mut self, kind: CueKind) -> Effects {
        let Some(phase) = self.trailing else {
            log::debug!("{:?} after session end ignored", kind);
            return Effects::new();
        };

        match (phase, kind) {
            (
                Phase::Animating(Sequence::Reveal { tile, stage: FlipStage::Collapse }),
                CueKind::RevealCollapsed,
            ) => {
                self.trailing = Some(Phase::Animating(Sequence::Reveal {
                    tile,
                    stage: FlipStage::Expand,
                }));
                self.show_front(tile)
            }
            (
                Phase::Animating(Sequence::Reveal { tile, stage: FlipStage::Expand }),
                CueKind::RevealExpanded,
            ) => match self.selected {
                Some(first) if first != tile => {
                    self.trailing = Some(Phase::Resolving { first, second: tile });
                    smallvec![Effect::Schedule {
                        delay_ms: self.timing.settle_delay_ms,
                        cue: self.cue(CueKind::Settled),
                    }]
                }
                _ => {
                    self.trailing = None;
                    Effects::new()
                }
            },
            (Phase::Resolving { first, second }, CueKind::Settled) => {
                self.selected = None;
                let token_of = |id: TileId| self.tiles.get(id.index()).map(|tile| tile.token);
                if token_of(first) == token_of(second) {
                    self.trailing = None;
                    return Effects::new();
                }
                self.trailing = Some(Phase::Animating(Sequence::Conceal {
                    pair: [first, second],
                    stage: FlipStage::Collapse,
                }));
                smallvec![self.animate(&[first, second], 1.0, COLLAPSED_SCALE, CueKind::ConcealCollapsed)]
            }
            (
                Phase::Animating(Sequence::Conceal { pair, stage: FlipStage::Collapse }),
                CueKind::ConcealCollapsed,
            ) => {
                self.trailing = Some(Phase::Animating(Sequence::Conceal {
                    pair,
                    stage: FlipStage::Expand,
                }));
                self.show_backs(pair)
            }
            (
                Phase::Animating(Sequence::Conceal { stage: FlipStage::Expand, .. }),
                CueKind::ConcealExpanded,
            ) => {
                self.trailing = None;
                Effects::new()
            }
            (phase, kind) => {
                log::debug!("{:?} after session end ignored while trailing {:?}", kind, phase);
                Effects::new()
            }
        }
    }

    fn show_front(&mut self, id: TileId) -> Effects {
        let Some(tile) = self.tiles.get_mut(id.index()) else {
            return Effects::new();
        };
        tile.face_up = true;
        let face = Face::Front(tile.token);
        smallvec![
            Effect::SetFace {
                tile: id,
                face,
                squash: COLLAPSED_SCALE,
            },
            self.animate(&[id], COLLAPSED_SCALE, 1.0, CueKind::RevealExpanded),
        ]
    }

    fn show_backs(&mut self, pair: [TileId; 2]) -> Effects {
        let mut effects = Effects::new();
        for id in pair {
            if let Some(tile) = self.tiles.get_mut(id.index()) {
                tile.face_up = false;
            }
            effects.push(Effect::SetFace {
                tile: id,
                face: Face::Back,
                squash: COLLAPSED_SCALE,
            });
        }
        effects.push(self.animate(&pair, COLLAPSED_SCALE, 1.0, CueKind::ConcealExpanded));
        effects
    }

    fn finish(&mut self, outcome: Outcome) -> Effects {
        log::info!(
            "session {} over: {:?} with {}/{} pairs and {}s left",
            self.generation,
            outcome,
            self.matched_pairs,
            self.pair_count,
            self.remaining_secs
        );
        self.phase = Phase::Finished(outcome);
        self.input_locked = true;
        smallvec![Effect::StopTimer, Effect::DisableInput, Effect::ShowEndScreen(outcome)]
    }

    fn animate(&self, tiles: &[TileId], from: f32, to: f32, kind: CueKind) -> Effect {
        Effect::Animate {
            tiles: tiles.iter().copied().collect(),
            from,
            to,
            duration_ms: self.timing.flip_half_ms,
            cue: self.cue(kind),
        }
    }

    fn cue(&self, kind: CueKind) -> Cue {
        Cue::new(self.generation, kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Cell, Tile};
    use crate::core::{GameConfig, Token};

    /// Tokens 1,2,1,2: tiles 0/2 and 1/3 pair up.
    fn session() -> Session {
        let tiles = [1, 2, 1, 2].iter().enumerate().map(|(i, &t)| {
            Tile::new(TileId::new(i as u16), Token::new(t), Cell { row: 0, col: i as u16 })
        });
        Session::new(tiles, &GameConfig::default().with_time_limit(10), 0)
    }

    fn cue(kind: CueKind) -> Event {
        Event::Cue(Cue::new(0, kind))
    }

    fn reveal(session: &mut Session, id: u16) {
        session.apply(Event::Tap(TileId::new(id)));
        session.apply(cue(CueKind::RevealCollapsed));
        session.apply(cue(CueKind::RevealExpanded));
    }

    #[test]
    fn test_tap_starts_collapse() {
        let mut session = session();
        let effects = session.apply(Event::Tap(TileId::new(0)));

        assert!(session.is_input_locked());
        assert_eq!(
            session.phase(),
            Phase::Animating(Sequence::Reveal {
                tile: TileId::new(0),
                stage: FlipStage::Collapse
            })
        );
        assert_eq!(effects.len(), 1);
        match &effects[0] {
            Effect::Animate { tiles, from, to, duration_ms, cue } => {
                assert_eq!(tiles.as_slice(), &[TileId::new(0)]);
                assert_eq!(*from, 1.0);
                assert_eq!(*to, COLLAPSED_SCALE);
                assert_eq!(*duration_ms, 150);
                assert_eq!(cue.kind, CueKind::RevealCollapsed);
            }
            other => panic!("expected Animate, got {:?}", other),
        }
    }

    #[test]
    fn test_collapse_swaps_face() {
        let mut session = session();
        session.apply(Event::Tap(TileId::new(1)));
        let effects = session.apply(cue(CueKind::RevealCollapsed));

        assert!(session.tile(TileId::new(1)).unwrap().face_up);
        assert_eq!(
            effects[0],
            Effect::SetFace {
                tile: TileId::new(1),
                face: Face::Front(Token::new(2)),
                squash: COLLAPSED_SCALE
            }
        );
        assert!(matches!(
            effects[1],
            Effect::Animate { cue: Cue { kind: CueKind::RevealExpanded, .. }, .. }
        ));
    }

    #[test]
    fn test_first_reveal_selects() {
        let mut session = session();
        reveal(&mut session, 0);

        assert_eq!(session.phase(), Phase::AwaitingPartner);
        assert_eq!(session.selected(), Some(TileId::new(0)));
        assert!(!session.is_input_locked());
    }

    #[test]
    fn test_taps_ignored_while_animating() {
        let mut session = session();
        session.apply(Event::Tap(TileId::new(0)));

        let before = session.clone();
        assert!(session.apply(Event::Tap(TileId::new(1))).is_empty());
        assert_eq!(session, before);
    }

    #[test]
    fn test_tap_on_selected_ignored() {
        let mut session = session();
        reveal(&mut session, 0);

        assert!(session.apply(Event::Tap(TileId::new(0))).is_empty());
        assert_eq!(session.phase(), Phase::AwaitingPartner);
    }

    #[test]
    fn test_tap_out_of_range_ignored() {
        let mut session = session();
        assert!(session.apply(Event::Tap(TileId::new(99))).is_empty());
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test]
    fn test_second_reveal_schedules_settle() {
        let mut session = session();
        reveal(&mut session, 0);
        session.apply(Event::Tap(TileId::new(2)));
        session.apply(cue(CueKind::RevealCollapsed));
        let effects = session.apply(cue(CueKind::RevealExpanded));

        assert_eq!(
            session.phase(),
            Phase::Resolving {
                first: TileId::new(0),
                second: TileId::new(2)
            }
        );
        assert!(session.is_input_locked());
        assert_eq!(
            effects.as_slice(),
            &[Effect::Schedule {
                delay_ms: 150,
                cue: Cue::new(0, CueKind::Settled)
            }]
        );
    }

    #[test]
    fn test_match_marks_both() {
        let mut session = session();
        reveal(&mut session, 0);
        reveal(&mut session, 2);
        let effects = session.apply(cue(CueKind::Settled));

        assert!(session.tile(TileId::new(0)).unwrap().matched);
        assert!(session.tile(TileId::new(2)).unwrap().matched);
        assert_eq!(session.matched_pairs(), 1);
        assert_eq!(session.selected(), None);
        assert_eq!(session.phase(), Phase::Idle);
        assert!(!session.is_input_locked());
        assert_eq!(
            effects.as_slice(),
            &[Effect::PairMatched {
                pair: [TileId::new(0), TileId::new(2)],
                matched_pairs: 1
            }]
        );
    }

    #[test]
    fn test_mismatch_conceals_both() {
        let mut session = session();
        reveal(&mut session, 0);
        reveal(&mut session, 1);

        let effects = session.apply(cue(CueKind::Settled));
        assert!(matches!(
            &effects[0],
            Effect::Animate { tiles, .. } if tiles.as_slice() == [TileId::new(0), TileId::new(1)]
        ));
        assert!(session.is_input_locked());

        let effects = session.apply(cue(CueKind::ConcealCollapsed));
        assert_eq!(effects.len(), 3);
        assert!(!session.tile(TileId::new(0)).unwrap().face_up);
        assert!(!session.tile(TileId::new(1)).unwrap().face_up);

        session.apply(cue(CueKind::ConcealExpanded));
        assert_eq!(session.phase(), Phase::Idle);
        assert_eq!(session.selected(), None);
        assert_eq!(session.matched_pairs(), 0);
        assert!(!session.is_input_locked());
    }

    #[test]
    fn test_last_match_wins() {
        let mut session = session();
        for (a, b) in [(0, 2), (1, 3)] {
            reveal(&mut session, a);
            reveal(&mut session, b);
            session.apply(cue(CueKind::Settled));
        }

        assert_eq!(session.outcome(), Some(Outcome::Won));
        assert!(session.is_input_locked());
        assert!(!session.accepts_taps());
    }

    #[test]
    fn test_timeout() {
        let mut session = session();
        for _ in 0..9 {
            session.apply(Event::Tick);
        }
        assert_eq!(session.remaining_secs(), 1);
        assert!(!session.is_finished());

        let effects = session.apply(Event::Tick);
        assert_eq!(session.outcome(), Some(Outcome::TimedOut));
        assert_eq!(
            effects.as_slice(),
            &[
                Effect::UpdateTimer { remaining_secs: 0 },
                Effect::StopTimer,
                Effect::DisableInput,
                Effect::ShowEndScreen(Outcome::TimedOut)
            ]
        );

        assert!(session.apply(Event::Tap(TileId::new(0))).is_empty());
        assert!(session.apply(Event::Tick).is_empty());
        assert_eq!(session.remaining_secs(), 0);
    }

    #[test]
    fn test_timeout_lets_flip_finish() {
        let mut session = session();
        for _ in 0..9 {
            session.apply(Event::Tick);
        }
        session.apply(Event::Tap(TileId::new(3)));
        session.apply(Event::Tick);
        assert_eq!(session.outcome(), Some(Outcome::TimedOut));

        let effects = session.apply(cue(CueKind::RevealCollapsed));
        assert_eq!(effects.len(), 2);
        assert!(session.tile(TileId::new(3)).unwrap().face_up);

        assert!(session.apply(cue(CueKind::RevealExpanded)).is_empty());
        assert_eq!(session.selected(), None);
        assert_eq!(session.outcome(), Some(Outcome::TimedOut));
    }

    fn run_down(session: &mut Session) {
        for _ in 0..9 {
            session.apply(Event::Tick);
        }
    }

    #[test]
    fn test_timeout_during_settle_conceals_mismatch() {
        let mut session = session();
        run_down(&mut session);
        reveal(&mut session, 0);
        reveal(&mut session, 1);
        assert!(matches!(session.phase(), Phase::Resolving { .. }));

        session.apply(Event::Tick);
        assert_eq!(session.outcome(), Some(Outcome::TimedOut));

        let effects = session.apply(cue(CueKind::Settled));
        assert!(matches!(
            effects.as_slice(),
            [Effect::Animate { cue: Cue { kind: CueKind::ConcealCollapsed, .. }, .. }]
        ));

        let effects = session.apply(cue(CueKind::ConcealCollapsed));
        assert_eq!(effects.len(), 3);
        assert!(!session.tile(TileId::new(0)).unwrap().face_up);
        assert!(!session.tile(TileId::new(1)).unwrap().face_up);

        assert!(session.apply(cue(CueKind::ConcealExpanded)).is_empty());
        assert_eq!(session.selected(), None);
        assert_eq!(session.matched_pairs(), 0);
        assert_eq!(session.outcome(), Some(Outcome::TimedOut));
    }

    #[test]
    fn test_timeout_during_settle_leaves_match_uncounted() {
        let mut session = session();
        run_down(&mut session);
        reveal(&mut session, 0);
        reveal(&mut session, 2);
        session.apply(Event::Tick);

        assert!(session.apply(cue(CueKind::Settled)).is_empty());
        for id in [0, 2] {
            let tile = session.tile(TileId::new(id)).unwrap();
            assert!(tile.face_up);
            assert!(!tile.matched);
        }
        assert_eq!(session.matched_pairs(), 0);
        assert_eq!(session.outcome(), Some(Outcome::TimedOut));
    }

    #[test]
    fn test_timeout_during_second_reveal_still_settles() {
        let mut session = session();
        run_down(&mut session);
        reveal(&mut session, 0);
        session.apply(Event::Tap(TileId::new(1)));
        session.apply(cue(CueKind::RevealCollapsed));
        session.apply(Event::Tick);
        assert!(session.is_finished());

        let effects = session.apply(cue(CueKind::RevealExpanded));
        assert_eq!(
            effects.as_slice(),
            &[Effect::Schedule {
                delay_ms: 150,
                cue: Cue::new(0, CueKind::Settled),
            }]
        );

        session.apply(cue(CueKind::Settled));
        session.apply(cue(CueKind::ConcealCollapsed));
        session.apply(cue(CueKind::ConcealExpanded));
        assert!(session.tiles().all(|tile| !tile.face_up));
        assert_eq!(session.outcome(), Some(Outcome::TimedOut));
    }

    #[test]
    fn test_timeout_during_conceal_finishes_conceal() {
        let mut session = session();
        run_down(&mut session);
        reveal(&mut session, 0);
        reveal(&mut session, 1);
        session.apply(cue(CueKind::Settled));

        session.apply(Event::Tick);
        assert_eq!(session.outcome(), Some(Outcome::TimedOut));

        let effects = session.apply(cue(CueKind::ConcealCollapsed));
        assert_eq!(effects.len(), 3);
        assert!(session.tiles().all(|tile| !tile.face_up));

        assert!(session.apply(cue(CueKind::ConcealExpanded)).is_empty());
        assert!(session.apply(cue(CueKind::ConcealExpanded)).is_empty());
        assert_eq!(session.selected(), None);
    }

    #[test]
    fn test_stale_generation_dropped() {
        let mut session = session();
        session.apply(Event::Tap(TileId::new(0)));
        let before = session.clone();

        let effects = session.apply(Event::Cue(Cue::new(7, CueKind::RevealCollapsed)));
        assert!(effects.is_empty());
        assert_eq!(session, before);
    }

    #[test]
    fn test_transition_is_pure() {
        let session = session();
        let result = transition(&session, Event::Tap(TileId::new(0)));

        assert_eq!(session.phase(), Phase::Idle);
        assert!(result.session.is_input_locked());
        assert_eq!(result.effects.len(), 1);
    }
}
