//! Game controller.
//!
//! [`Game`] is the piece the host talks to. It owns the configuration,
//! the RNG, the current board and session, and the engine handle. Host
//! callbacks map one-to-one onto its methods:
//!
//! | Host event                         | Call                 |
//! |------------------------------------|----------------------|
//! | pointer released over a tile       | [`Game::tap`]        |
//! | countdown timer fired              | [`Game::on_timer`]   |
//! | tween or delay completed           | [`Game::on_cue`]     |
//! | end-screen restart control pressed | [`Game::restart`]    |
//!
//! Every call becomes an [`Event`] run through [`transition`]; the
//! resulting effects are then carried out against the engine.
//!
//! ## Example
//!
//! ```
//! use concentric_pairs::assets::{StaticCatalog, TextureSize};
//! use concentric_pairs::board::Viewport;
//! use concentric_pairs::core::{GameConfig, TileId};
//! use concentric_pairs::engine::VirtualEngine;
//! use concentric_pairs::game::Game;
//!
//! let assets = StaticCatalog::uniform(10, TextureSize::new(256, 256));
//! let mut game = Game::new(
//!     GameConfig::default(),
//!     Viewport::new(1280.0, 720.0),
//!     assets,
//!     VirtualEngine::new(),
//! )
//! .unwrap();
//!
//! game.tap(TileId::new(0));
//! game.flush();
//! assert_eq!(game.session().selected(), Some(TileId::new(0)));
//! ```

mod replay;

pub use replay::{ReplayError, ReplayLog};

use crate::assets::AssetCatalog;
use crate::board::{Board, BoardBuilder, Face, Viewport};
use crate::core::{ConfigError, GameConfig, GameRng, TileId};
use crate::engine::{Engine, Fired, TimerHandle, Tween, VirtualEngine};
use crate::machine::{transition, Cue, Effect, Event, Session, Transition};
use crate::present::{EndScreen, TimerLabel};

/// Deal a board and a fresh session from a session seed.
pub(crate) fn deal<A>(
    config: &GameConfig,
    viewport: Viewport,
    session_seed: u64,
    generation: u32,
    assets: &A,
) -> (Board, Session)
where
    A: AssetCatalog + ?Sized,
{
    let mut rng = GameRng::new(session_seed);
    let board = BoardBuilder::new(config).build(viewport, &mut rng, assets);
    let session = Session::new(board.tiles.iter().cloned(), config, generation);
    (board, session)
}

/// A running game bound to a host engine.
pub struct Game<E, A> {
    config: GameConfig,
    viewport: Viewport,
    assets: A,
    engine: E,
    rng: GameRng,
    board: Board,
    session: Session,
    timer: Option<TimerHandle>,
    replay: ReplayLog,
}

impl<E: Engine, A: AssetCatalog> Game<E, A> {
    /// Validate `config`, deal the first board and start the countdown.
    pub fn new(config: GameConfig, viewport: Viewport, assets: A, engine: E) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut rng = config.seed.map_or_else(GameRng::from_entropy, GameRng::new);
        let session_seed = rng.fork().seed();
        let (board, session) = deal(&config, viewport, session_seed, 0, &assets);
        let replay = ReplayLog::new(config.clone(), viewport, session_seed, 0);

        let mut game = Self {
            config,
            viewport,
            assets,
            engine,
            rng,
            board,
            session,
            timer: None,
            replay,
        };
        game.begin();
        Ok(game)
    }

    // === Host callbacks ===

    /// A tile was tapped.
    pub fn tap(&mut self, tile: TileId) {
        self.dispatch(Event::Tap(tile));
    }

    /// One countdown interval elapsed.
    pub fn tick(&mut self) {
        self.dispatch(Event::Tick);
    }

    /// A repeating timer fired. Fires from timers other than the current
    /// countdown are ignored.
    pub fn on_timer(&mut self, handle: TimerHandle) {
        if self.timer == Some(handle) {
            self.tick();
        } else {
            log::debug!("ignoring fire from stale timer {:?}", handle);
        }
    }

    /// An animation or delay completed.
    pub fn on_cue(&mut self, cue: Cue) {
        self.dispatch(Event::Cue(cue));
    }

    /// Tear down the current session and start a new one with a fresh
    /// shuffle.
    pub fn restart(&mut self) {
        self.stop_timer();
        self.engine.clear();

        let generation = self.session.generation().wrapping_add(1);
        let session_seed = self.rng.fork().seed();
        let (board, session) = deal(&self.config, self.viewport, session_seed, generation, &self.assets);
        self.board = board;
        self.session = session;
        self.replay = ReplayLog::new(self.config.clone(), self.viewport, session_seed, generation);

        self.begin();
    }

    // === Accessors ===

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    #[must_use]
    pub fn assets(&self) -> &A {
        &self.assets
    }

    /// The running countdown timer.
    #[must_use]
    pub fn timer(&self) -> Option<TimerHandle> {
        self.timer
    }

    /// Event log of the current session.
    #[must_use]
    pub fn replay(&self) -> &ReplayLog {
        &self.replay
    }

    // === Internals ===

    fn begin(&mut self) {
        for tile in &self.board.tiles {
            self.engine.spawn_tile(
                tile.id,
                self.board.center_of(tile.id),
                &Face::Back.asset_key(),
                self.board.scale_for(Face::Back),
            );
        }
        self.engine
            .show_timer(&TimerLabel::new(self.session.remaining_secs(), self.viewport));
        self.timer = Some(self.engine.start_interval(self.config.tick_interval_ms));

        log::info!(
            "session {} started: {:?} grid, {} pairs, {}s",
            self.session.generation(),
            self.board.geometry.shape,
            self.session.pair_count(),
            self.session.remaining_secs()
        );
    }

    fn dispatch(&mut self, event: Event) {
        if self.session.is_finished() && matches!(event, Event::Tap(_)) {
            log::trace!("tap after session end not recorded");
        } else {
            self.replay.record(event);
        }
        let Transition { session, effects } = transition(&self.session, event);
        self.session = session;
        for effect in effects {
            self.perform(effect);
        }
    }

    fn perform(&mut self, effect: Effect) {
        match effect {
            Effect::Animate {
                tiles,
                from,
                to,
                duration_ms,
                cue,
            } => {
                let tweens: Vec<Tween> = tiles
                    .iter()
                    .filter_map(|&id| {
                        let fitted = self.board.scale_for(self.session.tile(id)?.face());
                        Some(Tween {
                            tile: id,
                            from_x: fitted.x * from,
                            to_x: fitted.x * to,
                        })
                    })
                    .collect();
                self.engine.animate(&tweens, duration_ms, cue);
            }
            Effect::SetFace { tile, face, squash } => {
                let scale = self.board.scale_for(face).squashed(squash);
                self.engine.set_face(tile, &face.asset_key(), scale);
            }
            Effect::Schedule { delay_ms, cue } => self.engine.schedule(delay_ms, cue),
            Effect::PairMatched { pair, matched_pairs } => {
                log::debug!("pair {:?} matched, {} so far", pair, matched_pairs);
            }
            Effect::UpdateTimer { remaining_secs } => {
                self.engine.show_timer(&TimerLabel::new(remaining_secs, self.viewport));
            }
            Effect::StopTimer => self.stop_timer(),
            Effect::DisableInput => {
                for tile in &self.board.tiles {
                    self.engine.set_interactive(tile.id, false);
                }
            }
            Effect::ShowEndScreen(outcome) => {
                self.engine.show_end_screen(&EndScreen::new(outcome, self.viewport));
            }
        }
    }

    fn stop_timer(&mut self) {
        if let Some(handle) = self.timer.take() {
            self.engine.cancel_interval(handle);
        }
    }
}

impl<A: AssetCatalog> Game<VirtualEngine, A> {
    /// Advance the virtual clock by `ms`, routing everything that comes
    /// due back into the game in order.
    pub fn advance(&mut self, ms: u64) {
        let until = self.engine.now_ms() + ms;
        self.run_until(until);
    }

    /// Run until no animation or delay is pending. Countdown ticks that
    /// fall due along the way are delivered too.
    pub fn flush(&mut self) {
        while let Some(due) = self.engine.next_cue_due() {
            self.run_until(due);
        }
    }

    fn run_until(&mut self, until: u64) {
        while let Some(fired) = self.engine.pop_due(until) {
            match fired {
                Fired::Cue(cue) => self.on_cue(cue),
                Fired::Tick(handle) => self.on_timer(handle),
            }
        }
        self.engine.set_now(until);
    }
}
