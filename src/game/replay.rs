//! Session replay logs.
//!
//! A `ReplayLog` records everything needed to reproduce one session: the
//! configuration, viewport, the session seed the deck was shuffled with,
//! the restart generation and every event in arrival order. Replaying it
//! through the pure transition function yields the same final session.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::deal;
use crate::assets::AssetCatalog;
use crate::board::Viewport;
use crate::core::{ConfigError, GameConfig};
use crate::machine::{Event, Session};

/// Failure to encode, decode or replay a log.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("replay log encoding failed: {0}")]
    Codec(#[from] bincode::Error),
    #[error("replay log has an invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Recorded events of one session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReplayLog {
    pub config: GameConfig,
    pub viewport: Viewport,
    pub session_seed: u64,
    pub generation: u32,
    pub events: Vec<Event>,
}

impl ReplayLog {
    /// Start an empty log.
    #[must_use]
    pub fn new(config: GameConfig, viewport: Viewport, session_seed: u64, generation: u32) -> Self {
        Self {
            config,
            viewport,
            session_seed,
            generation,
            events: Vec::new(),
        }
    }

    /// Append an event.
    pub fn record(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Encode with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, ReplayError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode from bincode.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ReplayError> {
        Ok(bincode::deserialize(bytes)?)
    }

    /// Re-deal the board and re-apply every event.
    pub fn replay<A>(&self, assets: &A) -> Result<Session, ReplayError>
    where
        A: AssetCatalog + ?Sized,
    {
        self.config.validate()?;
        let (_, mut session) = deal(
            &self.config,
            self.viewport,
            self.session_seed,
            self.generation,
            assets,
        );
        for &event in &self.events {
            session.apply(event);
        }
        Ok(session)
    }
}
