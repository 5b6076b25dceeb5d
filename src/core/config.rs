//! Game configuration.
//!
//! Everything the board builder and the state machine need to know about
//! timing and layout lives in `GameConfig`. Hosts start from
//! `GameConfig::default()` and override with the `with_*` builders.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Horizontal scale of a tile at the midpoint of a flip.
pub const COLLAPSED_SCALE: f32 = 0.01;

/// Rejected configuration values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("time limit must be at least one second")]
    ZeroTimeLimit,
    #[error("tick interval must be non-zero")]
    ZeroTickInterval,
    #[error("margin ratio {0} must lie in [0, 0.5)")]
    MarginRatio(f32),
    #[error("tile gap {0} must be finite and non-negative")]
    TileGap(f32),
    #[error("mobile breakpoint {0} must be finite and positive")]
    Breakpoint(f32),
}

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Seconds on the countdown at session start.
    pub time_limit_secs: u32,

    /// Viewports narrower than this use the portrait 4×5 grid.
    pub mobile_breakpoint: f32,

    /// Fraction of width (and of height) reserved as margin on each side.
    pub margin_ratio: f32,

    /// Gap between adjacent tiles, in pixels.
    pub tile_gap: f32,

    /// Duration of each half of a flip (collapse or expand), in ms.
    pub flip_half_ms: u32,

    /// Pause between revealing the second tile and comparing, in ms.
    pub settle_delay_ms: u32,

    /// Countdown interval, in ms.
    pub tick_interval_ms: u32,

    /// Master seed. Each session shuffles with a fork of it. `None` draws
    /// one from the operating system.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            time_limit_secs: 180,
            mobile_breakpoint: 768.0,
            margin_ratio: 0.05,
            tile_gap: 12.0,
            flip_half_ms: 150,
            settle_delay_ms: 150,
            tick_interval_ms: 1000,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Set the countdown length.
    #[must_use]
    pub fn with_time_limit(mut self, secs: u32) -> Self {
        self.time_limit_secs = secs;
        self
    }

    /// Set the master seed for reproducible decks.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the flip half-duration and settle delay.
    #[must_use]
    pub fn with_timing(mut self, flip_half_ms: u32, settle_delay_ms: u32) -> Self {
        self.flip_half_ms = flip_half_ms;
        self.settle_delay_ms = settle_delay_ms;
        self
    }

    /// Set the tile gap in pixels.
    #[must_use]
    pub fn with_tile_gap(mut self, gap: f32) -> Self {
        self.tile_gap = gap;
        self
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.time_limit_secs == 0 {
            return Err(ConfigError::ZeroTimeLimit);
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }
        if !(0.0..0.5).contains(&self.margin_ratio) {
            return Err(ConfigError::MarginRatio(self.margin_ratio));
        }
        if !self.tile_gap.is_finite() || self.tile_gap < 0.0 {
            return Err(ConfigError::TileGap(self.tile_gap));
        }
        if !self.mobile_breakpoint.is_finite() || self.mobile_breakpoint <= 0.0 {
            return Err(ConfigError::Breakpoint(self.mobile_breakpoint));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.time_limit_secs, 180);
        assert_eq!(config.mobile_breakpoint, 768.0);
        assert_eq!(config.tile_gap, 12.0);
        assert_eq!(config.flip_half_ms, 150);
        assert_eq!(config.settle_delay_ms, 150);
        assert_eq!(config.tick_interval_ms, 1000);
        assert_eq!(config.seed, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = GameConfig::default()
            .with_time_limit(60)
            .with_seed(7)
            .with_timing(100, 50)
            .with_tile_gap(4.0);

        assert_eq!(config.time_limit_secs, 60);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.flip_half_ms, 100);
        assert_eq!(config.settle_delay_ms, 50);
        assert_eq!(config.tile_gap, 4.0);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let zero_time = GameConfig::default().with_time_limit(0);
        assert_eq!(zero_time.validate(), Err(ConfigError::ZeroTimeLimit));

        let mut zero_tick = GameConfig::default();
        zero_tick.tick_interval_ms = 0;
        assert_eq!(zero_tick.validate(), Err(ConfigError::ZeroTickInterval));

        let mut margin = GameConfig::default();
        margin.margin_ratio = 0.5;
        assert_eq!(margin.validate(), Err(ConfigError::MarginRatio(0.5)));

        let gap = GameConfig::default().with_tile_gap(-1.0);
        assert_eq!(gap.validate(), Err(ConfigError::TileGap(-1.0)));

        let mut breakpoint = GameConfig::default();
        breakpoint.mobile_breakpoint = 0.0;
        assert_eq!(breakpoint.validate(), Err(ConfigError::Breakpoint(0.0)));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ConfigError::MarginRatio(0.7).to_string(),
            "margin ratio 0.7 must lie in [0, 0.5)"
        );
    }

    #[test]
    fn test_serialization() {
        let config = GameConfig::default().with_seed(99);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
