//! Asset dimensions for scale-fit computation.
//!
//! The host engine loads the images; this crate only needs their pixel
//! sizes to compute the scale that makes each face fill a square tile.
//! Hosts expose those sizes through [`AssetCatalog`].

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{Token, BACK_FACE_KEY};

/// Pixel dimensions of a loaded image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextureSize {
    pub width: u32,
    pub height: u32,
}

impl TextureSize {
    /// Create a new texture size.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Sprite scale factors along each axis.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scale {
    pub x: f32,
    pub y: f32,
}

impl Scale {
    pub const UNIT: Scale = Scale { x: 1.0, y: 1.0 };

    /// Create a new scale.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Scale that stretches `texture` to a `tile` × `tile` square.
    #[must_use]
    pub fn fit(tile: f32, texture: TextureSize) -> Self {
        Self {
            x: tile / texture.width.max(1) as f32,
            y: tile / texture.height.max(1) as f32,
        }
    }

    /// Same vertical scale, horizontal scale multiplied by `factor`.
    #[must_use]
    pub fn squashed(self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y,
        }
    }
}

/// Resolves asset keys (`back`, `card1`..`cardN`) to pixel sizes.
pub trait AssetCatalog {
    /// Pixel size of the named image, or `None` if it is not loaded.
    fn texture_size(&self, key: &str) -> Option<TextureSize>;
}

/// Asset catalog backed by an in-memory table.
///
/// ## Example
///
/// ```
/// use concentric_pairs::assets::{AssetCatalog, StaticCatalog, TextureSize};
///
/// let catalog = StaticCatalog::uniform(10, TextureSize::new(256, 256));
/// assert_eq!(catalog.texture_size("card10"), Some(TextureSize::new(256, 256)));
/// assert_eq!(catalog.texture_size("back"), Some(TextureSize::new(256, 256)));
/// assert_eq!(catalog.texture_size("card11"), None);
/// ```
#[derive(Clone, Debug, Default)]
pub struct StaticCatalog {
    sizes: FxHashMap<String, TextureSize>,
}

impl StaticCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog with `back` and `card1..=cardN` all of the same size.
    #[must_use]
    pub fn uniform(pair_count: u16, size: TextureSize) -> Self {
        let mut catalog = Self::new().with_texture(BACK_FACE_KEY, size);
        for n in 1..=pair_count {
            catalog.insert(Token::new(n).asset_key(), size);
        }
        catalog
    }

    /// Register an image size.
    pub fn insert(&mut self, key: impl Into<String>, size: TextureSize) {
        self.sizes.insert(key.into(), size);
    }

    /// Register an image size (builder pattern).
    #[must_use]
    pub fn with_texture(mut self, key: impl Into<String>, size: TextureSize) -> Self {
        self.insert(key, size);
        self
    }

    /// Number of registered images.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    /// Whether no images are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }
}

impl AssetCatalog for StaticCatalog {
    fn texture_size(&self, key: &str) -> Option<TextureSize> {
        self.sizes.get(key).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_scale() {
        let scale = Scale::fit(100.0, TextureSize::new(200, 400));
        assert_eq!(scale, Scale::new(0.5, 0.25));
    }

    #[test]
    fn test_fit_zero_sized_texture() {
        let scale = Scale::fit(50.0, TextureSize::new(0, 0));
        assert_eq!(scale, Scale::new(50.0, 50.0));
    }

    #[test]
    fn test_squashed_keeps_vertical() {
        let scale = Scale::new(0.5, 0.25).squashed(0.01);
        assert!((scale.x - 0.005).abs() < 1e-6);
        assert_eq!(scale.y, 0.25);
    }

    #[test]
    fn test_static_catalog() {
        let catalog = StaticCatalog::new()
            .with_texture("back", TextureSize::new(64, 96))
            .with_texture("card1", TextureSize::new(128, 128));

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.texture_size("back"), Some(TextureSize::new(64, 96)));
        assert_eq!(catalog.texture_size("card2"), None);
    }

    #[test]
    fn test_uniform_catalog() {
        let catalog = StaticCatalog::uniform(10, TextureSize::new(32, 32));
        assert_eq!(catalog.len(), 11);
        assert!(!catalog.is_empty());
    }
}
