//! Board construction.
//!
//! `BoardBuilder` turns a viewport into a laid-out, dealt board: it picks
//! the grid shape, computes the geometry, shuffles a deck and assigns the
//! tokens to tiles in row-major order. It also resolves the fitted sprite
//! scale of every face so the controller never touches the asset catalog
//! during play.

use rustc_hash::FxHashMap;

use super::deck::Deck;
use super::layout::{GridGeometry, GridShape, Point, Viewport};
use super::tile::{Face, Tile};
use crate::assets::{AssetCatalog, Scale};
use crate::core::{GameConfig, GameRng, TileId, Token};

/// A dealt board ready for a session.
#[derive(Clone, Debug)]
pub struct Board {
    /// Pixel layout.
    pub geometry: GridGeometry,

    /// Tiles in row-major order; `tiles[i].id == TileId(i)`.
    pub tiles: Vec<Tile>,

    /// Fitted sprite scale per face.
    scales: FxHashMap<Face, Scale>,
}

impl Board {
    /// Number of pairs dealt.
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.tiles.len() / 2
    }

    /// Scale that makes `face` fill one tile.
    #[must_use]
    pub fn scale_for(&self, face: Face) -> Scale {
        self.scales.get(&face).copied().unwrap_or(Scale::UNIT)
    }

    /// Center of a tile in viewport pixels.
    #[must_use]
    pub fn center_of(&self, id: TileId) -> Point {
        self.geometry.center(self.geometry.shape.cell_of(id))
    }
}

/// Builds boards from a configuration.
#[derive(Clone, Copy, Debug)]
pub struct BoardBuilder<'a> {
    config: &'a GameConfig,
}

impl<'a> BoardBuilder<'a> {
    /// Create a builder for `config`.
    #[must_use]
    pub fn new(config: &'a GameConfig) -> Self {
        Self { config }
    }

    /// Lay out and deal a board for `viewport`.
    pub fn build<A>(&self, viewport: Viewport, rng: &mut GameRng, assets: &A) -> Board
    where
        A: AssetCatalog + ?Sized,
    {
        let shape = GridShape::for_width(viewport.width, self.config.mobile_breakpoint);
        let geometry =
            GridGeometry::compute(viewport, shape, self.config.margin_ratio, self.config.tile_gap);

        let pair_count = shape.pair_count() as u16;
        let deck = Deck::generate(pair_count, rng);
        debug_assert!(deck.is_well_formed(pair_count));

        let tiles: Vec<Tile> = deck
            .into_iter()
            .enumerate()
            .map(|(index, token)| {
                let id = TileId::new(index as u16);
                Tile::new(id, token, shape.cell_of(id))
            })
            .collect();

        let scales = std::iter::once(Face::Back)
            .chain((1..=pair_count).map(|n| Face::Front(Token::new(n))))
            .map(|face| (face, fitted_scale(assets, face, geometry.tile_size)))
            .collect();

        log::debug!(
            "built {:?} board: {} tiles, tile size {:.1}px",
            shape,
            tiles.len(),
            geometry.tile_size
        );

        Board {
            geometry,
            tiles,
            scales,
        }
    }
}

fn fitted_scale<A>(assets: &A, face: Face, tile_size: f32) -> Scale
where
    A: AssetCatalog + ?Sized,
{
    let key = face.asset_key();
    match assets.texture_size(&key) {
        Some(texture) => Scale::fit(tile_size, texture),
        None => {
            log::warn!("asset '{}' has no known size; assuming tile-sized texture", key);
            Scale::UNIT
        }
    }
}
