//! Grid shape and geometry.
//!
//! ## Shape policy
//!
//! The board is always 20 tiles. Narrow viewports get a portrait 4×5
//! grid, everything else a landscape 5×4 grid. There is no third shape.
//!
//! ## Geometry
//!
//! A margin of `margin_ratio` is reserved on each side of both axes. The
//! tile is the largest square that fits `cols` × `rows` cells separated by
//! `gap` inside the remaining area. The grid is then centered in the full
//! viewport using the tile pitch (`tile + gap`).

use serde::{Deserialize, Serialize};

use crate::core::TileId;

/// Smallest tile edge produced for degenerate viewports, in pixels.
pub const MIN_TILE_SIZE: f32 = 1.0;

/// Host viewport size in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// Create a new viewport.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Viewport center.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

/// A point in viewport pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Grid coordinates of a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub row: u16,
    pub col: u16,
}

/// The two supported board shapes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GridShape {
    /// 4 columns × 5 rows, used below the mobile breakpoint.
    Portrait,
    /// 5 columns × 4 rows.
    Landscape,
}

impl GridShape {
    /// Pick the shape for a viewport width.
    #[must_use]
    pub fn for_width(width: f32, mobile_breakpoint: f32) -> Self {
        if width < mobile_breakpoint {
            GridShape::Portrait
        } else {
            GridShape::Landscape
        }
    }

    /// Number of columns.
    #[must_use]
    pub const fn cols(self) -> u16 {
        match self {
            GridShape::Portrait => 4,
            GridShape::Landscape => 5,
        }
    }

    /// Number of rows.
    #[must_use]
    pub const fn rows(self) -> u16 {
        match self {
            GridShape::Portrait => 5,
            GridShape::Landscape => 4,
        }
    }

    /// Total tiles on the board.
    #[must_use]
    pub const fn tile_count(self) -> usize {
        self.cols() as usize * self.rows() as usize
    }

    /// Number of pairs on the board.
    #[must_use]
    pub const fn pair_count(self) -> usize {
        self.tile_count() / 2
    }

    /// Cell of the tile at a row-major index.
    #[must_use]
    pub fn cell_of(self, id: TileId) -> Cell {
        let cols = self.cols();
        Cell {
            row: id.0 / cols,
            col: id.0 % cols,
        }
    }
}

/// Pixel layout of the board, computed once per session.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridGeometry {
    pub shape: GridShape,
    /// Edge of a (square) tile.
    pub tile_size: f32,
    /// Distance between the centers of adjacent tiles.
    pub pitch: f32,
    /// Center of the top-left tile.
    pub origin: Point,
}

impl GridGeometry {
    /// Compute the layout for a viewport.
    #[must_use]
    pub fn compute(viewport: Viewport, shape: GridShape, margin_ratio: f32, gap: f32) -> Self {
        let cols = f32::from(shape.cols());
        let rows = f32::from(shape.rows());

        let available_width = viewport.width - 2.0 * viewport.width * margin_ratio;
        let available_height = viewport.height - 2.0 * viewport.height * margin_ratio;
        let max_width = (available_width - (cols - 1.0) * gap) / cols;
        let max_height = (available_height - (rows - 1.0) * gap) / rows;

        let tile_size = max_width.min(max_height).max(MIN_TILE_SIZE);
        let pitch = tile_size + gap;
        let origin = Point::new(
            (viewport.width - pitch * (cols - 1.0)) / 2.0,
            (viewport.height - pitch * (rows - 1.0)) / 2.0,
        );

        Self {
            shape,
            tile_size,
            pitch,
            origin,
        }
    }

    /// Center of the tile in `cell`.
    #[must_use]
    pub fn center(&self, cell: Cell) -> Point {
        Point::new(
            self.origin.x + f32::from(cell.col) * self.pitch,
            self.origin.y + f32::from(cell.row) * self.pitch,
        )
    }
}
