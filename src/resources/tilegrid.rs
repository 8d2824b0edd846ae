//! Tile grid resource.
//!
//! Holds the per-cell collision classification of the loaded level and maps
//! cells to world rectangles. The grid is built once per level load and only
//! ever read afterwards; reloading a level inserts a fresh grid.

use bevy_ecs::prelude::Resource;
use glam::{IVec2, Vec2};

use crate::level::LevelError;
use crate::math::Rect;

/// Collision classification of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tile {
    /// No collision response.
    Passable,
    /// Solid on all sides.
    Impassable,
    /// Solid only when landed on from above.
    Platform,
}

/// Size of one cell in world units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileSize {
    pub width: i32,
    pub height: i32,
}

impl Default for TileSize {
    fn default() -> Self {
        Self {
            width: 40,
            height: 32,
        }
    }
}

/// Read-only lookup the collision resolver and patrol AI work against.
pub trait TileSource {
    /// Classification of a cell. Cells outside the grid are `Impassable`.
    fn classification(&self, x: i32, y: i32) -> Tile;

    /// World rectangle covered by a cell.
    fn world_bounds(&self, x: i32, y: i32) -> Rect {
        let size = self.tile_size();
        Rect::new(x * size.width, y * size.height, size.width, size.height)
    }

    fn tile_size(&self) -> TileSize;
}

/// Immutable grid of tile classifications.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct TileGrid {
    width: i32,
    height: i32,
    tiles: Vec<Tile>,
    tile_size: TileSize,
}

impl TileGrid {
    /// Build a grid from row-major tiles.
    ///
    /// Fails when the dimensions are not positive or do not match the tile
    /// count.
    pub fn new(
        width: i32,
        height: i32,
        tiles: Vec<Tile>,
        tile_size: TileSize,
    ) -> Result<Self, LevelError> {
        if width <= 0 || height <= 0 || tiles.len() != (width as usize) * (height as usize) {
            return Err(LevelError::InvalidDimensions {
                width,
                height,
                cells: tiles.len(),
            });
        }
        if tile_size.width <= 0 || tile_size.height <= 0 {
            return Err(LevelError::InvalidTileSize {
                width: tile_size.width,
                height: tile_size.height,
            });
        }
        Ok(Self {
            width,
            height,
            tiles,
            tile_size,
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    /// Cell containing a world point.
    pub fn cell_at(&self, point: Vec2) -> IVec2 {
        IVec2::new(
            (point.x / self.tile_size.width as f32).floor() as i32,
            (point.y / self.tile_size.height as f32).floor() as i32,
        )
    }

    /// World extent of the whole grid.
    pub fn pixel_size(&self) -> IVec2 {
        IVec2::new(
            self.width * self.tile_size.width,
            self.height * self.tile_size.height,
        )
    }
}

impl TileSource for TileGrid {
    fn classification(&self, x: i32, y: i32) -> Tile {
        if !self.in_bounds(x, y) {
            return Tile::Impassable;
        }
        self.tiles[(y * self.width + x) as usize]
    }

    fn tile_size(&self) -> TileSize {
        self.tile_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_3x2() -> TileGrid {
        TileGrid::new(
            3,
            2,
            vec![
                Tile::Passable,
                Tile::Platform,
                Tile::Passable,
                Tile::Impassable,
                Tile::Impassable,
                Tile::Impassable,
            ],
            TileSize::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_classification_in_range() {
        let grid = grid_3x2();
        assert_eq!(grid.classification(0, 0), Tile::Passable);
        assert_eq!(grid.classification(1, 0), Tile::Platform);
        assert_eq!(grid.classification(2, 1), Tile::Impassable);
    }

    #[test]
    fn test_out_of_range_is_impassable() {
        let grid = grid_3x2();
        for (x, y) in [(-1, 0), (3, 0), (0, -1), (0, 2), (-5, -5), (100, 100)] {
            assert_eq!(grid.classification(x, y), Tile::Impassable, "({x}, {y})");
        }
    }

    #[test]
    fn test_world_bounds() {
        let grid = grid_3x2();
        assert_eq!(grid.world_bounds(0, 0), Rect::new(0, 0, 40, 32));
        assert_eq!(grid.world_bounds(2, 1), Rect::new(80, 32, 40, 32));
        assert_eq!(grid.world_bounds(-1, 0), Rect::new(-40, 0, 40, 32));
    }

    #[test]
    fn test_cell_at_floors_negative_points() {
        let grid = grid_3x2();
        assert_eq!(grid.cell_at(Vec2::new(39.9, 31.9)), IVec2::new(0, 0));
        assert_eq!(grid.cell_at(Vec2::new(40.0, 32.0)), IVec2::new(1, 1));
        assert_eq!(grid.cell_at(Vec2::new(-0.5, 0.0)), IVec2::new(-1, 0));
    }

    #[test]
    fn test_pixel_size() {
        assert_eq!(grid_3x2().pixel_size(), IVec2::new(120, 64));
    }

    #[test]
    fn test_rejects_mismatched_dimensions() {
        let err = TileGrid::new(2, 2, vec![Tile::Passable; 3], TileSize::default()).unwrap_err();
        assert!(matches!(err, LevelError::InvalidDimensions { cells: 3, .. }));
    }
}
