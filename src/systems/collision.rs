//! Tile collision resolver.
//!
//! [`resolve_collisions`] pushes a bounding box out of the solid tiles it
//! overlaps, one tile and one axis at a time, and reports whether the box
//! ended up standing on something. It is a pure function over a
//! [`TileSource`]; callers apply the returned correction to their own
//! position.
//!
//! Platform tiles are one-way: they only stop a box whose bottom edge was at
//! or above the platform's top on the previous tick. Impassable tiles are
//! resolved on the shallower axis; an exact tie goes to X.

use glam::IVec2;
use smallvec::SmallVec;

use crate::math::{Rect, intersection_depth};
use crate::resources::tilegrid::{Tile, TileSource};

/// Axis a contact was resolved on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// One tile the box overlapped during resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    pub cell: IVec2,
    pub tile: Tile,
    pub axis: Axis,
    /// Whether the box was moved out of this tile.
    pub applied: bool,
}

/// Outcome of a resolution pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// Box after every correction.
    pub bounds: Rect,
    /// Total displacement applied to the input box.
    pub correction: IVec2,
    pub on_ground: bool,
    pub contacts: SmallVec<[Contact; 8]>,
}

fn floor_div(a: i32, b: i32) -> i32 {
    a.div_euclid(b)
}

fn ceil_div(a: i32, b: i32) -> i32 {
    -(-a).div_euclid(b)
}

/// Resolve `bounds` against the solid tiles of `grid`.
///
/// `previous_bottom` is the bottom edge of the box at the end of the previous
/// tick; it decides whether platforms are landed on or passed through.
///
/// The cell range is taken from the input box once. Cells are visited
/// top-to-bottom, left-to-right, and each correction is applied before the
/// next cell is tested.
pub fn resolve_collisions<G: TileSource + ?Sized>(
    bounds: Rect,
    previous_bottom: i32,
    grid: &G,
) -> Resolution {
    let size = grid.tile_size();
    let left_tile = floor_div(bounds.left, size.width);
    let right_tile = ceil_div(bounds.right(), size.width) - 1;
    let top_tile = floor_div(bounds.top, size.height);
    let bottom_tile = ceil_div(bounds.bottom(), size.height) - 1;

    let mut current = bounds;
    let mut on_ground = false;
    let mut contacts = SmallVec::new();

    for y in top_tile..=bottom_tile {
        for x in left_tile..=right_tile {
            let tile = grid.classification(x, y);
            if tile == Tile::Passable {
                continue;
            }

            let tile_bounds = grid.world_bounds(x, y);
            let depth = intersection_depth(&current, &tile_bounds);
            if depth == IVec2::ZERO {
                continue;
            }

            let cell = IVec2::new(x, y);
            if depth.y.abs() < depth.x.abs() || tile == Tile::Platform {
                if previous_bottom <= tile_bounds.top {
                    on_ground = true;
                }
                let applied = tile == Tile::Impassable || on_ground;
                if applied {
                    current = current.translate(IVec2::new(0, depth.y));
                }
                contacts.push(Contact {
                    cell,
                    tile,
                    axis: Axis::Y,
                    applied,
                });
            } else {
                let applied = tile == Tile::Impassable;
                if applied {
                    current = current.translate(IVec2::new(depth.x, 0));
                }
                contacts.push(Contact {
                    cell,
                    tile,
                    axis: Axis::X,
                    applied,
                });
            }
        }
    }

    Resolution {
        bounds: current,
        correction: IVec2::new(current.left - bounds.left, current.top - bounds.top),
        on_ground,
        contacts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::tilegrid::{TileGrid, TileSize};

    fn grid(width: i32, height: i32, tiles: &[Tile]) -> TileGrid {
        TileGrid::new(width, height, tiles.to_vec(), TileSize::default()).unwrap()
    }

    /// 3x3 solid block with a hollow centre cell.
    fn hollow_3x3() -> TileGrid {
        let mut tiles = vec![Tile::Impassable; 9];
        tiles[4] = Tile::Passable;
        grid(3, 3, &tiles)
    }

    /// 3x3 open grid with a single tile of `kind` in the centre.
    fn single_3x3(kind: Tile) -> TileGrid {
        let mut tiles = vec![Tile::Passable; 9];
        tiles[4] = kind;
        grid(3, 3, &tiles)
    }

    fn centre_cell() -> Rect {
        Rect::new(40, 32, 40, 32)
    }

    fn inside(inner: &Rect, outer: &Rect) -> bool {
        inner.left >= outer.left
            && inner.right() <= outer.right()
            && inner.top >= outer.top
            && inner.bottom() <= outer.bottom()
    }

    #[test]
    fn test_box_on_vertical_seam_is_pushed_into_centre() {
        let g = hollow_3x3();
        // Centred on x = 80, the seam between the centre and its right neighbour.
        let bounds = Rect::new(70, 40, 20, 16);
        let r = resolve_collisions(bounds, 56, &g);
        assert_eq!(r.correction, IVec2::new(-10, 0));
        assert!(inside(&r.bounds, &centre_cell()));
        assert!(!r.on_ground);
        assert_eq!(r.contacts.len(), 1);
        assert_eq!(r.contacts[0].axis, Axis::X);
    }

    #[test]
    fn test_box_on_horizontal_seam_lands_in_centre() {
        let g = hollow_3x3();
        // Centred on y = 64, the seam between the centre and the cell below.
        let bounds = Rect::new(50, 56, 20, 16);
        let r = resolve_collisions(bounds, 64, &g);
        assert_eq!(r.correction, IVec2::new(0, -8));
        assert!(inside(&r.bounds, &centre_cell()));
        assert!(r.on_ground);
    }

    #[test]
    fn test_every_correction_leaves_box_touching_not_overlapping() {
        let g = hollow_3x3();
        for bounds in [
            Rect::new(35, 40, 20, 16),
            Rect::new(70, 30, 20, 16),
            Rect::new(45, 28, 20, 16),
            Rect::new(52, 55, 20, 16),
        ] {
            let r = resolve_collisions(bounds, bounds.top, &g);
            assert!(inside(&r.bounds, &centre_cell()), "{bounds:?} -> {:?}", r.bounds);
            let touching = r.bounds.left == 40
                || r.bounds.right() == 80
                || r.bounds.top == 32
                || r.bounds.bottom() == 64;
            assert!(touching, "{bounds:?} -> {:?}", r.bounds);
        }
    }

    #[test]
    fn test_platform_landing_from_above() {
        let g = single_3x3(Tile::Platform);
        // Bottom was level with the platform top last tick; now 4 units in.
        let bounds = Rect::new(45, 2, 20, 34);
        let r = resolve_collisions(bounds, 32, &g);
        assert!(r.on_ground);
        assert_eq!(r.correction, IVec2::new(0, -4));
        assert_eq!(r.bounds.bottom(), 32);
    }

    #[test]
    fn test_platform_passes_through_from_below() {
        let g = single_3x3(Tile::Platform);
        let bounds = Rect::new(45, 50, 20, 20);
        let r = resolve_collisions(bounds, 70, &g);
        assert!(!r.on_ground);
        assert_eq!(r.correction, IVec2::ZERO);
        assert!(r.contacts.iter().all(|c| !c.applied));
    }

    #[test]
    fn test_platform_passes_through_from_side() {
        let g = single_3x3(Tile::Platform);
        let bounds = Rect::new(30, 30, 20, 20);
        let r = resolve_collisions(bounds, 50, &g);
        assert!(!r.on_ground);
        assert_eq!(r.correction, IVec2::ZERO);
    }

    #[test]
    fn test_impassable_tie_resolves_horizontally() {
        let g = single_3x3(Tile::Impassable);
        // 5 units into the tile on both axes at its top-right corner, coming
        // from the side: the box is pushed out sideways, not onto the top.
        let bounds = Rect::new(75, 27, 10, 10);
        let r = resolve_collisions(bounds, 37, &g);
        assert_eq!(r.correction, IVec2::new(5, 0));
        assert_eq!(r.bounds.left, 80);
        assert!(!r.on_ground);
        assert_eq!(r.contacts.len(), 1);
        assert_eq!(r.contacts[0].axis, Axis::X);
        assert!(r.contacts[0].applied);
    }

    #[test]
    fn test_platform_tie_still_lands() {
        let g = single_3x3(Tile::Platform);
        let bounds = Rect::new(75, 27, 10, 10);
        let r = resolve_collisions(bounds, 32, &g);
        assert_eq!(r.correction, IVec2::new(0, -5));
        assert_eq!(r.bounds.bottom(), 32);
        assert!(r.on_ground);
        assert_eq!(r.contacts[0].axis, Axis::Y);
    }

    #[test]
    fn test_grid_edges_are_solid() {
        let g = grid(2, 2, &[Tile::Passable; 4]);

        let r = resolve_collisions(Rect::new(-5, 10, 20, 10), 20, &g);
        assert_eq!(r.bounds.left, 0);

        let r = resolve_collisions(Rect::new(70, 10, 20, 10), 20, &g);
        assert_eq!(r.bounds.right(), 80);

        let r = resolve_collisions(Rect::new(30, -6, 20, 10), 4, &g);
        assert_eq!(r.bounds.top, 0);

        let r = resolve_collisions(Rect::new(30, 60, 20, 10), 64, &g);
        assert_eq!(r.bounds.bottom(), 64);
        assert!(r.on_ground);
    }

    #[test]
    fn test_box_clear_of_tiles_is_untouched() {
        let g = single_3x3(Tile::Impassable);
        let bounds = Rect::new(2, 2, 20, 20);
        let r = resolve_collisions(bounds, 22, &g);
        assert_eq!(r.bounds, bounds);
        assert_eq!(r.correction, IVec2::ZERO);
        assert!(r.contacts.is_empty());
        assert!(!r.on_ground);
    }

    #[test]
    fn test_edge_touching_tile_is_not_a_contact() {
        let g = single_3x3(Tile::Impassable);
        // Standing exactly on top of the centre tile.
        let bounds = Rect::new(45, 12, 20, 20);
        let r = resolve_collisions(bounds, 32, &g);
        assert!(r.contacts.is_empty());
        assert!(!r.on_ground);
    }
}
