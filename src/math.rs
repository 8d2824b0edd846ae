//! Integer rectangles, circles and the intersection-depth query.
//!
//! World space uses y-down coordinates: `top < bottom`. Rectangles are
//! integer-aligned so collision corrections are whole world units.

use glam::{IVec2, Vec2};

/// Axis-aligned rectangle in integer world units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> i32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.top + self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            self.left as f32 + self.width as f32 / 2.0,
            self.top as f32 + self.height as f32 / 2.0,
        )
    }

    /// Middle of the bottom edge. Entities are anchored here.
    pub fn bottom_center(&self) -> Vec2 {
        Vec2::new(
            self.left as f32 + self.width as f32 / 2.0,
            self.bottom() as f32,
        )
    }

    /// Returns a copy moved by `offset`.
    pub fn translate(&self, offset: IVec2) -> Self {
        Self {
            left: self.left + offset.x,
            top: self.top + offset.y,
            ..*self
        }
    }

    /// Strict overlap test; rectangles sharing only an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left < other.right()
            && other.left < self.right()
            && self.top < other.bottom()
            && other.top < self.bottom()
    }

    /// Half-open containment: left/top edges are inside, right/bottom are not.
    pub fn contains(&self, point: IVec2) -> bool {
        self.left <= point.x && point.x < self.right() && self.top <= point.y && point.y < self.bottom()
    }
}

/// Signed penetration of `a` into `b`.
///
/// Each component is the displacement that, applied to `a` on that axis
/// alone, leaves the two rectangles exactly edge-touching. The sign points
/// away from `b`'s centre. Returns zero when the rectangles do not overlap
/// (touching edges included).
///
/// Works on doubled coordinates so half-unit centres stay exact.
pub fn intersection_depth(a: &Rect, b: &Rect) -> IVec2 {
    let distance_x = (2 * a.left + a.width) - (2 * b.left + b.width);
    let distance_y = (2 * a.top + a.height) - (2 * b.top + b.height);
    let min_distance_x = a.width + b.width;
    let min_distance_y = a.height + b.height;

    if distance_x.abs() >= min_distance_x || distance_y.abs() >= min_distance_y {
        return IVec2::ZERO;
    }

    let depth_x = if distance_x > 0 {
        min_distance_x - distance_x
    } else {
        -min_distance_x - distance_x
    };
    let depth_y = if distance_y > 0 {
        min_distance_y - distance_y
    } else {
        -min_distance_y - distance_y
    };

    // Both doubled depths are even: 2 * (edge difference).
    IVec2::new(depth_x / 2, depth_y / 2)
}

/// Circle in world space, used for pickups.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Closest-point test against a rectangle.
    pub fn intersects(&self, rect: &Rect) -> bool {
        let x = self
            .center
            .x
            .clamp(rect.left as f32, rect.right() as f32);
        let y = self
            .center
            .y
            .clamp(rect.top as f32, rect.bottom() as f32);
        let distance_squared = self.center.distance_squared(Vec2::new(x, y));
        distance_squared < self.radius * self.radius
    }
}
