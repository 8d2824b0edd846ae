use bevy_ecs::prelude::Component;
use glam::{IVec2, Vec2};

use crate::math::Rect;

/// Integer collision box attached to a sprite frame.
///
/// `local_bounds` is expressed in frame coordinates and `origin` is the point
/// of the frame that sits on the entity's [`MapPosition`](super::mapposition::MapPosition).
#[derive(Debug, Clone, Copy, PartialEq, Component)]
pub struct BoxCollider {
    pub local_bounds: Rect,
    pub origin: Vec2,
}

impl BoxCollider {
    pub fn new(local_bounds: Rect, origin: Vec2) -> Self {
        Self {
            local_bounds,
            origin,
        }
    }

    /// Box covering a fraction of a `frame_width x frame_height` frame,
    /// horizontally centred and resting on the frame's bottom edge. The origin
    /// is the bottom centre of the frame.
    pub fn for_frame(
        frame_width: i32,
        frame_height: i32,
        width_factor: f32,
        height_factor: f32,
    ) -> Self {
        let width = (frame_width as f32 * width_factor) as i32;
        let left = (frame_width - width) / 2;
        let height = (frame_height as f32 * height_factor) as i32;
        let top = frame_height - height;
        Self {
            local_bounds: Rect::new(left, top, width, height),
            origin: Vec2::new(frame_width as f32 / 2.0, frame_height as f32),
        }
    }

    /// World-space box for an entity at `position`.
    ///
    /// The frame's top-left corner is rounded to whole units, ties to even.
    pub fn bounds(&self, position: Vec2) -> Rect {
        let corner = position - self.origin;
        let offset = IVec2::new(
            corner.x.round_ties_even() as i32,
            corner.y.round_ties_even() as i32,
        );
        self.local_bounds.translate(offset)
    }
}
