use bevy_ecs::prelude::Component;
use glam::Vec2;

/// World-space anchor of an entity.
///
/// Players and enemies are anchored at the bottom centre of their sprite
/// frame; gems at the centre of their cell.
#[derive(Component, Clone, Copy, Debug, PartialEq, Default)]
pub struct MapPosition {
    pub pos: Vec2,
}

impl MapPosition {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
        }
    }

    pub fn from_vec(pos: Vec2) -> Self {
        Self { pos }
    }
}
