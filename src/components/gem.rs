use bevy_ecs::prelude::Component;
use glam::Vec2;

/// Collectable that bobs around its resting position.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Gem {
    /// Centre of the cell the gem was spawned in.
    pub base_position: Vec2,
    /// Current vertical offset from `base_position`.
    pub bounce: f32,
}

impl Gem {
    pub fn new(base_position: Vec2) -> Self {
        Self {
            base_position,
            bounce: 0.0,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.base_position + Vec2::new(0.0, self.bounce)
    }
}
