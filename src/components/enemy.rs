use bevy_ecs::prelude::Component;

use super::player::FaceDirection;

/// Patrol state machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PatrolState {
    Walking,
    /// Seconds left before turning around.
    Waiting(f32),
}

/// Enemy pacing back and forth along a platform.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Enemy {
    pub direction: FaceDirection,
    pub state: PatrolState,
    /// Sprite set name, e.g. `MonsterA`.
    pub sprite_set: String,
}

impl Enemy {
    pub fn new(sprite_set: impl Into<String>) -> Self {
        Self {
            direction: FaceDirection::Left,
            state: PatrolState::Walking,
            sprite_set: sprite_set.into(),
        }
    }

    pub fn is_waiting(&self) -> bool {
        matches!(self.state, PatrolState::Waiting(_))
    }
}
