//! Player controller state.

use bevy_ecs::prelude::Component;

/// Horizontal facing, also used as a movement sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FaceDirection {
    #[default]
    Left,
    Right,
}

impl FaceDirection {
    pub fn sign(self) -> i32 {
        match self {
            FaceDirection::Left => -1,
            FaceDirection::Right => 1,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            FaceDirection::Left => FaceDirection::Right,
            FaceDirection::Right => FaceDirection::Left,
        }
    }
}

/// Per-tick state of the kinematic player controller.
///
/// `movement` and `is_jumping` are the intent sampled from input this tick;
/// the remaining fields persist across ticks.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Player {
    /// Horizontal axis in `[-1, 1]`.
    pub movement: f32,
    pub is_jumping: bool,
    pub was_jumping: bool,
    /// Seconds into the current jump; 0 when no jump is in progress.
    pub jump_time: f32,
    pub on_ground: bool,
    /// Bottom edge of the collision box at the end of the previous tick.
    pub previous_bottom: i32,
    pub facing: FaceDirection,
}

impl Player {
    pub fn new(previous_bottom: i32) -> Self {
        Self {
            movement: 0.0,
            is_jumping: false,
            was_jumping: false,
            jump_time: 0.0,
            on_ground: false,
            previous_bottom,
            facing: FaceDirection::Left,
        }
    }

    /// Drop all motion state; used when a new life starts.
    pub fn reset(&mut self, previous_bottom: i32) {
        *self = Self::new(previous_bottom);
    }

    pub fn clear_intent(&mut self) {
        self.movement = 0.0;
        self.is_jumping = false;
    }
}
