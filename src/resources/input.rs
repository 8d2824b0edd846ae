//! Per-tick input resources.
//!
//! The host samples its input devices once per tick into a [`TickInput`]
//! snapshot. The [`update_input_state`](crate::systems::input::update_input_state)
//! system folds that snapshot into [`InputState`], tracking edges so gameplay
//! can tell a fresh press from a held key.
use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Boolean signal state with edge tracking.
pub struct BoolState {
    /// Whether the signal is active this tick.
    pub active: bool,
    /// Whether the signal became active this tick.
    pub just_pressed: bool,
    /// Whether the signal stopped being active this tick.
    pub just_released: bool,
}

impl BoolState {
    /// Feed the raw value for this tick.
    pub fn update(&mut self, active: bool) {
        self.just_pressed = active && !self.active;
        self.just_released = !active && self.active;
        self.active = active;
    }
}

/// Raw input sampled by the host for a single tick.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    pub move_up: bool,
    pub move_down: bool,
    pub jump: bool,
}

/// Resource capturing the per-tick input state relevant to gameplay.
#[derive(Resource, Debug, Clone, Default)]
pub struct InputState {
    pub move_left: BoolState,
    pub move_right: BoolState,
    pub move_up: BoolState,
    pub move_down: BoolState,
    pub jump: BoolState,
}

impl InputState {
    pub fn apply(&mut self, input: &TickInput) {
        self.move_left.update(input.move_left);
        self.move_right.update(input.move_right);
        self.move_up.update(input.move_up);
        self.move_down.update(input.move_down);
        self.jump.update(input.jump);
    }

    /// -1 for left, +1 for right, 0 for neither. Left wins when both are held.
    pub fn horizontal_axis(&self) -> f32 {
        if self.move_left.active {
            -1.0
        } else if self.move_right.active {
            1.0
        } else {
            0.0
        }
    }

    /// Jump is held through the jump action or the up direction.
    pub fn jump_held(&self) -> bool {
        self.jump.active || self.move_up.active
    }

    /// Jump started this tick; drives the continue action between rounds.
    pub fn jump_pressed(&self) -> bool {
        self.jump.just_pressed || self.move_up.just_pressed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boolstate_default() {
        let bs = BoolState::default();
        assert!(!bs.active);
        assert!(!bs.just_pressed);
        assert!(!bs.just_released);
    }

    #[test]
    fn test_boolstate_edges() {
        let mut bs = BoolState::default();
        bs.update(true);
        assert!(bs.active && bs.just_pressed && !bs.just_released);
        bs.update(true);
        assert!(bs.active && !bs.just_pressed);
        bs.update(false);
        assert!(!bs.active && bs.just_released);
        bs.update(false);
        assert!(!bs.just_released);
    }

    #[test]
    fn test_horizontal_axis_left_priority() {
        let mut input = InputState::default();
        input.apply(&TickInput {
            move_left: true,
            move_right: true,
            ..Default::default()
        });
        assert_eq!(input.horizontal_axis(), -1.0);
        input.apply(&TickInput {
            move_right: true,
            ..Default::default()
        });
        assert_eq!(input.horizontal_axis(), 1.0);
        input.apply(&TickInput::default());
        assert_eq!(input.horizontal_axis(), 0.0);
    }

    #[test]
    fn test_jump_from_up_or_jump() {
        let mut input = InputState::default();
        input.apply(&TickInput {
            move_up: true,
            ..Default::default()
        });
        assert!(input.jump_held());
        assert!(input.jump_pressed());
        input.apply(&TickInput {
            jump: true,
            ..Default::default()
        });
        assert!(input.jump_held());
        // Jump went from released to pressed this tick.
        assert!(input.jump_pressed());
    }

    #[test]
    fn test_tick_input_deserializes_with_defaults() {
        let input: TickInput = serde_json::from_str(r#"{"move_right": true}"#).unwrap();
        assert!(input.move_right);
        assert!(!input.jump);
    }
}
