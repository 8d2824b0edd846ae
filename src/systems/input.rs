//! Input systems.
//!
//! - [`update_input_state`] folds the host's [`TickInput`] snapshot into
//!   [`InputState`] at the start of every tick.
use bevy_ecs::prelude::*;

use crate::resources::input::{InputState, TickInput};

/// Copy the sampled tick input into the edge-tracking `InputState` resource.
pub fn update_input_state(tick: Res<TickInput>, mut input: ResMut<InputState>) {
    input.apply(&tick);
}
