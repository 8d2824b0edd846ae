//! Animation systems.
//!
//! - [`select_player_animation`] and [`select_enemy_animation`] pick which
//!   animation key should be playing from gameplay state.
//! - [`animation`] advances every [`Animation`] by the tick delta using the
//!   definitions in [`AnimationStore`].
//!
//! # Related
//!
//! - [`crate::components::animation::Animation`] – per-entity playback state
//! - [`crate::resources::animationstore::AnimationStore`] – animation definitions
use bevy_ecs::prelude::*;

use crate::components::animation::Animation;
use crate::components::enemy::Enemy;
use crate::components::player::Player;
use crate::components::rigidbody::RigidBody;
use crate::resources::animationstore::AnimationStore;
use crate::resources::levelstate::LevelState;
use crate::resources::worldtime::WorldTime;

/// Horizontal speed below which a grounded player counts as standing still.
const RUN_THRESHOLD: f32 = 0.02;

/// Animation key for the player's current state, or `None` to keep playing
/// whatever is playing (airborne without a jump).
pub fn player_animation_key(player: &Player, body: &RigidBody, level: &LevelState) -> Option<&'static str> {
    if level.has_player_died() {
        Some("Player/Die")
    } else if level.reached_exit() {
        Some("Player/Celebrate")
    } else if player.jump_time > 0.0 {
        Some("Player/Jump")
    } else if player.on_ground {
        if body.velocity.x.abs() - RUN_THRESHOLD > 0.0 {
            Some("Player/Run")
        } else {
            Some("Player/Idle")
        }
    } else {
        None
    }
}

pub fn select_player_animation(
    mut query: Query<(&Player, &RigidBody, &mut Animation)>,
    level: Res<LevelState>,
) {
    for (player, body, mut anim) in query.iter_mut() {
        if let Some(key) = player_animation_key(player, body, &level) {
            anim.play(key);
        }
    }
}

/// Enemies stand still while waiting and whenever the round is not in play.
pub fn select_enemy_animation(mut query: Query<(&Enemy, &mut Animation)>, level: Res<LevelState>) {
    for (enemy, mut anim) in query.iter_mut() {
        let clip = if !level.is_active() || enemy.is_waiting() {
            "Idle"
        } else {
            "Run"
        };
        let key = format!("{}/{}", enemy.sprite_set, clip);
        anim.play(&key);
    }
}

/// Advance animation playback.
pub fn animation(mut query: Query<&mut Animation>, store: Res<AnimationStore>, time: Res<WorldTime>) {
    for mut anim in query.iter_mut() {
        if let Some(definition) = store.get(&anim.animation_key) {
            anim.advance(definition, time.delta);
        }
    }
}
