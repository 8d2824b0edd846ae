//! Round rules.
//!
//! - [`enemy_contact`] kills the player when an enemy box touches theirs.
//! - [`exit_check`] finishes the level when a grounded player stands on the
//!   exit.
//! - [`round_clock`] runs the clock down and converts leftover time into
//!   score once the exit is reached.
//! - [`round_is_active`] is the run condition for systems that only act while
//!   the round is in play.
use bevy_ecs::prelude::*;
use log::info;

use crate::components::boxcollider::BoxCollider;
use crate::components::enemy::Enemy;
use crate::components::mapposition::MapPosition;
use crate::components::player::Player;
use crate::events::gameplay::{ExitReachedEvent, PlayerKilledEvent};
use crate::resources::gameconfig::GameConfig;
use crate::resources::levelstate::LevelState;
use crate::resources::worldtime::WorldTime;

/// Run condition: the player is alive, has not reached the exit and time is
/// left on the clock.
pub fn round_is_active(level: Res<LevelState>) -> bool {
    level.is_active()
}

pub fn enemy_contact(
    player: Query<(&MapPosition, &BoxCollider), With<Player>>,
    enemies: Query<(Entity, &MapPosition, &BoxCollider), With<Enemy>>,
    mut commands: Commands,
) {
    let Ok((position, collider)) = player.single() else {
        return;
    };
    let bounds = collider.bounds(position.pos);
    let killer = enemies
        .iter()
        .find(|(_, enemy_position, enemy_collider)| enemy_collider.bounds(enemy_position.pos).intersects(&bounds))
        .map(|(entity, _, _)| entity);
    if let Some(enemy) = killer {
        commands.trigger(PlayerKilledEvent {
            killed_by: Some(enemy),
        });
    }
}

pub fn exit_check(
    player: Query<(&Player, &MapPosition, &BoxCollider)>,
    level: Res<LevelState>,
    mut commands: Commands,
) {
    let Ok((player, position, collider)) = player.single() else {
        return;
    };
    if level.has_player_died() || !player.on_ground {
        return;
    }
    if collider.bounds(position.pos).contains(level.exit()) {
        commands.trigger(ExitReachedEvent);
    }
}

pub fn round_clock(mut level: ResMut<LevelState>, config: Res<GameConfig>, time: Res<WorldTime>) {
    if level.is_round_over() {
        return;
    }
    level.tick_clock(time.delta, config.round.points_per_second);
    if level.is_round_over() {
        if level.reached_exit() {
            info!("level {} complete, score {}", level.level_index(), level.score());
        } else {
            info!("time up on level {}", level.level_index());
        }
    }
}
