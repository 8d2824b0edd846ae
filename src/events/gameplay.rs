//! Gameplay events and their observers.
//!
//! Systems detect what happened (a gem touched, an enemy touched, the exit
//! reached) and trigger one of these events; the observers below apply the
//! consequences to [`LevelState`], the entities involved and the audio queue.
//!
//! Observers are registered once in [`crate::game::init_world`].
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::info;

use crate::components::player::Player;
use crate::components::rigidbody::RigidBody;
use crate::events::audio::{AudioCmd, sounds};
use crate::resources::gameconfig::GameConfig;
use crate::resources::levelstate::LevelState;

/// The player died.
///
/// `killed_by` is the enemy that touched the player, or `None` when the
/// player died some other way.
#[derive(Event, Debug, Clone, Copy)]
pub struct PlayerKilledEvent {
    pub killed_by: Option<Entity>,
}

/// The player picked up a gem.
#[derive(Event, Debug, Clone, Copy)]
pub struct GemCollectedEvent {
    pub gem: Entity,
}

/// The player stood on the exit.
#[derive(Event, Debug, Clone, Copy)]
pub struct ExitReachedEvent;

pub fn observe_player_killed(
    trigger: On<PlayerKilledEvent>,
    mut level: ResMut<LevelState>,
    mut audio: MessageWriter<AudioCmd>,
) {
    if level.has_player_died() {
        return;
    }
    level.kill_player();
    let sound = match trigger.event().killed_by {
        Some(enemy) => {
            info!("player killed by {:?}", enemy);
            sounds::PLAYER_KILLED
        }
        None => {
            info!("player fell");
            sounds::PLAYER_FALL
        }
    };
    audio.write(AudioCmd::fx(sound));
}

pub fn observe_gem_collected(
    trigger: On<GemCollectedEvent>,
    mut commands: Commands,
    mut level: ResMut<LevelState>,
    config: Res<GameConfig>,
    mut audio: MessageWriter<AudioCmd>,
) {
    let gem = trigger.event().gem;
    level.add_score(config.round.gem_points);
    commands.entity(gem).despawn();
    audio.write(AudioCmd::fx(sounds::GEM_COLLECTED));
    info!("gem collected, score {}", level.score());
}

pub fn observe_exit_reached(
    _trigger: On<ExitReachedEvent>,
    mut level: ResMut<LevelState>,
    mut bodies: Query<&mut RigidBody, With<Player>>,
    mut audio: MessageWriter<AudioCmd>,
) {
    if level.reached_exit() {
        return;
    }
    level.mark_exit_reached();
    for mut body in bodies.iter_mut() {
        body.freeze();
    }
    audio.write(AudioCmd::fx(sounds::EXIT_REACHED));
    info!(
        "exit reached with {:.1}s left, score {}",
        level.time_remaining(),
        level.score()
    );
}
