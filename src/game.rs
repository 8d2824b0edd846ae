//! Game setup and level lifecycle.
//!
//! - [`init_world`] creates a world with the long-lived resources and the
//!   gameplay observers.
//! - [`load_level`] replaces the grid, the round state and every
//!   [`LevelEntity`] with the contents of a parsed level.
//!   [`start_playlist`] does the same for the first level of a
//!   [`LevelPlaylist`].
//! - [`build_update_schedule`] is the per-tick schedule and [`step`] runs it
//!   once, then performs the continue action when the host asked for it.

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use glam::{IVec2, Vec2};
use log::{info, warn};

use crate::components::animation::Animation;
use crate::components::boxcollider::BoxCollider;
use crate::components::enemy::Enemy;
use crate::components::gem::Gem;
use crate::components::levelentity::LevelEntity;
use crate::components::mapposition::MapPosition;
use crate::components::player::Player;
use crate::components::rigidbody::RigidBody;
use crate::events::gameplay::{observe_exit_reached, observe_gem_collected, observe_player_killed};
use crate::level::{LevelError, LevelLayout};
use crate::resources::animationstore::AnimationStore;
use crate::resources::audio::{AudioBridge, init_audio_messages};
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::{InputState, TickInput};
use crate::resources::levelplaylist::LevelPlaylist;
use crate::resources::levelstate::LevelState;
use crate::resources::texturepack::TexturePack;
use crate::resources::tilegrid::TileSource;
use crate::resources::worldtime::WorldTime;
use crate::systems::animation::{animation, select_enemy_animation, select_player_animation};
use crate::systems::audio::{
    forward_audio_cmds, poll_audio_messages, update_bevy_audio_cmds, update_bevy_audio_messages,
};
use crate::systems::gem::update_gems;
use crate::systems::input::update_input_state;
use crate::systems::patrol::enemy_patrol;
use crate::systems::player::player_controller;
use crate::systems::round::{enemy_contact, exit_check, round_clock, round_is_active};
use crate::systems::time::update_world_time;

/// What the continue input does in the current round state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContinueAction {
    /// The round is still in play.
    None,
    NewLife,
    NextLevel,
    ReloadLevel,
}

/// Decide what pressing continue would do.
///
/// A dead player always gets a new life first, even after the clock ran out.
pub fn continue_action(level: &LevelState) -> ContinueAction {
    if level.has_player_died() {
        ContinueAction::NewLife
    } else if level.is_round_over() {
        if level.reached_exit() {
            ContinueAction::NextLevel
        } else {
            ContinueAction::ReloadLevel
        }
    } else {
        ContinueAction::None
    }
}

/// Build a world holding everything except a level.
pub fn init_world(config: GameConfig) -> World {
    let mut world = World::new();
    world.insert_resource(WorldTime::default().with_time_scale(1.0));
    world.insert_resource(config);
    world.insert_resource(InputState::default());
    world.insert_resource(TickInput::default());
    world.insert_resource(AnimationStore::with_defaults());
    init_audio_messages(&mut world);

    world.spawn(Observer::new(observe_player_killed));
    world.spawn(Observer::new(observe_gem_collected));
    world.spawn(Observer::new(observe_exit_reached));
    // Observers must exist before any system triggers events.
    world.flush();
    world
}

/// Despawn every entity owned by the loaded level.
pub fn clean_level_entities(world: &mut World) {
    let entities: Vec<Entity> = world
        .query_filtered::<Entity, With<LevelEntity>>()
        .iter(world)
        .collect();
    for entity in entities {
        world.despawn(entity);
    }
}

/// Bottom centre of a cell, where standing entities are anchored.
fn cell_anchor<G: TileSource + ?Sized>(grid: &G, cell: IVec2) -> Vec2 {
    grid.world_bounds(cell.x, cell.y).bottom_center()
}

/// Replace the current level with `layout`.
///
/// Fails without touching the world when the layout cannot be turned into a
/// grid with the configured tile size.
pub fn load_level(world: &mut World, layout: &LevelLayout, level_index: usize) -> Result<(), LevelError> {
    let config = world.resource::<GameConfig>().clone();
    let grid = layout.to_tile_grid(config.tile_size)?;

    clean_level_entities(world);

    let start = cell_anchor(&grid, layout.start_cell());
    let exit_cell = layout.exit_cell();
    let exit_bounds = grid.world_bounds(exit_cell.x, exit_cell.y);
    let exit = IVec2::new(
        exit_bounds.left + exit_bounds.width / 2,
        exit_bounds.top + exit_bounds.height / 2,
    );

    let player_collider = BoxCollider::for_frame(
        config.player.frame_width,
        config.player.frame_height,
        config.player.width_factor,
        config.player.height_factor,
    );
    world.spawn((
        LevelEntity,
        Player::new(player_collider.bounds(start).bottom()),
        RigidBody::new(),
        MapPosition::from_vec(start),
        player_collider,
        Animation::new("Player/Idle"),
    ));

    let enemy_collider = BoxCollider::for_frame(
        config.enemy.frame_width,
        config.enemy.frame_height,
        config.enemy.width_factor,
        config.enemy.height_factor,
    );
    let mut enemies = 0;
    for (cell, kind) in layout.enemy_spawns() {
        world.spawn((
            LevelEntity,
            Enemy::new(kind.sprite_set()),
            MapPosition::from_vec(cell_anchor(&grid, cell)),
            enemy_collider,
            Animation::new(format!("{}/Idle", kind.sprite_set())),
        ));
        enemies += 1;
    }

    let mut gems = 0;
    for cell in layout.gem_cells() {
        let centre = grid.world_bounds(cell.x, cell.y).center();
        world.spawn((LevelEntity, Gem::new(centre), MapPosition::from_vec(centre)));
        gems += 1;
    }

    world.insert_resource(TexturePack::for_level(&config, layout));
    world.insert_resource(LevelState::new(level_index, config.round.time_limit, start, exit));
    world.insert_resource(grid);
    world.flush();

    info!(
        "level {} loaded: {}x{} cells, {} enemies, {} gems",
        level_index,
        layout.width(),
        layout.height(),
        enemies,
        gems
    );
    Ok(())
}

/// Insert `playlist` and load its current level.
pub fn start_playlist(world: &mut World, playlist: LevelPlaylist) -> Result<(), LevelError> {
    let index = playlist.current_index();
    let layout = playlist.current().clone();
    world.insert_resource(playlist);
    load_level(world, &layout, index)
}

/// Put the player back at the start of the level, alive and at rest.
///
/// Enemies, gems, score and the clock are left as they are.
pub fn start_new_life(world: &mut World) {
    let start = world.resource::<LevelState>().start();
    let mut players = world.query::<(
        &mut Player,
        &mut RigidBody,
        &mut MapPosition,
        &BoxCollider,
        &mut Animation,
    )>();
    for (mut player, mut body, mut position, collider, mut anim) in players.iter_mut(world) {
        position.pos = start;
        body.set_velocity(Vec2::ZERO);
        body.unfreeze();
        player.reset(collider.bounds(start).bottom());
        anim.play("Player/Idle");
    }
    world.resource_mut::<LevelState>().revive_player();
    info!("new life at {:?}", start);
}

/// Perform `action` on the world.
///
/// Level changes go through the [`LevelPlaylist`]; without one they are
/// skipped.
pub fn apply_continue_action(world: &mut World, action: ContinueAction) -> Result<(), LevelError> {
    match action {
        ContinueAction::None => Ok(()),
        ContinueAction::NewLife => {
            start_new_life(world);
            Ok(())
        }
        ContinueAction::NextLevel | ContinueAction::ReloadLevel => {
            let Some(mut playlist) = world.get_resource_mut::<LevelPlaylist>() else {
                warn!("no level playlist, ignoring {:?}", action);
                return Ok(());
            };
            if action == ContinueAction::NextLevel {
                playlist.advance();
            }
            let index = playlist.current_index();
            let layout = playlist.current().clone();
            load_level(world, &layout, index)
        }
    }
}

/// The per-tick schedule.
///
/// Gameplay runs as one chain so each system sees the effects of the ones
/// before it, including observers triggered through commands. Audio
/// forwarding runs last.
pub fn build_update_schedule() -> Schedule {
    let mut update = Schedule::default();
    update.add_systems(
        (
            update_input_state,
            player_controller,
            update_gems.run_if(round_is_active),
            enemy_patrol.run_if(round_is_active),
            enemy_contact.run_if(round_is_active),
            exit_check.run_if(round_is_active),
            round_clock,
            select_player_animation,
            select_enemy_animation,
            animation,
            // audio systems must be together
            (
                update_bevy_audio_cmds,
                forward_audio_cmds.run_if(resource_exists::<AudioBridge>),
                poll_audio_messages.run_if(resource_exists::<AudioBridge>),
                update_bevy_audio_messages,
            )
                .chain(),
        )
            .chain(),
    );
    update
}

/// Advance the world by one tick of `dt` seconds with `input`.
///
/// The continue action is decided from the round state at the start of the
/// tick and performed after the schedule ran when the jump input was freshly
/// pressed. Returns the action performed.
pub fn step(
    world: &mut World,
    schedule: &mut Schedule,
    dt: f32,
    input: TickInput,
) -> Result<ContinueAction, LevelError> {
    let pending = world
        .get_resource::<LevelState>()
        .map_or(ContinueAction::None, continue_action);

    world.insert_resource(input);
    update_world_time(world, dt);
    schedule.run(world);
    world.clear_trackers();

    if pending != ContinueAction::None && world.resource::<InputState>().jump_pressed() {
        apply_continue_action(world, pending)?;
        return Ok(pending);
    }
    Ok(ContinueAction::None)
}
