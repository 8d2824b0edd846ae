//! Enemy patrol AI.
//!
//! Enemies walk along the row they stand on and wait before turning around
//! whenever the next step would hit a wall at head height or walk off a
//! ledge at foot height. They only probe the grid with point lookups and
//! never go through the collision resolver.

use bevy_ecs::prelude::*;
use glam::IVec2;
use log::debug;

use crate::components::boxcollider::BoxCollider;
use crate::components::enemy::{Enemy, PatrolState};
use crate::components::mapposition::MapPosition;
use crate::resources::gameconfig::{GameConfig, PatrolTuning};
use crate::resources::tilegrid::{Tile, TileGrid, TileSource};
use crate::resources::worldtime::WorldTime;

/// What a patrol step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatrolOutcome {
    Moved,
    /// A hazard lies ahead; the enemy stopped and started waiting.
    StartedWaiting,
    Waiting,
    /// The wait ran out and the enemy turned around.
    Turned,
}

/// Cell the enemy is about to step into, at foot level.
///
/// The probe sits `half_width` units ahead of the anchor in the walking
/// direction; the row is the one under the enemy's feet.
pub fn cell_ahead<G: TileSource + ?Sized>(enemy: &Enemy, position: &MapPosition, half_width: i32, grid: &G) -> IVec2 {
    let size = grid.tile_size();
    let lead_x = position.pos.x + (half_width * enemy.direction.sign()) as f32;
    IVec2::new(
        (lead_x / size.width as f32).floor() as i32,
        (position.pos.y / size.height as f32).floor() as i32,
    )
}

/// Advance one enemy by `dt` seconds.
pub fn patrol_step<G: TileSource + ?Sized>(
    enemy: &mut Enemy,
    position: &mut MapPosition,
    half_width: i32,
    tuning: &PatrolTuning,
    grid: &G,
    dt: f32,
) -> PatrolOutcome {
    if let PatrolState::Waiting(remaining) = enemy.state {
        let remaining = (remaining - dt).max(0.0);
        if remaining <= 0.0 {
            enemy.direction = enemy.direction.flipped();
            enemy.state = PatrolState::Walking;
            return PatrolOutcome::Turned;
        }
        enemy.state = PatrolState::Waiting(remaining);
        return PatrolOutcome::Waiting;
    }

    let ahead = cell_ahead(enemy, position, half_width, grid);
    let wall = grid.classification(ahead.x, ahead.y - 1) == Tile::Impassable;
    let drop = grid.classification(ahead.x, ahead.y) == Tile::Passable;
    if wall || drop {
        enemy.state = PatrolState::Waiting(tuning.max_wait_time);
        return PatrolOutcome::StartedWaiting;
    }

    position.pos.x += enemy.direction.sign() as f32 * tuning.move_speed * dt;
    PatrolOutcome::Moved
}

/// Move every enemy along its patrol.
pub fn enemy_patrol(
    mut query: Query<(Entity, &mut Enemy, &mut MapPosition, &BoxCollider)>,
    grid: Res<TileGrid>,
    config: Res<GameConfig>,
    time: Res<WorldTime>,
) {
    for (entity, mut enemy, mut position, collider) in query.iter_mut() {
        let half_width = collider.local_bounds.width / 2;
        match patrol_step(&mut enemy, &mut position, half_width, &config.enemy, &*grid, time.delta) {
            PatrolOutcome::StartedWaiting => {
                debug!("enemy {:?} stops at {:?}", entity, position.pos);
            }
            PatrolOutcome::Turned => {
                debug!("enemy {:?} turns {:?}", entity, enemy.direction);
            }
            PatrolOutcome::Moved | PatrolOutcome::Waiting => {}
        }
    }
}
