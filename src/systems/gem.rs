//! Gem systems.
//!
//! [`update_gems`] bobs every gem on a sine wave and triggers
//! [`GemCollectedEvent`] for each gem whose bounding circle touches the
//! player's box.
use bevy_ecs::prelude::*;

use crate::components::boxcollider::BoxCollider;
use crate::components::gem::Gem;
use crate::components::mapposition::MapPosition;
use crate::components::player::Player;
use crate::events::gameplay::GemCollectedEvent;
use crate::math::Circle;
use crate::resources::gameconfig::GameConfig;
use crate::resources::tilegrid::{TileGrid, TileSource};
use crate::resources::worldtime::WorldTime;

const BOUNCE_HEIGHT: f32 = 0.18;
const BOUNCE_RATE: f32 = 3.0;
const BOUNCE_SYNC: f32 = -0.75;

/// Vertical offset of a gem at `elapsed` seconds.
///
/// Neighbouring gems are phase-shifted by their x coordinate so a row of
/// gems moves as a wave.
pub fn bounce_offset(elapsed: f32, base_x: f32, gem_height: f32) -> f32 {
    let t = elapsed * BOUNCE_RATE + base_x * BOUNCE_SYNC;
    t.sin() * BOUNCE_HEIGHT * gem_height
}

/// Pickup circle of a gem at its current position.
pub fn bounding_circle(gem: &Gem, tile_width: i32) -> Circle {
    Circle::new(gem.position(), tile_width as f32 / 3.0)
}

pub fn update_gems(
    mut gems: Query<(Entity, &mut Gem, &mut MapPosition), Without<Player>>,
    player: Query<(&MapPosition, &BoxCollider), With<Player>>,
    grid: Res<TileGrid>,
    config: Res<GameConfig>,
    time: Res<WorldTime>,
    mut commands: Commands,
) {
    let player_bounds = player
        .single()
        .ok()
        .map(|(position, collider)| collider.bounds(position.pos));
    let tile_width = grid.tile_size().width;

    for (entity, mut gem, mut position) in gems.iter_mut() {
        gem.bounce = bounce_offset(time.elapsed, gem.base_position.x, config.round.gem_height);
        position.pos = gem.position();

        let circle = bounding_circle(&gem, tile_width);
        if player_bounds.is_some_and(|bounds| circle.intersects(&bounds)) {
            commands.trigger(GemCollectedEvent { gem: entity });
        }
    }
}
