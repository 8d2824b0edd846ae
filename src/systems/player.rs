//! Kinematic player controller.
//!
//! Each tick integrates input, gravity and the jump curve into the player's
//! velocity, snaps the new position to whole units and resolves it against
//! the tile grid with [`resolve_collisions`].
//!
//! The maths lives in [`do_jump`] and [`apply_physics`] so it can be driven
//! without a `World`; [`player_controller`] is the system wrapper that reads
//! input and round state and requests the jump sound.

use bevy_ecs::prelude::*;
use glam::Vec2;
use log::debug;

use crate::components::boxcollider::BoxCollider;
use crate::components::mapposition::MapPosition;
use crate::components::player::{FaceDirection, Player};
use crate::components::rigidbody::RigidBody;
use crate::events::audio::{AudioCmd, sounds};
use crate::resources::gameconfig::{GameConfig, PlayerTuning};
use crate::resources::input::InputState;
use crate::resources::levelstate::LevelState;
use crate::resources::tilegrid::{TileGrid, TileSource};
use crate::resources::worldtime::WorldTime;
use crate::systems::collision::{Resolution, resolve_collisions};

/// Result of one physics step.
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicsStep {
    /// A new jump started this tick.
    pub jump_started: bool,
    pub resolution: Resolution,
}

/// Apply the jump curve to `velocity_y`.
///
/// Returns the new vertical velocity and whether a jump started this tick.
/// A jump starts on a fresh press while grounded and continues while the
/// input stays held, until `max_jump_time` has elapsed.
pub fn do_jump(player: &mut Player, velocity_y: f32, tuning: &PlayerTuning, dt: f32) -> (f32, bool) {
    let mut velocity_y = velocity_y;
    let mut started = false;

    if player.is_jumping {
        if (!player.was_jumping && player.on_ground) || player.jump_time > 0.0 {
            started = player.jump_time == 0.0;
            player.jump_time += dt;
        }

        if 0.0 < player.jump_time && player.jump_time <= tuning.max_jump_time {
            // Override, not add: the curve owns vertical velocity during the ascent.
            velocity_y = tuning.jump_launch_velocity
                * (1.0 - (player.jump_time / tuning.max_jump_time).powf(tuning.jump_control_power));
        } else {
            player.jump_time = 0.0;
        }
    } else {
        player.jump_time = 0.0;
    }

    player.was_jumping = player.is_jumping;
    (velocity_y, started)
}

/// Integrate one tick of player movement and resolve it against `grid`.
///
/// Uses the intent already stored in `player.movement` and
/// `player.is_jumping`. Velocity on an axis is zeroed when the position on
/// that axis did not change over the tick or was corrected by the resolver.
pub fn apply_physics<G: TileSource + ?Sized>(
    player: &mut Player,
    body: &mut RigidBody,
    position: &mut MapPosition,
    collider: &BoxCollider,
    tuning: &PlayerTuning,
    grid: &G,
    dt: f32,
) -> PhysicsStep {
    let previous_position = position.pos;
    let mut velocity = body.velocity;

    velocity.x += player.movement * tuning.move_acceleration * dt;
    velocity.y = (velocity.y + tuning.gravity * dt).clamp(-tuning.max_fall_speed, tuning.max_fall_speed);
    let (velocity_y, jump_started) = do_jump(player, velocity.y, tuning, dt);
    velocity.y = velocity_y;

    // Drag uses the ground state of the previous tick.
    velocity.x *= if player.on_ground {
        tuning.ground_drag
    } else {
        tuning.air_drag
    };
    velocity.x = velocity.x.clamp(-tuning.max_move_speed, tuning.max_move_speed);

    let moved = position.pos + velocity * dt;
    position.pos = Vec2::new(moved.x.round_ties_even(), moved.y.round_ties_even());

    let resolution = resolve_collisions(collider.bounds(position.pos), player.previous_bottom, grid);
    position.pos += resolution.correction.as_vec2();
    player.on_ground = resolution.on_ground;
    player.previous_bottom = resolution.bounds.bottom();

    body.velocity = velocity;
    body.stop_axes(
        position.pos.x == previous_position.x || resolution.correction.x != 0,
        position.pos.y == previous_position.y || resolution.correction.y != 0,
    );

    if body.velocity.x > 0.0 {
        player.facing = FaceDirection::Right;
    } else if body.velocity.x < 0.0 {
        player.facing = FaceDirection::Left;
    }

    PhysicsStep {
        jump_started,
        resolution,
    }
}

/// Drive the player from input while the round is active.
///
/// Once the player is dead or the clock has run out, physics keeps running
/// with no input so the body still falls. A frozen body (exit reached) is
/// left alone.
pub fn player_controller(
    mut query: Query<(&mut Player, &mut RigidBody, &mut MapPosition, &BoxCollider)>,
    input: Res<InputState>,
    level: Res<LevelState>,
    grid: Res<TileGrid>,
    config: Res<GameConfig>,
    time: Res<WorldTime>,
    mut audio: MessageWriter<AudioCmd>,
) {
    for (mut player, mut body, mut position, collider) in query.iter_mut() {
        if body.frozen {
            continue;
        }

        if level.is_active() {
            player.movement = input.horizontal_axis();
            player.is_jumping = input.jump_held();
        } else {
            player.clear_intent();
        }

        let step = apply_physics(
            &mut player,
            &mut body,
            &mut position,
            collider,
            &config.player,
            &*grid,
            time.delta,
        );

        if step.jump_started {
            debug!("player jump at {:?}", position.pos);
            audio.write(AudioCmd::fx(sounds::PLAYER_JUMP));
        }

        player.clear_intent();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Rect;
    use crate::resources::tilegrid::{Tile, TileSize};

    const DT: f32 = 1.0 / 60.0;

    /// 8x6 room with a floor at row 5 and a pillar at (5, 4). The grid edges
    /// act as walls.
    fn room() -> TileGrid {
        let (width, height) = (8, 6);
        let mut tiles = vec![Tile::Passable; (width * height) as usize];
        for x in 0..width {
            tiles[(5 * width + x) as usize] = Tile::Impassable;
        }
        tiles[(4 * width + 5) as usize] = Tile::Impassable;
        TileGrid::new(width, height, tiles, TileSize::default()).unwrap()
    }

    fn standing_player(x: f32) -> (Player, RigidBody, MapPosition, BoxCollider) {
        let collider = BoxCollider::for_frame(64, 64, 0.4, 0.8);
        // Floor top is at y = 160.
        let position = MapPosition::new(x, 160.0);
        let player = Player::new(collider.bounds(position.pos).bottom());
        (player, RigidBody::new(), position, collider)
    }

    #[test]
    fn test_jump_curve_rises_and_flattens() {
        let tuning = PlayerTuning::default();
        let mut player = Player::new(0);
        player.on_ground = true;
        player.is_jumping = true;

        let mut previous = f32::NEG_INFINITY;
        let mut elapsed = 0.0;
        let mut first = true;
        while elapsed + DT < tuning.max_jump_time - 1e-4 {
            let (vy, started) = do_jump(&mut player, 0.0, &tuning, DT);
            assert_eq!(started, first);
            first = false;
            player.on_ground = false;
            elapsed += DT;
            assert!(vy < 0.0, "ascent must be upward, got {vy} at {elapsed}");
            assert!(vy > previous, "speed must shrink towards the apex");
            previous = vy;
        }
    }

    #[test]
    fn test_jump_needs_fresh_press_on_ground() {
        let tuning = PlayerTuning::default();
        let mut player = Player::new(0);
        player.is_jumping = true;
        player.was_jumping = true;
        player.on_ground = true;
        let (vy, started) = do_jump(&mut player, 12.0, &tuning, DT);
        assert!(!started);
        assert_eq!(vy, 12.0);

        let mut airborne = Player::new(0);
        airborne.is_jumping = true;
        let (_, started) = do_jump(&mut airborne, 12.0, &tuning, DT);
        assert!(!started);
    }

    #[test]
    fn test_jump_ends_after_max_time_and_on_release() {
        let tuning = PlayerTuning::default();
        let mut player = Player::new(0);
        player.on_ground = true;
        player.is_jumping = true;
        do_jump(&mut player, 0.0, &tuning, DT);
        assert!(player.jump_time > 0.0);

        player.is_jumping = false;
        let (vy, _) = do_jump(&mut player, 5.0, &tuning, DT);
        assert_eq!(player.jump_time, 0.0);
        assert_eq!(vy, 5.0);

        player.on_ground = true;
        player.is_jumping = true;
        do_jump(&mut player, 0.0, &tuning, tuning.max_jump_time + 0.01);
        assert_eq!(player.jump_time, 0.0);
    }

    #[test]
    fn test_standing_player_stays_grounded() {
        let grid = room();
        let tuning = PlayerTuning::default();
        let (mut player, mut body, mut position, collider) = standing_player(60.0);
        for _ in 0..10 {
            apply_physics(&mut player, &mut body, &mut position, &collider, &tuning, &grid, DT);
        }
        assert!(player.on_ground);
        assert_eq!(position.pos, Vec2::new(60.0, 160.0));
        assert_eq!(body.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_running_into_wall_stops_at_boundary() {
        let grid = room();
        let tuning = PlayerTuning::default();
        let (mut player, mut body, mut position, collider) = standing_player(180.0);
        player.on_ground = true;
        // Pillar left edge is x = 200; the box is 8 units to the left of it.
        assert_eq!(collider.bounds(position.pos).right(), 192);

        body.velocity.x = tuning.max_move_speed;
        player.movement = 1.0;
        apply_physics(&mut player, &mut body, &mut position, &collider, &tuning, &grid, DT);

        let bounds = collider.bounds(position.pos);
        assert_eq!(bounds.right(), 200);
        assert_eq!(body.velocity.x, 0.0);
        assert!(player.on_ground);
    }

    #[test]
    fn test_falling_player_lands_on_floor() {
        let grid = room();
        let tuning = PlayerTuning::default();
        let collider = BoxCollider::for_frame(64, 64, 0.4, 0.8);
        let mut position = MapPosition::new(60.0, 100.0);
        let mut player = Player::new(collider.bounds(position.pos).bottom());
        let mut body = RigidBody::new();

        for _ in 0..60 {
            apply_physics(&mut player, &mut body, &mut position, &collider, &tuning, &grid, DT);
        }
        assert!(player.on_ground);
        assert_eq!(position.pos.y, 160.0);
        assert_eq!(body.velocity.y, 0.0);
        assert_eq!(player.previous_bottom, 160);
    }

    #[test]
    fn test_facing_follows_velocity() {
        let grid = room();
        let tuning = PlayerTuning::default();
        let (mut player, mut body, mut position, collider) = standing_player(100.0);
        player.movement = 1.0;
        apply_physics(&mut player, &mut body, &mut position, &collider, &tuning, &grid, DT);
        assert_eq!(player.facing, FaceDirection::Right);
        player.movement = -1.0;
        apply_physics(&mut player, &mut body, &mut position, &collider, &tuning, &grid, DT);
        assert_eq!(player.facing, FaceDirection::Left);
    }

    #[test]
    fn test_bounds_match_collider() {
        let collider = BoxCollider::for_frame(64, 64, 0.4, 0.8);
        assert_eq!(collider.bounds(Vec2::new(60.0, 160.0)), Rect::new(47, 109, 25, 51));
    }
}
