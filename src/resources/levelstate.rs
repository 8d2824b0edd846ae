//! Round state of the loaded level.
//!
//! [`LevelState`] is the level context shared by gameplay systems: the clock,
//! the score and whether the player is still alive or has reached the exit.
//! Systems read it through the accessors; the mutating methods are used by
//! the round systems and the gameplay observers.

use bevy_ecs::prelude::Resource;
use glam::{IVec2, Vec2};

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct LevelState {
    time_remaining: f32,
    score: u32,
    reached_exit: bool,
    player_alive: bool,
    start: Vec2,
    exit: IVec2,
    level_index: usize,
}

impl LevelState {
    pub fn new(level_index: usize, time_limit: f32, start: Vec2, exit: IVec2) -> Self {
        Self {
            time_remaining: time_limit.max(0.0),
            score: 0,
            reached_exit: false,
            player_alive: true,
            start,
            exit,
            level_index,
        }
    }

    pub fn time_remaining(&self) -> f32 {
        self.time_remaining
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn reached_exit(&self) -> bool {
        self.reached_exit
    }

    pub fn has_player_died(&self) -> bool {
        !self.player_alive
    }

    /// The clock has run out, either naturally or through the exit bonus.
    pub fn is_round_over(&self) -> bool {
        self.time_remaining <= 0.0
    }

    /// Player input and enemy patrols only run while the round is active.
    pub fn is_active(&self) -> bool {
        self.player_alive && !self.reached_exit && !self.is_round_over()
    }

    /// Anchor of the player at the start of a life.
    pub fn start(&self) -> Vec2 {
        self.start
    }

    /// Point the player box must contain to finish the level.
    pub fn exit(&self) -> IVec2 {
        self.exit
    }

    pub fn level_index(&self) -> usize {
        self.level_index
    }

    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    pub fn kill_player(&mut self) {
        self.player_alive = false;
    }

    pub fn revive_player(&mut self) {
        self.player_alive = true;
    }

    pub fn mark_exit_reached(&mut self) {
        self.reached_exit = true;
    }

    /// Advance the round clock by `dt`.
    ///
    /// While the round is active time simply runs down; it stands still while
    /// the player is dead. Once the exit is reached the
    /// remaining time is drained at `round(dt * 100)` seconds per tick, never
    /// more than `ceil(time_remaining)`, and each drained second is worth
    /// `points_per_second`.
    ///
    /// Returns the number of seconds converted to score.
    pub fn tick_clock(&mut self, dt: f32, points_per_second: u32) -> u32 {
        if self.is_round_over() {
            self.time_remaining = 0.0;
            return 0;
        }
        if !self.reached_exit {
            if !self.player_alive {
                return 0;
            }
            self.time_remaining = (self.time_remaining - dt).max(0.0);
            return 0;
        }
        let step = (dt * 100.0).round_ties_even().max(0.0) as u32;
        let seconds = step.min(self.time_remaining.ceil() as u32);
        self.time_remaining = (self.time_remaining - seconds as f32).max(0.0);
        self.add_score(seconds.saturating_mul(points_per_second));
        seconds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn state(time_limit: f32) -> LevelState {
        LevelState::new(0, time_limit, Vec2::new(60.0, 64.0), IVec2::new(100, 48))
    }

    #[test]
    fn test_new_state_is_active() {
        let s = state(120.0);
        assert!(s.is_active());
        assert!(!s.is_round_over());
        assert!(!s.has_player_died());
        assert_eq!(s.score(), 0);
    }

    #[test]
    fn test_clock_runs_down_and_stops_at_zero() {
        let mut s = state(0.05);
        s.tick_clock(1.0 / 60.0, 5);
        assert!(approx_eq(s.time_remaining(), 0.05 - 1.0 / 60.0));
        for _ in 0..10 {
            s.tick_clock(1.0 / 60.0, 5);
        }
        assert_eq!(s.time_remaining(), 0.0);
        assert!(s.is_round_over());
        assert!(!s.is_active());
        assert_eq!(s.score(), 0);
    }

    #[test]
    fn test_exit_bonus_converts_time_to_score() {
        let mut s = state(3.5);
        s.mark_exit_reached();
        assert!(!s.is_active());
        // round(1/60 * 100) = 2 seconds per tick.
        assert_eq!(s.tick_clock(1.0 / 60.0, 5), 2);
        assert_eq!(s.score(), 10);
        assert!(approx_eq(s.time_remaining(), 1.5));
        // Capped at ceil(1.5) = 2, clamped to zero afterwards.
        assert_eq!(s.tick_clock(1.0 / 60.0, 5), 2);
        assert_eq!(s.time_remaining(), 0.0);
        assert_eq!(s.score(), 20);
        assert_eq!(s.tick_clock(1.0 / 60.0, 5), 0);
        assert_eq!(s.score(), 20);
    }

    #[test]
    fn test_clock_stops_while_player_is_dead() {
        let mut s = state(10.0);
        s.kill_player();
        assert!(s.has_player_died());
        assert!(!s.is_active());
        s.tick_clock(1.0, 5);
        assert!(approx_eq(s.time_remaining(), 10.0));
        s.revive_player();
        assert!(s.is_active());
        s.tick_clock(1.0, 5);
        assert!(approx_eq(s.time_remaining(), 9.0));
    }
}
