//! Tilerunner library.
//!
//! A tile-based platformer simulation: a player runs and jumps through a
//! grid of solid, one-way and open tiles, collects gems, avoids patrolling
//! enemies and races the clock to the exit. This module exposes the ECS
//! components, resources, systems, and events for the headless runner and
//! for integration tests.

pub mod components;
pub mod events;
pub mod game;
pub mod level;
pub mod math;
pub mod resources;
pub mod systems;
