//! Simulation systems.
//!
//! This module groups the ECS systems run once per tick by
//! [`crate::game::build_update_schedule`], plus the pure functions they are
//! built on.
//!
//! Submodules overview
//! - [`animation`] – pick and advance player and enemy animations
//! - [`audio`] – bridge with the audio thread (poll/update message queues)
//! - [`collision`] – resolve a box against the tile grid
//! - [`gem`] – bob gems and detect pickups
//! - [`input`] – fold the tick's input into [`crate::resources::input::InputState`]
//! - [`patrol`] – enemy walk, wait and turn
//! - [`player`] – player physics and jump curve
//! - [`round`] – enemy contact, exit detection and the round clock
//! - [`time`] – update simulation time and delta

pub mod animation;
pub mod audio;
pub mod collision;
pub mod gem;
pub mod input;
pub mod patrol;
pub mod player;
pub mod round;
pub mod time;
