//! ECS components for entities.
//!
//! This module groups all component types that can be attached to entities in
//! the game world: position, collision, motion, controller state and
//! animation playback.
//!
//! Submodules overview:
//! - [`animation`] – playback state of a named animation
//! - [`boxcollider`] – integer collision box anchored to a sprite frame
//! - [`enemy`] – patrol state of an enemy
//! - [`gem`] – bobbing collectable
//! - [`levelentity`] – marker for entities despawned when the level changes
//! - [`mapposition`] – world-space anchor (bottom centre) of an entity
//! - [`player`] – kinematic controller state and facing
//! - [`rigidbody`] – velocity of a controller-driven body

pub mod animation;
pub mod boxcollider;
pub mod enemy;
pub mod gem;
pub mod levelentity;
pub mod mapposition;
pub mod player;
pub mod rigidbody;
