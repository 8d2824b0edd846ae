//! Level-owned entity marker component.
//!
//! Everything spawned by [`load_level`](crate::game::load_level) carries
//! [`LevelEntity`]. Loading another level (or reloading the current one)
//! despawns every entity with the marker; observers and other long-lived
//! entities never get it.

use bevy_ecs::prelude::Component;

/// Tag component for entities that belong to the loaded level.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct LevelEntity;
