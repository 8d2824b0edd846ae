//! Animation resource registry.
//!
//! This module provides a minimal store for animation definitions that can be
//! reused by multiple entities. Systems look up an animation by a string key
//! (`Player/Run`, `MonsterA/Idle`, ...) and drive playback from the immutable
//! parameters stored here.

use bevy_ecs::prelude::Resource;
use rustc_hash::FxHashMap;

use crate::level::MonsterKind;

/// Central registry of reusable animation definitions keyed by string IDs.
#[derive(Resource, Debug, Clone, Default)]
pub struct AnimationStore {
    pub animations: FxHashMap<String, AnimationResource>,
}

/// Immutable data describing a sprite-strip animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationResource {
    /// Seconds each frame stays on screen.
    pub frame_time: f32,
    /// Number of frames in the strip.
    pub frame_count: usize,
    /// Whether the animation restarts after the last frame.
    pub looped: bool,
}

impl AnimationStore {
    pub fn insert(&mut self, key: impl Into<String>, frame_time: f32, frame_count: usize, looped: bool) {
        self.animations.insert(
            key.into(),
            AnimationResource {
                frame_time,
                frame_count,
                looped,
            },
        );
    }

    pub fn get(&self, key: &str) -> Option<&AnimationResource> {
        self.animations.get(key)
    }

    /// Definitions for the player and every monster sprite set.
    pub fn with_defaults() -> Self {
        let mut store = Self::default();
        store.insert("Player/Idle", 0.1, 1, true);
        store.insert("Player/Run", 0.1, 10, true);
        store.insert("Player/Jump", 0.1, 11, false);
        store.insert("Player/Celebrate", 0.1, 11, false);
        store.insert("Player/Die", 0.1, 12, false);
        for kind in MonsterKind::ALL {
            let set = kind.sprite_set();
            store.insert(format!("{set}/Run"), 0.1, 10, true);
            store.insert(format!("{set}/Idle"), 0.15, 11, true);
        }
        store
    }
}
