use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

use crate::resources::animationstore::AnimationResource;

/// Playback state of a sprite animation.
///
/// The definition (frame time, frame count, looping) lives in the
/// [`AnimationStore`](crate::resources::animationstore::AnimationStore); this
/// component only holds which key is playing and how far along it is.
#[derive(Debug, Clone, Component, Serialize, Deserialize, PartialEq)]
pub struct Animation {
    pub animation_key: String,
    pub frame_index: usize,
    pub elapsed_time: f32,
}

impl Animation {
    pub fn new(animation_key: impl Into<String>) -> Self {
        Self {
            animation_key: animation_key.into(),
            frame_index: 0,
            elapsed_time: 0.0,
        }
    }

    /// Switch to `key`, restarting from the first frame.
    ///
    /// Does nothing if `key` is already playing.
    pub fn play(&mut self, key: &str) {
        if self.animation_key == key {
            return;
        }
        self.animation_key = key.to_string();
        self.frame_index = 0;
        self.elapsed_time = 0.0;
    }

    /// Advance playback by `dt` seconds.
    ///
    /// Steps one frame for each whole frame time elapsed, wrapping for looped
    /// animations and holding the last frame otherwise.
    pub fn advance(&mut self, definition: &AnimationResource, dt: f32) {
        if definition.frame_count == 0 || definition.frame_time <= 0.0 {
            return;
        }
        self.elapsed_time += dt;
        while self.elapsed_time > definition.frame_time {
            self.elapsed_time -= definition.frame_time;
            if definition.looped {
                self.frame_index = (self.frame_index + 1) % definition.frame_count;
            } else {
                self.frame_index = (self.frame_index + 1).min(definition.frame_count - 1);
            }
        }
    }

    /// Whether a non-looped animation has reached its last frame.
    pub fn is_finished(&self, definition: &AnimationResource) -> bool {
        !definition.looped && self.frame_index + 1 >= definition.frame_count
    }
}
