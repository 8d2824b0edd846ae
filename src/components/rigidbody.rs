//! Kinematic body component.
//!
//! The [`RigidBody`] component stores the velocity of a controller-driven
//! entity. Controllers integrate it into [`MapPosition`](super::mapposition::MapPosition)
//! themselves; there is no generic force accumulation.
//!
//! The `frozen` flag disables integration entirely, used once the player has
//! reached the exit.

use bevy_ecs::prelude::Component;
use glam::Vec2;

/// Kinematic body storing velocity in world units per second.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct RigidBody {
    /// Current velocity in world units per second. Positive y points down.
    pub velocity: Vec2,
    /// When true, controllers skip all physics for this entity.
    pub frozen: bool,
}

impl RigidBody {
    /// Create a RigidBody with zero velocity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the velocity of the RigidBody.
    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    /// Zero the velocity on the axes flagged `true`.
    pub fn stop_axes(&mut self, x: bool, y: bool) {
        if x {
            self.velocity.x = 0.0;
        }
        if y {
            self.velocity.y = 0.0;
        }
    }

    /// Freeze the rigid body, preventing controllers from updating it.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    /// Unfreeze the rigid body.
    pub fn unfreeze(&mut self) {
        self.frozen = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_rigidbody_new() {
        let rb = RigidBody::new();
        assert!(approx_eq(rb.velocity.x, 0.0));
        assert!(approx_eq(rb.velocity.y, 0.0));
        assert!(!rb.frozen);
    }

    #[test]
    fn test_stop_axes() {
        let mut rb = RigidBody::new();
        rb.set_velocity(Vec2::new(3.0, -4.0));
        rb.stop_axes(true, false);
        assert!(approx_eq(rb.velocity.x, 0.0));
        assert!(approx_eq(rb.velocity.y, -4.0));
        rb.stop_axes(false, true);
        assert_eq!(rb.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_freeze_unfreeze() {
        let mut rb = RigidBody::new();
        rb.freeze();
        assert!(rb.frozen);
        rb.unfreeze();
        assert!(!rb.frozen);
    }
}
