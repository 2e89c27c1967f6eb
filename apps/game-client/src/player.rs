//! Player movement and boost state

use game_types::{movement, HeightField};
use glam::{Mat4, Vec3};
use renderer::math::{lerp_angle, wrap_angle};

use crate::input::KeyState;

#[derive(Debug, Clone)]
pub struct Player {
    pub position: Vec3,
    /// Model yaw in radians; 0 faces +Z
    pub yaw: f32,
    moving: bool,
    boost_remaining: f32,
}

impl Player {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            yaw: 0.0,
            moving: false,
            boost_remaining: 0.0,
        }
    }

    /// Back to `position` at rest, boost cleared
    pub fn reset(&mut self, position: Vec3) {
        *self = Self::new(position);
    }

    pub fn is_moving(&self) -> bool {
        self.moving
    }

    /// Record whether the player moved this tick; returns true when that changed
    pub fn set_moving(&mut self, moving: bool) -> bool {
        let changed = self.moving != moving;
        self.moving = moving;
        changed
    }

    pub fn is_boosting(&self) -> bool {
        self.boost_remaining > 0.0
    }

    pub fn boost_remaining(&self) -> f32 {
        self.boost_remaining
    }

    /// Start a boost unless one is already running
    pub fn start_boost(&mut self, duration: f32) -> bool {
        if self.is_boosting() {
            return false;
        }
        self.boost_remaining = duration;
        true
    }

    /// Count the boost down; returns true on the tick it runs out
    pub fn tick_boost(&mut self, dt: f32) -> bool {
        if !self.is_boosting() {
            return false;
        }
        self.boost_remaining -= dt;
        if self.boost_remaining <= 0.0 {
            self.boost_remaining = 0.0;
            return true;
        }
        false
    }

    /// Unit movement direction on the XZ plane from held keys, relative to
    /// the camera's facing. Zero when no direction is held.
    pub fn move_direction(keys: &KeyState, camera_front: Vec3, camera_right: Vec3) -> Vec3 {
        let forward = Vec3::new(camera_front.x, 0.0, camera_front.z).normalize_or_zero();
        let right = Vec3::new(camera_right.x, 0.0, camera_right.z).normalize_or_zero();
        (forward * keys.forward_axis() + right * keys.strafe_axis()).normalize_or_zero()
    }

    /// Move along `direction`, stay inside the `extent` grid and stand on the ground
    pub fn step(&mut self, direction: Vec3, distance: f32, heights: &HeightField, extent: (u32, u32)) {
        let max_x = extent.0.saturating_sub(1) as f32;
        let max_z = extent.1.saturating_sub(1) as f32;

        let mut next = self.position + direction * distance;
        next.x = next.x.clamp(0.0, max_x);
        next.z = next.z.clamp(0.0, max_z);
        next.y = heights.height_at(next.x, next.z);
        self.position = next;
    }

    /// Blend the model yaw toward the heading of `direction`
    pub fn turn_toward(&mut self, direction: Vec3, smoothing: f32) {
        if direction == Vec3::ZERO {
            return;
        }
        let heading = libm::atan2f(direction.z, direction.x);
        let target = -(heading + movement::MODEL_YAW_OFFSET_DEGREES.to_radians());
        self.yaw = lerp_angle(self.yaw, target, smoothing);
    }

    /// Continuous boost spin
    pub fn spin(&mut self, rate_degrees: f32, dt: f32) {
        self.yaw = wrap_angle(self.yaw + rate_degrees.to_radians() * dt);
    }

    pub fn transform(&self) -> Mat4 {
        Mat4::from_translation(self.position) * Mat4::from_rotation_y(self.yaw)
    }
}
