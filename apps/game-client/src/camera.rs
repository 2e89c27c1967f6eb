//! Orbit camera
//!
//! During play the camera sits on a sphere around the player and looks at
//! them, never dipping under the terrain. Free-look mode flies it around
//! with yaw/pitch steering instead.

use core::f32::consts::FRAC_PI_2;

use game_types::{camera, CameraConfig, HeightField};
use glam::{Mat4, Vec3};
use renderer::math::direction_from_angles;

/// Which rule derives the camera basis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraMode {
    /// Anchored to a target on a spherical offset
    #[default]
    OrbitFollow,
    /// Mouse steers yaw/pitch, keyboard flies
    FreeLook,
}

/// Free-fly movement directions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraMovement {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

#[derive(Debug, Clone)]
pub struct OrbitCamera {
    pub mode: CameraMode,
    position: Vec3,
    front: Vec3,
    up: Vec3,
    right: Vec3,
    world_up: Vec3,
    /// Degrees
    yaw: f32,
    /// Degrees, within +-PITCH_LIMIT
    pitch: f32,
    /// Vertical field of view in degrees
    zoom: f32,
    pub movement_speed: f32,
    pub mouse_sensitivity: f32,
    pub distance: f32,
    pub clearance: f32,
    default_zoom: f32,
    invert_pitch: bool,
    dynamic_offset_scale: f32,
    max_dynamic_offset: f32,
    dynamic_offset: f32,
    near: f32,
    far: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new(&CameraConfig::default())
    }
}

impl OrbitCamera {
    pub fn new(config: &CameraConfig) -> Self {
        let mut cam = Self {
            mode: CameraMode::OrbitFollow,
            position: Vec3::ZERO,
            front: Vec3::NEG_Z,
            up: Vec3::Y,
            right: Vec3::X,
            world_up: Vec3::Y,
            yaw: camera::YAW,
            pitch: camera::PITCH,
            zoom: config.max_zoom,
            movement_speed: config.movement_speed,
            mouse_sensitivity: config.mouse_sensitivity,
            distance: config.distance,
            clearance: config.clearance,
            default_zoom: config.max_zoom,
            invert_pitch: config.invert_pitch,
            dynamic_offset_scale: config.dynamic_offset_scale,
            max_dynamic_offset: config.max_dynamic_offset,
            dynamic_offset: 0.0,
            near: config.near,
            far: config.far,
        };
        cam.update_free_vectors();
        cam
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Look-at raise from the last vertical mouse motion
    pub fn dynamic_offset(&self) -> f32 {
        self.dynamic_offset
    }

    /// Switch mode. Entering free-look rebuilds the basis from yaw/pitch.
    pub fn set_mode(&mut self, mode: CameraMode) {
        if self.mode != mode {
            log::debug!("Camera mode {:?} -> {:?}", self.mode, mode);
        }
        self.mode = mode;
        if mode == CameraMode::FreeLook {
            self.update_free_vectors();
        }
    }

    /// Turn the camera by a mouse delta (already clamped by the caller)
    pub fn process_mouse_movement(&mut self, dx: f32, dy: f32) {
        self.dynamic_offset = (dy.abs() * self.dynamic_offset_scale).clamp(0.0, self.max_dynamic_offset);

        let dx = dx * self.mouse_sensitivity;
        let dy = dy * self.mouse_sensitivity;

        self.yaw -= dx;
        if self.invert_pitch {
            self.pitch += dy;
        } else {
            self.pitch -= dy;
        }
        self.pitch = self.pitch.clamp(-camera::PITCH_LIMIT, camera::PITCH_LIMIT);

        if self.mode == CameraMode::FreeLook {
            self.update_free_vectors();
        }
    }

    /// Scroll zoom, bounded to [1, default zoom]
    pub fn process_mouse_scroll(&mut self, dy: f32) {
        self.zoom = (self.zoom - dy).clamp(1.0, self.default_zoom);
    }

    /// Free-fly movement; ignored while following
    pub fn process_keyboard(&mut self, direction: CameraMovement, dt: f32) {
        if self.mode != CameraMode::FreeLook {
            return;
        }
        let velocity = self.movement_speed * dt;
        match direction {
            CameraMovement::Forward => self.position += self.front * velocity,
            CameraMovement::Backward => self.position -= self.front * velocity,
            CameraMovement::Left => self.position -= self.right * velocity,
            CameraMovement::Right => self.position += self.right * velocity,
            CameraMovement::Up => self.position += self.world_up * velocity,
            CameraMovement::Down => self.position -= self.world_up * velocity,
        }
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom - camera::ZOOM_SPEED).max(self.default_zoom - camera::ZOOM_RANGE);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom + camera::ZOOM_SPEED).min(self.default_zoom + camera::ZOOM_RANGE);
    }

    /// Step zoom back toward its default. Returns true while still off it.
    pub fn zoom_recover(&mut self) -> bool {
        let step = camera::ZOOM_SPEED / 2.0;
        if self.zoom < self.default_zoom {
            self.zoom = (self.zoom + step).min(self.default_zoom);
        } else if self.zoom > self.default_zoom {
            self.zoom = (self.zoom - step).max(self.default_zoom);
        }
        self.zoom != self.default_zoom
    }

    /// Place the camera and level it
    pub fn fix_view(&mut self, position: Vec3, yaw: f32) {
        self.position = position;
        self.yaw = yaw;
        self.pitch = 0.0;
        if self.mode == CameraMode::FreeLook {
            self.update_free_vectors();
        }
    }

    /// Re-anchor on `target`.
    ///
    /// The camera goes to `target + offset(yaw, pitch, distance)`, lifted so
    /// it stays `clearance` above the ground. When the unlifted position was
    /// at or under the ground, the look-at point is raised to at least
    /// `ground + dynamic_offset` so the view clears the slope.
    pub fn update_follow(&mut self, target: Vec3, heights: &HeightField) {
        let offset = direction_from_angles(self.yaw.to_radians(), self.pitch.to_radians()) * self.distance;
        let desired = target + offset;

        let ground = heights.height_at(desired.x, desired.z);
        let apply_y_offset = desired.y <= ground;

        self.position = desired;
        self.position.y = desired.y.max(ground + self.clearance);

        let mut look_at = target;
        if apply_y_offset {
            look_at.y = look_at.y.max(ground + self.dynamic_offset);
        }

        let front = (look_at - self.position).normalize_or(self.front);
        self.set_basis(front);
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh_gl(self.zoom.to_radians(), aspect, self.near, self.far)
    }

    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }

    // Free-look shares the orbit convention: the camera looks back along the
    // offset direction, so yaw 0 faces -Z.
    fn update_free_vectors(&mut self) {
        let front = -direction_from_angles(self.yaw.to_radians(), self.pitch.to_radians());
        self.set_basis(front);
    }

    fn set_basis(&mut self, front: Vec3) {
        let front = front.normalize_or(self.front);
        let right = front.cross(self.world_up).normalize_or_zero();
        // Looking straight up or down: any horizontal axis is perpendicular
        let right = if right == Vec3::ZERO {
            direction_from_angles(self.yaw.to_radians() + FRAC_PI_2, 0.0)
        } else {
            right
        };
        self.front = front;
        self.right = right;
        self.up = right.cross(front).normalize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    fn assert_orthonormal(cam: &OrbitCamera) {
        let (f, r, u) = (cam.front(), cam.right(), cam.up());
        assert!(approx(f.length(), 1.0) && approx(r.length(), 1.0) && approx(u.length(), 1.0));
        assert!(approx(f.dot(r), 0.0) && approx(f.dot(u), 0.0) && approx(r.dot(u), 0.0));
    }

    fn flat(level: u8) -> HeightField {
        HeightField::from_luma8(4, 4, &[level; 16], 10.0).unwrap()
    }

    #[test]
    fn default_free_look_faces_negative_z() {
        let mut cam = OrbitCamera::default();
        cam.set_mode(CameraMode::FreeLook);
        assert!((cam.front() - Vec3::NEG_Z).length() < 1e-5);
        assert!((cam.right() - Vec3::X).length() < 1e-5);
        assert_orthonormal(&cam);
    }

    #[test]
    fn follow_at_zero_yaw_looks_down_negative_z() {
        let mut cam = OrbitCamera::default();
        let ground = flat(0);
        cam.update_follow(Vec3::new(2.0, 5.0, 2.0), &ground);
        assert!((cam.position() - Vec3::new(2.0, 5.0, 12.0)).length() < 1e-4);
        assert!((cam.front() - Vec3::NEG_Z).length() < 1e-5);
        assert_orthonormal(&cam);
    }

    #[test]
    fn pitch_is_clamped() {
        let mut cam = OrbitCamera::default();
        cam.process_mouse_movement(0.0, -10_000.0);
        assert_eq!(cam.pitch(), camera::PITCH_LIMIT);
        cam.process_mouse_movement(0.0, 10_000.0);
        assert_eq!(cam.pitch(), -camera::PITCH_LIMIT);
    }

    #[test]
    fn inverted_pitch_flips_sign() {
        let config = CameraConfig {
            invert_pitch: true,
            ..CameraConfig::default()
        };
        let mut cam = OrbitCamera::new(&config);
        cam.process_mouse_movement(10.0, 10.0);
        assert!(approx(cam.pitch(), 1.0));
        assert!(approx(cam.yaw(), -1.0));
    }

    #[test]
    fn camera_stays_above_terrain() {
        let ground = flat(255);
        let mut cam = OrbitCamera::default();
        // Pitch the camera under the target
        cam.process_mouse_movement(0.0, 400.0);
        cam.update_follow(Vec3::new(1.0, 10.0, 1.0), &ground);
        let p = cam.position();
        assert!(p.y >= ground.height_at(p.x, p.z) + cam.clearance - 1e-4);
        assert_orthonormal(&cam);
    }

    #[test]
    fn dynamic_offset_tracks_vertical_motion() {
        let mut cam = OrbitCamera::default();
        cam.process_mouse_movement(0.0, 40.0);
        assert!(approx(cam.dynamic_offset(), 2.0));
        cam.process_mouse_movement(0.0, 1000.0);
        assert!(approx(cam.dynamic_offset(), 5.0));
        cam.process_mouse_movement(5.0, 0.0);
        assert_eq!(cam.dynamic_offset(), 0.0);
    }

    #[test]
    fn scroll_zoom_bounds() {
        let mut cam = OrbitCamera::default();
        cam.process_mouse_scroll(-10.0);
        assert_eq!(cam.zoom(), camera::ZOOM);
        cam.process_mouse_scroll(500.0);
        assert_eq!(cam.zoom(), 1.0);
    }

    #[test]
    fn zoom_steps_stay_in_range_and_recover() {
        let mut cam = OrbitCamera::default();
        for _ in 0..50 {
            cam.zoom_in();
        }
        assert_eq!(cam.zoom(), camera::ZOOM - camera::ZOOM_RANGE);
        for _ in 0..50 {
            cam.zoom_out();
        }
        assert_eq!(cam.zoom(), camera::ZOOM + camera::ZOOM_RANGE);
        for _ in 0..100 {
            cam.zoom_recover();
        }
        assert_eq!(cam.zoom(), camera::ZOOM);
        assert!(!cam.zoom_recover());
    }

    #[test]
    fn keyboard_only_moves_free_look() {
        let mut cam = OrbitCamera::default();
        cam.process_keyboard(CameraMovement::Forward, 1.0);
        assert_eq!(cam.position(), Vec3::ZERO);

        cam.set_mode(CameraMode::FreeLook);
        cam.process_keyboard(CameraMovement::Forward, 0.5);
        assert!((cam.position() - Vec3::new(0.0, 0.0, -10.0)).length() < 1e-4);
        cam.process_keyboard(CameraMovement::Up, 0.1);
        assert!(approx(cam.position().y, 2.0));
    }

    #[test]
    fn fix_view_levels_camera() {
        let mut cam = OrbitCamera::default();
        cam.set_mode(CameraMode::FreeLook);
        cam.process_mouse_movement(30.0, 30.0);
        cam.fix_view(Vec3::new(1.0, 2.0, 3.0), 90.0);
        assert_eq!(cam.pitch(), 0.0);
        assert_eq!(cam.position(), Vec3::new(1.0, 2.0, 3.0));
        assert!((cam.front() - Vec3::NEG_X).length() < 1e-5);
    }

    #[test]
    fn basis_survives_vertical_look() {
        let mut cam = OrbitCamera::default();
        // Zero distance: the camera is lifted straight above the target
        cam.distance = 0.0;
        cam.update_follow(Vec3::new(2.0, 0.0, 2.0), &flat(0));
        assert!((cam.front() - Vec3::NEG_Y).length() < 1e-5);
        assert!((cam.right() - Vec3::X).length() < 1e-5);
        assert_orthonormal(&cam);
    }
}
