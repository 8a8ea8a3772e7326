//! Camera for 3D orbit view.

use glam::{Mat4, Vec3};

const MIN_DISTANCE: f32 = 1.0;
const MAX_DISTANCE: f32 = 500.0;
const PITCH_LIMIT: f32 = 1.5;

/// Orbit camera looking at the attractor.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Horizontal rotation angle in radians.
    pub yaw: f32,
    /// Vertical rotation angle in radians.
    pub pitch: f32,
    /// Distance from the target point.
    pub distance: f32,
    /// Point the camera orbits around.
    pub target: Vec3,
    /// Vertical field of view in radians.
    pub fov_y: f32,
}

impl Camera {
    /// Camera on the +Z axis, `distance` away from `target`.
    pub fn new(target: Vec3, distance: f32) -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            distance: distance.clamp(MIN_DISTANCE, MAX_DISTANCE),
            target,
            fov_y: 45.0_f32.to_radians(),
        }
    }

    /// Calculate the camera's world position.
    pub fn position(&self) -> Vec3 {
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();
        self.target + Vec3::new(x, y, z)
    }

    /// Calculate the view matrix for rendering.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    /// Projection * view for the given aspect ratio.
    pub fn view_proj(&self, aspect: f32) -> Mat4 {
        let far = (self.distance * 4.0).max(1000.0);
        Mat4::perspective_rh(self.fov_y, aspect, 0.1, far) * self.view_matrix()
    }

    /// Rotate by a mouse drag of `(dx, dy)` pixels.
    pub fn orbit(&mut self, dx: f32, dy: f32) {
        self.yaw -= dx * 0.005;
        self.pitch = (self.pitch + dy * 0.005).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Move closer (positive) or further away (negative), proportional to distance.
    pub fn zoom(&mut self, scroll: f32) {
        self.distance =
            (self.distance * (1.0 - scroll * 0.1)).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::ZERO, 70.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_looks_down_z() {
        let camera = Camera::default();
        let p = camera.position();
        assert!((p - Vec3::new(0.0, 0.0, 70.0)).length() < 1e-4);
    }

    #[test]
    fn test_orbit_clamps_pitch() {
        let mut camera = Camera::default();
        camera.orbit(0.0, 10_000.0);
        assert_eq!(camera.pitch, PITCH_LIMIT);
        camera.orbit(0.0, -100_000.0);
        assert_eq!(camera.pitch, -PITCH_LIMIT);
    }

    #[test]
    fn test_zoom_stays_in_range() {
        let mut camera = Camera::default();
        for _ in 0..200 {
            camera.zoom(1.0);
        }
        assert_eq!(camera.distance, MIN_DISTANCE);
        for _ in 0..200 {
            camera.zoom(-1.0);
        }
        assert_eq!(camera.distance, MAX_DISTANCE);
    }

    #[test]
    fn test_position_keeps_distance_from_target() {
        let mut camera = Camera::new(Vec3::new(0.0, 0.0, 25.0), 70.0);
        camera.orbit(123.0, -45.0);
        assert!((camera.position().distance(camera.target) - 70.0).abs() < 1e-3);
    }
}
