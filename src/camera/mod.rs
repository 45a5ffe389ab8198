//! Perspective camera used by the scene driver
//!
//! Right-handed, Y up. Yaw 0 looks down -Z; positive yaw turns left.
//! Screen space is in pixels with the origin at the bottom-left, so a
//! point straight ahead lands on the viewport centre.

use glam::{EulerRot, Mat4, Quat, Vec2, Vec3};

use crate::mapping::{CameraPose, Projector, Viewport};

#[derive(Debug, Clone, PartialEq)]
pub struct PerspectiveCamera {
    pub position: Vec3,
    /// Radians
    pub yaw: f32,
    /// Radians
    pub pitch: f32,
    /// Vertical field of view in radians
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
    pub viewport: Viewport,
}

impl PerspectiveCamera {
    pub fn new(position: Vec3, viewport: Viewport) -> Self {
        Self {
            position,
            yaw: 0.0,
            pitch: 0.0,
            fov_y: 60f32.to_radians(),
            near: 0.1,
            far: 1000.0,
            viewport,
        }
    }

    pub fn with_yaw_degrees(mut self, yaw: f32) -> Self {
        self.yaw = yaw.to_radians();
        self
    }

    pub fn with_pitch_degrees(mut self, pitch: f32) -> Self {
        self.pitch = pitch.to_radians();
        self
    }

    pub fn with_fov_degrees(mut self, fov: f32) -> Self {
        self.fov_y = fov.to_radians();
        self
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }

    pub fn forward(&self) -> Vec3 {
        self.rotation() * Vec3::NEG_Z
    }

    pub fn pose(&self) -> CameraPose {
        CameraPose::new(self.position, self.forward())
    }

    /// Turn by `degrees` around the vertical axis
    pub fn turn(&mut self, degrees: f32) {
        self.yaw = (self.yaw + degrees.to_radians()).rem_euclid(std::f32::consts::TAU);
    }

    pub fn view_projection(&self) -> Mat4 {
        let aspect = self.viewport.width / self.viewport.height.max(1.0);
        let proj = Mat4::perspective_rh(self.fov_y, aspect, self.near, self.far);
        let view = Mat4::look_to_rh(self.position, self.forward(), Vec3::Y);
        proj * view
    }
}

impl Projector for PerspectiveCamera {
    /// Points behind the camera come out mirrored through the centre,
    /// since the perspective divide flips their sign.
    fn world_to_screen(&self, point: Vec3) -> Vec2 {
        let clip = self.view_projection() * point.extend(1.0);
        let ndc = Vec2::new(clip.x, clip.y) / clip.w;
        Vec2::new(
            (ndc.x + 1.0) * 0.5 * self.viewport.width,
            (ndc.y + 1.0) * 0.5 * self.viewport.height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> PerspectiveCamera {
        PerspectiveCamera::new(Vec3::ZERO, Viewport::new(1920.0, 1080.0))
    }

    #[test]
    fn test_forward_default() {
        let forward = camera().forward();
        assert!((forward - Vec3::NEG_Z).length() < 1e-6);
    }

    #[test]
    fn test_forward_after_turn() {
        let mut cam = camera();
        cam.turn(90.0);
        // Turning left from -Z faces -X
        assert!((cam.forward() - Vec3::NEG_X).length() < 1e-5, "{:?}", cam.forward());
    }

    #[test]
    fn test_point_ahead_projects_to_centre() {
        let screen = camera().world_to_screen(Vec3::new(0.0, 0.0, -10.0));
        assert!((screen - Vec2::new(960.0, 540.0)).length() < 1e-2, "{:?}", screen);
    }

    #[test]
    fn test_right_and_up() {
        let cam = camera();
        let right = cam.world_to_screen(Vec3::new(2.0, 0.0, -10.0));
        let up = cam.world_to_screen(Vec3::new(0.0, 2.0, -10.0));
        assert!(right.x > 960.0);
        assert!(up.y > 540.0);
    }

    #[test]
    fn test_behind_is_mirrored() {
        let cam = camera();
        // Behind and to the right reads as left of centre
        let screen = cam.world_to_screen(Vec3::new(2.0, 0.0, 10.0));
        assert!(screen.x < 960.0, "{:?}", screen);
        assert!(cam.pose().is_behind(Vec3::new(2.0, 0.0, 10.0)));
    }
}
