use glam::{Mat4, Vec3};

/// Perspective camera looking down -Z from `position`.
#[derive(Debug, Clone, PartialEq)]
pub struct PerspectiveCamera {
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
}

impl PerspectiveCamera {
    pub fn new(fov_y_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            fov_y: fov_y_degrees.to_radians(),
            aspect,
            near,
            far,
            position: Vec3::ZERO,
        }
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Sets the aspect ratio to `width / height`.
    ///
    /// Returns `false` and leaves the camera untouched for a zero-sized
    /// viewport.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            return false;
        }
        self.aspect = width as f32 / height as f32;
        true
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, Vec3::NEG_Z, Vec3::Y)
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection() * self.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    fn camera() -> PerspectiveCamera {
        PerspectiveCamera::new(70.0, 1.0, 0.001, 1000.0).with_position(Vec3::new(0.0, 0.0, 2.0))
    }

    #[test]
    fn resize_sets_exact_aspect() {
        let mut cam = camera();
        assert!(cam.resize(1920, 1080));
        assert_eq!(cam.aspect, 1920.0 / 1080.0);
        assert!(cam.resize(333, 777));
        assert_eq!(cam.aspect, 333.0 / 777.0);
    }

    #[test]
    fn zero_sized_resize_keeps_aspect() {
        let mut cam = camera();
        cam.resize(800, 400);
        assert!(!cam.resize(0, 400));
        assert_eq!(cam.aspect, 2.0);
    }

    #[test]
    fn origin_projects_to_screen_center() {
        let clip = camera().view_projection() * Vec4::new(0.0, 0.0, 0.0, 1.0);
        let ndc = clip / clip.w;
        assert!(ndc.x.abs() < 1e-6 && ndc.y.abs() < 1e-6);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn points_behind_camera_are_clipped() {
        let clip = camera().view_projection() * Vec4::new(0.0, 0.0, 3.0, 1.0);
        assert!(clip.w < 0.0);
    }
}
