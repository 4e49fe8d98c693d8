use crate::foundation::core::{Mat4, Vec3, Viewport};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_y_deg: f32,
    pub position: Vec3,
    pub target: Vec3,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_y_deg: 75.0,
            position: Vec3::new(0.0, 10.0, 30.0),
            target: Vec3::ZERO,
            near: 0.1,
            far: 1000.0,
        }
    }
}

/// Perspective camera looking at a fixed target. Only the aspect ratio changes after creation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    config: CameraConfig,
    aspect: f32,
}

impl Camera {
    pub fn new(config: CameraConfig, viewport: Viewport) -> Self {
        Self {
            config,
            aspect: viewport.aspect(),
        }
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.aspect = viewport.aspect();
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh_gl(
            self.config.fov_y_deg.to_radians(),
            self.aspect,
            self.config.near,
            self.config.far,
        )
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.config.position, self.config.target, Vec3::Y)
    }
}

/// Accumulated spin of the whole cloud around the Y and Z axes, in radians.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rotation {
    pub y: f32,
    pub z: f32,
}

impl Rotation {
    pub fn advance(&mut self, step: Rotation) {
        self.y += step.y;
        self.z += step.z;
    }

    /// Object-to-world transform (XYZ Euler order with no X component).
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_rotation_y(self.y) * Mat4::from_rotation_z(self.z)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/camera.rs"]
mod tests;
