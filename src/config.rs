use std::path::Path;

use crate::{
    animation::{ease::Ease, scheduler::Timing},
    foundation::core::Rgba8Premul,
    foundation::error::{MorphError, MorphResult},
    render::{backend::PointStyle, camera::CameraConfig, camera::Rotation},
};

pub const DEFAULT_PARTICLE_COUNT: usize = 30_000;
pub const DEFAULT_HOLD_DURATION_MS: f64 = 4000.0;
pub const DEFAULT_TRANSITION_DURATION_MS: f64 = 3000.0;
pub const DEFAULT_SEED: u64 = 0x5EED;

/// Tunables for one engine session.
///
/// Every field has a default, so a JSON file only needs the keys it overrides.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub particle_count: usize,
    pub hold_duration_ms: f64,
    pub transition_duration_ms: f64,
    pub seed: u64,
    pub ease: Ease,
    /// Radians added to the cloud rotation every frame.
    pub rotation_step: Rotation,
    pub camera: CameraConfig,
    pub point: PointStyle,
    pub fog_density: f32,
    pub background: Rgba8Premul,
    /// Device pixel ratios above this are clamped.
    pub max_pixel_ratio: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            particle_count: DEFAULT_PARTICLE_COUNT,
            hold_duration_ms: DEFAULT_HOLD_DURATION_MS,
            transition_duration_ms: DEFAULT_TRANSITION_DURATION_MS,
            seed: DEFAULT_SEED,
            ease: Ease::InOutQuad,
            rotation_step: Rotation { y: 0.001, z: 0.0005 },
            camera: CameraConfig::default(),
            point: PointStyle::default(),
            fog_density: 0.002,
            background: Rgba8Premul::opaque_black(),
            max_pixel_ratio: 2.0,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> MorphResult<()> {
        if self.particle_count == 0 {
            return Err(MorphError::validation("particle_count must be > 0"));
        }
        if !self.hold_duration_ms.is_finite() || self.hold_duration_ms < 0.0 {
            return Err(MorphError::validation(
                "hold_duration_ms must be finite and >= 0",
            ));
        }
        if !self.transition_duration_ms.is_finite() || self.transition_duration_ms <= 0.0 {
            return Err(MorphError::validation(
                "transition_duration_ms must be finite and > 0",
            ));
        }
        if !(self.rotation_step.y.is_finite() && self.rotation_step.z.is_finite()) {
            return Err(MorphError::validation("rotation_step must be finite"));
        }

        let cam = &self.camera;
        if !(cam.fov_y_deg > 0.0 && cam.fov_y_deg < 180.0) {
            return Err(MorphError::validation(
                "camera.fov_y_deg must be in (0, 180)",
            ));
        }
        if !(cam.near > 0.0 && cam.far > cam.near) {
            return Err(MorphError::validation(
                "camera clip planes must satisfy 0 < near < far",
            ));
        }
        if !cam.position.is_finite() || !cam.target.is_finite() {
            return Err(MorphError::validation("camera position/target must be finite"));
        }
        if cam.position == cam.target {
            return Err(MorphError::validation(
                "camera position must differ from its target",
            ));
        }

        if !(self.point.size.is_finite() && self.point.size > 0.0) {
            return Err(MorphError::validation("point.size must be finite and > 0"));
        }
        if !(0.0..=1.0).contains(&self.point.opacity) {
            return Err(MorphError::validation("point.opacity must be in [0, 1]"));
        }
        if !(self.fog_density.is_finite() && self.fog_density >= 0.0) {
            return Err(MorphError::validation(
                "fog_density must be finite and >= 0",
            ));
        }
        if !(self.max_pixel_ratio.is_finite() && self.max_pixel_ratio > 0.0) {
            return Err(MorphError::validation(
                "max_pixel_ratio must be finite and > 0",
            ));
        }
        Ok(())
    }

    pub fn timing(&self) -> Timing {
        Timing {
            hold_ms: self.hold_duration_ms,
            transition_ms: self.transition_duration_ms,
        }
    }

    /// Clamp a host-reported device pixel ratio into `(0, max_pixel_ratio]`.
    pub fn effective_pixel_ratio(&self, device_ratio: f32) -> f32 {
        if device_ratio.is_finite() && device_ratio > 0.0 {
            device_ratio.min(self.max_pixel_ratio)
        } else {
            1.0
        }
    }

    pub fn from_json_str(s: &str) -> MorphResult<Self> {
        let cfg: Self = serde_json::from_str(s).map_err(|e| MorphError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_path(path: &Path) -> MorphResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            MorphError::validation(format!("failed to read config '{}': {e}", path.display()))
        })?;
        Self::from_json_str(&text)
    }

    pub fn to_json_pretty(&self) -> MorphResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| MorphError::serde(e.to_string()))
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
