//! Projection and rasterization of the point cloud.

/// Backend trait, frame type and per-frame scene parameters.
pub mod backend;
/// Perspective camera and cloud rotation.
pub mod camera;
/// Software rasterizer backend.
pub mod cpu;
