use crate::{
    foundation::core::{Mat4, Rgba8Premul, Viewport},
    foundation::error::MorphResult,
};

/// A rendered frame as RGBA8 pixels.
///
/// Frames are **premultiplied alpha**. The `premultiplied` flag is included to make this explicit
/// at API boundaries.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Copy of the pixels with alpha divided back out, as image encoders expect.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        if !self.premultiplied {
            return self.data.clone();
        }
        let mut out = self.data.clone();
        for px in out.chunks_exact_mut(4) {
            let a = u16::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        out
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = ((y * self.width + x) * 4) as usize;
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }
}

/// How individual particles are drawn.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PointStyle {
    /// Point diameter in world units; the on-screen size shrinks with distance.
    pub size: f32,
    pub opacity: f32,
}

impl Default for PointStyle {
    fn default() -> Self {
        Self {
            size: 0.15,
            opacity: 0.8,
        }
    }
}

/// Everything a backend needs to draw one frame besides the uploaded buffers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneParams {
    pub model: Mat4,
    pub view: Mat4,
    pub projection: Mat4,
    pub point: PointStyle,
    /// Exponential-squared fog density toward black.
    pub fog_density: f32,
    pub background: Rgba8Premul,
}

/// GPU-like sink for particle buffers.
///
/// Backends keep their own copy of positions and colors; the render loop only re-uploads
/// positions on frames where the live buffer changed.
pub trait RenderBackend {
    /// Resize the output surface. `viewport` is in logical pixels.
    fn resize(&mut self, viewport: Viewport, pixel_ratio: f32) -> MorphResult<()>;

    /// Physical size of the output surface.
    fn surface_size(&self) -> Viewport;

    fn upload_positions(&mut self, positions: &[f32]) -> MorphResult<()>;

    fn upload_colors(&mut self, colors: &[f32]) -> MorphResult<()>;

    /// Draw the uploaded buffers into the output surface.
    fn present(&mut self, scene: &SceneParams) -> MorphResult<()>;

    /// Read back the last presented surface.
    fn readback_rgba8(&self) -> MorphResult<FrameRGBA>;

    /// Free every buffer and the surface. Further calls other than `is_released` fail.
    fn release(&mut self);

    fn is_released(&self) -> bool;
}

/// Available backend kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackendKind {
    /// Software point rasterizer.
    Cpu,
}

/// Create a rendering backend implementation.
pub fn create_backend(kind: BackendKind) -> Box<dyn RenderBackend> {
    match kind {
        BackendKind::Cpu => Box::new(crate::render::cpu::CpuBackend::new()),
    }
}
