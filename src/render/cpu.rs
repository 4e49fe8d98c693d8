use crate::{
    foundation::core::{Point, Rect, Size, Vec4, Viewport},
    foundation::error::{MorphError, MorphResult},
    render::backend::{FrameRGBA, RenderBackend, SceneParams},
};

/// Counters exposed for tests and diagnostics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CpuStats {
    pub position_uploads: u64,
    pub color_uploads: u64,
    pub presents: u64,
    /// Points that landed on the surface during the last present.
    pub points_drawn: u64,
}

/// Software point rasterizer with additive blending.
///
/// Each visible particle is splatted as an axis-aligned square whose side follows the
/// perspective size attenuation `size * (height / 2) / depth`, with box-filter coverage at the
/// edges. Light accumulates in an `f32` buffer and is quantized once per present.
pub struct CpuBackend {
    surface: Viewport,
    positions: Vec<f32>,
    colors: Vec<f32>,
    accum: Vec<f32>,
    pixels: Vec<u8>,
    stats: CpuStats,
    released: bool,
}

impl Default for CpuBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl CpuBackend {
    pub fn new() -> Self {
        Self {
            surface: Viewport {
                width: 1,
                height: 1,
            },
            positions: Vec::new(),
            colors: Vec::new(),
            accum: vec![0.0; 4],
            pixels: vec![0; 4],
            stats: CpuStats::default(),
            released: false,
        }
    }

    pub fn stats(&self) -> CpuStats {
        self.stats
    }

    fn ensure_live(&self, op: &str) -> MorphResult<()> {
        if self.released {
            return Err(MorphError::render(format!(
                "{op} called on a released backend"
            )));
        }
        Ok(())
    }

    fn splat(&mut self, area: Rect, rgba: [f32; 4]) {
        let w = self.surface.width as usize;
        let x_start = area.x0.floor() as usize;
        let x_end = (area.x1.ceil() as usize).min(w);
        let y_start = area.y0.floor() as usize;
        let y_end = (area.y1.ceil() as usize).min(self.surface.height as usize);

        for py in y_start..y_end {
            let cov_y = (area.y1.min(py as f64 + 1.0) - area.y0.max(py as f64)).max(0.0);
            for px in x_start..x_end {
                let cov_x = (area.x1.min(px as f64 + 1.0) - area.x0.max(px as f64)).max(0.0);
                let cov = (cov_x * cov_y) as f32;
                if cov <= 0.0 {
                    continue;
                }
                let i = (py * w + px) * 4;
                for (dst, src) in self.accum[i..i + 4].iter_mut().zip(rgba) {
                    *dst += src * cov;
                }
            }
        }
    }
}

impl RenderBackend for CpuBackend {
    fn resize(&mut self, viewport: Viewport, pixel_ratio: f32) -> MorphResult<()> {
        self.ensure_live("resize")?;
        if viewport.width == 0 || viewport.height == 0 {
            return Err(MorphError::render("cannot resize surface to zero area"));
        }
        self.surface = viewport.physical(pixel_ratio);
        let px = self.surface.width as usize * self.surface.height as usize;
        self.accum = vec![0.0; px * 4];
        self.pixels = vec![0; px * 4];
        tracing::debug!(
            width = self.surface.width,
            height = self.surface.height,
            "cpu surface resized"
        );
        Ok(())
    }

    fn surface_size(&self) -> Viewport {
        self.surface
    }

    fn upload_positions(&mut self, positions: &[f32]) -> MorphResult<()> {
        self.ensure_live("upload_positions")?;
        if !positions.len().is_multiple_of(3) {
            return Err(MorphError::render("position buffer length must be a multiple of 3"));
        }
        self.positions.clear();
        self.positions.extend_from_slice(positions);
        self.stats.position_uploads += 1;
        Ok(())
    }

    fn upload_colors(&mut self, colors: &[f32]) -> MorphResult<()> {
        self.ensure_live("upload_colors")?;
        if !colors.len().is_multiple_of(3) {
            return Err(MorphError::render("color buffer length must be a multiple of 3"));
        }
        self.colors.clear();
        self.colors.extend_from_slice(colors);
        self.stats.color_uploads += 1;
        Ok(())
    }

    fn present(&mut self, scene: &SceneParams) -> MorphResult<()> {
        self.ensure_live("present")?;
        if self.colors.len() != self.positions.len() {
            return Err(MorphError::render(format!(
                "color buffer holds {} values but position buffer holds {}",
                self.colors.len(),
                self.positions.len()
            )));
        }

        self.accum.fill(0.0);
        let bounds = Rect::from_origin_size(Point::ZERO, self.surface.as_size());
        let half_w = self.surface.width as f32 * 0.5;
        let half_h = self.surface.height as f32 * 0.5;
        let model_view = scene.view * scene.model;
        let opacity = scene.point.opacity.clamp(0.0, 1.0);

        let positions = std::mem::take(&mut self.positions);
        let colors = std::mem::take(&mut self.colors);
        let mut drawn = 0u64;

        for (p, c) in positions.chunks_exact(3).zip(colors.chunks_exact(3)) {
            let eye = model_view * Vec4::new(p[0], p[1], p[2], 1.0);
            let clip = scene.projection * eye;
            if clip.w <= 0.0 {
                continue;
            }
            let ndc = clip.truncate() / clip.w;
            if !(-1.0..=1.0).contains(&ndc.z) {
                continue;
            }

            let depth = -eye.z;
            let side = (scene.point.size * half_h / depth).max(1.0);
            let center = Point::new(
                f64::from((ndc.x + 1.0) * half_w),
                f64::from((1.0 - ndc.y) * half_h),
            );
            let area = Rect::from_center_size(center, Size::new(f64::from(side), f64::from(side)))
                .intersect(bounds);
            if area.area() <= 0.0 {
                continue;
            }

            let fog_amount = scene.fog_density * depth;
            let weight = opacity * (-(fog_amount * fog_amount)).exp();
            self.splat(area, [c[0] * weight, c[1] * weight, c[2] * weight, weight]);
            drawn += 1;
        }

        self.positions = positions;
        self.colors = colors;

        let bg = scene.background.to_array().map(|v| f32::from(v) / 255.0);
        for (dst, acc) in self.pixels.chunks_exact_mut(4).zip(self.accum.chunks_exact(4)) {
            for ch in 0..4 {
                dst[ch] = ((bg[ch] + acc[ch]).clamp(0.0, 1.0) * 255.0).round() as u8;
            }
        }

        self.stats.presents += 1;
        self.stats.points_drawn = drawn;
        Ok(())
    }

    fn readback_rgba8(&self) -> MorphResult<FrameRGBA> {
        self.ensure_live("readback_rgba8")?;
        Ok(FrameRGBA {
            width: self.surface.width,
            height: self.surface.height,
            data: self.pixels.clone(),
            premultiplied: true,
        })
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.positions = Vec::new();
        self.colors = Vec::new();
        self.accum = Vec::new();
        self.pixels = Vec::new();
        self.released = true;
        tracing::debug!("cpu backend released");
    }

    fn is_released(&self) -> bool {
        self.released
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
