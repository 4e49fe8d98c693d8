use crate::foundation::error::{MorphError, MorphResult};

pub use glam::{Mat4, Vec3, Vec4};
pub use kurbo::{Point, Rect, Size};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    pub num: u32,
    pub den: u32, // must be > 0
}

impl Fps {
    pub fn new(num: u32, den: u32) -> MorphResult<Self> {
        if den == 0 {
            return Err(MorphError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(MorphError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    pub fn frame_duration_ms(self) -> f64 {
        1000.0 * f64::from(self.den) / f64::from(self.num)
    }

    /// Host-style timestamp (milliseconds since loop start) of the given frame.
    pub fn timestamp_ms(self, frame: FrameIndex) -> f64 {
        (frame.0 as f64) * self.frame_duration_ms()
    }

    pub fn frames_until_ms(self, ms: f64) -> u64 {
        (ms.max(0.0) / self.frame_duration_ms()).floor() as u64
    }
}

/// Logical (CSS-pixel) size of the output surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> MorphResult<Self> {
        if width == 0 || height == 0 {
            return Err(MorphError::validation(format!(
                "viewport must be non-empty, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    pub fn aspect(self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    /// Device-pixel dimensions for the given pixel ratio, never smaller than 1x1.
    pub fn physical(self, pixel_ratio: f32) -> Self {
        let scale = |v: u32| ((v as f32) * pixel_ratio).round().max(1.0) as u32;
        Self {
            width: scale(self.width),
            height: scale(self.height),
        }
    }

    pub fn as_size(self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8Premul {
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    pub fn opaque_black() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 255,
        }
    }

    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
