use std::f64::consts::PI;

use rand::Rng;

/// Radius of the solid sphere the cloud starts out as.
pub const SEED_CLOUD_RADIUS: f64 = 40.0;

/// Per-particle RGB triples in `[0, 1]`, generated once and never changed.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorBuffer {
    rgb: Box<[f32]>,
}

impl ColorBuffer {
    pub fn as_slice(&self) -> &[f32] {
        &self.rgb
    }

    pub fn particle_count(&self) -> usize {
        self.rgb.len() / 3
    }

    pub fn rgb(&self, particle: usize) -> [f32; 3] {
        let i = particle * 3;
        [self.rgb[i], self.rgb[i + 1], self.rgb[i + 2]]
    }
}

/// Initial point positions and their colors.
///
/// Positions fill a solid sphere uniformly by volume; colors are pale blues
/// (r in `[0.5, 1)`, g in `[0.7, 1)`, b = 1).
pub fn seed_cloud<R: Rng + ?Sized>(particle_count: usize, rng: &mut R) -> (Vec<f32>, ColorBuffer) {
    let mut positions = Vec::with_capacity(particle_count * 3);
    let mut colors = Vec::with_capacity(particle_count * 3);

    for _ in 0..particle_count {
        let r = SEED_CLOUD_RADIUS * rng.random::<f64>().cbrt();
        let theta = rng.random::<f64>() * 2.0 * PI;
        let phi = (2.0 * rng.random::<f64>() - 1.0).acos();

        positions.extend_from_slice(&[
            (r * phi.sin() * theta.cos()) as f32,
            (r * phi.sin() * theta.sin()) as f32,
            (r * phi.cos()) as f32,
        ]);
        colors.extend_from_slice(&[
            0.5 + rng.random::<f32>() * 0.5,
            0.7 + rng.random::<f32>() * 0.3,
            1.0,
        ]);
    }

    (
        positions,
        ColorBuffer {
            rgb: colors.into_boxed_slice(),
        },
    )
}

#[cfg(test)]
#[path = "../../tests/unit/shapes/seed.rs"]
mod tests;
