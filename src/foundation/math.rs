use rand::{Rng, SeedableRng, rngs::StdRng};

/// Seedable source used for every random draw made while building a session.
pub type SessionRng = StdRng;

pub fn seeded_rng(seed: u64) -> SessionRng {
    StdRng::seed_from_u64(seed)
}

/// Uniform sample in `[-span/2, span/2)`, i.e. `(rand() - 0.5) * span`.
pub(crate) fn centered<R: Rng + ?Sized>(rng: &mut R, span: f64) -> f64 {
    (rng.random::<f64>() - 0.5) * span
}

/// Largest distance from the origin over an interleaved xyz buffer.
pub fn bounding_radius(coords: &[f32]) -> f32 {
    coords
        .chunks_exact(3)
        .map(|p| (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt())
        .fold(0.0, f32::max)
}

/// Mean distance from the origin over an interleaved xyz buffer.
pub fn mean_radius(coords: &[f32]) -> f32 {
    let n = coords.len() / 3;
    if n == 0 {
        return 0.0;
    }
    let sum: f64 = coords
        .chunks_exact(3)
        .map(|p| f64::from((p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt()))
        .sum();
    (sum / n as f64) as f32
}

pub fn all_finite(coords: &[f32]) -> bool {
    coords.iter().all(|v| v.is_finite())
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
