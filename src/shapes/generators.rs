//! Parametric formulas for the eight catalog shapes.
//!
//! Every generator returns exactly `3 * particle_count` interleaved xyz values. Index-swept
//! shapes map particle `i` to the curve parameter `i / particle_count`, so the same index lands on
//! the same region of every shape and morphs look like coherent flows rather than noise.
//!
//! The constants below are tuned by eye; keep them as they are.

use std::f64::consts::PI;

use rand::Rng;

use crate::foundation::math::centered;

/// Full width of the cosmetic jitter added to most shapes (`±0.75`).
pub const JITTER_SPAN: f64 = 1.5;

pub const VORTEX_ANGLE_STEP: f64 = 0.002;
pub const VORTEX_MAX_RADIUS: f64 = 30.0;
pub const VORTEX_TWIST: f64 = 0.5;
pub const VORTEX_JITTER_SPAN: f64 = 2.0;

pub const KOCH_BASE_RADIUS: f64 = 15.0;
pub const KOCH_SPIKE_FREQUENCY: f64 = 6.0;
pub const KOCH_SPIKE_HEIGHT: f64 = 5.0;
pub const KOCH_RADIUS_JITTER_SPAN: f64 = 1.0;

pub const CARDIOID_SCALE: f64 = 10.0;
pub const CARDIOID_THICKNESS: f64 = 5.0;
pub const CARDIOID_Y_OFFSET: f64 = 5.0;

pub const BUTTERFLY_SCALE: f64 = 5.0;
pub const BUTTERFLY_SWEEP: f64 = 24.0 * PI;
pub const BUTTERFLY_DEPTH: f64 = 5.0;

pub const ARCHIMEDEAN_SWEEP: f64 = 10.0 * PI;
pub const ARCHIMEDEAN_BASE_RADIUS: f64 = 1.0;
pub const ARCHIMEDEAN_GROWTH: f64 = 0.5;
pub const ARCHIMEDEAN_HEIGHT: f64 = 40.0;

pub const CATENARY_CHAINS: usize = 5;
pub const CATENARY_HALF_WIDTH: f64 = 25.0;
pub const CATENARY_BASE_A: f64 = 5.0;
pub const CATENARY_A_STEP: f64 = 2.0;
pub const CATENARY_Y_OFFSET: f64 = -15.0;
pub const CATENARY_DEPTH_STEP: f64 = 5.0;

pub const LEMNISCATE_SCALE: f64 = 15.0;
pub const LEMNISCATE_DEPTH: f64 = 4.0;

pub const ROSE_SCALE: f64 = 15.0;
pub const ROSE_K: f64 = 4.0;
pub const ROSE_DEPTH: f64 = 4.0;

fn build<R, F>(particle_count: usize, rng: &mut R, mut point: F) -> Vec<f32>
where
    R: Rng + ?Sized,
    F: FnMut(usize, f64, &mut R) -> [f64; 3],
{
    let mut out = Vec::with_capacity(particle_count * 3);
    let n = particle_count.max(1) as f64;
    for i in 0..particle_count {
        let [x, y, z] = point(i, i as f64 / n, rng);
        out.extend_from_slice(&[x as f32, y as f32, z as f32]);
    }
    out
}

fn jittered<R: Rng + ?Sized>(rng: &mut R, [x, y, z]: [f64; 3]) -> [f64; 3] {
    [
        x + centered(rng, JITTER_SPAN),
        y + centered(rng, JITTER_SPAN),
        z + centered(rng, JITTER_SPAN),
    ]
}

/// Flat logarithmic-looking galaxy in the XZ plane.
pub fn vortex<R: Rng + ?Sized>(particle_count: usize, rng: &mut R) -> Vec<f32> {
    build(particle_count, rng, |i, frac, rng| {
        let r = frac * VORTEX_MAX_RADIUS;
        let angle = i as f64 * VORTEX_ANGLE_STEP + r * VORTEX_TWIST;
        [
            r * angle.cos() + centered(rng, VORTEX_JITTER_SPAN),
            centered(rng, VORTEX_JITTER_SPAN),
            r * angle.sin() + centered(rng, VORTEX_JITTER_SPAN),
        ]
    })
}

/// Sphere with uniform solid-angle sampling and a spiky angular radius perturbation.
pub fn koch<R: Rng + ?Sized>(particle_count: usize, rng: &mut R) -> Vec<f32> {
    build(particle_count, rng, |_, _, rng| {
        let theta = 2.0 * PI * rng.random::<f64>();
        let phi = (2.0 * rng.random::<f64>() - 1.0).acos();
        let spike = ((theta * KOCH_SPIKE_FREQUENCY).sin() * (phi * KOCH_SPIKE_FREQUENCY).cos())
            .abs()
            * KOCH_SPIKE_HEIGHT;
        let r = KOCH_BASE_RADIUS + spike + centered(rng, KOCH_RADIUS_JITTER_SPAN);
        [
            r * phi.sin() * theta.cos(),
            r * phi.sin() * theta.sin(),
            r * phi.cos(),
        ]
    })
}

/// Cardioid `r = 10(1 - cos t)` with random `t`, filled out into a slab.
pub fn cardioid<R: Rng + ?Sized>(particle_count: usize, rng: &mut R) -> Vec<f32> {
    build(particle_count, rng, |_, _, rng| {
        let t = rng.random::<f64>() * 2.0 * PI;
        let r = CARDIOID_SCALE * (1.0 - t.cos());
        [
            r * t.cos(),
            r * t.sin() + CARDIOID_Y_OFFSET,
            centered(rng, CARDIOID_THICKNESS),
        ]
    })
}

/// Fay's butterfly curve swept over twelve full turns.
pub fn butterfly<R: Rng + ?Sized>(particle_count: usize, rng: &mut R) -> Vec<f32> {
    build(particle_count, rng, |_, frac, rng| {
        let t = frac * BUTTERFLY_SWEEP;
        let r = BUTTERFLY_SCALE * (t.cos().exp() - 2.0 * (4.0 * t).cos() + (t / 12.0).sin().powi(5));
        let depth = centered(rng, BUTTERFLY_DEPTH);
        jittered(rng, [r * t.sin(), r * t.cos(), depth])
    })
}

/// Widening spiral climbing from y = -20 to y = +20.
pub fn archimedean<R: Rng + ?Sized>(particle_count: usize, rng: &mut R) -> Vec<f32> {
    build(particle_count, rng, |_, frac, rng| {
        let t = frac * ARCHIMEDEAN_SWEEP;
        let r = ARCHIMEDEAN_BASE_RADIUS + ARCHIMEDEAN_GROWTH * t;
        let y = frac * ARCHIMEDEAN_HEIGHT - ARCHIMEDEAN_HEIGHT / 2.0;
        jittered(rng, [r * t.cos(), y, r * t.sin()])
    })
}

/// Five hanging chains interleaved by index, each at its own depth.
pub fn catenary<R: Rng + ?Sized>(particle_count: usize, rng: &mut R) -> Vec<f32> {
    build(particle_count, rng, |i, frac, rng| {
        let chain = (i % CATENARY_CHAINS) as f64;
        let x = frac * 2.0 * CATENARY_HALF_WIDTH - CATENARY_HALF_WIDTH;
        let a = CATENARY_BASE_A + chain * CATENARY_A_STEP;
        let y = a * (x / a).cosh() + CATENARY_Y_OFFSET;
        let z = (chain - (CATENARY_CHAINS / 2) as f64) * CATENARY_DEPTH_STEP;
        jittered(rng, [x, y, z])
    })
}

/// Lemniscate of Bernoulli (figure eight).
pub fn lemniscate<R: Rng + ?Sized>(particle_count: usize, rng: &mut R) -> Vec<f32> {
    build(particle_count, rng, |_, frac, rng| {
        let t = frac * 2.0 * PI;
        let denom = 1.0 + t.sin() * t.sin();
        let x = LEMNISCATE_SCALE * t.cos() / denom;
        let y = LEMNISCATE_SCALE * t.sin() * t.cos() / denom;
        let depth = centered(rng, LEMNISCATE_DEPTH);
        jittered(rng, [x, y, depth])
    })
}

/// Eight-petal rose `r = 15 cos(4t)`.
pub fn rose<R: Rng + ?Sized>(particle_count: usize, rng: &mut R) -> Vec<f32> {
    build(particle_count, rng, |_, frac, rng| {
        let t = frac * 2.0 * PI;
        let r = ROSE_SCALE * (ROSE_K * t).cos();
        let depth = centered(rng, ROSE_DEPTH);
        jittered(rng, [r * t.cos(), r * t.sin(), depth])
    })
}

#[cfg(test)]
#[path = "../../tests/unit/shapes/generators.rs"]
mod tests;
