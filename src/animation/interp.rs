use crate::animation::ease::Ease;

/// Linear blend of two equal-length coordinate buffers into `out`.
///
/// Equivalent to `from[i] + (to[i] - from[i]) * t`, written in the two-weight form so that
/// `t = 0` and `t = 1` reproduce the endpoints bit for bit. Lengths are an invariant of the
/// catalog; if they ever disagree only the common prefix is written.
pub fn blend_into(out: &mut [f32], from: &[f32], to: &[f32], t: f32) {
    debug_assert_eq!(out.len(), from.len());
    debug_assert_eq!(out.len(), to.len());
    for ((o, &a), &b) in out.iter_mut().zip(from).zip(to) {
        *o = a * (1.0 - t) + b * t;
    }
}

/// The rendered particle positions, owned by the render loop.
#[derive(Clone, Debug, PartialEq)]
pub struct LiveBuffer {
    coords: Vec<f32>,
    dirty: bool,
}

impl LiveBuffer {
    /// Wraps positions the backend already holds, so the buffer starts clean.
    pub fn new(coords: Vec<f32>) -> Self {
        Self {
            coords,
            dirty: false,
        }
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.coords
    }

    pub fn particle_count(&self) -> usize {
        self.coords.len() / 3
    }

    /// Writes the eased blend of `from -> to` at raw `progress` and marks the buffer dirty.
    pub fn blend(&mut self, from: &[f32], to: &[f32], ease: Ease, progress: f64) {
        let t = ease.apply(progress) as f32;
        blend_into(&mut self.coords, from, to, t);
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Returns whether the buffer changed since the last call, clearing the flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/interp.rs"]
mod tests;
