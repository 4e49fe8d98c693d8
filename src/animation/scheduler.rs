//! Hold/transition state machine driven by wall-clock frame deltas.
//!
//! The scheduler is a pure function of `(state, delta)`: it never touches buffers. The render loop
//! feeds it the time since the previous frame and acts on the returned [`TickOutcome`].

/// Durations that drive the state machine, in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Timing {
    pub hold_ms: f64,
    /// Must be > 0; validated by the config layer.
    pub transition_ms: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Holding,
    Transitioning,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TransitionState {
    /// Target shape of the running transition, or the resting shape while holding.
    pub current_shape: usize,
    pub phase: Phase,
    /// Raw (un-eased) progress through the current transition, in `[0, 1]`.
    pub progress: f64,
    pub elapsed_hold_ms: f64,
    pub last_timestamp_ms: f64,
}

impl Default for TransitionState {
    fn default() -> Self {
        Self {
            current_shape: 0,
            phase: Phase::Holding,
            progress: 0.0,
            elapsed_hold_ms: 0.0,
            last_timestamp_ms: 0.0,
        }
    }
}

impl TransitionState {
    pub fn is_transitioning(&self) -> bool {
        self.phase == Phase::Transitioning
    }

    /// The shape the current (or last) transition started from.
    pub fn previous_shape(&self, catalog_size: usize) -> usize {
        (self.current_shape + catalog_size - 1) % catalog_size
    }

    /// Records `timestamp_ms` and returns the elapsed time since the previous frame.
    ///
    /// Timestamps that go backwards or are not finite count as a zero delta, so progress never
    /// runs in reverse.
    pub fn advance_clock(&mut self, timestamp_ms: f64) -> f64 {
        if !timestamp_ms.is_finite() {
            return 0.0;
        }
        let delta = timestamp_ms - self.last_timestamp_ms;
        if delta <= 0.0 {
            return 0.0;
        }
        self.last_timestamp_ms = timestamp_ms;
        delta
    }
}

/// What the render loop must do for this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TickOutcome {
    /// Holding: the live buffer stays as it is.
    Idle,
    /// The hold just elapsed and a transition toward `to` begins next frame.
    Started { from: usize, to: usize },
    /// Blend `from -> to` at the given raw progress.
    Blend { from: usize, to: usize, progress: f64 },
}

impl TickOutcome {
    pub fn writes_buffer(&self) -> bool {
        matches!(self, Self::Blend { .. })
    }
}

/// Advance the state machine by `delta_ms`.
pub fn tick(
    mut state: TransitionState,
    delta_ms: f64,
    timing: &Timing,
    catalog_size: usize,
) -> (TransitionState, TickOutcome) {
    let delta_ms = if delta_ms.is_finite() {
        delta_ms.max(0.0)
    } else {
        0.0
    };

    match state.phase {
        Phase::Holding => {
            state.elapsed_hold_ms += delta_ms;
            if state.elapsed_hold_ms < timing.hold_ms {
                return (state, TickOutcome::Idle);
            }
            let from = state.current_shape;
            state.current_shape = (state.current_shape + 1) % catalog_size;
            state.progress = 0.0;
            state.phase = Phase::Transitioning;
            let outcome = TickOutcome::Started {
                from,
                to: state.current_shape,
            };
            (state, outcome)
        }
        Phase::Transitioning => {
            state.progress += delta_ms / timing.transition_ms;
            if state.progress >= 1.0 {
                state.progress = 1.0;
                state.phase = Phase::Holding;
                state.elapsed_hold_ms = 0.0;
            }
            let outcome = TickOutcome::Blend {
                from: state.previous_shape(catalog_size),
                to: state.current_shape,
                progress: state.progress,
            };
            (state, outcome)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/scheduler.rs"]
mod tests;
