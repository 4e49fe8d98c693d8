use super::*;

const TIMING: Timing = Timing {
    hold_ms: 100.0,
    transition_ms: 100.0,
};

fn run(state: TransitionState, delta: f64) -> (TransitionState, TickOutcome) {
    tick(state, delta, &TIMING, 8)
}

#[test]
fn holds_until_hold_duration_is_reached() {
    let (s, out) = run(TransitionState::default(), 50.0);
    assert_eq!(out, TickOutcome::Idle);
    assert_eq!(s.phase, Phase::Holding);
    assert_eq!(s.elapsed_hold_ms, 50.0);

    let (s, out) = run(s, 50.0);
    assert_eq!(out, TickOutcome::Started { from: 0, to: 1 });
    assert_eq!(s.phase, Phase::Transitioning);
    assert_eq!(s.current_shape, 1);
    assert_eq!(s.progress, 0.0);
}

#[test]
fn transition_progress_clamps_at_one_and_returns_to_holding() {
    let mut s = TransitionState {
        phase: Phase::Transitioning,
        current_shape: 3,
        ..TransitionState::default()
    };
    let (next, out) = run(s, 50.0);
    assert_eq!(
        out,
        TickOutcome::Blend {
            from: 2,
            to: 3,
            progress: 0.5
        }
    );
    s = next;

    let (next, out) = run(s, 80.0);
    assert_eq!(
        out,
        TickOutcome::Blend {
            from: 2,
            to: 3,
            progress: 1.0
        }
    );
    assert_eq!(next.progress, 1.0);
    assert_eq!(next.phase, Phase::Holding);
    assert_eq!(next.elapsed_hold_ms, 0.0);
}

#[test]
fn progress_is_monotonic_under_uneven_deltas() {
    let mut s = TransitionState {
        phase: Phase::Transitioning,
        ..TransitionState::default()
    };
    let mut last = 0.0;
    for delta in [1.0, 0.0, 7.5, 16.6, 3.0, -4.0, f64::NAN, 33.3, 50.0, 50.0] {
        let (next, out) = run(s, delta);
        if let TickOutcome::Blend { progress, .. } = out {
            assert!(progress >= last);
            assert!(progress <= 1.0);
            last = progress;
        }
        s = next;
        if s.phase == Phase::Holding {
            break;
        }
    }
    assert_eq!(last, 1.0);
}

#[test]
fn eight_transitions_complete_a_full_cycle() {
    let mut s = TransitionState::default();
    let mut completed = 0;
    let mut visited = Vec::new();
    while completed < 8 {
        let was_transitioning = s.is_transitioning();
        let (next, _) = run(s, 25.0);
        if was_transitioning && next.phase == Phase::Holding {
            completed += 1;
            visited.push(next.current_shape);
        }
        s = next;
    }
    assert_eq!(visited, vec![1, 2, 3, 4, 5, 6, 7, 0]);
    assert_eq!(s.current_shape, 0);
}

#[test]
fn previous_shape_wraps() {
    let s = TransitionState::default();
    assert_eq!(s.previous_shape(8), 7);
    let s = TransitionState {
        current_shape: 5,
        ..s
    };
    assert_eq!(s.previous_shape(8), 4);
}

#[test]
fn clock_ignores_backwards_and_non_finite_timestamps() {
    let mut s = TransitionState::default();
    assert_eq!(s.advance_clock(16.0), 16.0);
    assert_eq!(s.advance_clock(10.0), 0.0);
    assert_eq!(s.last_timestamp_ms, 16.0);
    assert_eq!(s.advance_clock(f64::INFINITY), 0.0);
    assert_eq!(s.advance_clock(48.0), 32.0);
}

#[test]
fn only_blend_outcomes_write_the_buffer() {
    assert!(!TickOutcome::Idle.writes_buffer());
    assert!(!TickOutcome::Started { from: 0, to: 1 }.writes_buffer());
    assert!(
        TickOutcome::Blend {
            from: 0,
            to: 1,
            progress: 0.1
        }
        .writes_buffer()
    );
}
