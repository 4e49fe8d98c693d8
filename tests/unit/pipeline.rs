use super::*;
use crate::{config::EngineConfig, foundation::core::Viewport, render::backend::BackendKind};

fn engine(particles: usize) -> ParticleEngine {
    ParticleEngine::with_backend_kind(
        EngineConfig {
            particle_count: particles,
            hold_duration_ms: 100.0,
            transition_duration_ms: 100.0,
            ..EngineConfig::default()
        },
        Viewport::new(32, 24).unwrap(),
        BackendKind::Cpu,
    )
    .unwrap()
}

#[test]
fn sequence_pushes_every_frame_in_order() {
    let mut e = engine(64);
    let mut sink = InMemorySink::new();
    let fps = Fps::new(20, 1).unwrap();
    let stats = render_sequence(&mut e, fps, 6, &mut sink).unwrap();

    assert!(sink.is_finished());
    assert_eq!(
        sink.config(),
        Some(SinkConfig {
            width: 32,
            height: 24,
            fps
        })
    );
    let indices: Vec<u64> = sink.frames().iter().map(|(i, _)| i.0).collect();
    assert_eq!(indices, (0..6).collect::<Vec<_>>());
    assert_eq!(stats.frames_rendered, 6);
    // 50ms frames: hold ends at t=100, blends at 150 and 200, then holds through t=250.
    assert_eq!(stats.transitions_started, 1);
    assert_eq!(stats.position_uploads, 2);
}

#[test]
fn last_frame_sink_keeps_only_the_final_frame() {
    let fps = Fps::new(20, 1).unwrap();
    let mut all = InMemorySink::new();
    render_sequence(&mut engine(128), fps, 5, &mut all).unwrap();

    let mut last = LastFrameSink::new();
    assert!(last.last().is_none());
    render_sequence(&mut engine(128), fps, 5, &mut last).unwrap();
    assert_eq!(last.frames_seen(), 5);
    let (idx, frame) = last.last().unwrap();
    let (want_idx, want) = all.frames().last().unwrap();
    assert_eq!(idx, want_idx);
    assert_eq!((frame.width, frame.height), (want.width, want.height));
    assert_eq!(frame.data, want.data);

    render_sequence(&mut engine(128), fps, 2, &mut last).unwrap();
    assert_eq!(last.frames_seen(), 2);
    assert_eq!(last.last().unwrap().0, FrameIndex(1));
}

#[test]
fn empty_sequence_is_rejected() {
    let mut e = engine(4);
    let mut sink = InMemorySink::new();
    let fps = Fps::new(30, 1).unwrap();
    assert!(render_sequence(&mut e, fps, 0, &mut sink).is_err());
    assert!(sink.config().is_none());
}

#[test]
fn render_at_matches_the_same_sequence() {
    let fps = Fps::new(20, 1).unwrap();
    let mut a = engine(256);
    let at = render_at(&mut a, fps, 150.0).unwrap();

    let mut b = engine(256);
    let mut sink = InMemorySink::new();
    render_sequence(&mut b, fps, 4, &mut sink).unwrap();
    assert_eq!(sink.frames()[3].1.data, at.data);
    assert_eq!(a.state(), b.state());
}

#[test]
fn render_at_lands_on_the_requested_time() {
    let fps = Fps::new(20, 1).unwrap();
    let mut e = engine(4);
    render_at(&mut e, fps, 125.0).unwrap();
    assert_eq!(e.state().last_timestamp_ms, 125.0);
    assert!(render_at(&mut e, fps, f64::NAN).is_err());
}
