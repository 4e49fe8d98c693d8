use super::*;

#[test]
fn fps_timestamps_are_evenly_spaced() {
    let fps = Fps::new(20, 1).unwrap();
    assert_eq!(fps.frame_duration_ms(), 50.0);
    assert_eq!(fps.timestamp_ms(FrameIndex(0)), 0.0);
    assert_eq!(fps.timestamp_ms(FrameIndex(3)), 150.0);
    assert_eq!(fps.frames_until_ms(149.0), 2);
    assert_eq!(fps.frames_until_ms(-5.0), 0);
}

#[test]
fn fps_rejects_zero_parts() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
}

#[test]
fn viewport_rejects_empty_dimensions() {
    assert!(Viewport::new(0, 10).is_err());
    assert!(Viewport::new(10, 0).is_err());
    assert!(Viewport::new(1, 1).is_ok());
}

#[test]
fn viewport_physical_scales_and_never_collapses() {
    let vp = Viewport::new(640, 360).unwrap();
    assert_eq!(
        vp.physical(2.0),
        Viewport {
            width: 1280,
            height: 720
        }
    );
    assert_eq!(
        vp.physical(0.0),
        Viewport {
            width: 1,
            height: 1
        }
    );
    assert!((vp.aspect() - 16.0 / 9.0).abs() < 1e-6);
}

#[test]
fn premul_scales_channels_by_alpha() {
    let c = Rgba8Premul::from_straight_rgba(255, 128, 0, 128);
    assert_eq!(c.to_array(), [128, 64, 0, 128]);
    assert_eq!(Rgba8Premul::opaque_black().to_array(), [0, 0, 0, 255]);
}
