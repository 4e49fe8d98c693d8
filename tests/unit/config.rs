use super::*;

#[test]
fn defaults_match_the_reference_session() {
    let cfg = EngineConfig::default();
    assert_eq!(cfg.particle_count, 30_000);
    assert_eq!(cfg.hold_duration_ms, 4000.0);
    assert_eq!(cfg.transition_duration_ms, 3000.0);
    assert_eq!(cfg.ease, Ease::InOutQuad);
    assert_eq!(cfg.camera.fov_y_deg, 75.0);
    assert!(cfg.validate().is_ok());
    assert_eq!(
        cfg.timing(),
        Timing {
            hold_ms: 4000.0,
            transition_ms: 3000.0
        }
    );
}

#[test]
fn partial_json_overrides_only_named_keys() {
    let cfg = EngineConfig::from_json_str(
        r#"{ "particle_count": 4, "hold_duration_ms": 100, "transition_duration_ms": 100 }"#,
    )
    .unwrap();
    assert_eq!(cfg.particle_count, 4);
    assert_eq!(cfg.hold_duration_ms, 100.0);
    assert_eq!(cfg.seed, DEFAULT_SEED);
    assert_eq!(cfg.point, PointStyle::default());
}

#[test]
fn unknown_keys_are_serde_errors() {
    let err = EngineConfig::from_json_str(r#"{ "particles": 4 }"#).unwrap_err();
    assert!(err.to_string().contains("serialization error:"));
}

#[test]
fn invalid_values_are_validation_errors() {
    for json in [
        r#"{ "particle_count": 0 }"#,
        r#"{ "transition_duration_ms": 0 }"#,
        r#"{ "hold_duration_ms": -1 }"#,
        r#"{ "point": { "opacity": 1.5 } }"#,
        r#"{ "camera": { "near": 10, "far": 1 } }"#,
        r#"{ "camera": { "position": [0, 0, 0] } }"#,
        r#"{ "max_pixel_ratio": 0 }"#,
    ] {
        let err = EngineConfig::from_json_str(json).unwrap_err();
        assert!(
            err.to_string().contains("validation error:"),
            "{json} -> {err}"
        );
    }
}

#[test]
fn json_round_trip_preserves_config() {
    let cfg = EngineConfig {
        seed: 9,
        ease: Ease::InOutCubic,
        ..EngineConfig::default()
    };
    let text = cfg.to_json_pretty().unwrap();
    assert_eq!(EngineConfig::from_json_str(&text).unwrap(), cfg);
}

#[test]
fn pixel_ratio_is_capped() {
    let cfg = EngineConfig::default();
    assert_eq!(cfg.effective_pixel_ratio(3.0), 2.0);
    assert_eq!(cfg.effective_pixel_ratio(1.5), 1.5);
    assert_eq!(cfg.effective_pixel_ratio(f32::NAN), 1.0);
    assert_eq!(cfg.effective_pixel_ratio(0.0), 1.0);
}

#[test]
fn missing_file_is_reported_with_its_path() {
    let err = EngineConfig::from_json_path(Path::new("/definitely/not/here.json")).unwrap_err();
    assert!(err.to_string().contains("/definitely/not/here.json"));
}
