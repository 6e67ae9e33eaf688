use super::*;

#[test]
fn defaults_are_valid() {
    let cfg = MorphConfig::default();
    cfg.validate().unwrap();
    assert_eq!(cfg.grouping_tolerance, 5.0);
    assert_eq!(cfg.text_position_tolerance, 100.0);
    assert_eq!(cfg.position_weight, 20.0);
    assert_eq!(cfg.size_weight, 1000.0);
}

#[test]
fn partial_json_fills_defaults() {
    let cfg = MorphConfig::from_json(r#"{"cascade_step_ms": 80, "timing": {"exit_overlap": 0}}"#)
        .unwrap();
    assert_eq!(cfg.cascade_step_ms, 80.0);
    assert_eq!(cfg.timing.exit_overlap, 0.0);
    assert_eq!(cfg.timing.exit_fraction, 0.25);
    assert_eq!(cfg.eases.transform, Ease::InOutCubic);
}

#[test]
fn rejects_bad_values() {
    let mut cfg = MorphConfig {
        grouping_tolerance: -1.0,
        ..MorphConfig::default()
    };
    assert!(cfg.validate().is_err());

    cfg.grouping_tolerance = 5.0;
    cfg.size_weight = f64::NAN;
    assert!(cfg.validate().is_err());

    cfg.size_weight = 1000.0;
    cfg.timing.exit_overlap = 1.5;
    assert!(cfg.validate().is_err());

    cfg.timing.exit_overlap = 0.5;
    cfg.default_elbow_thickness = 0.0;
    assert!(cfg.validate().is_err());
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = MorphConfig::from_json("{").unwrap_err();
    assert!(matches!(err, MorphError::Serde(_)));
}
