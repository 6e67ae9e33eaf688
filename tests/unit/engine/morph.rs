use super::*;
use crate::{
    foundation::core::Bounds,
    plan::instruction::Phase,
    snapshot::model::{ElementSpec, LayoutSnapshot},
};

fn request(source: Vec<ElementSpec>, target: Vec<ElementSpec>) -> MorphRequest {
    MorphRequest {
        source: LayoutSnapshot::new(source),
        target: LayoutSnapshot::new(target),
        container: Some(Bounds::new(0.0, 0.0, 800.0, 600.0)),
        duration_ms: 600.0,
    }
}

fn rect(id: &str, x: f64) -> ElementSpec {
    ElementSpec::rectangle(id, Bounds::new(x, 0.0, 50.0, 50.0))
}

#[test]
fn missing_or_invalid_container_is_skipped() {
    let cfg = MorphConfig::default();
    let mut req = request(vec![rect("a", 0.0)], vec![rect("a", 0.0)]);
    req.container = None;
    assert_eq!(
        plan_morph(&req, &cfg).unwrap(),
        MorphOutcome::Skipped(SkipReason::MissingContainer)
    );

    req.container = Some(Bounds::new(0.0, 0.0, 0.0, 600.0));
    assert_eq!(
        plan_morph(&req, &cfg).unwrap().skip_reason(),
        Some(SkipReason::InvalidContainer)
    );

    req.container = Some(Bounds::new(f64::NAN, 0.0, 800.0, 600.0));
    assert_eq!(
        plan_morph(&req, &cfg).unwrap().skip_reason(),
        Some(SkipReason::InvalidContainer)
    );
}

#[test]
fn empty_source_is_skipped() {
    let cfg = MorphConfig::default();
    let req = request(Vec::new(), vec![rect("a", 0.0)]);
    assert_eq!(
        plan_morph(&req, &cfg).unwrap().skip_reason(),
        Some(SkipReason::EmptySource)
    );

    let mut unpositioned = rect("a", 0.0);
    unpositioned.bounds = None;
    let req = request(vec![unpositioned], vec![rect("a", 0.0)]);
    assert_eq!(
        plan_morph(&req, &cfg).unwrap().skip_reason(),
        Some(SkipReason::EmptySource)
    );
}

#[test]
fn empty_target_fades_everything_out() {
    let cfg = MorphConfig::default();
    let req = request(vec![rect("a", 0.0), rect("b", 100.0)], Vec::new());
    let plan = plan_morph(&req, &cfg).unwrap().into_planned().unwrap();
    assert_eq!(plan.instructions.len(), 2);
    assert!(plan.instructions.iter().all(|i| i.phase == Phase::Exit));
}

#[test]
fn invalid_duration_is_an_error() {
    let cfg = MorphConfig::default();
    for d in [-1.0, f64::NAN, f64::INFINITY] {
        let mut req = request(vec![rect("a", 0.0)], vec![rect("a", 0.0)]);
        req.duration_ms = d;
        assert!(matches!(
            plan_morph(&req, &cfg),
            Err(MorphError::Validation(_))
        ));
    }
}

#[test]
fn invalid_config_is_an_error() {
    let cfg = MorphConfig {
        grouping_tolerance: -1.0,
        ..MorphConfig::default()
    };
    let req = request(vec![rect("a", 0.0)], vec![rect("a", 0.0)]);
    assert!(plan_morph(&req, &cfg).is_err());
}

#[test]
fn report_exposes_every_stage() {
    let cfg = MorphConfig::default();
    let mut unpositioned = rect("ghost", 0.0);
    unpositioned.bounds = None;
    let req = request(
        vec![
            rect("a", 0.0),
            rect("b", 100.0),
            ElementSpec::text("t", Bounds::new(0.0, 200.0, 60.0, 20.0), "Lights"),
        ],
        vec![
            rect("a", 10.0),
            rect("b", 110.0),
            ElementSpec::text("label", Bounds::new(20.0, 210.0, 60.0, 20.0), "Lights"),
            unpositioned,
        ],
    );
    let report = analyze_morph(&req, &cfg).unwrap().into_planned().unwrap();

    assert_eq!(report.excluded_target, vec!["ghost"]);
    assert!(report.excluded_source.is_empty());
    assert!(!report.source_groups.is_empty());
    assert!(!report.group_matches.is_empty());
    assert_eq!(report.mapping.len(), 3);
    let text: Vec<_> = report
        .mapping
        .iter()
        .filter(|e| e.origin == MatchOrigin::Text)
        .collect();
    assert_eq!(text.len(), 1);
    assert_eq!((text[0].source.as_str(), text[0].target.as_str()), ("t", "label"));
    assert_eq!(report.plan, plan_morph(&req, &cfg).unwrap().into_planned().unwrap());
}
