use super::*;
use crate::{
    foundation::core::{Bounds, LayoutSide, Rect},
    shape::classify::classify_snapshot,
    snapshot::model::{ElementSpec, LayoutSnapshot, TextTransform},
};

fn layout(side: LayoutSide, elements: Vec<ElementSpec>) -> ClassifiedLayout {
    classify_snapshot(
        side,
        &LayoutSnapshot::new(elements),
        Rect::new(0.0, 0.0, 2000.0, 2000.0),
        &MorphConfig::default(),
    )
}

fn run(source: Vec<ElementSpec>, target: Vec<ElementSpec>) -> ElementMapping {
    let source = layout(LayoutSide::Source, source);
    let target = layout(LayoutSide::Target, target);
    let mut mapping = ElementMapping::new();
    match_text(&source, &target, &MorphConfig::default(), &mut mapping);
    mapping
}

#[test]
fn pure_text_beyond_tolerance_never_matches() {
    let mapping = run(
        vec![ElementSpec::text("a", Bounds::new(0.0, 0.0, 40.0, 20.0), "BRIDGE")],
        vec![ElementSpec::text("b", Bounds::new(500.0, 0.0, 40.0, 20.0), "BRIDGE")],
    );
    assert!(mapping.is_empty());
}

#[test]
fn pure_text_within_tolerance_matches() {
    let mapping = run(
        vec![ElementSpec::text("a", Bounds::new(0.0, 0.0, 40.0, 20.0), "BRIDGE")],
        vec![ElementSpec::text("b", Bounds::new(60.0, 90.0, 40.0, 20.0), "BRIDGE")],
    );
    assert_eq!(mapping.len(), 1);
    assert_eq!(mapping.entries()[0].origin, MatchOrigin::Text);
}

#[test]
fn labelled_shapes_match_across_large_moves() {
    let mapping = run(
        vec![
            ElementSpec::rectangle("btn", Bounds::new(0.0, 0.0, 100.0, 40.0))
                .with_label("engage", TextTransform::Uppercase),
        ],
        vec![ElementSpec::text("label", Bounds::new(900.0, 700.0, 100.0, 40.0), "ENGAGE")],
    );
    assert_eq!(mapping.len(), 1);
    assert_eq!(mapping.entries()[0].target, "label");
}

#[test]
fn cheapest_pairs_win_and_mapping_stays_injective() {
    let mapping = run(
        vec![
            ElementSpec::text("s_left", Bounds::new(0.0, 0.0, 40.0, 20.0), "OK"),
            ElementSpec::text("s_right", Bounds::new(80.0, 0.0, 40.0, 20.0), "OK"),
        ],
        vec![
            ElementSpec::text("t_right", Bounds::new(82.0, 0.0, 40.0, 20.0), "OK"),
            ElementSpec::text("t_left", Bounds::new(2.0, 0.0, 40.0, 20.0), "OK"),
        ],
    );
    assert_eq!(mapping.len(), 2);
    let by_source: std::collections::HashMap<_, _> = mapping
        .entries()
        .iter()
        .map(|e| (e.source.as_str(), e.target.as_str()))
        .collect();
    assert_eq!(by_source["s_left"], "t_left");
    assert_eq!(by_source["s_right"], "t_right");
}

#[test]
fn different_text_does_not_match() {
    let mapping = run(
        vec![ElementSpec::text("a", Bounds::new(0.0, 0.0, 40.0, 20.0), "ONE")],
        vec![ElementSpec::text("b", Bounds::new(0.0, 0.0, 40.0, 20.0), "TWO")],
    );
    assert!(mapping.is_empty());
}
