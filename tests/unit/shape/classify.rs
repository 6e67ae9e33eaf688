use super::*;
use crate::{
    foundation::core::Bounds,
    snapshot::model::{ElbowOrientation, SizeSpec, TextTransform},
};

fn container() -> Rect {
    Rect::new(0.0, 0.0, 1000.0, 600.0)
}

fn classify_one(spec: &ElementSpec) -> Option<Element> {
    classify_element(
        LayoutSide::Source,
        0,
        spec,
        container(),
        &MorphConfig::default(),
    )
}

#[test]
fn categories_follow_shape_tags() {
    let b = Bounds::new(0.0, 0.0, 100.0, 50.0);
    assert_eq!(
        classify_one(&ElementSpec::text("t", b, "A")).unwrap().category(),
        Category::Text
    );
    assert_eq!(
        classify_one(&ElementSpec::rectangle("r", b))
            .unwrap()
            .category(),
        Category::Rectangle
    );
    assert_eq!(
        classify_one(&ElementSpec::endcap("c", b, EndcapDirection::Left))
            .unwrap()
            .category(),
        Category::Endcap
    );
    let unknown = ElementSpec {
        id: "u".to_string(),
        bounds: Some(b),
        shape: ShapeSpec::Unknown,
    };
    let el = classify_one(&unknown).unwrap();
    assert_eq!(el.category(), Category::Unknown);
    assert!(!el.is_groupable());
}

#[test]
fn labels_are_text_bearing_but_not_pure() {
    let b = Bounds::new(0.0, 0.0, 100.0, 50.0);
    let el = classify_one(
        &ElementSpec::rectangle("r", b).with_label("engage", TextTransform::Uppercase),
    )
    .unwrap();
    let text = el.text.as_ref().unwrap();
    assert_eq!(text.value, "ENGAGE");
    assert!(!text.pure);
    assert!(!el.is_pure_text());

    let t = classify_one(&ElementSpec::text("t", b, "ENGAGE")).unwrap();
    assert!(t.is_pure_text());
}

#[test]
fn empty_text_is_not_text_bearing() {
    let b = Bounds::new(0.0, 0.0, 100.0, 50.0);
    assert!(
        classify_one(&ElementSpec::text("t", b, "  "))
            .unwrap()
            .text
            .is_none()
    );
}

#[test]
fn elbow_thickness_resolves_against_container() {
    let spec = ElementSpec {
        id: "e".to_string(),
        bounds: Some(Bounds::new(0.0, 0.0, 300.0, 200.0)),
        shape: ShapeSpec::Elbow {
            orientation: ElbowOrientation::TopLeft,
            body_width: Some(SizeSpec::Expr("10%".to_string())),
            arm_height: Some(SizeSpec::Expr("0px".to_string())),
            label: None,
        },
    };
    let el = classify_one(&spec).unwrap();
    let g = el.elbow().unwrap();
    assert_eq!(g.body_width, 100.0);
    assert_eq!(g.arm_height, 30.0);
}

#[test]
fn elbow_thickness_is_clamped_to_bounds() {
    let spec = ElementSpec::elbow(
        "e",
        Bounds::new(0.0, 0.0, 50.0, 20.0),
        ElbowOrientation::BottomRight,
        80.0,
        40.0,
    );
    let el = classify_one(&spec).unwrap();
    let g = el.elbow().unwrap();
    assert_eq!(g.body_width, 50.0);
    assert_eq!(g.arm_height, 20.0);
}

#[test]
fn snapshot_excludes_unfinalized_and_duplicate_ids() {
    let b = Bounds::new(0.0, 0.0, 10.0, 10.0);
    let mut pending = ElementSpec::rectangle("pending", b);
    pending.bounds = None;
    let mut nan = ElementSpec::rectangle("nan", b);
    nan.bounds = Some(Bounds::new(f64::NAN, 0.0, 1.0, 1.0));
    let snap = LayoutSnapshot::new(vec![
        ElementSpec::rectangle("a", b),
        pending,
        nan,
        ElementSpec::rectangle("a", b),
        ElementSpec::rectangle("b", b),
    ]);
    let layout = classify_snapshot(
        LayoutSide::Target,
        &snap,
        container(),
        &MorphConfig::default(),
    );
    assert_eq!(layout.len(), 2);
    assert_eq!(layout.excluded, vec!["pending", "nan", "a"]);
    assert_eq!(layout.index_of("b"), Some(1));
    assert_eq!(layout.get("a").unwrap().order, 0);
    assert_eq!(layout.get("b").unwrap().order, 4);
}
