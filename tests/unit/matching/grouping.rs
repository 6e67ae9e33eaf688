use super::*;
use crate::{
    foundation::core::LayoutSide,
    shape::classify::classify_snapshot,
    snapshot::model::{ElbowOrientation, ElementSpec, EndcapDirection, LayoutSnapshot, ShapeSpec},
};

fn layout(elements: Vec<ElementSpec>) -> ClassifiedLayout {
    classify_snapshot(
        LayoutSide::Source,
        &LayoutSnapshot::new(elements),
        Rect::new(0.0, 0.0, 2000.0, 2000.0),
        &MorphConfig::default(),
    )
}

fn member_ids(layout: &ClassifiedLayout, g: &Group) -> Vec<String> {
    g.members
        .iter()
        .map(|&m| layout.elements[m].id.clone())
        .collect()
}

#[test]
fn rows_merge_within_tolerance_and_split_beyond() {
    let l = layout(vec![
        ElementSpec::rectangle("r1", Bounds::new(0.0, 0.0, 200.0, 50.0)),
        ElementSpec::text("t", Bounds::new(250.0, 0.0, 10.0, 50.0), "A"),
        ElementSpec::rectangle("r2", Bounds::new(0.0, 0.0, 200.0, 75.0)),
    ]);
    let g = group_elements(&l, &MorphConfig::default());
    assert_eq!(g.horizontal.len(), 2);

    let first = g.group_of(Axis::Horizontal, l.index_of("r1").unwrap()).unwrap();
    assert_eq!(first.mean, 25.0);
    assert_eq!(member_ids(&l, first), vec!["r1", "t"]);

    let second = g.group_of(Axis::Horizontal, l.index_of("r2").unwrap()).unwrap();
    assert_eq!(second.mean, 37.5);
    assert_eq!(member_ids(&l, second), vec!["r2"]);
    assert_ne!(first.id, second.id);
}

#[test]
fn top_right_elbow_rows_only_with_elements_to_its_left() {
    // Thicknesses left unset resolve to the default of 30.
    let l = layout(vec![
        ElementSpec::rectangle("left", Bounds::new(100.0, 0.0, 200.0, 50.0)),
        ElementSpec {
            id: "elbow".to_string(),
            bounds: Some(Bounds::new(500.0, 0.0, 200.0, 400.0)),
            shape: ShapeSpec::Elbow {
                orientation: ElbowOrientation::TopRight,
                body_width: None,
                arm_height: None,
                label: None,
            },
        },
        ElementSpec::rectangle("right", Bounds::new(800.0, 0.0, 200.0, 50.0)),
    ]);
    let g = group_elements(&l, &MorphConfig::default());
    let row = g
        .group_of(Axis::Horizontal, l.index_of("elbow").unwrap())
        .unwrap();
    assert_eq!(member_ids(&l, row), vec!["left", "elbow"]);
    assert_eq!(row.mean, 27.5);
    let right_row = g
        .group_of(Axis::Horizontal, l.index_of("right").unwrap())
        .unwrap();
    assert_ne!(right_row.id, row.id);
}

#[test]
fn elbow_columns_extend_along_the_body() {
    let l = layout(vec![
        ElementSpec::elbow(
            "elbow",
            Bounds::new(0.0, 100.0, 200.0, 100.0),
            ElbowOrientation::TopLeft,
            30.0,
            30.0,
        ),
        ElementSpec::rectangle("below", Bounds::new(0.0, 210.0, 60.0, 80.0)),
    ]);
    let g = group_elements(&l, &MorphConfig::default());
    let column = g
        .group_of(Axis::Vertical, l.index_of("elbow").unwrap())
        .unwrap();
    assert_eq!(member_ids(&l, column), vec!["elbow", "below"]);
    assert_eq!(column.mean, 30.0);
}

#[test]
fn elbow_columns_exclude_members_behind_the_corner() {
    let l = layout(vec![
        ElementSpec::elbow(
            "elbow",
            Bounds::new(0.0, 100.0, 200.0, 100.0),
            ElbowOrientation::TopLeft,
            30.0,
            30.0,
        ),
        ElementSpec::rectangle("above", Bounds::new(0.0, 0.0, 60.0, 80.0)),
    ]);
    let g = group_elements(&l, &MorphConfig::default());
    let column = g
        .group_of(Axis::Vertical, l.index_of("elbow").unwrap())
        .unwrap();
    assert_eq!(member_ids(&l, column), vec!["elbow"]);
    assert_eq!(g.vertical.len(), 2);
}

#[test]
fn endcaps_never_form_columns_and_bound_rows() {
    let l = layout(vec![
        ElementSpec::endcap("cap", Bounds::new(300.0, 0.0, 30.0, 40.0), EndcapDirection::Left),
        ElementSpec::rectangle("bar", Bounds::new(100.0, 0.0, 190.0, 40.0)),
        ElementSpec::rectangle("beyond", Bounds::new(340.0, 0.0, 100.0, 40.0)),
        ElementSpec::rectangle("stack", Bounds::new(300.0, 50.0, 30.0, 40.0)),
    ]);
    let g = group_elements(&l, &MorphConfig::default());
    let cap = l.index_of("cap").unwrap();
    assert!(g.group_of(Axis::Vertical, cap).is_none());

    let row = g.group_of(Axis::Horizontal, cap).unwrap();
    assert_eq!(member_ids(&l, row), vec!["bar", "cap"]);
    assert_eq!(row.signature, vec![Category::Rectangle, Category::Endcap]);
}

#[test]
fn unknown_shapes_are_ungrouped() {
    let l = layout(vec![
        ElementSpec {
            id: "graph".to_string(),
            bounds: Some(Bounds::new(0.0, 0.0, 100.0, 100.0)),
            shape: ShapeSpec::Unknown,
        },
        ElementSpec::text("t", Bounds::new(0.0, 0.0, 100.0, 100.0), "x"),
    ]);
    let g = group_elements(&l, &MorphConfig::default());
    assert_eq!(g.ungrouped, vec![0]);
    assert!(g.group_of(Axis::Horizontal, 0).is_none());
    let text_row = g.group_of(Axis::Horizontal, 1).unwrap();
    assert!(text_row.signature.is_empty());
}

#[test]
fn every_groupable_element_is_in_exactly_one_group_per_axis() {
    let l = layout(vec![
        ElementSpec::rectangle("a", Bounds::new(0.0, 0.0, 50.0, 20.0)),
        ElementSpec::rectangle("b", Bounds::new(60.0, 2.0, 50.0, 20.0)),
        ElementSpec::rectangle("c", Bounds::new(0.0, 40.0, 50.0, 20.0)),
        ElementSpec::text("d", Bounds::new(61.0, 40.0, 50.0, 20.0), "x"),
    ]);
    let g = group_elements(&l, &MorphConfig::default());
    for axis in [Axis::Horizontal, Axis::Vertical] {
        for el in &l.elements {
            let count = g
                .groups(axis)
                .iter()
                .filter(|grp| grp.contains(el.index))
                .count();
            assert_eq!(count, 1, "{} on {axis:?}", el.id);
        }
    }
    assert_eq!(g.horizontal.len(), 2);
    assert_eq!(g.vertical.len(), 2);
}

#[test]
fn report_lists_member_ids() {
    let l = layout(vec![
        ElementSpec::rectangle("a", Bounds::new(0.0, 0.0, 50.0, 20.0)),
        ElementSpec::rectangle("b", Bounds::new(60.0, 0.0, 50.0, 20.0)),
    ]);
    let g = group_elements(&l, &MorphConfig::default());
    let report = g.report(&l);
    assert_eq!(report.len(), 3);
    assert_eq!(report[0].members, vec!["a", "b"]);
    assert_eq!(report[0].bounds, Bounds::new(0.0, 0.0, 110.0, 20.0));
}
