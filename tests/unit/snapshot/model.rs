use super::*;

#[test]
fn shapes_deserialize_from_tagged_json() {
    let json = r#"{
        "elements": [
            {"id": "t", "bounds": {"x": 0, "y": 0, "width": 10, "height": 5},
             "shape": {"type": "text", "text": "Hi", "text_transform": "uppercase"}},
            {"id": "e", "bounds": {"x": 0, "y": 0, "width": 100, "height": 80},
             "shape": {"type": "elbow", "orientation": "bottom-right",
                       "body_width": "25%", "arm_height": 20}},
            {"id": "c", "shape": {"type": "endcap", "direction": "left"}},
            {"id": "s", "bounds": {"x": 0, "y": 0, "width": 1, "height": 1},
             "shape": {"type": "slider", "min": 0, "max": 10}}
        ]
    }"#;
    let snap: LayoutSnapshot = serde_json::from_str(json).unwrap();
    assert_eq!(snap.elements.len(), 4);
    assert_eq!(
        snap.elements[0].shape,
        ShapeSpec::Text {
            text: "Hi".to_string(),
            text_transform: TextTransform::Uppercase,
        }
    );
    match &snap.elements[1].shape {
        ShapeSpec::Elbow {
            orientation,
            body_width,
            arm_height,
            label,
        } => {
            assert_eq!(*orientation, ElbowOrientation::BottomRight);
            assert_eq!(body_width, &Some(SizeSpec::Expr("25%".to_string())));
            assert_eq!(arm_height, &Some(SizeSpec::Absolute(20.0)));
            assert!(label.is_none());
        }
        other => panic!("unexpected shape {other:?}"),
    }
    assert!(snap.elements[2].bounds.is_none());
    assert_eq!(snap.elements[3].shape, ShapeSpec::Unknown);
}

#[test]
fn orientation_connections() {
    assert_eq!(
        ElbowOrientation::TopLeft.horizontal_connection(),
        Direction::Right
    );
    assert_eq!(
        ElbowOrientation::TopRight.horizontal_connection(),
        Direction::Left
    );
    assert_eq!(
        ElbowOrientation::TopRight.vertical_connection(),
        Direction::Down
    );
    assert_eq!(
        ElbowOrientation::BottomLeft.vertical_connection(),
        Direction::Up
    );
}

#[test]
fn with_label_ignores_text_shapes() {
    let b = Bounds::new(0.0, 0.0, 10.0, 10.0);
    let rect = ElementSpec::rectangle("r", b).with_label("Go", TextTransform::Uppercase);
    assert!(matches!(rect.shape, ShapeSpec::Rectangle { label: Some(_) }));

    let text = ElementSpec::text("t", b, "x").with_label("Go", TextTransform::None);
    assert!(matches!(text.shape, ShapeSpec::Text { .. }));
}
