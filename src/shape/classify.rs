use std::collections::{HashMap, HashSet};

use crate::{
    engine::config::MorphConfig,
    foundation::core::{Axis, LayoutSide, Point, Rect, rect_area},
    shape::{
        elbow::{ElbowGeometry, resolve_thickness},
        text::normalize_text,
    },
    snapshot::model::{ElementSpec, EndcapDirection, LabelSpec, LayoutSnapshot, ShapeSpec},
};

/// Shape category used for matching buckets and group signatures.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Pure text.
    Text,
    /// Plain or rounded rectangle.
    Rectangle,
    /// Pill-shaped cap.
    Endcap,
    /// L-shaped elbow.
    Elbow,
    /// Anything the classifier does not recognize.
    Unknown,
}

/// Classified shape with resolved parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    /// Pure text.
    Text,
    /// Plain or rounded rectangle.
    Rectangle,
    /// Pill-shaped cap.
    Endcap {
        /// Side the rounded end faces.
        direction: EndcapDirection,
    },
    /// L-shaped elbow with resolved thicknesses.
    Elbow(ElbowGeometry),
    /// Anything the classifier does not recognize.
    Unknown,
}

impl Shape {
    /// Category bucket of the shape.
    pub fn category(&self) -> Category {
        match self {
            Self::Text => Category::Text,
            Self::Rectangle => Category::Rectangle,
            Self::Endcap { .. } => Category::Endcap,
            Self::Elbow(_) => Category::Elbow,
            Self::Unknown => Category::Unknown,
        }
    }
}

/// Normalized text carried by an element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElementText {
    /// Normalized text content.
    pub value: String,
    /// `true` for text shapes, `false` for inline labels on other shapes.
    pub pure: bool,
}

/// Immutable element snapshot consumed by the matchers.
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    /// Element id, unique within its layout.
    pub id: String,
    /// Layout the element belongs to.
    pub side: LayoutSide,
    /// Position in [`ClassifiedLayout::elements`].
    pub index: usize,
    /// Position in the input snapshot.
    pub order: usize,
    /// Finalized rect.
    pub rect: Rect,
    /// Classified shape.
    pub shape: Shape,
    /// Text content or inline label, if any.
    pub text: Option<ElementText>,
}

impl Element {
    /// Category bucket of the element's shape.
    pub fn category(&self) -> Category {
        self.shape.category()
    }

    /// Center of the element rect.
    pub fn center(&self) -> Point {
        self.rect.center()
    }

    /// Area of the element rect.
    pub fn area(&self) -> f64 {
        rect_area(self.rect)
    }

    /// Elbow geometry, when the element is an elbow.
    pub fn elbow(&self) -> Option<&ElbowGeometry> {
        match &self.shape {
            Shape::Elbow(g) => Some(g),
            _ => None,
        }
    }

    /// Whether the element takes part in row and column grouping.
    pub fn is_groupable(&self) -> bool {
        !matches!(self.shape, Shape::Unknown)
    }

    /// Whether the element is a text shape.
    pub fn is_pure_text(&self) -> bool {
        self.text.as_ref().is_some_and(|t| t.pure)
    }

    /// Coordinate compared against group means on `axis`.
    pub fn grouping_coordinate(&self, axis: Axis) -> f64 {
        match (&self.shape, axis) {
            (Shape::Elbow(g), _) => g.grouping_coordinate(self.rect, axis),
            (_, Axis::Horizontal) => self.center().y,
            (_, Axis::Vertical) => self.center().x,
        }
    }
}

/// One side of a morph after classification.
#[derive(Clone, Debug)]
pub struct ClassifiedLayout {
    /// Which layout this is.
    pub side: LayoutSide,
    /// Elements in snapshot order, excluded ones removed.
    pub elements: Vec<Element>,
    /// Ids dropped because their geometry was not finalized or the id was duplicated.
    pub excluded: Vec<String>,
    by_id: HashMap<String, usize>,
}

impl ClassifiedLayout {
    /// Whether no element survived classification.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Number of classified elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Index of the element with `id`.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    /// Element with `id`.
    pub fn get(&self, id: &str) -> Option<&Element> {
        self.index_of(id).map(|i| &self.elements[i])
    }
}

/// Classify one element; `None` when its geometry is not finalized.
///
/// The returned element has `index` 0; [`classify_snapshot`] assigns the final position.
pub fn classify_element(
    side: LayoutSide,
    order: usize,
    spec: &ElementSpec,
    container: Rect,
    cfg: &MorphConfig,
) -> Option<Element> {
    let bounds = spec.bounds.filter(|b| b.is_finalized())?;
    let rect = bounds.to_rect();

    let (shape, text) = match &spec.shape {
        ShapeSpec::Text {
            text,
            text_transform,
        } => {
            let value = normalize_text(text, *text_transform);
            (Shape::Text, text_of(value, true))
        }
        ShapeSpec::Rectangle { label } => (Shape::Rectangle, label_text(label.as_ref())),
        ShapeSpec::Endcap { direction, label } => (
            Shape::Endcap {
                direction: *direction,
            },
            label_text(label.as_ref()),
        ),
        ShapeSpec::Elbow {
            orientation,
            body_width,
            arm_height,
            label,
        } => {
            let fallback = cfg.default_elbow_thickness;
            let body_width = resolve_thickness(body_width.as_ref(), container.width(), fallback)
                .min(rect.width())
                .max(1.0);
            let arm_height = resolve_thickness(arm_height.as_ref(), container.height(), fallback)
                .min(rect.height())
                .max(1.0);
            (
                Shape::Elbow(ElbowGeometry {
                    orientation: *orientation,
                    body_width,
                    arm_height,
                }),
                label_text(label.as_ref()),
            )
        }
        ShapeSpec::Unknown => (Shape::Unknown, None),
    };

    Some(Element {
        id: spec.id.clone(),
        side,
        index: 0,
        order,
        rect,
        shape,
        text,
    })
}

fn label_text(label: Option<&LabelSpec>) -> Option<ElementText> {
    let label = label?;
    text_of(normalize_text(&label.text, label.text_transform), false)
}

fn text_of(value: String, pure: bool) -> Option<ElementText> {
    if value.is_empty() {
        None
    } else {
        Some(ElementText { value, pure })
    }
}

/// Classify a full snapshot, excluding elements that cannot take part in matching.
#[tracing::instrument(skip(snapshot, container, cfg), fields(elements = snapshot.elements.len()))]
pub fn classify_snapshot(
    side: LayoutSide,
    snapshot: &LayoutSnapshot,
    container: Rect,
    cfg: &MorphConfig,
) -> ClassifiedLayout {
    let mut elements = Vec::with_capacity(snapshot.elements.len());
    let mut excluded = Vec::new();
    let mut by_id = HashMap::with_capacity(snapshot.elements.len());
    let mut seen = HashSet::with_capacity(snapshot.elements.len());

    for (order, spec) in snapshot.elements.iter().enumerate() {
        if !seen.insert(spec.id.as_str()) {
            tracing::warn!(id = %spec.id, ?side, "duplicate element id; keeping the first");
            excluded.push(spec.id.clone());
            continue;
        }
        match classify_element(side, order, spec, container, cfg) {
            Some(mut el) => {
                el.index = elements.len();
                by_id.insert(el.id.clone(), elements.len());
                elements.push(el);
            }
            None => {
                tracing::debug!(id = %spec.id, ?side, "geometry not finalized; excluded");
                excluded.push(spec.id.clone());
            }
        }
    }

    ClassifiedLayout {
        side,
        elements,
        excluded,
        by_id,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shape/classify.rs"]
mod tests;
