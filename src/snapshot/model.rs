use crate::foundation::core::{Bounds, Direction};

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// One morph request: the displayed layout, the requested layout, and the frame they live in.
///
/// Requests are pure data and can be built programmatically or loaded from JSON. Planning a
/// request is performed by [`crate::plan_morph`].
pub struct MorphRequest {
    /// Layout currently on screen.
    pub source: LayoutSnapshot,
    /// Layout being transitioned to.
    pub target: LayoutSnapshot,
    /// Container rectangle both layouts were computed for. A missing container skips the morph.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container: Option<Bounds>,
    /// Requested total duration in milliseconds.
    pub duration_ms: f64,
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
/// Ordered element list produced by the layout engine for one configuration.
pub struct LayoutSnapshot {
    /// Elements in layout order.
    #[serde(default)]
    pub elements: Vec<ElementSpec>,
}

impl LayoutSnapshot {
    /// Build a snapshot from an element list.
    pub fn new(elements: Vec<ElementSpec>) -> Self {
        Self { elements }
    }
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// Raw element description as emitted by the layout engine.
pub struct ElementSpec {
    /// Element identifier (unique within its snapshot).
    pub id: String,
    /// Final geometry; `None` while the layout engine has not positioned the element yet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<Bounds>,
    /// Shape metadata.
    pub shape: ShapeSpec,
}

impl ElementSpec {
    /// Plain rectangle without a label.
    pub fn rectangle(id: impl Into<String>, bounds: Bounds) -> Self {
        Self {
            id: id.into(),
            bounds: Some(bounds),
            shape: ShapeSpec::Rectangle { label: None },
        }
    }

    /// Pure text element with no case transform.
    pub fn text(id: impl Into<String>, bounds: Bounds, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            bounds: Some(bounds),
            shape: ShapeSpec::Text {
                text: text.into(),
                text_transform: TextTransform::None,
            },
        }
    }

    /// Endcap opening towards `direction`.
    pub fn endcap(id: impl Into<String>, bounds: Bounds, direction: EndcapDirection) -> Self {
        Self {
            id: id.into(),
            bounds: Some(bounds),
            shape: ShapeSpec::Endcap {
                direction,
                label: None,
            },
        }
    }

    /// Elbow with explicit body width and arm height.
    pub fn elbow(
        id: impl Into<String>,
        bounds: Bounds,
        orientation: ElbowOrientation,
        body_width: f64,
        arm_height: f64,
    ) -> Self {
        Self {
            id: id.into(),
            bounds: Some(bounds),
            shape: ShapeSpec::Elbow {
                orientation,
                body_width: Some(SizeSpec::Absolute(body_width)),
                arm_height: Some(SizeSpec::Absolute(arm_height)),
                label: None,
            },
        }
    }

    /// Attach an inline label (rectangles, endcaps and elbows only).
    pub fn with_label(mut self, text: impl Into<String>, text_transform: TextTransform) -> Self {
        let new_label = Some(LabelSpec {
            text: text.into(),
            text_transform,
        });
        match &mut self.shape {
            ShapeSpec::Rectangle { label }
            | ShapeSpec::Endcap { label, .. }
            | ShapeSpec::Elbow { label, .. } => *label = new_label,
            ShapeSpec::Text { .. } | ShapeSpec::Unknown => {}
        }
        self
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
/// Shape metadata keyed by the shape type.
pub enum ShapeSpec {
    /// Free-standing text.
    Text {
        /// Raw text content.
        text: String,
        /// Case transform applied when rendering.
        #[serde(default)]
        text_transform: TextTransform,
    },
    /// Rectangle, optionally carrying a label (buttons, bars).
    Rectangle {
        /// Optional inline label.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<LabelSpec>,
    },
    /// Rounded terminal cap.
    Endcap {
        /// Side open for attachment.
        direction: EndcapDirection,
        /// Optional inline label.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<LabelSpec>,
    },
    /// L-shaped connector.
    Elbow {
        /// Corner the elbow turns around.
        orientation: ElbowOrientation,
        /// Thickness of the vertical body, absolute or percentage of the container width.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        body_width: Option<SizeSpec>,
        /// Thickness of the horizontal arm, absolute or percentage of the container height.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        arm_height: Option<SizeSpec>,
        /// Optional inline label.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<LabelSpec>,
    },
    /// Any other shape (sliders, graphs, icons); never grouped.
    #[serde(other)]
    Unknown,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Inline label rendered inside a non-text shape.
pub struct LabelSpec {
    /// Raw label content.
    pub text: String,
    /// Case transform applied when rendering.
    #[serde(default)]
    pub text_transform: TextTransform,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// Text case transform.
pub enum TextTransform {
    /// Render text as written.
    #[default]
    None,
    /// Upper-case every character.
    Uppercase,
    /// Lower-case every character.
    Lowercase,
    /// Upper-case the first letter of every word.
    Capitalize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// Side of an endcap that is open for attachment.
pub enum EndcapDirection {
    /// Open towards the left.
    Left,
    /// Open towards the right.
    Right,
}

impl EndcapDirection {
    /// Screen direction of the open side.
    pub fn direction(self) -> Direction {
        match self {
            Self::Left => Direction::Left,
            Self::Right => Direction::Right,
        }
    }
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "kebab-case")]
/// Corner an elbow turns around.
pub enum ElbowOrientation {
    /// Arm along the top edge, body along the left edge.
    TopLeft,
    /// Arm along the top edge, body along the right edge.
    TopRight,
    /// Arm along the bottom edge, body along the left edge.
    BottomLeft,
    /// Arm along the bottom edge, body along the right edge.
    BottomRight,
}

impl ElbowOrientation {
    /// Whether the arm runs along the top edge.
    pub fn is_top(self) -> bool {
        matches!(self, Self::TopLeft | Self::TopRight)
    }

    /// Whether the body runs along the left edge.
    pub fn is_left(self) -> bool {
        matches!(self, Self::TopLeft | Self::BottomLeft)
    }

    /// Direction the arm extends towards (and where row members attach).
    pub fn horizontal_connection(self) -> Direction {
        if self.is_left() {
            Direction::Right
        } else {
            Direction::Left
        }
    }

    /// Direction the body extends towards (and where column members attach).
    pub fn vertical_connection(self) -> Direction {
        if self.is_top() {
            Direction::Down
        } else {
            Direction::Up
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
/// Elbow thickness: an absolute number or an expression such as `"30px"` or `"25%"`.
pub enum SizeSpec {
    /// Absolute size in layout units.
    Absolute(f64),
    /// Textual size expression.
    Expr(String),
}

#[cfg(test)]
#[path = "../../tests/unit/snapshot/model.rs"]
mod tests;
