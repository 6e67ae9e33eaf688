use crate::foundation::error::{MorphError, MorphResult};

pub use kurbo::{BezPath, Point, Rect, Vec2};

/// Axis-aligned box in `x, y, width, height` form, as produced by the layout engine.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Bounds {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Extent along x.
    pub width: f64,
    /// Extent along y.
    pub height: f64,
}

impl Bounds {
    /// Bounds from origin and size.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Geometry is finalized once every component is finite and the size is non-negative.
    pub fn is_finalized(&self) -> bool {
        [self.x, self.y, self.width, self.height]
            .iter()
            .all(|v| v.is_finite())
            && self.width >= 0.0
            && self.height >= 0.0
    }

    /// Convert to a corner-based [`Rect`].
    pub fn to_rect(self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    /// Convert from a corner-based [`Rect`].
    pub fn from_rect(r: Rect) -> Self {
        Self::new(r.x0, r.y0, r.width(), r.height())
    }

    /// Validate bounds used as the morph container.
    pub fn validate_container(&self) -> MorphResult<Rect> {
        if !self.is_finalized() {
            return Err(MorphError::geometry("container bounds must be finite"));
        }
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(MorphError::geometry("container width/height must be > 0"));
        }
        Ok(self.to_rect())
    }
}

/// Which of the two layouts an element belongs to.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum LayoutSide {
    /// The layout currently on screen.
    Source,
    /// The newly requested layout.
    Target,
}

/// Grouping axis. Horizontal groups are rows keyed by y, vertical groups are columns keyed by x.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    /// Rows.
    Horizontal,
    /// Columns.
    Vertical,
}

impl Axis {
    /// The other axis.
    pub fn orthogonal(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }
}

/// Screen direction along one axis (y grows downward).
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Toward smaller x.
    Left,
    /// Toward larger x.
    Right,
    /// Toward smaller y.
    Up,
    /// Toward larger y.
    Down,
}

impl Direction {
    /// Axis this direction travels along.
    pub fn axis(self) -> Axis {
        match self {
            Self::Left | Self::Right => Axis::Horizontal,
            Self::Up | Self::Down => Axis::Vertical,
        }
    }

    /// Coordinate of the edge of `r` facing this direction.
    pub fn edge_of(self, r: Rect) -> f64 {
        match self {
            Self::Left => r.x0,
            Self::Right => r.x1,
            Self::Up => r.y0,
            Self::Down => r.y1,
        }
    }

    /// Whether `member` lies entirely past the edge of `from` facing this direction, allowing
    /// `slack` units of overlap.
    pub fn admits(self, from: Rect, member: Rect, slack: f64) -> bool {
        match self {
            Self::Left => member.x1 <= from.x0 + slack,
            Self::Right => member.x0 >= from.x1 - slack,
            Self::Up => member.y1 <= from.y0 + slack,
            Self::Down => member.y0 >= from.y1 - slack,
        }
    }

    /// Signed distance of `p` past `anchor` when travelling in this direction.
    pub fn distance_past(self, anchor: f64, p: Point) -> f64 {
        match self {
            Self::Left => anchor - p.x,
            Self::Right => p.x - anchor,
            Self::Up => anchor - p.y,
            Self::Down => p.y - anchor,
        }
    }
}

pub(crate) fn rect_area(r: Rect) -> f64 {
    (r.width() * r.height()).abs()
}

/// Union of a non-empty set of rects; `None` when the iterator is empty.
pub(crate) fn union_all(rects: impl IntoIterator<Item = Rect>) -> Option<Rect> {
    rects.into_iter().reduce(|acc, r| acc.union(r))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
