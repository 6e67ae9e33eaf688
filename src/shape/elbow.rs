use kurbo::Affine;

use crate::{
    animation::ease::lerp,
    foundation::core::{Axis, BezPath, Bounds, Direction, Rect},
    snapshot::model::{ElbowOrientation, SizeSpec},
};

/// Resolved elbow parameters of a classified element.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ElbowGeometry {
    /// Corner the elbow occupies.
    pub orientation: ElbowOrientation,
    /// Thickness of the vertical body.
    pub body_width: f64,
    /// Thickness of the horizontal arm.
    pub arm_height: f64,
}

impl ElbowGeometry {
    /// Direction the elbow connects towards along `axis`.
    pub fn connection(&self, axis: Axis) -> Direction {
        match axis {
            Axis::Horizontal => self.orientation.horizontal_connection(),
            Axis::Vertical => self.orientation.vertical_connection(),
        }
    }

    /// Coordinate used to place the elbow in rows (inner edge of the arm) and columns (inner
    /// edge of the body).
    pub fn grouping_coordinate(&self, rect: Rect, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal if self.orientation.is_top() => rect.y0 + self.arm_height,
            Axis::Horizontal => rect.y1 - self.arm_height,
            Axis::Vertical if self.orientation.is_left() => rect.x0 + self.body_width,
            Axis::Vertical => rect.x1 - self.body_width,
        }
    }

    /// Whether `member` may share a group on `axis` with an elbow occupying `rect`.
    pub fn admits(&self, rect: Rect, axis: Axis, member: Rect, slack: f64) -> bool {
        self.connection(axis).admits(rect, member, slack)
    }

    /// Whether a shape morph between the two elbows is possible.
    pub fn is_compatible(&self, other: &ElbowGeometry) -> bool {
        self.orientation == other.orientation
    }
}

/// Resolve a body width or arm height against the matching container extent.
///
/// Unset, unparseable, non-positive and non-finite values all resolve to `fallback`.
pub(crate) fn resolve_thickness(
    spec: Option<&SizeSpec>,
    container_extent: f64,
    fallback: f64,
) -> f64 {
    let raw = match spec {
        None => None,
        Some(SizeSpec::Absolute(v)) => Some(*v),
        Some(SizeSpec::Expr(s)) => parse_size_expr(s, container_extent),
    };
    match raw {
        Some(v) if v.is_finite() && v > 0.0 => v,
        _ => fallback,
    }
}

fn parse_size_expr(s: &str, container_extent: f64) -> Option<f64> {
    let s = s.trim();
    if let Some(pct) = s.strip_suffix('%') {
        let pct: f64 = pct.trim().parse().ok()?;
        return Some(container_extent * pct / 100.0);
    }
    s.strip_suffix("px").unwrap_or(s).trim().parse().ok()
}

/// Parametric elbow state interpolated by shape morphs.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ElbowParams {
    /// Corner the elbow occupies.
    pub orientation: ElbowOrientation,
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Outer width.
    pub width: f64,
    /// Outer height.
    pub height: f64,
    /// Thickness of the vertical body.
    pub body_width: f64,
    /// Thickness of the horizontal arm.
    pub arm_height: f64,
}

impl ElbowParams {
    /// Parameters of an elbow with `geometry` occupying `rect`.
    pub fn new(rect: Rect, geometry: &ElbowGeometry) -> Self {
        Self {
            orientation: geometry.orientation,
            x: rect.x0,
            y: rect.y0,
            width: rect.width(),
            height: rect.height(),
            body_width: geometry.body_width,
            arm_height: geometry.arm_height,
        }
    }

    /// Outer bounds.
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, self.width, self.height)
    }

    /// Component-wise interpolation; the orientation of `self` is kept.
    pub fn lerp(&self, to: &ElbowParams, t: f64) -> Self {
        Self {
            orientation: self.orientation,
            x: lerp(self.x, to.x, t),
            y: lerp(self.y, to.y, t),
            width: lerp(self.width, to.width, t),
            height: lerp(self.height, to.height, t),
            body_width: lerp(self.body_width, to.body_width, t),
            arm_height: lerp(self.arm_height, to.arm_height, t),
        }
    }

    /// Connector outline for the current parameters.
    ///
    /// The path is built for a top-left elbow and mirrored into the other orientations.
    pub fn outline(&self) -> BezPath {
        let (x0, y0) = (self.x, self.y);
        let (x1, y1) = (self.x + self.width.max(0.0), self.y + self.height.max(0.0));
        let bw = self.body_width.clamp(0.0, self.width.max(0.0));
        let ah = self.arm_height.clamp(0.0, self.height.max(0.0));

        let outer = ah.min(bw).min(self.width.max(0.0) / 2.0).min(self.height.max(0.0) / 2.0);
        let inner = (outer / 2.0)
            .min((x1 - x0 - bw).max(0.0))
            .min((y1 - y0 - ah).max(0.0));

        let mut path = BezPath::new();
        path.move_to((x0, y1));
        path.line_to((x0, y0 + outer));
        path.quad_to((x0, y0), (x0 + outer, y0));
        path.line_to((x1, y0));
        path.line_to((x1, y0 + ah));
        path.line_to((x0 + bw + inner, y0 + ah));
        path.quad_to((x0 + bw, y0 + ah), (x0 + bw, y0 + ah + inner));
        path.line_to((x0 + bw, y1));
        path.close_path();

        let flip_x = !self.orientation.is_left();
        let flip_y = !self.orientation.is_top();
        let mirror = Affine::new([
            if flip_x { -1.0 } else { 1.0 },
            0.0,
            0.0,
            if flip_y { -1.0 } else { 1.0 },
            if flip_x { x0 + x1 } else { 0.0 },
            if flip_y { y0 + y1 } else { 0.0 },
        ]);
        path.apply_affine(mirror);
        path
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shape/elbow.rs"]
mod tests;
