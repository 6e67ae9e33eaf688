use std::cmp::Ordering;

use crate::{
    engine::config::MorphConfig,
    foundation::core::{Rect, rect_area},
};

/// Geometric match cost shared by element and group matching.
///
/// `distance² × position_weight + ln(area_ratio)² × size_weight`, where the distance is taken
/// between centers and the area ratio is `max / min` (areas floored at 1 so degenerate boxes stay
/// finite).
pub fn match_cost(a: Rect, b: Rect, cfg: &MorphConfig) -> f64 {
    let distance = a.center().distance(b.center());
    let area_a = rect_area(a).max(1.0);
    let area_b = rect_area(b).max(1.0);
    let ratio = area_a.max(area_b) / area_a.min(area_b);
    distance * distance * cfg.position_weight + ratio.ln().powi(2) * cfg.size_weight
}

/// Total order over costs, then ids, so equal costs resolve the same way for every input order.
pub(crate) fn cmp_cost_then_id(a: (f64, &str), b: (f64, &str)) -> Ordering {
    a.0.total_cmp(&b.0).then_with(|| a.1.cmp(b.1))
}

/// Largest area first, then ascending id.
pub(crate) fn cmp_area_desc_then_id(a: (f64, &str), b: (f64, &str)) -> Ordering {
    b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1))
}

#[cfg(test)]
#[path = "../../tests/unit/matching/cost.rs"]
mod tests;
