use std::collections::{BTreeSet, HashMap};

use crate::{
    engine::config::MorphConfig,
    foundation::core::{Axis, Bounds, Rect, rect_area, union_all},
    shape::classify::{Category, ClassifiedLayout, Element, Shape},
};

/// Row (horizontal) or column (vertical) of aligned elements.
#[derive(Clone, Debug, PartialEq)]
pub struct Group {
    /// Index within the groups of the same axis.
    pub id: usize,
    /// Rows are horizontal, columns vertical.
    pub axis: Axis,
    /// Element indices in scan order.
    pub members: Vec<usize>,
    /// Mean grouping coordinate of the members.
    pub mean: f64,
    /// Union of the member rects.
    pub bounds: Rect,
    /// Sorted distinct non-text categories; only groups with equal signatures are matched.
    pub signature: Vec<Category>,
}

impl Group {
    /// Area of the group bounds.
    pub fn area(&self) -> f64 {
        rect_area(self.bounds)
    }

    /// Whether the element at `element` is a member.
    pub fn contains(&self, element: usize) -> bool {
        self.members.contains(&element)
    }
}

/// Serializable view of a group, with element ids instead of indices.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GroupReport {
    /// Index within the groups of the same axis.
    pub id: usize,
    /// Rows are horizontal, columns vertical.
    pub axis: Axis,
    /// Mean grouping coordinate of the members.
    pub mean: f64,
    /// Union of the member bounds.
    pub bounds: Bounds,
    /// Sorted distinct non-text categories.
    pub signature: Vec<Category>,
    /// Member ids in scan order.
    pub members: Vec<String>,
}

/// Both groupings of one layout.
#[derive(Clone, Debug, Default)]
pub struct Grouping {
    /// Rows, top to bottom.
    pub horizontal: Vec<Group>,
    /// Columns, left to right.
    pub vertical: Vec<Group>,
    /// Elements that are not groupable at all.
    pub ungrouped: Vec<usize>,
    membership: HashMap<(Axis, usize), usize>,
}

impl Grouping {
    /// All groups on `axis`.
    pub fn groups(&self, axis: Axis) -> &[Group] {
        match axis {
            Axis::Horizontal => &self.horizontal,
            Axis::Vertical => &self.vertical,
        }
    }

    /// Group `id` on `axis`.
    pub fn group(&self, axis: Axis, id: usize) -> Option<&Group> {
        self.groups(axis).get(id)
    }

    /// Group holding `element` on `axis`, if any.
    pub fn group_of(&self, axis: Axis, element: usize) -> Option<&Group> {
        let id = *self.membership.get(&(axis, element))?;
        self.group(axis, id)
    }

    /// Rows then columns, with member ids resolved against `layout`.
    pub fn report(&self, layout: &ClassifiedLayout) -> Vec<GroupReport> {
        self.horizontal
            .iter()
            .chain(&self.vertical)
            .map(|g| GroupReport {
                id: g.id,
                axis: g.axis,
                mean: g.mean,
                bounds: Bounds::from_rect(g.bounds),
                signature: g.signature.clone(),
                members: g
                    .members
                    .iter()
                    .map(|&i| layout.elements[i].id.clone())
                    .collect(),
            })
            .collect()
    }
}

/// Cluster a layout into rows and columns.
#[tracing::instrument(skip_all, fields(side = ?layout.side))]
pub fn group_elements(layout: &ClassifiedLayout, cfg: &MorphConfig) -> Grouping {
    let horizontal = group_axis(layout, Axis::Horizontal, cfg.grouping_tolerance);
    let vertical = group_axis(layout, Axis::Vertical, cfg.grouping_tolerance);

    let mut membership = HashMap::new();
    for g in horizontal.iter().chain(&vertical) {
        for &m in &g.members {
            membership.insert((g.axis, m), g.id);
        }
    }
    let ungrouped = layout
        .elements
        .iter()
        .filter(|e| !e.is_groupable())
        .map(|e| e.index)
        .collect();

    tracing::debug!(
        rows = horizontal.len(),
        columns = vertical.len(),
        "grouped layout"
    );
    Grouping {
        horizontal,
        vertical,
        ungrouped,
        membership,
    }
}

struct PendingGroup {
    members: Vec<usize>,
    sum: f64,
}

impl PendingGroup {
    fn mean(&self) -> f64 {
        self.sum / self.members.len() as f64
    }
}

fn group_axis(layout: &ClassifiedLayout, axis: Axis, tolerance: f64) -> Vec<Group> {
    let mut order: Vec<&Element> = layout
        .elements
        .iter()
        .filter(|e| joins_axis(e, axis))
        .collect();
    // Rows are scanned left to right, columns top to bottom.
    order.sort_by(|a, b| {
        let (pa, sa) = scan_key(a.rect, axis);
        let (pb, sb) = scan_key(b.rect, axis);
        pa.total_cmp(&pb)
            .then_with(|| sa.total_cmp(&sb))
            .then_with(|| a.id.cmp(&b.id))
    });

    let mut pending: Vec<PendingGroup> = Vec::new();
    for el in order {
        let coord = el.grouping_coordinate(axis);
        let slot = pending.iter_mut().find(|g| {
            (coord - g.mean()).abs() <= tolerance
                && g.members
                    .iter()
                    .all(|&m| compatible(&layout.elements[m], el, axis, tolerance))
        });
        match slot {
            Some(g) => {
                g.members.push(el.index);
                g.sum += coord;
            }
            None => pending.push(PendingGroup {
                members: vec![el.index],
                sum: coord,
            }),
        }
    }

    pending
        .into_iter()
        .enumerate()
        .filter_map(|(id, g)| {
            let bounds = union_all(g.members.iter().map(|&m| layout.elements[m].rect))?;
            let signature = g
                .members
                .iter()
                .map(|&m| layout.elements[m].category())
                .filter(|c| *c != Category::Text)
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect();
            Some(Group {
                id,
                axis,
                mean: g.mean(),
                members: g.members,
                bounds,
                signature,
            })
        })
        .collect()
}

fn scan_key(r: Rect, axis: Axis) -> (f64, f64) {
    match axis {
        Axis::Horizontal => (r.x0, r.y0),
        Axis::Vertical => (r.y0, r.x0),
    }
}

fn joins_axis(el: &Element, axis: Axis) -> bool {
    match el.shape {
        Shape::Unknown => false,
        Shape::Endcap { .. } => axis == Axis::Horizontal,
        Shape::Text | Shape::Rectangle | Shape::Elbow(_) => true,
    }
}

fn compatible(a: &Element, b: &Element, axis: Axis, slack: f64) -> bool {
    admits(a, b, axis, slack) && admits(b, a, axis, slack)
}

// Whether `owner` tolerates `member` in the same group on `axis`.
fn admits(owner: &Element, member: &Element, axis: Axis, slack: f64) -> bool {
    match &owner.shape {
        Shape::Elbow(g) => g.admits(owner.rect, axis, member.rect, slack),
        Shape::Endcap { direction } => {
            axis == Axis::Horizontal && direction.direction().admits(owner.rect, member.rect, slack)
        }
        Shape::Text | Shape::Rectangle | Shape::Unknown => true,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/matching/grouping.rs"]
mod tests;
