use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use crate::{
    engine::config::MorphConfig,
    foundation::core::{Axis, Direction},
    matching::{grouping::Grouping, groups::GroupMatch, mapping::ElementMapping},
    shape::classify::{ClassifiedLayout, Element},
};

/// Ordered reveal along one connection of an elbow.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DirectionPlan {
    /// Axis of the group being walked.
    pub axis: Axis,
    /// Direction the reveal travels away from the anchor.
    pub direction: Direction,
    /// Elbow whose edge anchors this walk.
    pub anchor_element_id: String,
    /// Coordinate of the anchoring edge.
    pub anchor: f64,
    /// Target elements from nearest to farthest.
    pub ordered_element_ids: Vec<String>,
    /// Delay of the first element, relative to the start of the cascade.
    pub base_delay_ms: f64,
    /// Delay added per position.
    pub step_delay_ms: f64,
}

impl DirectionPlan {
    /// Delay of the element at `position` in [`DirectionPlan::ordered_element_ids`].
    pub fn delay_at(&self, position: usize) -> f64 {
        self.base_delay_ms + position as f64 * self.step_delay_ms
    }
}

/// Cascade built around one matched, orientation-compatible elbow pair.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ElbowCascadePlan {
    /// Id of the elbow in the source layout.
    pub source_elbow: String,
    /// Id of the matched elbow in the target layout.
    pub target_elbow: String,
    /// One walk per connection, hops included.
    pub directions: Vec<DirectionPlan>,
}

/// Cascade slot of one target element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CascadeSlot {
    /// Delay relative to the start of the cascade.
    pub delay_ms: f64,
    /// Direction the element squishes in from.
    pub direction: Direction,
}

/// Build cascade plans for every matched group pair anchored by an elbow pair.
///
/// Each target elbow walks its group on every covered axis. When a matched group pair covers
/// only one axis, the orthogonal group at the same elbow is walked as well, and any further
/// elbow reached on a walk continues the cascade along its own orthogonal connection.
#[tracing::instrument(skip_all)]
pub fn plan_cascades(
    source: &ClassifiedLayout,
    source_groups: &Grouping,
    target: &ClassifiedLayout,
    target_groups: &Grouping,
    matches: &[GroupMatch],
    mapping: &ElementMapping,
    cfg: &MorphConfig,
) -> Vec<ElbowCascadePlan> {
    // (target elbow, source elbow) -> axes covered by matched group pairs
    let mut covered: BTreeMap<(usize, usize), BTreeSet<Axis>> = BTreeMap::new();
    for m in matches {
        let (Some(sg), Some(tg)) = (
            source_groups.group(m.axis, m.source_group),
            target_groups.group(m.axis, m.target_group),
        ) else {
            continue;
        };
        for &s in &sg.members {
            let Some(s_geom) = source.elements[s].elbow() else {
                continue;
            };
            let Some(t) = mapping.target_of(s) else {
                continue;
            };
            if !tg.contains(t) {
                continue;
            }
            let Some(t_geom) = target.elements[t].elbow() else {
                continue;
            };
            if s_geom.is_compatible(t_geom) {
                covered.entry((t, s)).or_default().insert(m.axis);
            }
        }
    }

    let mut plans = Vec::with_capacity(covered.len());
    for ((t, s), axes) in covered {
        let mut axes: Vec<Axis> = axes.into_iter().collect();
        if axes.len() == 1 {
            axes.push(axes[0].orthogonal());
        }

        let mut visited = HashSet::from([t]);
        let mut directions = Vec::new();
        for axis in axes {
            walk(
                target,
                target_groups,
                t,
                axis,
                0.0,
                cfg.cascade_step_ms,
                &mut visited,
                &mut directions,
            );
        }
        if directions.is_empty() {
            continue;
        }
        plans.push(ElbowCascadePlan {
            source_elbow: source.elements[s].id.clone(),
            target_elbow: target.elements[t].id.clone(),
            directions,
        });
    }
    tracing::debug!(plans = plans.len(), "cascade plans");
    plans
}

#[allow(clippy::too_many_arguments)]
fn walk(
    target: &ClassifiedLayout,
    groups: &Grouping,
    elbow_index: usize,
    axis: Axis,
    base_delay_ms: f64,
    step_delay_ms: f64,
    visited: &mut HashSet<usize>,
    out: &mut Vec<DirectionPlan>,
) {
    let elbow = &target.elements[elbow_index];
    let (Some(geom), Some(group)) = (elbow.elbow(), groups.group_of(axis, elbow_index)) else {
        return;
    };
    let direction = geom.connection(axis);
    let anchor = direction.edge_of(elbow.rect);

    let mut members: Vec<(f64, &Element)> = group
        .members
        .iter()
        .filter(|&&m| m != elbow_index)
        .map(|&m| &target.elements[m])
        .map(|e| (direction.distance_past(anchor, e.center()), e))
        .collect();
    members.sort_by(|(da, a), (db, b)| da.total_cmp(db).then_with(|| a.id.cmp(&b.id)));

    let mut ordered = Vec::with_capacity(members.len());
    let mut hops = Vec::new();
    for (_, el) in members {
        if el.elbow().is_some() {
            if !visited.insert(el.index) {
                continue;
            }
            hops.push((el.index, ordered.len()));
        }
        ordered.push(el.id.clone());
    }
    if ordered.is_empty() {
        return;
    }

    out.push(DirectionPlan {
        axis,
        direction,
        anchor_element_id: elbow.id.clone(),
        anchor,
        ordered_element_ids: ordered,
        base_delay_ms,
        step_delay_ms,
    });

    for (hop, position) in hops {
        // The hop elbow itself appears at `position`; its own cascade starts one step later.
        let hop_base = base_delay_ms + (position + 1) as f64 * step_delay_ms;
        walk(
            target,
            groups,
            hop,
            axis.orthogonal(),
            hop_base,
            step_delay_ms,
            visited,
            out,
        );
    }
}

/// Earliest cascade slot of every target element covered by a plan, keyed by element id.
pub fn cascade_slots(plans: &[ElbowCascadePlan]) -> HashMap<&str, CascadeSlot> {
    let mut slots: HashMap<&str, CascadeSlot> = HashMap::new();
    for plan in plans {
        for dp in &plan.directions {
            for (i, id) in dp.ordered_element_ids.iter().enumerate() {
                let slot = CascadeSlot {
                    delay_ms: dp.delay_at(i),
                    direction: dp.direction,
                };
                slots
                    .entry(id.as_str())
                    .and_modify(|cur| {
                        if slot.delay_ms < cur.delay_ms {
                            *cur = slot;
                        }
                    })
                    .or_insert(slot);
            }
        }
    }
    slots
}

#[cfg(test)]
#[path = "../../tests/unit/cascade/planner.rs"]
mod tests;
