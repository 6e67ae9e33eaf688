use std::collections::{BTreeMap, HashSet};

use crate::{
    engine::config::MorphConfig,
    foundation::core::Axis,
    matching::{
        cost::match_cost,
        grouping::{Group, Grouping},
    },
    shape::classify::Category,
};

/// Correspondence between a source group and a target group on the same axis.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GroupMatch {
    /// Axis shared by both groups.
    pub axis: Axis,
    /// Group id in the source grouping.
    pub source_group: usize,
    /// Group id in the target grouping.
    pub target_group: usize,
    /// Match cost between the two group bounds.
    pub cost: f64,
}

/// Pair source groups with target groups sharing the same signature.
///
/// Source groups are visited largest area first and take the cheapest free target group of their
/// signature bucket; equal costs go to the lower target group id.
#[tracing::instrument(skip_all)]
pub fn match_groups(source: &Grouping, target: &Grouping, cfg: &MorphConfig) -> Vec<GroupMatch> {
    let mut out = Vec::new();
    for axis in [Axis::Horizontal, Axis::Vertical] {
        match_axis(
            source.groups(axis),
            target.groups(axis),
            axis,
            cfg,
            &mut out,
        );
    }
    tracing::debug!(matches = out.len(), "group matches");
    out
}

fn match_axis(
    source: &[Group],
    target: &[Group],
    axis: Axis,
    cfg: &MorphConfig,
    out: &mut Vec<GroupMatch>,
) {
    let mut buckets: BTreeMap<&[Category], Vec<&Group>> = BTreeMap::new();
    for g in target {
        buckets.entry(g.signature.as_slice()).or_default().push(g);
    }

    let mut order: Vec<&Group> = source.iter().collect();
    order.sort_by(|a, b| b.area().total_cmp(&a.area()).then_with(|| a.id.cmp(&b.id)));

    let mut used = HashSet::new();
    for sg in order {
        let Some(candidates) = buckets.get(sg.signature.as_slice()) else {
            continue;
        };
        let best = candidates
            .iter()
            .filter(|tg| !used.contains(&tg.id))
            .map(|tg| (match_cost(sg.bounds, tg.bounds, cfg), *tg))
            .min_by(|(ca, a), (cb, b)| ca.total_cmp(cb).then_with(|| a.id.cmp(&b.id)));
        if let Some((cost, tg)) = best {
            used.insert(tg.id);
            out.push(GroupMatch {
                axis,
                source_group: sg.id,
                target_group: tg.id,
                cost,
            });
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/matching/groups.rs"]
mod tests;
