use crate::{
    engine::config::MorphConfig,
    matching::{
        cost::{cmp_area_desc_then_id, cmp_cost_then_id, match_cost},
        grouping::Grouping,
        groups::GroupMatch,
        mapping::{ElementMapping, MatchOrigin},
    },
    shape::classify::{ClassifiedLayout, Element},
};

/// Match the still-free members of every matched group pair.
#[tracing::instrument(skip_all, fields(pairs = matches.len()))]
pub fn match_within_groups(
    source: &ClassifiedLayout,
    source_groups: &Grouping,
    target: &ClassifiedLayout,
    target_groups: &Grouping,
    matches: &[GroupMatch],
    cfg: &MorphConfig,
    mapping: &mut ElementMapping,
) -> usize {
    let mut accepted = 0;
    for m in matches {
        let (Some(sg), Some(tg)) = (
            source_groups.group(m.axis, m.source_group),
            target_groups.group(m.axis, m.target_group),
        ) else {
            continue;
        };
        accepted += greedy_match(
            source,
            &sg.members,
            target,
            &tg.members,
            cfg,
            mapping,
            MatchOrigin::Cluster,
        );
    }
    tracing::debug!(accepted, "cluster element matches");
    accepted
}

/// Final pass over every element still unmatched on either side.
#[tracing::instrument(skip_all)]
pub fn match_residual(
    source: &ClassifiedLayout,
    target: &ClassifiedLayout,
    cfg: &MorphConfig,
    mapping: &mut ElementMapping,
) -> usize {
    let sources: Vec<usize> = (0..source.len())
        .filter(|&i| !mapping.is_source_mapped(i))
        .collect();
    let targets: Vec<usize> = (0..target.len())
        .filter(|&i| !mapping.is_target_mapped(i))
        .collect();
    let accepted = greedy_match(
        source,
        &sources,
        target,
        &targets,
        cfg,
        mapping,
        MatchOrigin::Residual,
    );
    tracing::debug!(accepted, "residual element matches");
    accepted
}

/// Whether two elements may be paired by the per-category matcher.
pub(crate) fn pairable(a: &Element, b: &Element) -> bool {
    if a.category() != b.category() {
        return false;
    }
    match (a.elbow(), b.elbow()) {
        (Some(ga), Some(gb)) => ga.is_compatible(gb),
        _ => true,
    }
}

fn greedy_match(
    source: &ClassifiedLayout,
    source_pool: &[usize],
    target: &ClassifiedLayout,
    target_pool: &[usize],
    cfg: &MorphConfig,
    mapping: &mut ElementMapping,
    origin: MatchOrigin,
) -> usize {
    let mut order: Vec<&Element> = source_pool
        .iter()
        .map(|&i| &source.elements[i])
        .filter(|e| !mapping.is_source_mapped(e.index))
        .collect();
    order.sort_by(|a, b| {
        cmp_area_desc_then_id((a.area(), a.id.as_str()), (b.area(), b.id.as_str()))
    });

    let mut accepted = 0;
    for s in order {
        let best = target_pool
            .iter()
            .map(|&i| &target.elements[i])
            .filter(|t| !mapping.is_target_mapped(t.index) && pairable(s, t))
            .map(|t| (match_cost(s.rect, t.rect, cfg), t))
            .min_by(|(ca, a), (cb, b)| {
                cmp_cost_then_id((*ca, a.id.as_str()), (*cb, b.id.as_str()))
            });
        if let Some((cost, t)) = best
            && mapping.insert(s, t, origin, cost)
        {
            accepted += 1;
        }
    }
    accepted
}

#[cfg(test)]
#[path = "../../tests/unit/matching/residual.rs"]
mod tests;
