use std::collections::HashMap;

use crate::{
    engine::config::MorphConfig,
    matching::{
        cost::{cmp_cost_then_id, match_cost},
        mapping::{ElementMapping, MatchOrigin},
    },
    shape::classify::{ClassifiedLayout, Element},
};

struct Candidate<'a> {
    cost: f64,
    source: &'a Element,
    target: &'a Element,
}

/// Pair elements that render the same normalized text.
///
/// Every admissible pair is costed, then pairs are accepted cheapest first while both sides are
/// still free. Two pure text elements must also lie within `text_position_tolerance` of each
/// other on both axes; labelled shapes may match across any distance.
#[tracing::instrument(skip_all)]
pub fn match_text(
    source: &ClassifiedLayout,
    target: &ClassifiedLayout,
    cfg: &MorphConfig,
    mapping: &mut ElementMapping,
) -> usize {
    let mut by_text: HashMap<&str, Vec<&Element>> = HashMap::new();
    for t in &target.elements {
        if mapping.is_target_mapped(t.index) {
            continue;
        }
        if let Some(text) = &t.text {
            by_text.entry(text.value.as_str()).or_default().push(t);
        }
    }

    let mut candidates = Vec::new();
    for s in &source.elements {
        if mapping.is_source_mapped(s.index) {
            continue;
        }
        let Some(text) = &s.text else {
            continue;
        };
        let Some(targets) = by_text.get(text.value.as_str()) else {
            continue;
        };
        for &t in targets {
            if s.is_pure_text() && t.is_pure_text() && !within_tolerance(s, t, cfg) {
                tracing::trace!(source = %s.id, target = %t.id, "text pair beyond tolerance");
                continue;
            }
            candidates.push(Candidate {
                cost: match_cost(s.rect, t.rect, cfg),
                source: s,
                target: t,
            });
        }
    }

    candidates.sort_by(|a, b| {
        cmp_cost_then_id((a.cost, a.source.id.as_str()), (b.cost, b.source.id.as_str()))
            .then_with(|| a.target.id.cmp(&b.target.id))
    });

    let mut accepted = 0;
    for c in candidates {
        if mapping.insert(c.source, c.target, MatchOrigin::Text, c.cost) {
            accepted += 1;
        }
    }
    tracing::debug!(accepted, "text matches");
    accepted
}

fn within_tolerance(a: &Element, b: &Element, cfg: &MorphConfig) -> bool {
    let (ca, cb) = (a.center(), b.center());
    (ca.x - cb.x).abs() <= cfg.text_position_tolerance
        && (ca.y - cb.y).abs() <= cfg.text_position_tolerance
}

#[cfg(test)]
#[path = "../../tests/unit/matching/text.rs"]
mod tests;
