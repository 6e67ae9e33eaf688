use std::collections::HashSet;

use crate::{
    cascade::planner::{CascadeSlot, ElbowCascadePlan, cascade_slots},
    engine::config::MorphConfig,
    foundation::core::{Bounds, LayoutSide},
    matching::mapping::ElementMapping,
    plan::instruction::{AnimationInstruction, AnimationPlan, InstructionKind, Phase},
    shape::{
        classify::{Category, ClassifiedLayout, Element},
        elbow::{ElbowGeometry, ElbowParams},
    },
};

/// How a matched pair is animated.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Transition {
    /// Affine move/scale between the two rects.
    Transform,
    /// Parametric elbow morph between two orientation-compatible elbows.
    ShapeMorph {
        /// Geometry of the source elbow.
        from: ElbowGeometry,
        /// Geometry of the target elbow.
        to: ElbowGeometry,
    },
    /// Source fades out, target enters like an unmatched element.
    Crossfade,
}

/// Transition used for a matched `source → target` pair.
pub fn resolve_transition(source: &Element, target: &Element) -> Transition {
    match (source.elbow(), target.elbow()) {
        (Some(a), Some(b)) if a.is_compatible(b) => Transition::ShapeMorph { from: *a, to: *b },
        (Some(_), _) | (_, Some(_)) => Transition::Crossfade,
        (None, None) if source.category() == target.category() => Transition::Transform,
        (None, None) => Transition::Crossfade,
    }
}

/// Start and length of each phase for one requested duration.
#[derive(Clone, Copy, Debug, PartialEq)]
struct PhaseClock {
    exit_ms: f64,
    transform_delay_ms: f64,
    transform_ms: f64,
    entrance_ms: f64,
}

impl PhaseClock {
    fn new(duration_ms: f64, cfg: &MorphConfig) -> Self {
        let t = &cfg.timing;
        let exit_ms = duration_ms * t.exit_fraction;
        Self {
            exit_ms,
            transform_delay_ms: exit_ms * (1.0 - t.exit_overlap),
            transform_ms: duration_ms * t.transform_fraction,
            entrance_ms: duration_ms * t.entrance_fraction,
        }
    }
}

/// Assemble exit, transform and entrance instructions into one plan.
///
/// Exits and transforms animate source elements; entrances animate target elements.
/// Entrances covered by a cascade start when the transforms end, offset by their cascade delay.
/// Every other entrance waits for the latest cascade entrance to finish.
#[tracing::instrument(skip_all)]
pub fn build_plan(
    source: &ClassifiedLayout,
    target: &ClassifiedLayout,
    mapping: &ElementMapping,
    cascades: &[ElbowCascadePlan],
    duration_ms: f64,
    cfg: &MorphConfig,
) -> AnimationPlan {
    let clock = PhaseClock::new(duration_ms, cfg);
    let eases = &cfg.eases;

    let mut exits = Vec::new();
    let mut transforms = Vec::new();
    // Targets entering in place of a crossfaded source, keyed by target index.
    let mut fallback_targets: HashSet<usize> = HashSet::new();

    for (s, t) in mapping.pairs() {
        let (src, tgt) = (&source.elements[s], &target.elements[t]);
        let kind = match resolve_transition(src, tgt) {
            Transition::Transform => InstructionKind::Transform {
                from: Bounds::from_rect(src.rect),
                to: Bounds::from_rect(tgt.rect),
            },
            Transition::ShapeMorph { from, to } => InstructionKind::ShapeMorph {
                from: ElbowParams::new(src.rect, &from),
                to: ElbowParams::new(tgt.rect, &to),
            },
            Transition::Crossfade => {
                tracing::trace!(source = %src.id, target = %tgt.id, "crossfade fallback");
                exits.push(fade_out(src, Some(tgt.id.as_str()), &clock, cfg));
                fallback_targets.insert(t);
                continue;
            }
        };
        transforms.push(AnimationInstruction {
            element_id: src.id.clone(),
            side: LayoutSide::Source,
            counterpart_id: Some(tgt.id.clone()),
            phase: Phase::Transform,
            delay_ms: clock.transform_delay_ms,
            duration_ms: clock.transform_ms,
            ease: eases.transform,
            kind,
        });
    }

    for src in &source.elements {
        if !mapping.is_source_mapped(src.index) {
            exits.push(fade_out(src, None, &clock, cfg));
        }
    }
    exits.sort_by_key(|i| source.index_of(&i.element_id));

    let transform_end = if transforms.is_empty() {
        clock.exit_ms
    } else {
        clock.transform_delay_ms + clock.transform_ms
    };

    let slots = cascade_slots(cascades);
    let mut entrances = Vec::new();
    let mut pending_fades = Vec::new();
    for tgt in &target.elements {
        let counterpart = match mapping.source_of(tgt.index) {
            None => None,
            Some(_) if !fallback_targets.contains(&tgt.index) => continue,
            Some(s) => Some(source.elements[s].id.clone()),
        };
        match slots.get(tgt.id.as_str()) {
            Some(slot) => entrances.push(cascade_entrance(
                tgt,
                counterpart,
                slot,
                transform_end,
                &clock,
                cfg,
            )),
            None => pending_fades.push((tgt, counterpart)),
        }
    }

    let cascade_end = entrances
        .iter()
        .map(AnimationInstruction::end_ms)
        .fold(transform_end, f64::max);
    for (tgt, counterpart) in pending_fades {
        entrances.push(AnimationInstruction {
            element_id: tgt.id.clone(),
            side: LayoutSide::Target,
            counterpart_id: counterpart,
            phase: Phase::Entrance,
            delay_ms: cascade_end,
            duration_ms: clock.entrance_ms,
            ease: eases.fade,
            kind: InstructionKind::FadeIn {
                at: Bounds::from_rect(tgt.rect),
                from_opacity: 0.0,
                to_opacity: 1.0,
            },
        });
    }
    entrances.sort_by(|a, b| {
        a.delay_ms
            .total_cmp(&b.delay_ms)
            .then_with(|| target.index_of(&a.element_id).cmp(&target.index_of(&b.element_id)))
    });

    tracing::debug!(
        exits = exits.len(),
        transforms = transforms.len(),
        entrances = entrances.len(),
        "animation plan"
    );

    let mut instructions = exits;
    instructions.extend(transforms);
    instructions.extend(entrances);
    AnimationPlan::seal(instructions)
}

fn fade_out(
    src: &Element,
    counterpart: Option<&str>,
    clock: &PhaseClock,
    cfg: &MorphConfig,
) -> AnimationInstruction {
    AnimationInstruction {
        element_id: src.id.clone(),
        side: LayoutSide::Source,
        counterpart_id: counterpart.map(str::to_owned),
        phase: Phase::Exit,
        delay_ms: 0.0,
        duration_ms: clock.exit_ms,
        ease: cfg.eases.fade,
        kind: InstructionKind::FadeOut {
            at: Bounds::from_rect(src.rect),
            from_opacity: 1.0,
            to_opacity: 0.0,
        },
    }
}

fn cascade_entrance(
    tgt: &Element,
    counterpart: Option<String>,
    slot: &CascadeSlot,
    start_ms: f64,
    clock: &PhaseClock,
    cfg: &MorphConfig,
) -> AnimationInstruction {
    let at = Bounds::from_rect(tgt.rect);
    let (kind, ease) = if tgt.category() == Category::Text {
        (
            InstructionKind::SquishIn {
                at,
                direction: slot.direction,
            },
            cfg.eases.squish,
        )
    } else {
        (
            InstructionKind::CascadeFadeIn {
                at,
                direction: slot.direction,
            },
            cfg.eases.fade,
        )
    };
    AnimationInstruction {
        element_id: tgt.id.clone(),
        side: LayoutSide::Target,
        counterpart_id: counterpart,
        phase: Phase::Entrance,
        delay_ms: start_ms + slot.delay_ms,
        duration_ms: clock.entrance_ms,
        ease,
        kind,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/plan/builder.rs"]
mod tests;
