use crate::{
    animation::ease::lerp,
    foundation::core::{Bounds, Direction, LayoutSide},
    plan::instruction::{AnimationInstruction, AnimationPlan, InstructionKind},
    shape::elbow::ElbowParams,
};

/// Visual state of one element at a point in time.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ElementFrame {
    /// Element the frame belongs to.
    pub element_id: String,
    /// Layout the element comes from.
    pub side: LayoutSide,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Rect the element occupies, already squished for text entrances.
    pub bounds: Bounds,
    /// Squish factor along the cascade axis; `1.0` when not squished.
    pub scale: f64,
    /// Interpolated elbow parameters while a shape morph runs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elbow: Option<ElbowParams>,
    /// SVG path data of the regenerated elbow outline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outline: Option<String>,
}

/// Local progress of `instr` at `t_ms`, before easing.
pub fn progress(instr: &AnimationInstruction, t_ms: f64) -> f64 {
    if t_ms < instr.delay_ms {
        return 0.0;
    }
    if instr.duration_ms <= 0.0 {
        return 1.0;
    }
    ((t_ms - instr.delay_ms) / instr.duration_ms).clamp(0.0, 1.0)
}

/// Evaluate one instruction at `t_ms` on the plan clock.
pub fn sample_instruction(instr: &AnimationInstruction, t_ms: f64) -> ElementFrame {
    let e = instr.ease.apply(progress(instr, t_ms));
    let mut frame = ElementFrame {
        element_id: instr.element_id.clone(),
        side: instr.side,
        opacity: 1.0,
        bounds: instr.kind.final_bounds(),
        scale: 1.0,
        elbow: None,
        outline: None,
    };
    match &instr.kind {
        InstructionKind::Transform { from, to } => frame.bounds = lerp_bounds(from, to, e),
        InstructionKind::ShapeMorph { from, to } => {
            let params = from.lerp(to, e);
            frame.bounds = params.bounds();
            frame.outline = Some(params.outline().to_svg());
            frame.elbow = Some(params);
        }
        InstructionKind::FadeOut {
            at,
            from_opacity,
            to_opacity,
        }
        | InstructionKind::FadeIn {
            at,
            from_opacity,
            to_opacity,
        } => {
            frame.bounds = *at;
            frame.opacity = lerp(*from_opacity, *to_opacity, e);
        }
        InstructionKind::CascadeFadeIn { at, .. } => {
            frame.bounds = *at;
            frame.opacity = e;
        }
        InstructionKind::SquishIn { at, direction } => {
            frame.opacity = e;
            frame.scale = e;
            frame.bounds = squish(at, *direction, e);
        }
    }
    frame
}

/// Evaluate every instruction of `plan` at `t_ms`.
pub fn sample_plan(plan: &AnimationPlan, t_ms: f64) -> Vec<ElementFrame> {
    plan.instructions
        .iter()
        .map(|i| sample_instruction(i, t_ms))
        .collect()
}

fn lerp_bounds(a: &Bounds, b: &Bounds, t: f64) -> Bounds {
    Bounds::new(
        lerp(a.x, b.x, t),
        lerp(a.y, b.y, t),
        lerp(a.width, b.width, t),
        lerp(a.height, b.height, t),
    )
}

// Scale along the cascade axis, pinned to the edge facing the cascade anchor.
fn squish(at: &Bounds, direction: Direction, s: f64) -> Bounds {
    match direction {
        Direction::Right => Bounds::new(at.x, at.y, at.width * s, at.height),
        Direction::Left => Bounds::new(at.x + at.width * (1.0 - s), at.y, at.width * s, at.height),
        Direction::Down => Bounds::new(at.x, at.y, at.width, at.height * s),
        Direction::Up => Bounds::new(at.x, at.y + at.height * (1.0 - s), at.width, at.height * s),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/sample.rs"]
mod tests;
