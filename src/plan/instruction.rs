use crate::{
    animation::ease::Ease,
    foundation::core::{Bounds, Direction, LayoutSide},
    shape::elbow::ElbowParams,
};

/// Phase an instruction belongs to.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Unmatched source elements fade out.
    Exit,
    /// Matched pairs move, scale or morph.
    Transform,
    /// Unmatched target elements appear.
    Entrance,
}

/// What an instruction animates.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InstructionKind {
    /// Move/scale from the source rect to the target rect.
    Transform {
        /// Source rect.
        from: Bounds,
        /// Target rect.
        to: Bounds,
    },
    /// Parametric elbow morph; the outline is regenerated from interpolated parameters.
    ShapeMorph {
        /// Source elbow.
        from: ElbowParams,
        /// Target elbow.
        to: ElbowParams,
    },
    /// Opacity ramp of an element leaving the layout.
    FadeOut {
        /// Rect the element stays at.
        at: Bounds,
        /// Opacity when the fade starts.
        from_opacity: f64,
        /// Opacity when the fade ends.
        to_opacity: f64,
    },
    /// Opacity ramp of an element entering the layout.
    FadeIn {
        /// Rect the element appears at.
        at: Bounds,
        /// Opacity when the fade starts.
        from_opacity: f64,
        /// Opacity when the fade ends.
        to_opacity: f64,
    },
    /// Fade-in scheduled by an elbow cascade.
    CascadeFadeIn {
        /// Rect the element appears at.
        at: Bounds,
        /// Direction of the cascade reaching the element.
        direction: Direction,
    },
    /// Text entrance that expands from a squished state along the cascade direction.
    SquishIn {
        /// Rect the element ends at.
        at: Bounds,
        /// Direction of the cascade reaching the element.
        direction: Direction,
    },
}

impl InstructionKind {
    /// Rect the element occupies once the instruction has completed.
    pub fn final_bounds(&self) -> Bounds {
        match self {
            Self::Transform { to, .. } => *to,
            Self::ShapeMorph { to, .. } => to.bounds(),
            Self::FadeOut { at, .. }
            | Self::FadeIn { at, .. }
            | Self::CascadeFadeIn { at, .. }
            | Self::SquishIn { at, .. } => *at,
        }
    }
}

/// One scheduled animation of one element.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnimationInstruction {
    /// Element being animated.
    pub element_id: String,
    /// Layout the element belongs to.
    pub side: LayoutSide,
    /// Element on the other side for matched pairs, including crossfade fallbacks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counterpart_id: Option<String>,
    /// Phase the instruction runs in.
    pub phase: Phase,
    /// Start time relative to the start of the morph.
    pub delay_ms: f64,
    /// Run time after `delay_ms`.
    pub duration_ms: f64,
    /// Easing applied to local progress.
    pub ease: Ease,
    /// What is animated.
    pub kind: InstructionKind,
}

impl AnimationInstruction {
    /// Time at which the instruction completes.
    pub fn end_ms(&self) -> f64 {
        self.delay_ms + self.duration_ms
    }
}

/// Time window covered by the instructions of one phase.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PhaseWindow {
    /// Phase covered.
    pub phase: Phase,
    /// Earliest delay among the phase's instructions.
    pub start_ms: f64,
    /// Latest end among the phase's instructions.
    pub end_ms: f64,
}

/// Time-stamped bundle of instructions handed to the renderer.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnimationPlan {
    /// Exit instructions first, then transforms, then entrances.
    pub instructions: Vec<AnimationInstruction>,
    /// Latest end time of any instruction.
    pub total_duration_ms: f64,
    /// Windows of the non-empty phases, in phase order.
    pub phases: Vec<PhaseWindow>,
}

impl AnimationPlan {
    /// Whether nothing is scheduled.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Instructions of one phase, in plan order.
    pub fn phase(&self, phase: Phase) -> impl Iterator<Item = &AnimationInstruction> {
        self.instructions.iter().filter(move |i| i.phase == phase)
    }

    /// Instructions scheduled for `element_id` on `side`.
    ///
    /// The iterator borrows only the plan, so `element_id` may be a temporary.
    pub fn for_element<'a>(
        &'a self,
        side: LayoutSide,
        element_id: &str,
    ) -> impl Iterator<Item = &'a AnimationInstruction> + use<'a> {
        let element_id = element_id.to_owned();
        self.instructions
            .iter()
            .filter(move |i| i.side == side && i.element_id == element_id)
    }

    pub(crate) fn seal(instructions: Vec<AnimationInstruction>) -> Self {
        let total_duration_ms = instructions
            .iter()
            .map(AnimationInstruction::end_ms)
            .fold(0.0, f64::max);
        let phases = [Phase::Exit, Phase::Transform, Phase::Entrance]
            .into_iter()
            .filter_map(|phase| {
                let mut it = instructions.iter().filter(|i| i.phase == phase);
                let first = it.next()?;
                let (start_ms, end_ms) = it.fold((first.delay_ms, first.end_ms()), |(s, e), i| {
                    (s.min(i.delay_ms), e.max(i.end_ms()))
                });
                Some(PhaseWindow {
                    phase,
                    start_ms,
                    end_ms,
                })
            })
            .collect();
        Self {
            instructions,
            total_duration_ms,
            phases,
        }
    }
}
