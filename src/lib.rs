//! panel-morph is the morph engine of a declarative dashboard-panel library.
//!
//! Given the layout currently on screen and a newly requested layout, it finds a correspondence
//! between their elements and produces a time-stamped animation plan that morphs one into the
//! other. Planning is a single synchronous pass:
//!
//! - Classify both [`LayoutSnapshot`]s and cluster them into rows and columns
//! - Match elements by text, then by cluster, then globally
//! - Plan elbow cascades and assemble an [`AnimationPlan`] with [`plan_morph`]
//!
//! Executing a plan is left to the host through the [`Renderer`] and [`Scheduler`] traits,
//! driven by a [`MorphDriver`], or sampled frame by frame with [`sample_plan`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod cascade;
pub(crate) mod engine;
pub(crate) mod matching;
pub(crate) mod overlay;
pub(crate) mod plan;
pub(crate) mod shape;
pub(crate) mod snapshot;

pub use crate::foundation::core::{
    Axis, BezPath, Bounds, Direction, LayoutSide, Point, Rect, Vec2,
};
pub use crate::foundation::error::{MorphError, MorphResult};

pub use crate::animation::ease::Ease;
pub use crate::animation::sample::{ElementFrame, progress, sample_instruction, sample_plan};
pub use crate::cascade::planner::{
    CascadeSlot, DirectionPlan, ElbowCascadePlan, cascade_slots, plan_cascades,
};
pub use crate::engine::config::{EaseSet, MorphConfig, PhaseTiming};
pub use crate::engine::morph::{
    MorphOutcome, MorphReport, SkipReason, analyze_morph, plan_morph,
};
pub use crate::matching::grouping::{Group, GroupReport, Grouping, group_elements};
pub use crate::matching::groups::{GroupMatch, match_groups};
pub use crate::matching::mapping::{ElementMapping, MappingEntry, MatchOrigin};
pub use crate::matching::residual::{match_residual, match_within_groups};
pub use crate::matching::text::match_text;
pub use crate::overlay::driver::{LifecycleSignal, MorphDriver, OverlayReport};
pub use crate::overlay::renderer::{
    AnimationToken, CloneHandle, ElementHandle, Renderer, Scheduler,
};
pub use crate::plan::builder::{Transition, build_plan, resolve_transition};
pub use crate::plan::instruction::{
    AnimationInstruction, AnimationPlan, InstructionKind, Phase, PhaseWindow,
};
pub use crate::shape::classify::{
    Category, ClassifiedLayout, Element, ElementText, Shape, classify_element, classify_snapshot,
};
pub use crate::shape::elbow::{ElbowGeometry, ElbowParams};
pub use crate::shape::text::normalize_text;
pub use crate::snapshot::model::{
    ElbowOrientation, ElementSpec, EndcapDirection, LabelSpec, LayoutSnapshot, MorphRequest,
    ShapeSpec, SizeSpec, TextTransform,
};
