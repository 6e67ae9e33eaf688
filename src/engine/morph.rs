use crate::{
    cascade::planner::{ElbowCascadePlan, plan_cascades},
    engine::config::MorphConfig,
    foundation::{
        core::LayoutSide,
        error::{MorphError, MorphResult},
    },
    matching::{
        grouping::{GroupReport, Grouping, group_elements},
        groups::{GroupMatch, match_groups},
        mapping::{ElementMapping, MappingEntry, MatchOrigin},
        residual::{match_residual, match_within_groups},
        text::match_text,
    },
    plan::{builder::build_plan, instruction::AnimationPlan},
    shape::classify::{ClassifiedLayout, classify_snapshot},
    snapshot::model::MorphRequest,
};

/// Why a request was turned into a no-op.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The request carried no container bounds.
    MissingContainer,
    /// The container bounds are not finite or have no area.
    InvalidContainer,
    /// The source layout has no element with finalized geometry.
    EmptySource,
}

/// Result of a morph request that passed validation.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MorphOutcome<T = AnimationPlan> {
    /// Planning ran to completion.
    Planned(T),
    /// Nothing is scheduled.
    Skipped(SkipReason),
}

impl<T> MorphOutcome<T> {
    /// The planned value, if any.
    pub fn planned(&self) -> Option<&T> {
        match self {
            Self::Planned(v) => Some(v),
            Self::Skipped(_) => None,
        }
    }

    /// Consume the outcome, keeping only the planned value.
    pub fn into_planned(self) -> Option<T> {
        match self {
            Self::Planned(v) => Some(v),
            Self::Skipped(_) => None,
        }
    }

    /// Why nothing was planned, if it was skipped.
    pub fn skip_reason(&self) -> Option<SkipReason> {
        match self {
            Self::Planned(_) => None,
            Self::Skipped(r) => Some(*r),
        }
    }

    fn map<U>(self, f: impl FnOnce(T) -> U) -> MorphOutcome<U> {
        match self {
            Self::Planned(v) => MorphOutcome::Planned(f(v)),
            Self::Skipped(r) => MorphOutcome::Skipped(r),
        }
    }
}

/// Every intermediate result of one planning pass, for inspection and debugging.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MorphReport {
    /// Rows and columns of the source layout.
    pub source_groups: Vec<GroupReport>,
    /// Rows and columns of the target layout.
    pub target_groups: Vec<GroupReport>,
    /// Matched group pairs.
    pub group_matches: Vec<GroupMatch>,
    /// Final element correspondence.
    pub mapping: Vec<MappingEntry>,
    /// Elbow cascades feeding the entrance phase.
    pub cascades: Vec<ElbowCascadePlan>,
    /// Source ids left out of matching (unfinalized geometry or duplicate id).
    pub excluded_source: Vec<String>,
    /// Target ids left out of matching.
    pub excluded_target: Vec<String>,
    /// The assembled plan.
    pub plan: AnimationPlan,
}

struct Analysis {
    source: ClassifiedLayout,
    target: ClassifiedLayout,
    source_groups: Grouping,
    target_groups: Grouping,
    group_matches: Vec<GroupMatch>,
    mapping: ElementMapping,
    cascades: Vec<ElbowCascadePlan>,
    plan: AnimationPlan,
}

impl Analysis {
    fn into_report(self) -> MorphReport {
        MorphReport {
            source_groups: self.source_groups.report(&self.source),
            target_groups: self.target_groups.report(&self.target),
            group_matches: self.group_matches,
            mapping: self.mapping.entries().to_vec(),
            cascades: self.cascades,
            excluded_source: self.source.excluded,
            excluded_target: self.target.excluded,
            plan: self.plan,
        }
    }
}

/// Plan the animation morphing `req.source` into `req.target`.
///
/// Returns `Err` only for caller-controlled inputs: an invalid configuration or a non-finite or
/// negative duration. A missing or degenerate container and an empty source layout produce
/// [`MorphOutcome::Skipped`].
pub fn plan_morph(req: &MorphRequest, cfg: &MorphConfig) -> MorphResult<MorphOutcome> {
    Ok(analyze(req, cfg)?.map(|a| a.plan))
}

/// Same as [`plan_morph`], returning groupings, matches and cascades alongside the plan.
pub fn analyze_morph(
    req: &MorphRequest,
    cfg: &MorphConfig,
) -> MorphResult<MorphOutcome<MorphReport>> {
    Ok(analyze(req, cfg)?.map(Analysis::into_report))
}

#[tracing::instrument(skip_all, fields(duration_ms = req.duration_ms))]
fn analyze(req: &MorphRequest, cfg: &MorphConfig) -> MorphResult<MorphOutcome<Analysis>> {
    cfg.validate()?;
    if !req.duration_ms.is_finite() || req.duration_ms < 0.0 {
        return Err(MorphError::validation(
            "duration_ms must be finite and >= 0",
        ));
    }

    let Some(container) = req.container else {
        tracing::debug!("no container, skipping morph");
        return Ok(MorphOutcome::Skipped(SkipReason::MissingContainer));
    };
    let container = match container.validate_container() {
        Ok(rect) => rect,
        Err(err) => {
            tracing::debug!(%err, "unusable container, skipping morph");
            return Ok(MorphOutcome::Skipped(SkipReason::InvalidContainer));
        }
    };

    let source = classify_snapshot(LayoutSide::Source, &req.source, container, cfg);
    if source.is_empty() {
        tracing::debug!("empty source layout, skipping morph");
        return Ok(MorphOutcome::Skipped(SkipReason::EmptySource));
    }
    let target = classify_snapshot(LayoutSide::Target, &req.target, container, cfg);

    let source_groups = group_elements(&source, cfg);
    let target_groups = group_elements(&target, cfg);

    let mut mapping = ElementMapping::new();
    match_text(&source, &target, cfg, &mut mapping);
    let group_matches = match_groups(&source_groups, &target_groups, cfg);
    match_within_groups(
        &source,
        &source_groups,
        &target,
        &target_groups,
        &group_matches,
        cfg,
        &mut mapping,
    );
    match_residual(&source, &target, cfg, &mut mapping);
    tracing::debug!(
        text = mapping.count_by_origin(MatchOrigin::Text),
        cluster = mapping.count_by_origin(MatchOrigin::Cluster),
        residual = mapping.count_by_origin(MatchOrigin::Residual),
        group_matches = group_matches.len(),
        "element mapping"
    );

    let cascades = plan_cascades(
        &source,
        &source_groups,
        &target,
        &target_groups,
        &group_matches,
        &mapping,
        cfg,
    );
    let plan = build_plan(
        &source,
        &target,
        &mapping,
        &cascades,
        req.duration_ms,
        cfg,
    );

    Ok(MorphOutcome::Planned(Analysis {
        source,
        target,
        source_groups,
        target_groups,
        group_matches,
        mapping,
        cascades,
        plan,
    }))
}

#[cfg(test)]
#[path = "../../tests/unit/engine/morph.rs"]
mod tests;
