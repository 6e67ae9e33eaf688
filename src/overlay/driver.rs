use std::collections::BTreeSet;

use crate::{
    foundation::{core::LayoutSide, error::MorphResult},
    overlay::renderer::{AnimationToken, CloneHandle, ElementHandle, Renderer, Scheduler},
    plan::instruction::{AnimationInstruction, AnimationPlan, InstructionKind},
};

/// Host events that must tear down a running overlay.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleSignal {
    /// The hosting page or window is no longer visible.
    PageHidden,
    /// The host is leaving the current view.
    NavigatedAway,
}

/// Outcome of [`MorphDriver::start`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OverlayReport {
    /// Instructions handed to the scheduler.
    pub scheduled: usize,
    /// Element ids skipped because the renderer or scheduler failed for them.
    pub skipped: Vec<String>,
}

#[derive(Debug, Default)]
struct Overlay {
    hidden: Vec<ElementHandle>,
    clones: Vec<CloneHandle>,
    pending: BTreeSet<AnimationToken>,
}

/// Executes animation plans on a single morph overlay.
///
/// At most one overlay exists at a time. Starting a new plan, a lifecycle signal, or the last
/// pending animation finishing tears the overlay down: running animations are cancelled, clones
/// are removed and hidden originals are shown again. Teardown never fails; renderer errors during
/// teardown are logged and ignored.
pub struct MorphDriver<R, S> {
    renderer: R,
    scheduler: S,
    overlay: Option<Overlay>,
}

impl<R: Renderer, S: Scheduler> MorphDriver<R, S> {
    /// Driver with no active overlay.
    pub fn new(renderer: R, scheduler: S) -> Self {
        Self {
            renderer,
            scheduler,
            overlay: None,
        }
    }

    /// Renderer collaborator.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Scheduler collaborator.
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Whether an overlay is currently up.
    pub fn is_active(&self) -> bool {
        self.overlay.is_some()
    }

    /// Animations still running on the active overlay.
    pub fn pending(&self) -> usize {
        self.overlay.as_ref().map_or(0, |o| o.pending.len())
    }

    /// Build an overlay for `plan` and schedule every instruction.
    ///
    /// A previous overlay is torn down first. Elements the renderer cannot resolve or clone are
    /// skipped individually.
    #[tracing::instrument(skip_all, fields(instructions = plan.instructions.len()))]
    pub fn start(&mut self, plan: &AnimationPlan) -> OverlayReport {
        self.cleanup();

        let mut overlay = Overlay::default();
        let mut report = OverlayReport::default();
        for instr in &plan.instructions {
            match self.schedule(instr, &mut overlay) {
                Ok(()) => report.scheduled += 1,
                Err(err) => {
                    tracing::warn!(element = %instr.element_id, %err, "skipping element");
                    report.skipped.push(instr.element_id.clone());
                }
            }
        }

        if overlay.pending.is_empty() {
            self.teardown(overlay);
        } else {
            self.overlay = Some(overlay);
        }
        tracing::debug!(
            scheduled = report.scheduled,
            skipped = report.skipped.len(),
            "overlay started"
        );
        report
    }

    /// Record that the animation behind `token` finished.
    ///
    /// Returns `true` when this completed the overlay and it was torn down.
    pub fn notify_finished(&mut self, token: AnimationToken) -> bool {
        let Some(overlay) = self.overlay.as_mut() else {
            return false;
        };
        if !overlay.pending.remove(&token) || !overlay.pending.is_empty() {
            return false;
        }
        self.cleanup();
        true
    }

    /// Tear down the overlay in response to a host lifecycle event.
    pub fn handle_lifecycle(&mut self, signal: LifecycleSignal) {
        if self.overlay.is_some() {
            tracing::debug!(?signal, "lifecycle teardown");
        }
        self.cleanup();
    }

    /// Tear down the active overlay, if any. Safe to call any number of times.
    pub fn cleanup(&mut self) {
        if let Some(overlay) = self.overlay.take() {
            self.teardown(overlay);
        }
    }

    // All-or-nothing per instruction: on failure everything touched for it is rolled back.
    fn schedule(&mut self, instr: &AnimationInstruction, overlay: &mut Overlay) -> MorphResult<()> {
        let mut partial = Overlay::default();
        let result = self.schedule_into(instr, &mut partial);
        if result.is_err() {
            self.teardown(partial);
            return result;
        }
        overlay.hidden.append(&mut partial.hidden);
        overlay.clones.append(&mut partial.clones);
        overlay.pending.append(&mut partial.pending);
        Ok(())
    }

    fn schedule_into(
        &mut self,
        instr: &AnimationInstruction,
        overlay: &mut Overlay,
    ) -> MorphResult<()> {
        let original = self.renderer.resolve(instr.side, &instr.element_id)?;
        let clone = self.renderer.clone_for_overlay(original)?;
        overlay.clones.push(clone);
        self.renderer.set_visible(original, false)?;
        overlay.hidden.push(original);

        // The counterpart of a moving element stays hidden until the overlay is gone.
        if let (
            InstructionKind::Transform { .. } | InstructionKind::ShapeMorph { .. },
            Some(counterpart),
        ) = (&instr.kind, &instr.counterpart_id)
        {
            let other = self.renderer.resolve(LayoutSide::Target, counterpart)?;
            self.renderer.set_visible(other, false)?;
            overlay.hidden.push(other);
        }

        let token = self.scheduler.animate(clone, instr)?;
        overlay.pending.insert(token);
        Ok(())
    }

    fn teardown(&mut self, overlay: Overlay) {
        for token in overlay.pending {
            self.scheduler.cancel(token);
        }
        for clone in overlay.clones {
            if let Err(err) = self.renderer.remove_clone(clone) {
                tracing::debug!(?clone, %err, "clone already gone");
            }
        }
        for handle in overlay.hidden {
            if let Err(err) = self.renderer.set_visible(handle, true) {
                tracing::debug!(?handle, %err, "original already gone");
            }
        }
    }
}

impl<R, S> std::fmt::Debug for MorphDriver<R, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MorphDriver")
            .field("overlay", &self.overlay)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/driver.rs"]
mod tests;
