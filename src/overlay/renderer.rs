use crate::{
    foundation::{core::LayoutSide, error::MorphResult},
    plan::instruction::AnimationInstruction,
};

/// Opaque handle to the on-screen representation of an element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementHandle(pub u64);

/// Opaque handle to a detached overlay clone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CloneHandle(pub u64);

/// Completion token of one running animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AnimationToken(pub u64);

/// Scene access needed to execute a plan on an overlay.
///
/// Implementations wrap whatever retained scene the host uses. Every method may fail for a single
/// element (for example when it was removed from the scene); the driver logs the failure and
/// skips that element.
pub trait Renderer {
    /// Resolve the current visual of `element_id` in the `side` layout.
    fn resolve(&mut self, side: LayoutSide, element_id: &str) -> MorphResult<ElementHandle>;
    /// Create a detached copy of `handle` placed on the overlay.
    fn clone_for_overlay(&mut self, handle: ElementHandle) -> MorphResult<CloneHandle>;
    /// Show or hide an original element.
    fn set_visible(&mut self, handle: ElementHandle, visible: bool) -> MorphResult<()>;
    /// Remove an overlay clone.
    fn remove_clone(&mut self, clone: CloneHandle) -> MorphResult<()>;
}

/// Tween capability that animates overlay clones.
///
/// The host reports completion back through [`crate::MorphDriver::notify_finished`].
pub trait Scheduler {
    /// Start animating `clone` as described by `instruction`.
    fn animate(
        &mut self,
        clone: CloneHandle,
        instruction: &AnimationInstruction,
    ) -> MorphResult<AnimationToken>;
    /// Stop a running animation. Unknown or finished tokens are ignored.
    fn cancel(&mut self, token: AnimationToken);
}
