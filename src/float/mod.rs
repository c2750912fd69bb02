use log::debug;

mod drag;
mod params;
mod registry;
mod session;

#[cfg(test)]
mod model_tests;

pub use drag::TouchEvent;
pub use params::{OverlayFlags, OverlayParams};
pub use registry::{OverlayError, OverlayLayer, OverlayRegistry};

use crate::view::{ViewId, ViewTree};
use session::FloatSession;

/// Floats one view at a time above the normal layout.
///
/// The controller remembers the parent slot a view came from, moves the view
/// into and out of the overlay layer, and turns raw touch events into clamped
/// overlay position updates. Collaborators (the [`ViewTree`] and an
/// [`OverlayRegistry`]) are passed per call rather than stored, so one fake
/// registry can stand in for the platform during tests.
///
/// Every operation that only concerns an absent view, an unresolvable origin,
/// or an already-reached state is a silent no-op; the only failures that
/// surface are the registry's own.
#[derive(Debug, Default)]
pub struct FloatController {
    session: FloatSession,
}

impl FloatController {
    pub fn new() -> Self {
        Self::default()
    }

    /// The view currently under management, if any.
    pub fn content_view(&self) -> Option<ViewId> {
        self.session.content
    }

    /// Whether the managed view is currently in the overlay layer.
    ///
    /// Registry membership is the single source of truth here; the controller
    /// caches nothing.
    pub fn is_added_to_window(&self, registry: &dyn OverlayRegistry) -> bool {
        self.session
            .content
            .is_some_and(|view| registry.contains_view(view))
    }

    /// Set (or clear) the view to float.
    ///
    /// Setting the view that is already managed is a no-op. Anything else
    /// discards the previous session: the old view's touch interceptor is
    /// detached and the captured-origin fields are reset. If the new view is
    /// attached to a parent, that parent, the view's layout params, and its
    /// child index are captured for a later restore, and the overlay size
    /// hints are seeded from those params.
    pub fn set_content_view(&mut self, tree: &mut ViewTree, view: Option<ViewId>) {
        if self.session.content == view {
            return;
        }
        self.save_view_info(tree, view);
    }

    fn save_view_info(&mut self, tree: &mut ViewTree, view: Option<ViewId>) {
        self.session.clear_origin();
        if let Some(old) = self.session.content.take() {
            tree.set_touch_interceptor(old, false);
        }

        self.session.content = view;
        let Some(view) = view else {
            return;
        };

        if let Some(parent) = tree.parent_of(view) {
            self.session.original_parent = Some(parent);
            self.session.original_params = tree.get(view).and_then(|node| node.layout_params());
            self.session.original_index = tree.index_in_parent(view);

            if let Some(params) = self.session.original_params {
                let window_params = self.session.window_params_mut();
                window_params.width = params.width;
                window_params.height = params.height;
            }
        }

        tree.set_touch_interceptor(view, true);
        debug!(
            "float: managing {view:?}, origin parent {:?} index {:?}",
            self.session.original_parent, self.session.original_index
        );
    }

    /// Move the managed view into (`true`) or out of (`false`) the overlay
    /// layer. This is the only transition between normal-parent and overlay
    /// placement: adding detaches the view from whatever parent holds it
    /// first. Requests that already hold, and a missing view, are no-ops.
    ///
    /// # Errors
    /// Registry failures propagate unchanged.
    pub fn add_to_window(
        &mut self,
        tree: &mut ViewTree,
        registry: &mut dyn OverlayRegistry,
        add: bool,
    ) -> Result<(), OverlayError> {
        let Some(view) = self.session.content.filter(|&v| tree.contains(v)) else {
            return Ok(());
        };

        if add {
            if !registry.contains_view(view) {
                tree.remove_from_parent(view);
                let params = *self.session.window_params_mut();
                registry.add_view(view, &params)?;
                debug!("float: {view:?} added to overlay at ({}, {})", params.x, params.y);
            }
        } else if registry.contains_view(view) {
            registry.remove_view_immediate(view)?;
            debug!("float: {view:?} removed from overlay");
        }
        Ok(())
    }

    /// Put the managed view back into the parent it was captured from, at the
    /// captured child index and with the captured layout params.
    ///
    /// No-op when nothing is managed, when the original parent no longer
    /// resolves, or when the view is already back in place. The captured
    /// index is clamped to the parent's current child count, since siblings
    /// may have been removed while the view floated.
    ///
    /// # Errors
    /// Registry failures propagate unchanged.
    pub fn restore_content_view(
        &mut self,
        tree: &mut ViewTree,
        registry: &mut dyn OverlayRegistry,
    ) -> Result<(), OverlayError> {
        let Some(view) = self.session.content.filter(|&v| tree.contains(v)) else {
            return Ok(());
        };
        let Some(parent) = self.session.original_parent.filter(|&p| tree.contains(p)) else {
            return Ok(());
        };
        if tree.parent_of(view) == Some(parent) {
            return Ok(());
        }

        tree.remove_from_parent(view);
        self.add_to_window(tree, registry, false)?;

        let index = self
            .session
            .original_index
            .unwrap_or(0)
            .min(tree.children_of(parent).len());
        let params = self.session.original_params.unwrap_or_default();
        tree.insert_child_at(parent, index, view, params);
        debug!("float: {view:?} restored to {parent:?} at index {index}");
        Ok(())
    }

    /// Current overlay layout record, created with defaults on first access.
    /// Mutations take effect on the next [`Self::update_view_layout`] or drag
    /// update.
    pub fn window_params(&mut self) -> &mut OverlayParams {
        self.session.window_params_mut()
    }

    /// Replace the overlay layout record, re-applying it immediately if the
    /// view is currently in the overlay.
    ///
    /// # Errors
    /// Registry failures propagate unchanged.
    pub fn set_window_params(
        &mut self,
        registry: &mut dyn OverlayRegistry,
        params: OverlayParams,
    ) -> Result<(), OverlayError> {
        self.session.window_params = Some(params);
        self.update_view_layout(registry)
    }

    /// Push the current overlay params to the registry. No-op while the view
    /// is not in the overlay (there is nothing to update).
    ///
    /// # Errors
    /// Registry failures propagate unchanged.
    pub fn update_view_layout(
        &mut self,
        registry: &mut dyn OverlayRegistry,
    ) -> Result<(), OverlayError> {
        let Some(view) = self.session.content else {
            return Ok(());
        };
        if registry.contains_view(view) {
            let params = *self.session.window_params_mut();
            registry.update_view_layout(view, &params)?;
        }
        Ok(())
    }

    /// Gate for drag processing, on by default. Positions already applied by
    /// an in-progress drag stay where they are.
    pub fn set_draggable(&mut self, draggable: bool) {
        self.session.draggable = draggable;
    }

    pub fn draggable(&self) -> bool {
        self.session.draggable
    }
}
