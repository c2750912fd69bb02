use crate::view::ViewId;

use super::params::OverlayParams;

/// Failure from the overlay service. The float controller never intercepts
/// these; they surface to the caller unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlayError {
    /// The platform refused access to the overlay layer (missing permission,
    /// service unavailable). Produced by platform backends and test fakes.
    PermissionDenied,
    /// `add_view` on a view that is already in the overlay layer.
    AlreadyAdded(ViewId),
    /// `remove_view_immediate` or `update_view_layout` on a view that is not
    /// in the overlay layer.
    NotAdded(ViewId),
}

impl std::fmt::Display for OverlayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PermissionDenied => write!(f, "access to the overlay layer was denied"),
            Self::AlreadyAdded(view) => {
                write!(f, "view {view:?} is already in the overlay layer")
            }
            Self::NotAdded(view) => write!(f, "view {view:?} is not in the overlay layer"),
        }
    }
}

impl std::error::Error for OverlayError {}

/// Process-wide overlay service: the layer rendered above all normal content.
///
/// The float controller treats this as an opaque collaborator and is handed it
/// on every call (the same pattern as `&mut dyn Behavior` in immediate-mode
/// docking code), so tests can substitute a fake. One registry is shared by
/// all controllers in the process; membership is the single source of truth
/// for whether a view is floating.
pub trait OverlayRegistry {
    /// Insert a view into the overlay layer with the given position/size/
    /// flags. Not idempotent: the caller must ensure the view is absent.
    ///
    /// # Errors
    /// [`OverlayError::AlreadyAdded`] if the view is already present, or a
    /// platform failure.
    fn add_view(&mut self, view: ViewId, params: &OverlayParams) -> Result<(), OverlayError>;

    /// Synchronously remove a view from the overlay layer.
    ///
    /// # Errors
    /// [`OverlayError::NotAdded`] if the view is absent, or a platform
    /// failure.
    fn remove_view_immediate(&mut self, view: ViewId) -> Result<(), OverlayError>;

    /// Apply new position/size to an already-added view.
    ///
    /// # Errors
    /// [`OverlayError::NotAdded`] if the view is absent, or a platform
    /// failure.
    fn update_view_layout(&mut self, view: ViewId, params: &OverlayParams)
    -> Result<(), OverlayError>;

    /// Whether the view is currently in the overlay layer.
    fn contains_view(&self, view: ViewId) -> bool;
}

/// The in-process [`OverlayRegistry`] implementation.
///
/// Keeps each entry's params plus a z-order (last = topmost) so a host
/// renderer can draw the layer bottom to top, and a tapped entry can be
/// raised with [`Self::bring_to_front`].
#[derive(Debug, Default)]
pub struct OverlayLayer {
    entries: ahash::HashMap<ViewId, OverlayParams>,
    z_order: Vec<ViewId>,
}

impl OverlayLayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Current params of an entry.
    pub fn params(&self, view: ViewId) -> Option<&OverlayParams> {
        self.entries.get(&view)
    }

    /// Entries in draw order, bottom to top.
    pub fn views(&self) -> impl Iterator<Item = ViewId> + '_ {
        self.z_order.iter().copied()
    }

    /// Raise an entry to the top of the layer. Unknown views are ignored.
    pub fn bring_to_front(&mut self, view: ViewId) {
        if !self.entries.contains_key(&view) {
            return;
        }
        self.z_order.retain(|&v| v != view);
        self.z_order.push(view);
    }
}

impl OverlayRegistry for OverlayLayer {
    fn add_view(&mut self, view: ViewId, params: &OverlayParams) -> Result<(), OverlayError> {
        if self.entries.contains_key(&view) {
            return Err(OverlayError::AlreadyAdded(view));
        }
        self.entries.insert(view, *params);
        self.z_order.push(view);
        Ok(())
    }

    fn remove_view_immediate(&mut self, view: ViewId) -> Result<(), OverlayError> {
        if self.entries.remove(&view).is_none() {
            return Err(OverlayError::NotAdded(view));
        }
        self.z_order.retain(|&v| v != view);
        Ok(())
    }

    fn update_view_layout(
        &mut self,
        view: ViewId,
        params: &OverlayParams,
    ) -> Result<(), OverlayError> {
        match self.entries.get_mut(&view) {
            Some(slot) => {
                *slot = *params;
                Ok(())
            }
            None => Err(OverlayError::NotAdded(view)),
        }
    }

    fn contains_view(&self, view: ViewId) -> bool {
        self.entries.contains_key(&view)
    }
}

#[cfg(test)]
mod tests {
    use egui::vec2;

    use super::*;
    use crate::view::ViewTree;

    fn layer_with_views(n: usize) -> (OverlayLayer, Vec<ViewId>) {
        let mut tree = ViewTree::new(vec2(1080.0, 1920.0));
        let views: Vec<ViewId> = (0..n).map(|_| tree.spawn(vec2(100.0, 100.0))).collect();
        let mut layer = OverlayLayer::new();
        for &view in &views {
            layer
                .add_view(view, &OverlayParams::default())
                .expect("fresh view should be addable");
        }
        (layer, views)
    }

    #[test]
    fn duplicate_add_is_rejected() {
        let (mut layer, views) = layer_with_views(1);
        assert_eq!(
            layer.add_view(views[0], &OverlayParams::default()),
            Err(OverlayError::AlreadyAdded(views[0]))
        );
        assert_eq!(layer.len(), 1);
    }

    #[test]
    fn remove_and_update_require_membership() {
        let mut tree = ViewTree::new(vec2(1080.0, 1920.0));
        let member = tree.spawn(vec2(100.0, 100.0));
        let absent = tree.spawn(vec2(100.0, 100.0));

        let mut layer = OverlayLayer::new();
        layer
            .add_view(member, &OverlayParams::default())
            .expect("fresh view should be addable");

        assert_eq!(
            layer.remove_view_immediate(absent),
            Err(OverlayError::NotAdded(absent))
        );
        assert_eq!(
            layer.update_view_layout(absent, &OverlayParams::default()),
            Err(OverlayError::NotAdded(absent))
        );

        layer
            .remove_view_immediate(member)
            .expect("member should be removable");
        assert!(!layer.contains_view(member));
        assert!(layer.is_empty());
    }

    #[test]
    fn update_replaces_params() {
        let (mut layer, views) = layer_with_views(1);
        let params = OverlayParams {
            x: 42.0,
            ..Default::default()
        };
        layer
            .update_view_layout(views[0], &params)
            .expect("member should be updatable");
        assert_eq!(layer.params(views[0]), Some(&params));
    }

    #[test]
    fn z_order_follows_insertion_and_bring_to_front() {
        let (mut layer, views) = layer_with_views(3);
        assert_eq!(layer.views().collect::<Vec<_>>(), views);

        layer.bring_to_front(views[0]);
        assert_eq!(
            layer.views().collect::<Vec<_>>(),
            vec![views[1], views[2], views[0]]
        );

        layer
            .remove_view_immediate(views[2])
            .expect("member should be removable");
        assert_eq!(layer.views().collect::<Vec<_>>(), vec![views[1], views[0]]);
    }
}
