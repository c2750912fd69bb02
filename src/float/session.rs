use egui::Pos2;

use crate::view::{LayoutParams, ViewId};

use super::params::OverlayParams;

/// Bookkeeping for the single view currently under float management.
///
/// The captured-origin fields (`original_*`) are written by
/// `set_content_view` and consumed by `restore_content_view`; they reset
/// together when the managed view is replaced. `window_params` and the flags
/// survive replacement, matching a controller that is reused for several
/// views in a row.
#[derive(Debug)]
pub(super) struct FloatSession {
    pub(super) content: Option<ViewId>,

    /// Non-owning back-reference to the parent the view was captured from.
    /// Resolved against the tree on every use; a despawned parent simply
    /// stops resolving.
    pub(super) original_parent: Option<ViewId>,
    pub(super) original_params: Option<LayoutParams>,
    pub(super) original_index: Option<usize>,

    pub(super) window_params: Option<OverlayParams>,
    pub(super) draggable: bool,

    /// Raw pointer position of the previous touch sample. Overwritten on each
    /// press and each move; a release leaves it in place, so a move arriving
    /// without a fresh press measures its delta from the stale anchor.
    pub(super) last_touch: Pos2,
}

impl Default for FloatSession {
    fn default() -> Self {
        Self {
            content: None,
            original_parent: None,
            original_params: None,
            original_index: None,
            window_params: None,
            draggable: true,
            last_touch: Pos2::ZERO,
        }
    }
}

impl FloatSession {
    pub(super) fn clear_origin(&mut self) {
        self.original_parent = None;
        self.original_params = None;
        self.original_index = None;
    }

    pub(super) fn window_params_mut(&mut self) -> &mut OverlayParams {
        self.window_params.get_or_insert_with(OverlayParams::default)
    }
}
