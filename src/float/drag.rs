use egui::{Pos2, TouchPhase, Vec2};
use log::trace;

use crate::view::{ViewId, ViewNode, ViewTree};

use super::registry::{OverlayError, OverlayRegistry};
use super::FloatController;

/// One raw touch sample, in whole-screen coordinates (unaffected by the
/// content view's own position).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchEvent {
    pub phase: TouchPhase,
    pub pos: Pos2,
}

impl TouchEvent {
    pub fn new(phase: TouchPhase, pos: Pos2) -> Self {
        Self { phase, pos }
    }

    /// A finger-down sample.
    pub fn press(pos: Pos2) -> Self {
        Self::new(TouchPhase::Start, pos)
    }

    /// A finger-move sample.
    pub fn moved(pos: Pos2) -> Self {
        Self::new(TouchPhase::Move, pos)
    }

    /// A finger-up sample.
    pub fn release(pos: Pos2) -> Self {
        Self::new(TouchPhase::End, pos)
    }
}

impl FloatController {
    /// Hook for the host's input dispatch: feed a raw touch event that was
    /// delivered to `view`. The event reaches drag processing only while
    /// `view` is the managed content view and its interceptor is installed.
    ///
    /// Always reports the event as not consumed, so click handling and inner
    /// scrolling on the view keep working alongside the drag.
    ///
    /// # Errors
    /// Registry failures from the position update propagate unchanged.
    pub fn intercept_touch(
        &mut self,
        tree: &ViewTree,
        registry: &mut dyn OverlayRegistry,
        view: ViewId,
        event: TouchEvent,
    ) -> Result<bool, OverlayError> {
        let intercepting = self.session.content == Some(view)
            && tree.get(view).is_some_and(ViewNode::has_touch_interceptor);
        if intercepting {
            self.process_touch_event(tree, registry, event)?;
        }
        Ok(false)
    }

    /// Drag state machine over raw touch samples.
    ///
    /// Active only while dragging is enabled, a view is managed, and that view
    /// is in the overlay layer. A press records the anchor; each move applies
    /// the frame-to-frame pointer delta to the overlay position and clamps it
    /// so the view stays on screen. A delta axis is zeroed while the view's
    /// own content can still scroll opposite to the drag, so inner scrolling
    /// wins over outer dragging. Redundant positions are not pushed to the
    /// registry. Release and cancel are left unhandled: the drag simply stops
    /// producing move deltas, and the next press rewrites the anchor.
    ///
    /// # Errors
    /// Registry failures from the position update propagate unchanged.
    pub fn process_touch_event(
        &mut self,
        tree: &ViewTree,
        registry: &mut dyn OverlayRegistry,
        event: TouchEvent,
    ) -> Result<(), OverlayError> {
        if !self.session.draggable {
            return Ok(());
        }
        let Some(view) = self.session.content else {
            return Ok(());
        };
        if !registry.contains_view(view) {
            return Ok(());
        }

        match event.phase {
            TouchPhase::Start => {
                self.session.last_touch = event.pos;
            }
            TouchPhase::Move => {
                let Some(node) = tree.get(view) else {
                    return Ok(());
                };

                let mut delta = event.pos - self.session.last_touch;
                self.session.last_touch = event.pos;

                if delta.x > 0.0 && node.can_scroll_left()
                    || delta.x < 0.0 && node.can_scroll_right()
                {
                    delta.x = 0.0;
                }
                if delta.y > 0.0 && node.can_scroll_up() || delta.y < 0.0 && node.can_scroll_down()
                {
                    delta.y = 0.0;
                }

                let screen_size = tree.screen_size();
                let params = self.session.window_params_mut();
                let target = egui::pos2(params.x + delta.x, params.y + delta.y);
                let clamped = clamp_to_screen(target, node.size, screen_size);

                if clamped.x != params.x || clamped.y != params.y {
                    params.set_position(clamped);
                    let params = *params;
                    trace!("float: drag {view:?} to ({}, {})", params.x, params.y);
                    registry.update_view_layout(view, &params)?;
                }
            }
            TouchPhase::End | TouchPhase::Cancel => {}
        }
        Ok(())
    }
}

/// Clamp a top-left overlay position so the whole view stays on screen. The
/// top/left edge wins when the view is larger than the screen.
fn clamp_to_screen(pos: Pos2, view_size: Vec2, screen_size: Vec2) -> Pos2 {
    let max = (screen_size - view_size).max(Vec2::ZERO);
    egui::pos2(pos.x.clamp(0.0, max.x), pos.y.clamp(0.0, max.y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_keeps_view_on_screen() {
        let screen = Vec2::new(1080.0, 1920.0);
        let view = Vec2::new(200.0, 300.0);
        assert_eq!(
            clamp_to_screen(egui::pos2(1000.0, -40.0), view, screen),
            egui::pos2(880.0, 0.0)
        );
        assert_eq!(
            clamp_to_screen(egui::pos2(400.0, 600.0), view, screen),
            egui::pos2(400.0, 600.0)
        );
    }

    #[test]
    fn clamp_prefers_top_left_for_oversized_views() {
        let screen = Vec2::new(1080.0, 1920.0);
        let view = Vec2::new(1200.0, 2000.0);
        assert_eq!(
            clamp_to_screen(egui::pos2(50.0, 50.0), view, screen),
            Pos2::ZERO
        );
    }
}
