use egui::Pos2;

use crate::view::SizePolicy;

/// Platform window flags carried through to the overlay layer. Opaque to this
/// crate; the registry hands them to whatever backs the overlay.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OverlayFlags(pub u32);

/// Position/size/flags record for a view living in the overlay layer.
///
/// `x`/`y` are the top-left corner in whole-screen pixels. Width/height are
/// layout hints, seeded from the view's original layout params when it starts
/// floating; clamping uses the view's measured size, not these.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OverlayParams {
    pub x: f32,
    pub y: f32,
    pub width: SizePolicy,
    pub height: SizePolicy,
    pub flags: OverlayFlags,
}

impl OverlayParams {
    pub fn position(&self) -> Pos2 {
        egui::pos2(self.x, self.y)
    }

    pub fn set_position(&mut self, pos: Pos2) {
        self.x = pos.x;
        self.y = pos.y;
    }
}
