#![forbid(unsafe_code)]

//! Detach a view from its layout slot and float it above everything else as a
//! draggable overlay, then restore it to its original place on demand.
//!
//! The two halves are [`ViewTree`] (a retained arena of views with
//! parent/child links) and [`FloatController`] (the bookkeeping state machine
//! that captures a view's original slot, moves it into and out of an
//! [`OverlayRegistry`], and turns raw touch events into clamped overlay
//! position updates).

pub mod float;
pub mod view;

pub use float::{
    FloatController, OverlayError, OverlayFlags, OverlayLayer, OverlayParams, OverlayRegistry,
    TouchEvent,
};
pub use view::{view_tree_integrity_issues, LayoutParams, SizePolicy, ViewId, ViewNode, ViewTree};
