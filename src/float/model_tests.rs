use egui::{pos2, vec2};

use super::{FloatController, OverlayLayer, OverlayParams, OverlayRegistry, TouchEvent};
use crate::view::{view_tree_integrity_issues, LayoutParams, ViewId, ViewTree};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed ^ 0xF10A_7F10_A7F1_0A7F)
    }

    fn next_u64(&mut self) -> u64 {
        // Simple LCG: deterministic, fast, no dependency.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005u64)
            .wrapping_add(1442695040888963407u64);
        self.0
    }

    fn next_usize(&mut self, upper: usize) -> usize {
        if upper == 0 {
            return 0;
        }
        (self.next_u64() as usize) % upper
    }

    fn next_bool(&mut self) -> bool {
        (self.next_u64() & 1) != 0
    }

    fn next_coord(&mut self, upper: f32) -> f32 {
        (self.next_usize(upper as usize)) as f32
    }
}

fn assert_world_ok(
    tree: &ViewTree,
    layer: &OverlayLayer,
    views: &[ViewId],
) {
    for issue in view_tree_integrity_issues(tree) {
        panic!("tree integrity failed: {issue}");
    }

    for &view in views {
        if layer.contains_view(view) {
            assert_eq!(
                tree.parent_of(view),
                None,
                "{view:?} is in the overlay and parented at once"
            );
        }
    }

    assert_eq!(
        layer.views().count(),
        layer.len(),
        "z-order and entries disagree"
    );
    for view in layer.views() {
        assert!(layer.contains_view(view), "z-order lists a non-member");
    }
}

/// Random walks over the whole controller surface. Whatever the order of
/// operations, the tree stays consistent, a view never sits in the overlay
/// and a parent at the same time, and the controller never violates the
/// registry contract (every call returns `Ok`).
#[test]
fn model_random_float_ops_keep_placement_consistent() {
    for seed in 1u64..=10u64 {
        let mut rng = Rng::new(seed);

        let mut tree = ViewTree::new(vec2(1080.0, 1920.0));
        let mut views = Vec::new();
        for _ in 0..2 {
            let parent = tree.spawn(vec2(1080.0, 960.0));
            for _ in 0..3 {
                let child = tree.spawn(vec2(
                    40.0 + rng.next_coord(300.0),
                    40.0 + rng.next_coord(400.0),
                ));
                tree.add_child(parent, child, LayoutParams::default());
                views.push(child);
            }
        }
        // One view that never had a parent.
        views.push(tree.spawn(vec2(64.0, 64.0)));

        let mut controller = FloatController::new();
        let mut layer = OverlayLayer::new();

        for _step in 0..600 {
            match rng.next_usize(8) {
                0 => {
                    let view = if rng.next_usize(5) == 0 {
                        None
                    } else {
                        Some(views[rng.next_usize(views.len())])
                    };
                    controller.set_content_view(&mut tree, view);
                }
                1 => controller
                    .add_to_window(&mut tree, &mut layer, true)
                    .expect("add must respect the registry contract"),
                2 => controller
                    .add_to_window(&mut tree, &mut layer, false)
                    .expect("remove must respect the registry contract"),
                3 => controller
                    .restore_content_view(&mut tree, &mut layer)
                    .expect("restore must respect the registry contract"),
                4 => {
                    let pos = pos2(rng.next_coord(1080.0), rng.next_coord(1920.0));
                    controller
                        .process_touch_event(&tree, &mut layer, TouchEvent::press(pos))
                        .expect("press must respect the registry contract");
                }
                5 => {
                    let pos = pos2(rng.next_coord(1400.0), rng.next_coord(2400.0));
                    controller
                        .process_touch_event(&tree, &mut layer, TouchEvent::moved(pos))
                        .expect("move must respect the registry contract");
                }
                6 => controller.set_draggable(rng.next_bool()),
                _ => {
                    let params = OverlayParams {
                        x: rng.next_coord(1200.0),
                        y: rng.next_coord(2000.0),
                        ..Default::default()
                    };
                    controller
                        .set_window_params(&mut layer, params)
                        .expect("params must respect the registry contract");
                }
            }

            assert_world_ok(&tree, &layer, &views);
        }
    }
}
