use std::collections::BTreeMap;

use egui::Vec2;
use itertools::Itertools as _;

mod integrity;
mod params;


pub use integrity::view_tree_integrity_issues;
pub use params::{LayoutParams, SizePolicy};

/// Identity handle for a view in a [`ViewTree`].
///
/// Ids are allocated from a serial counter and never reused, so a stored id is
/// a non-owning reference: resolving it after the view was despawned simply
/// fails.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ViewId(u64);

/// One view in the tree: parent/child links plus the measured geometry the
/// float machinery queries.
#[derive(Debug)]
pub struct ViewNode {
    parent: Option<ViewId>,
    children: Vec<ViewId>,
    layout_params: Option<LayoutParams>,
    touch_interceptor: bool,

    /// Rendered size in pixels.
    pub size: Vec2,
    /// Total scrollable content extent in pixels. Equal to `size` for views
    /// that do not scroll.
    pub content_size: Vec2,
    /// Current scroll position within `content_size`.
    pub scroll_offset: Vec2,
}

impl ViewNode {
    fn new(size: Vec2) -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            layout_params: None,
            touch_interceptor: false,
            size,
            content_size: size,
            scroll_offset: Vec2::ZERO,
        }
    }

    pub fn parent(&self) -> Option<ViewId> {
        self.parent
    }

    pub fn children(&self) -> &[ViewId] {
        &self.children
    }

    /// Layout params the view was attached to its parent with. `None` while
    /// detached.
    pub fn layout_params(&self) -> Option<LayoutParams> {
        self.layout_params
    }

    pub fn has_touch_interceptor(&self) -> bool {
        self.touch_interceptor
    }

    /// Whether content is hidden toward the start of the horizontal axis,
    /// i.e. the view can still scroll left.
    pub fn can_scroll_left(&self) -> bool {
        self.scroll_offset.x > 0.0
    }

    pub fn can_scroll_right(&self) -> bool {
        self.scroll_offset.x < self.content_size.x - self.size.x
    }

    /// Whether content is hidden toward the top, i.e. the view can still
    /// scroll up.
    pub fn can_scroll_up(&self) -> bool {
        self.scroll_offset.y > 0.0
    }

    pub fn can_scroll_down(&self) -> bool {
        self.scroll_offset.y < self.content_size.y - self.size.y
    }
}

/// Retained arena of views.
///
/// The tree owns every node and all parent/child bookkeeping; views are
/// addressed by [`ViewId`] handles. It also knows the screen size in pixels,
/// which overlay clamping queries.
#[derive(Debug)]
pub struct ViewTree {
    nodes: BTreeMap<ViewId, ViewNode>,
    next_serial: u64,
    screen_size: Vec2,
}

impl ViewTree {
    pub fn new(screen_size: Vec2) -> Self {
        Self {
            nodes: BTreeMap::new(),
            next_serial: 1,
            screen_size,
        }
    }

    pub fn screen_size(&self) -> Vec2 {
        self.screen_size
    }

    pub fn set_screen_size(&mut self, size: Vec2) {
        self.screen_size = size;
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Create a detached view with the given rendered size.
    pub fn spawn(&mut self, size: Vec2) -> ViewId {
        let id = ViewId(self.next_serial);
        self.next_serial = self.next_serial.saturating_add(1);
        self.nodes.insert(id, ViewNode::new(size));
        id
    }

    /// Remove a view from the tree. Its children are detached, not despawned;
    /// any stored id for the removed view stops resolving.
    pub fn despawn(&mut self, view: ViewId) {
        self.remove_from_parent(view);
        let Some(node) = self.nodes.remove(&view) else {
            return;
        };
        for child in node.children {
            if let Some(child_node) = self.nodes.get_mut(&child) {
                child_node.parent = None;
                child_node.layout_params = None;
            }
        }
    }

    pub fn contains(&self, view: ViewId) -> bool {
        self.nodes.contains_key(&view)
    }

    pub fn get(&self, view: ViewId) -> Option<&ViewNode> {
        self.nodes.get(&view)
    }

    pub fn get_mut(&mut self, view: ViewId) -> Option<&mut ViewNode> {
        self.nodes.get_mut(&view)
    }

    /// All views with their nodes, in id order.
    pub fn nodes(&self) -> impl Iterator<Item = (ViewId, &ViewNode)> {
        self.nodes.iter().map(|(id, node)| (*id, node))
    }

    pub fn parent_of(&self, view: ViewId) -> Option<ViewId> {
        self.get(view)?.parent
    }

    pub fn children_of(&self, parent: ViewId) -> &[ViewId] {
        self.get(parent).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    pub fn index_in_parent(&self, view: ViewId) -> Option<usize> {
        let parent = self.parent_of(view)?;
        let (index, _) = self
            .children_of(parent)
            .iter()
            .find_position(|&&child| child == view)?;
        Some(index)
    }

    /// Append `child` to `parent`'s children. A view that already has a
    /// parent is detached from it first.
    pub fn add_child(&mut self, parent: ViewId, child: ViewId, params: LayoutParams) {
        self.insert_child_at(parent, usize::MAX, child, params);
    }

    /// Insert `child` into `parent`'s children at `index` (clamped to the
    /// child count). No-op for unknown ids, self-parenting, or an insertion
    /// that would create a cycle.
    pub fn insert_child_at(
        &mut self,
        parent: ViewId,
        index: usize,
        child: ViewId,
        params: LayoutParams,
    ) {
        if parent == child || !self.contains(parent) || !self.contains(child) {
            return;
        }
        if self.is_ancestor(child, parent) {
            return;
        }

        self.remove_from_parent(child);

        if let Some(parent_node) = self.nodes.get_mut(&parent) {
            let index = index.min(parent_node.children.len());
            parent_node.children.insert(index, child);
        }
        if let Some(child_node) = self.nodes.get_mut(&child) {
            child_node.parent = Some(parent);
            child_node.layout_params = Some(params);
        }
    }

    /// Detach `child` from its parent, if it has one. Its layout params are
    /// cleared with the attachment.
    pub fn remove_from_parent(&mut self, child: ViewId) {
        let Some(parent) = self.parent_of(child) else {
            return;
        };
        if let Some(parent_node) = self.nodes.get_mut(&parent) {
            parent_node.children.retain(|&c| c != child);
        }
        if let Some(child_node) = self.nodes.get_mut(&child) {
            child_node.parent = None;
            child_node.layout_params = None;
        }
    }

    pub(crate) fn set_touch_interceptor(&mut self, view: ViewId, installed: bool) {
        if let Some(node) = self.nodes.get_mut(&view) {
            node.touch_interceptor = installed;
        }
    }

    fn is_ancestor(&self, ancestor: ViewId, of: ViewId) -> bool {
        let mut cursor = self.parent_of(of);
        while let Some(parent) = cursor {
            if parent == ancestor {
                return true;
            }
            cursor = self.parent_of(parent);
        }
        false
    }
}
