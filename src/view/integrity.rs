use itertools::Itertools as _;

use super::ViewTree;

/// Structural issues in a [`ViewTree`], as human-readable strings. Empty means
/// the tree is consistent. Used by the model tests and handy for host-side
/// debug assertions.
pub fn view_tree_integrity_issues(tree: &ViewTree) -> Vec<String> {
    let mut issues = Vec::new();

    for (id, node) in tree.nodes() {
        for &child in node.children() {
            match tree.get(child) {
                None => issues.push(format!("{id:?}: child {child:?} does not exist")),
                Some(child_node) if child_node.parent() != Some(id) => issues.push(format!(
                    "{id:?}: child {child:?} points at parent {:?}",
                    child_node.parent()
                )),
                Some(_) => {}
            }
        }

        for dup in node.children().iter().duplicates() {
            issues.push(format!("{id:?}: duplicate child {dup:?}"));
        }

        if let Some(parent) = node.parent() {
            match tree.get(parent) {
                None => issues.push(format!("{id:?}: parent {parent:?} does not exist")),
                Some(parent_node) if !parent_node.children().contains(&id) => {
                    issues.push(format!("{id:?}: not listed in parent {parent:?}"));
                }
                Some(_) => {}
            }
            if node.layout_params().is_none() {
                issues.push(format!("{id:?}: attached without layout params"));
            }
        }

        // A parent chain longer than the node count can only mean a cycle.
        let mut steps = 0usize;
        let mut cursor = node.parent();
        while let Some(parent) = cursor {
            steps += 1;
            if parent == id || steps > tree.len() {
                issues.push(format!("{id:?}: parent chain contains a cycle"));
                break;
            }
            cursor = tree.parent_of(parent);
        }
    }

    issues
}
