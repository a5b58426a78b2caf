//! Ancestry lookup
//!
//! Walks parent links upward. Each visited element is remembered by address, so a cycle made
//! by hand ends the walk instead of looping.

use super::node::{Node, NodeKind};
use std::collections::HashSet;

/// Nearest proper ancestor of `node` matching `kind`.
pub fn get_ancestor(node: &Node, kind: NodeKind) -> Option<Node> {
    node.parent().and_then(|parent| find_from(parent, kind))
}

/// First element matching `kind`, starting with `start` itself.
pub(crate) fn find_from(start: Node, kind: NodeKind) -> Option<Node> {
    let mut visited = HashSet::new();
    let mut current = Some(start);
    while let Some(node) = current {
        if !visited.insert(node.address()) {
            return None;
        }
        if node.kind().matches(kind) {
            return Some(node);
        }
        current = node.parent();
    }
    None
}

/// Every ancestor of `node`, nearest first.
pub fn ancestors(node: &Node) -> Vec<Node> {
    let mut visited = HashSet::new();
    let mut found = Vec::new();
    let mut current = node.parent();
    while let Some(parent) = current {
        if !visited.insert(parent.address()) {
            break;
        }
        current = parent.parent();
        found.push(parent);
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cuke::model::elements::{Feature, Scenario, Step};
    use crate::cuke::model::{attach, shared};

    #[test]
    fn test_walks_to_matching_ancestor() {
        let feature = Node::from(shared(Feature::new()));
        let scenario = Node::from(shared(Scenario::new()));
        let step = Node::from(shared(Step::new()));
        attach(&feature, scenario.clone()).unwrap();
        attach(&scenario, step.clone()).unwrap();

        let found = get_ancestor(&step, NodeKind::Feature).unwrap();
        assert!(found.ptr_eq(&feature));
        let test = get_ancestor(&step, NodeKind::Test).unwrap();
        assert!(test.ptr_eq(&scenario));
        assert!(get_ancestor(&step, NodeKind::Directory).is_none());
        assert!(get_ancestor(&feature, NodeKind::Feature).is_none());
        assert_eq!(ancestors(&step).len(), 2);
    }

    #[test]
    fn test_hand_made_cycles_terminate() {
        let a = Node::from(shared(Scenario::new()));
        let b = Node::from(shared(Step::new()));
        // Bypass `attach`, which refuses cycles.
        a.with_parent_link(|link| *link = crate::cuke::model::ParentLink::to(&b));
        b.with_parent_link(|link| *link = crate::cuke::model::ParentLink::to(&a));

        assert!(get_ancestor(&a, NodeKind::Directory).is_none());
        assert_eq!(ancestors(&a).len(), 2);
    }
}
