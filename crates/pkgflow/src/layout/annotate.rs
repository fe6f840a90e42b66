//! Affected-node annotation.

use crate::domain::FlowNode;
use std::collections::HashSet;

/// Flag every node whose id appears in `affected`.
///
/// Runs after positions are final and touches nothing else. Returns the
/// number of nodes flagged; ids that match no node are ignored.
pub fn mark_affected(flow_nodes: &mut [FlowNode], affected: &[String]) -> usize {
    if affected.is_empty() {
        return 0;
    }
    let affected: HashSet<&str> = affected.iter().map(String::as_str).collect();

    let mut marked = 0;
    for node in flow_nodes {
        if affected.contains(node.id.as_str()) {
            node.data.is_affected = true;
            marked += 1;
        }
    }
    marked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DependencyNode, Position};
    use crate::layout::{NodeFlags, flow_node};

    fn flow(id: &str) -> FlowNode {
        flow_node(
            &DependencyNode::new(id, id, "lib", id),
            Position::default(),
            NodeFlags::default(),
        )
    }

    #[test]
    fn marks_only_listed_ids() {
        let mut nodes = vec![flow("a"), flow("b"), flow("c")];
        let marked = mark_affected(&mut nodes, &["b".to_string(), "missing".to_string()]);

        assert_eq!(marked, 1);
        let flags: Vec<bool> = nodes.iter().map(|n| n.data.is_affected).collect();
        assert_eq!(flags, vec![false, true, false]);
    }

    #[test]
    fn empty_set_marks_nothing() {
        let mut nodes = vec![flow("a")];
        assert_eq!(mark_affected(&mut nodes, &[]), 0);
        assert!(!nodes[0].data.is_affected);
    }
}
