//! Connected/isolated split.

use super::adjacency::Adjacency;
use petgraph::graph::NodeIndex;

/// Nodes split by whether they touch any edge, each side in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    /// Nodes with at least one in- or out-edge
    pub connected: Vec<NodeIndex>,
    /// Nodes with no edges at all
    pub isolated: Vec<NodeIndex>,
}

/// Split every node of `adjacency` in a single pass.
#[must_use]
pub fn partition(adjacency: &Adjacency<'_>) -> Partition {
    let (connected, isolated) = adjacency
        .indices()
        .partition(|&idx| adjacency.degree(idx) > 0);
    Partition {
        connected,
        isolated,
    }
}
