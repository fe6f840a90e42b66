//! Topological rank assignment with cycle fallback.
//!
//! Ranks are produced frontier by frontier: a node joins the next layer once
//! every one of its dependencies has been ranked. Each node carries a count
//! of unranked dependency edges, so every edge is visited once and the whole
//! pass is O(V + E).
//!
//! When the frontier runs dry while nodes remain, those nodes sit on or
//! behind a cycle. All of them are flagged as cycle nodes and placed together
//! in one final layer; no attempt is made to rank them further.

use super::adjacency::Adjacency;
use petgraph::graph::NodeIndex;
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// Output of [`assign_layers`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layering {
    /// Layers in rank order; ids within a layer keep input order
    pub layers: Vec<Vec<NodeIndex>>,
    /// Nodes that could not be ranked
    pub cycle_nodes: HashSet<NodeIndex>,
}

/// Assign every node in `connected` to a layer.
///
/// `connected` must be in input order, as produced by
/// [`partition`](super::partition::partition).
#[must_use]
pub fn assign_layers(adjacency: &Adjacency<'_>, connected: &[NodeIndex]) -> Layering {
    let mut unranked_deps: HashMap<NodeIndex, usize> = connected
        .iter()
        .map(|&idx| (idx, adjacency.in_degree(idx)))
        .collect();

    let mut frontier: Vec<NodeIndex> = connected
        .iter()
        .copied()
        .filter(|idx| unranked_deps.get(idx) == Some(&0))
        .collect();

    let mut ranked = 0;
    let mut layers = Vec::new();

    while !frontier.is_empty() {
        frontier.sort_unstable();
        ranked += frontier.len();

        let mut next = Vec::new();
        for &idx in &frontier {
            for dependent in adjacency.successors(idx) {
                if let Some(count) = unranked_deps.get_mut(&dependent) {
                    *count = count.saturating_sub(1);
                    if *count == 0 {
                        next.push(dependent);
                    }
                }
            }
        }

        debug!(rank = layers.len(), size = frontier.len(), "Ranked layer");
        layers.push(frontier);
        frontier = next;
    }

    let mut cycle_nodes = HashSet::new();
    if ranked < connected.len() {
        let ranked_set: HashSet<NodeIndex> = layers.iter().flatten().copied().collect();
        let stuck: Vec<NodeIndex> = connected
            .iter()
            .copied()
            .filter(|idx| !ranked_set.contains(idx))
            .collect();

        warn!(
            count = stuck.len(),
            rank = layers.len(),
            "Dependency cycle prevents further ranking"
        );
        cycle_nodes.extend(stuck.iter().copied());
        layers.push(stuck);
    }

    Layering {
        layers,
        cycle_nodes,
    }
}
