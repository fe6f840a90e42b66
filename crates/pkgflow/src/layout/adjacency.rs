//! Forward and reverse neighbor mappings over the request's nodes.
//!
//! The graph is a petgraph [`DiGraph`] whose node weights borrow the input
//! [`DependencyNode`]s. Node indices follow input order, which is what makes
//! every later stage deterministic.
//!
//! Edges are stored oriented from dependency to dependent regardless of the
//! wire convention, so "predecessors" always means "what this node depends
//! on".

use crate::config::EdgeDirection;
use crate::domain::{DependencyEdge, DependencyNode};
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;
use tracing::warn;

/// Adjacency structure built once per layout.
#[derive(Debug)]
pub struct Adjacency<'a> {
    graph: DiGraph<&'a DependencyNode, ()>,
    node_map: HashMap<&'a str, NodeIndex>,
    skipped_edges: usize,
    duplicate_nodes: usize,
}

impl<'a> Adjacency<'a> {
    /// Build the adjacency for `nodes` and `edges`.
    ///
    /// Edges naming an unknown id are ignored. A repeated node id keeps its
    /// first occurrence. Parallel edges and self-loops are kept; each one
    /// counts toward degree.
    #[must_use]
    pub fn build(
        nodes: &'a [DependencyNode],
        edges: &[DependencyEdge],
        direction: EdgeDirection,
    ) -> Self {
        let mut graph = DiGraph::with_capacity(nodes.len(), edges.len());
        let mut node_map = HashMap::with_capacity(nodes.len());
        let mut duplicate_nodes = 0;

        for node in nodes {
            if node_map.contains_key(node.id.as_str()) {
                warn!(id = %node.id, "Ignoring duplicate node id");
                duplicate_nodes += 1;
                continue;
            }
            let idx = graph.add_node(node);
            node_map.insert(node.id.as_str(), idx);
        }

        let mut skipped_edges = 0;
        for edge in edges {
            let (Some(&source), Some(&target)) = (
                node_map.get(edge.source.as_str()),
                node_map.get(edge.target.as_str()),
            ) else {
                warn!(
                    source = %edge.source,
                    target = %edge.target,
                    "Ignoring edge with unknown endpoint"
                );
                skipped_edges += 1;
                continue;
            };

            match direction {
                EdgeDirection::DependencyFirst => graph.add_edge(source, target, ()),
                EdgeDirection::DependentFirst => graph.add_edge(target, source, ()),
            };
        }

        Self {
            graph,
            node_map,
            skipped_edges,
            duplicate_nodes,
        }
    }

    /// Number of distinct nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns `true` if there are no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// The input node at `idx`.
    #[must_use]
    pub fn node(&self, idx: NodeIndex) -> &'a DependencyNode {
        self.graph[idx]
    }

    /// All node indices in input order.
    pub fn indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    /// Dependents of `idx`, one entry per edge.
    pub fn successors(&self, idx: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.neighbors_directed(idx, Direction::Outgoing)
    }

    /// Dependencies of `idx`, one entry per edge.
    pub fn predecessors(&self, idx: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.neighbors_directed(idx, Direction::Incoming)
    }

    /// Number of edges leaving `idx` toward its dependents.
    #[must_use]
    pub fn out_degree(&self, idx: NodeIndex) -> usize {
        self.successors(idx).count()
    }

    /// Number of edges arriving at `idx` from its dependencies.
    #[must_use]
    pub fn in_degree(&self, idx: NodeIndex) -> usize {
        self.predecessors(idx).count()
    }

    /// Total degree, the row packer's sort key.
    #[must_use]
    pub fn degree(&self, idx: NodeIndex) -> usize {
        self.in_degree(idx) + self.out_degree(idx)
    }

    /// Number of edges ignored because an endpoint was unknown.
    #[must_use]
    pub fn skipped_edges(&self) -> usize {
        self.skipped_edges
    }

    /// Number of input nodes ignored because their id repeated.
    #[must_use]
    pub fn duplicate_nodes(&self) -> usize {
        self.duplicate_nodes
    }
}
