//! Layered layout of a package dependency graph.
//!
//! [`compute_layout`] runs the whole pipeline for one request:
//!
//! 1. [`adjacency`]: forward/reverse neighbors, dangling edges dropped
//! 2. [`partition`]: connected vs. isolated nodes
//! 3. [`layering`]: topological ranks, cycle fallback
//! 4. [`rows`]: degree-ordered rows and centered coordinates
//! 5. [`isolated`]: alphabetical section below the connected layers
//! 6. [`annotate`]: affected flags
//!
//! The pipeline is synchronous and keeps no state between calls.

pub mod adjacency;
pub mod annotate;
pub mod isolated;
pub mod layering;
pub mod partition;
pub mod rows;

use crate::config::LayoutConfig;
use crate::domain::{
    DependencyNode, FlowNode, FlowNodeData, LayoutRequest, LayoutResult, LayoutStats, Position,
};
use crate::error::{Error, Result};
use std::collections::BTreeSet;
use tracing::debug;

pub use adjacency::Adjacency;
pub use layering::{Layering, assign_layers};
pub use partition::{Partition, partition};
pub use rows::{RowCursor, pack_rows, row_offsets};

/// Node type tag the renderer uses to pick its package component.
pub const FLOW_NODE_TYPE: &str = "package";

/// Structural flags decided during placement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct NodeFlags {
    pub in_cycle: bool,
    pub isolated: bool,
}

#[must_use]
pub(crate) fn flow_node(node: &DependencyNode, position: Position, flags: NodeFlags) -> FlowNode {
    FlowNode {
        id: node.id.clone(),
        node_type: FLOW_NODE_TYPE.to_string(),
        position,
        data: FlowNodeData {
            label: node.name.clone(),
            kind: node.kind.clone(),
            root: node.root.clone(),
            tags: node.tags.clone(),
            scripts_count: node.scripts_count,
            is_affected: false,
            is_in_cycle: flags.in_cycle,
            is_isolated: flags.isolated,
        },
    }
}

/// Compute the full layout for `request`.
///
/// # Errors
///
/// Returns [`Error::Config`] if `config` is invalid, or
/// [`Error::GraphTooLarge`] if the request exceeds `config.max_nodes`.
pub fn compute_layout(request: &LayoutRequest, config: &LayoutConfig) -> Result<LayoutResult> {
    config.validate()?;
    if let Some(limit) = config.max_nodes
        && request.nodes.len() > limit
    {
        return Err(Error::GraphTooLarge {
            nodes: request.nodes.len(),
            limit,
        });
    }

    let adjacency = Adjacency::build(&request.nodes, &request.edges, config.edge_direction);
    let split = partition(&adjacency);
    let layering = assign_layers(&adjacency, &split.connected);

    let mut cursor = RowCursor::new(config);
    let mut flow_nodes = Vec::with_capacity(adjacency.len());

    for layer in &layering.layers {
        for row in pack_rows(layer, &adjacency, config.max_nodes_per_row) {
            let positions = cursor.place_row(row.len());
            for (idx, position) in row.into_iter().zip(positions) {
                let flags = NodeFlags {
                    in_cycle: layering.cycle_nodes.contains(&idx),
                    isolated: false,
                };
                flow_nodes.push(flow_node(adjacency.node(idx), position, flags));
            }
        }
    }

    flow_nodes.extend(isolated::place_isolated(
        &adjacency,
        &split.isolated,
        &mut cursor,
        config.max_nodes_per_row,
        config.isolated_section_gap,
    ));

    let affected = annotate::mark_affected(&mut flow_nodes, &request.affected_nodes);

    let cycle_nodes: BTreeSet<String> = layering
        .cycle_nodes
        .iter()
        .map(|&idx| adjacency.node(idx).id.clone())
        .collect();

    let stats = LayoutStats {
        layers: layering.layers.len(),
        rows: cursor.rows_placed(),
        connected: split.connected.len(),
        isolated: split.isolated.len(),
        skipped_edges: adjacency.skipped_edges(),
        duplicate_nodes: adjacency.duplicate_nodes(),
    };

    debug!(
        nodes = flow_nodes.len(),
        layers = stats.layers,
        rows = stats.rows,
        isolated = stats.isolated,
        cycles = cycle_nodes.len(),
        affected,
        "Layout computed"
    );

    Ok(LayoutResult {
        flow_nodes,
        cycle_nodes,
        stats,
    })
}
