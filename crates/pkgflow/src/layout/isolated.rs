//! Placement of packages with no dependency edges.
//!
//! Isolated packages are ordered alphabetically by name, with the id as a
//! tie-breaker, and laid out in their own row-packed section. When a
//! connected section exists above, the section starts an extra
//! `isolated-section-gap` lower.

use super::adjacency::Adjacency;
use super::rows::{RowCursor, pack_rows};
use super::{NodeFlags, flow_node};
use crate::domain::FlowNode;
use petgraph::graph::NodeIndex;

/// Order isolated nodes for display.
#[must_use]
pub fn order_isolated(adjacency: &Adjacency<'_>, isolated: &[NodeIndex]) -> Vec<NodeIndex> {
    let mut ordered = isolated.to_vec();
    ordered.sort_by(|&a, &b| {
        let (a, b) = (adjacency.node(a), adjacency.node(b));
        a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id))
    });
    ordered
}

/// Lay out the isolated section below whatever `cursor` has placed so far.
pub fn place_isolated(
    adjacency: &Adjacency<'_>,
    isolated: &[NodeIndex],
    cursor: &mut RowCursor<'_>,
    max_per_row: usize,
    section_gap: f64,
) -> Vec<FlowNode> {
    if isolated.is_empty() {
        return Vec::new();
    }
    if cursor.rows_placed() > 0 {
        cursor.skip(section_gap);
    }

    let flags = NodeFlags {
        in_cycle: false,
        isolated: true,
    };
    let ordered = order_isolated(adjacency, isolated);
    let mut placed = Vec::with_capacity(ordered.len());
    for row in pack_rows(&ordered, adjacency, max_per_row) {
        let positions = cursor.place_row(row.len());
        for (idx, position) in row.into_iter().zip(positions) {
            placed.push(flow_node(adjacency.node(idx), position, flags));
        }
    }
    placed
}
