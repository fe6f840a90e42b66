//! Row packing and coordinate assignment.
//!
//! A layer is ordered by total degree, highest first, and cut into rows of
//! at most `max-nodes-per-row` nodes. Each row is centered on x = 0 and
//! takes its own band of vertical space; the [`RowCursor`] tracks where the
//! next band starts.
//!
//! Positions are node centers. A row of `n` nodes spans
//! `n * node_width + (n - 1) * horizontal_gap`, so the x values of any row
//! are symmetric about zero. Measuring the row as
//! `n * (node_width + horizontal_gap)` instead would count a trailing gap no
//! node occupies and shift every row left by `horizontal_gap / 2`.

use super::adjacency::Adjacency;
use crate::config::LayoutConfig;
use crate::domain::Position;
use petgraph::graph::NodeIndex;
use std::cmp::Reverse;

/// Order `layer` by descending degree and split it into rows.
///
/// The sort is stable, so nodes of equal degree keep their order in `layer`.
///
/// # Panics
///
/// Panics if `max_per_row` is zero. [`LayoutConfig::validate`] rejects such
/// configurations before layout starts.
#[must_use]
pub fn pack_rows(
    layer: &[NodeIndex],
    adjacency: &Adjacency<'_>,
    max_per_row: usize,
) -> Vec<Vec<NodeIndex>> {
    let mut ordered = layer.to_vec();
    ordered.sort_by_key(|&idx| Reverse(adjacency.degree(idx)));
    ordered.chunks(max_per_row).map(<[_]>::to_vec).collect()
}

/// Running vertical position shared by both sections of the layout.
#[derive(Debug, Clone)]
pub struct RowCursor<'c> {
    config: &'c LayoutConfig,
    y: f64,
    rows_placed: usize,
}

impl<'c> RowCursor<'c> {
    /// Start a cursor at y = 0.
    #[must_use]
    pub fn new(config: &'c LayoutConfig) -> Self {
        Self {
            config,
            y: 0.0,
            rows_placed: 0,
        }
    }

    /// Current vertical position.
    #[must_use]
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Number of rows placed so far.
    #[must_use]
    pub fn rows_placed(&self) -> usize {
        self.rows_placed
    }

    /// Move the cursor down by `gap` without placing a row.
    pub fn skip(&mut self, gap: f64) {
        self.y += gap;
    }

    /// Positions for a row of `len` nodes at the cursor, then advance.
    pub fn place_row(&mut self, len: usize) -> Vec<Position> {
        let y = self.y;
        let positions = row_offsets(len, self.config)
            .into_iter()
            .map(|x| Position { x, y })
            .collect();
        self.y += self.config.row_pitch();
        self.rows_placed += 1;
        positions
    }
}

/// Centered x coordinates for a row of `len` nodes.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn row_offsets(len: usize, config: &LayoutConfig) -> Vec<f64> {
    if len == 0 {
        return Vec::new();
    }
    let pitch = config.column_pitch();
    let row_width = len as f64 * pitch - config.horizontal_gap;
    let start_x = -(row_width / 2.0) + config.node_width / 2.0;
    (0..len).map(|i| start_x + i as f64 * pitch).collect()
}

#[cfg(test)]
#[allow(clippy::float_cmp)] // coordinates are sums of whole-number constants
mod tests {
    use super::*;
    use crate::config::EdgeDirection;
    use crate::domain::{DependencyEdge, DependencyNode};
    use rstest::rstest;

    #[rstest]
    #[case::single(1, vec![0.0])]
    #[case::pair(2, vec![-120.0, 120.0])]
    #[case::triple(3, vec![-240.0, 0.0, 240.0])]
    #[case::full(5, vec![-480.0, -240.0, 0.0, 240.0, 480.0])]
    fn offsets_are_centered(#[case] len: usize, #[case] expected: Vec<f64>) {
        assert_eq!(row_offsets(len, &LayoutConfig::default()), expected);
    }

    #[test]
    fn row_span_excludes_trailing_gap() {
        let config = LayoutConfig::default();
        let xs = row_offsets(3, &config);

        let left_edge = xs[0] - config.node_width / 2.0;
        let right_edge = xs[2] + config.node_width / 2.0;
        assert_eq!(right_edge - left_edge, 3.0 * 180.0 + 2.0 * 60.0);
        assert_eq!(left_edge, -right_edge);
    }

    #[test]
    fn empty_row_has_no_offsets() {
        assert!(row_offsets(0, &LayoutConfig::default()).is_empty());
    }

    #[test]
    fn cursor_advances_once_per_row() {
        let config = LayoutConfig::default();
        let mut cursor = RowCursor::new(&config);

        let first = cursor.place_row(2);
        let second = cursor.place_row(1);

        assert!(first.iter().all(|p| p.y == 0.0));
        assert_eq!(second[0].y, 170.0);
        assert_eq!(cursor.y(), 340.0);
        assert_eq!(cursor.rows_placed(), 2);

        cursor.skip(150.0);
        assert_eq!(cursor.y(), 490.0);
    }

    #[test]
    fn rows_are_sorted_by_degree_then_chunked() {
        let nodes: Vec<_> = ["a", "b", "c", "d", "e", "f", "hub"]
            .iter()
            .map(|id| DependencyNode::new(*id, *id, "lib", *id))
            .collect();
        let edges: Vec<_> = ["a", "b", "c"]
            .iter()
            .map(|id| DependencyEdge::new("hub", *id))
            .chain(std::iter::once(DependencyEdge::new("f", "a")))
            .collect();
        let adj = Adjacency::build(&nodes, &edges, EdgeDirection::DependencyFirst);
        let layer: Vec<_> = adj.indices().collect();

        let rows = pack_rows(&layer, &adj, 5);
        let ids: Vec<Vec<&str>> = rows
            .iter()
            .map(|row| row.iter().map(|i| adj.node(*i).id.as_str()).collect())
            .collect();

        // hub: 3, a: 2, then b, c, f at 1 in input order, then d, e at 0
        assert_eq!(ids, vec![vec!["hub", "a", "b", "c", "f"], vec!["d", "e"]]);
    }
}
