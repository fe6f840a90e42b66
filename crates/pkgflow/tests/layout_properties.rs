//! Property-based tests for layout invariants.
//!
//! Graphs are generated as a node count plus index pairs so every edge is
//! valid; ids are unique by construction.

use pkgflow::config::LayoutConfig;
use pkgflow::domain::{DependencyEdge, DependencyNode, LayoutRequest, LayoutResult};
use pkgflow::layout::compute_layout;
use proptest::prelude::*;
use std::collections::{BTreeMap, HashSet};

fn arb_request() -> impl Strategy<Value = LayoutRequest> {
    (1usize..24)
        .prop_flat_map(|n| {
            (
                Just(n),
                prop::collection::vec((0..n, 0..n), 0..40),
                prop::collection::vec(any::<bool>(), n),
            )
        })
        .prop_map(|(n, pairs, affected_mask)| {
            let nodes = (0..n)
                .map(|i| {
                    // names deliberately not in id order
                    DependencyNode::new(format!("n{i}"), format!("pkg-{}", (i * 7) % n), "lib", ".")
                })
                .collect();
            let edges = pairs
                .into_iter()
                .map(|(s, t)| DependencyEdge::new(format!("n{s}"), format!("n{t}")))
                .collect();
            let affected = affected_mask
                .iter()
                .enumerate()
                .filter(|(_, flag)| **flag)
                .map(|(i, _)| format!("n{i}"));
            LayoutRequest::new(nodes, edges).with_affected(affected)
        })
}

fn layout(request: &LayoutRequest) -> LayoutResult {
    compute_layout(request, &LayoutConfig::default()).expect("default config lays out")
}

proptest! {
    #[test]
    fn every_input_node_appears_once(request in arb_request()) {
        let result = layout(&request);

        let ids: Vec<&str> = result.flow_nodes.iter().map(|n| n.id.as_str()).collect();
        let unique: HashSet<&str> = ids.iter().copied().collect();
        prop_assert_eq!(ids.len(), request.nodes.len());
        prop_assert_eq!(unique.len(), ids.len());
    }

    #[test]
    fn isolated_iff_no_edges(request in arb_request()) {
        let result = layout(&request);

        let touched: HashSet<&str> = request
            .edges
            .iter()
            .flat_map(|e| [e.source.as_str(), e.target.as_str()])
            .collect();
        for node in &result.flow_nodes {
            prop_assert_eq!(node.data.is_isolated, !touched.contains(node.id.as_str()));
            if node.data.is_isolated {
                prop_assert!(!node.data.is_in_cycle);
            }
        }
    }

    #[test]
    fn dependents_sit_below_dependencies(request in arb_request()) {
        let result = layout(&request);

        for edge in &request.edges {
            let source = result.node(&edge.source).unwrap();
            let target = result.node(&edge.target).unwrap();
            if source.data.is_in_cycle {
                // anything reachable from an unresolved cycle is unresolved too
                prop_assert!(target.data.is_in_cycle);
            } else if !target.data.is_in_cycle {
                prop_assert!(target.position.y > source.position.y);
            }
        }
    }

    #[test]
    fn rows_are_bounded_and_centered(request in arb_request()) {
        let result = layout(&request);

        let mut rows: BTreeMap<u64, Vec<f64>> = BTreeMap::new();
        for node in &result.flow_nodes {
            rows.entry(node.position.y.to_bits())
                .or_default()
                .push(node.position.x);
        }
        for xs in rows.values() {
            prop_assert!(xs.len() <= 5);
            let min = xs.iter().copied().fold(f64::INFINITY, f64::min);
            let max = xs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            prop_assert!((min + max).abs() < 1e-9, "row spans {min}..{max}");
        }
    }

    #[test]
    fn affected_flag_matches_request(request in arb_request()) {
        let result = layout(&request);

        let affected: HashSet<&str> = request.affected_nodes.iter().map(String::as_str).collect();
        for node in &result.flow_nodes {
            prop_assert_eq!(node.data.is_affected, affected.contains(node.id.as_str()));
        }
    }

    #[test]
    fn cycle_set_matches_flags(request in arb_request()) {
        let result = layout(&request);

        let flagged: HashSet<&str> = result
            .flow_nodes
            .iter()
            .filter(|n| n.data.is_in_cycle)
            .map(|n| n.id.as_str())
            .collect();
        let listed: HashSet<&str> = result.cycle_nodes.iter().map(String::as_str).collect();
        prop_assert_eq!(flagged, listed);
    }

    #[test]
    fn layout_is_deterministic(request in arb_request()) {
        let first = serde_json::to_string(&layout(&request)).unwrap();
        let second = serde_json::to_string(&layout(&request)).unwrap();
        prop_assert_eq!(first, second);
    }
}
