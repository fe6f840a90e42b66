//! Domain types for dependency-graph layout.
//!
//! Input types describe the workspace packages and the dependency edges
//! between them as supplied by monorepo introspection. Output types describe
//! positioned nodes ready for a node-link diagram renderer. All wire types use
//! camelCase field names.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A workspace package in the dependency graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DependencyNode {
    /// Unique identifier across the input set
    pub id: String,

    /// Display name, also the sort key for the isolated section
    pub name: String,

    /// Package kind tag (e.g. "app", "lib")
    #[serde(rename = "type")]
    pub kind: String,

    /// Workspace-relative path
    pub root: String,

    /// Optional ordered tags
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    /// Number of scripts defined by the package
    #[serde(default)]
    pub scripts_count: u64,
}

impl DependencyNode {
    /// Create a node with no tags and no scripts.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: impl Into<String>,
        root: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: kind.into(),
            root: root.into(),
            tags: None,
            scripts_count: 0,
        }
    }
}

/// A directed dependency relation between two packages.
///
/// How `source` and `target` map onto "dependency" and "dependent" is
/// decided by [`EdgeDirection`](crate::config::EdgeDirection).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct DependencyEdge {
    /// Id of the edge's source node
    pub source: String,

    /// Id of the edge's target node
    pub target: String,
}

impl DependencyEdge {
    /// Create an edge from `source` to `target`.
    #[must_use]
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// A layout request as it crosses the worker boundary.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LayoutRequest {
    /// Caller-chosen correlation id, echoed back in the response
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,

    /// Packages to lay out
    pub nodes: Vec<DependencyNode>,

    /// Dependency edges between packages
    #[serde(default)]
    pub edges: Vec<DependencyEdge>,

    /// Ids of packages touched by a pending change
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub affected_nodes: Vec<String>,
}

impl LayoutRequest {
    /// Create a request with no affected nodes.
    #[must_use]
    pub fn new(nodes: Vec<DependencyNode>, edges: Vec<DependencyEdge>) -> Self {
        Self {
            request_id: None,
            nodes,
            edges,
            affected_nodes: Vec::new(),
        }
    }

    /// Set the affected node ids.
    #[must_use]
    pub fn with_affected<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.affected_nodes = ids
            .into_iter()
            .map(Into::into)
            .collect();
        self
    }

    /// Set the correlation id.
    #[must_use]
    pub fn with_request_id(mut self, id: impl Into<String>) -> Self {
        self.request_id = Some(id.into());
        self
    }
}

/// Screen coordinates of a node's center.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct Position {
    /// Horizontal coordinate; each row is centered on x = 0
    pub x: f64,
    /// Vertical coordinate; grows downward
    pub y: f64,
}

/// Render payload attached to a [`FlowNode`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FlowNodeData {
    /// Display label (the package name)
    pub label: String,

    /// Package kind tag copied from the input node
    #[serde(rename = "type")]
    pub kind: String,

    /// Workspace-relative path
    pub root: String,

    /// Tags copied from the input node
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    /// Number of scripts defined by the package
    pub scripts_count: u64,

    /// Set when the id was listed in the request's affected nodes
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_affected: bool,

    /// Set when the node could not be ranked because of a cycle
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_in_cycle: bool,

    /// Set when the node has no edges at all
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_isolated: bool,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_false(value: &bool) -> bool {
    !*value
}

/// A positioned node ready for the graph renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FlowNode {
    /// Id of the originating [`DependencyNode`]
    pub id: String,

    /// Renderer node type; always [`FLOW_NODE_TYPE`](crate::layout::FLOW_NODE_TYPE)
    #[serde(rename = "type")]
    pub node_type: String,

    /// Center of the node
    pub position: Position,

    /// Render payload
    pub data: FlowNodeData,
}

/// Counters describing how a layout was produced.
///
/// Not part of the wire format; used for logging and the CLI summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayoutStats {
    /// Number of topological layers, including a trailing cycle layer
    pub layers: usize,
    /// Number of rows placed, across both sections
    pub rows: usize,
    /// Nodes with at least one edge
    pub connected: usize,
    /// Nodes with no edges
    pub isolated: usize,
    /// Edges ignored because an endpoint is unknown
    pub skipped_edges: usize,
    /// Input nodes ignored because their id was already seen
    pub duplicate_nodes: usize,
}

/// The computed layout.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LayoutResult {
    /// One positioned node per distinct input id, connected layers first
    pub flow_nodes: Vec<FlowNode>,

    /// Ids of nodes caught in an unresolved cycle, sorted
    pub cycle_nodes: BTreeSet<String>,

    /// Production counters
    #[serde(skip)]
    pub stats: LayoutStats,
}

impl LayoutResult {
    /// Look up the flow node for `id`.
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&FlowNode> {
        self.flow_nodes.iter().find(|n| n.id == id)
    }

    /// Ids of nodes flagged as affected, in layout order.
    pub fn affected_ids(&self) -> impl Iterator<Item = &str> {
        self.flow_nodes
            .iter()
            .filter(|n| n.data.is_affected)
            .map(|n| n.id.as_str())
    }
}
