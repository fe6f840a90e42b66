//! Layout configuration.
//!
//! Spacing constants, row width, the edge direction convention and an
//! optional node ceiling. Every key is optional in the YAML file; missing keys
//! take the values of [`LayoutConfig::default`].
//!
//! ```yaml
//! node-width: 180
//! node-height: 70
//! horizontal-gap: 60
//! vertical-gap: 100
//! max-nodes-per-row: 5
//! isolated-section-gap: 150
//! edge-direction: dependency-first
//! max-nodes: 2000
//! ```

use crate::error::{Error, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;

/// Default node box width
pub const NODE_WIDTH: f64 = 180.0;

/// Default node box height
pub const NODE_HEIGHT: f64 = 70.0;

/// Default gap between adjacent nodes in a row
pub const HORIZONTAL_GAP: f64 = 60.0;

/// Default gap between consecutive rows
pub const VERTICAL_GAP: f64 = 100.0;

/// Default maximum number of nodes in one row
pub const MAX_NODES_PER_ROW: usize = 5;

/// Default extra spacing above the isolated section
pub const ISOLATED_SECTION_GAP: f64 = 150.0;

/// How a [`DependencyEdge`](crate::domain::DependencyEdge) maps onto the
/// dependency relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum EdgeDirection {
    /// `source -> target` means `target` depends on `source`.
    ///
    /// Sources rank above their targets, so with `A -> B -> C` the layers
    /// read A, B, C from top to bottom.
    #[default]
    DependencyFirst,

    /// `source -> target` means `source` depends on `target`.
    ///
    /// Targets rank above their sources.
    DependentFirst,
}

/// Layout configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Node box width
    pub node_width: f64,

    /// Node box height
    pub node_height: f64,

    /// Gap between adjacent nodes in a row
    pub horizontal_gap: f64,

    /// Gap between consecutive rows
    pub vertical_gap: f64,

    /// Maximum nodes per row (at least 1)
    pub max_nodes_per_row: usize,

    /// Extra spacing above the isolated section
    pub isolated_section_gap: f64,

    /// Edge direction convention
    pub edge_direction: EdgeDirection,

    /// Reject requests with more nodes than this
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_nodes: Option<usize>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_width: NODE_WIDTH,
            node_height: NODE_HEIGHT,
            horizontal_gap: HORIZONTAL_GAP,
            vertical_gap: VERTICAL_GAP,
            max_nodes_per_row: MAX_NODES_PER_ROW,
            isolated_section_gap: ISOLATED_SECTION_GAP,
            edge_direction: EdgeDirection::default(),
            max_nodes: None,
        }
    }
}

impl LayoutConfig {
    /// Parse and validate a configuration from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the YAML is malformed, names an unknown
    /// key, or fails [`validate`](Self::validate).
    pub fn from_yaml(content: &str) -> Result<Self> {
        // An empty file deserializes to unit, not to a map.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self =
            serde_yaml::from_str(content).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its contents are
    /// invalid.
    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).await?;
        let config = Self::from_yaml(&content)?;
        tracing::debug!(path = %path.display(), ?config, "Loaded layout configuration");
        Ok(config)
    }

    /// Load configuration from `path`, or use defaults when no path is given.
    ///
    /// # Errors
    ///
    /// See [`load`](Self::load).
    pub async fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path).await,
            None => Ok(Self::default()),
        }
    }

    /// Serialize to YAML.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if serialization fails.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| Error::Config(format!("YAML error: {e}")))
    }

    /// Check that every value can produce a sensible layout.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] naming the first offending key.
    pub fn validate(&self) -> Result<()> {
        if self.max_nodes_per_row == 0 {
            return Err(Error::Config(
                "max-nodes-per-row must be at least 1".to_string(),
            ));
        }

        let dimensions = [
            ("node-width", self.node_width),
            ("node-height", self.node_height),
            ("horizontal-gap", self.horizontal_gap),
            ("vertical-gap", self.vertical_gap),
            ("isolated-section-gap", self.isolated_section_gap),
        ];
        for (key, value) in dimensions {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::Config(format!(
                    "{key} must be a finite, non-negative number (got {value})"
                )));
            }
        }

        Ok(())
    }

    /// Horizontal distance between the centers of adjacent nodes in a row.
    #[must_use]
    pub fn column_pitch(&self) -> f64 {
        self.node_width + self.horizontal_gap
    }

    /// Vertical distance the cursor advances after each row.
    #[must_use]
    pub fn row_pitch(&self) -> f64 {
        self.node_height + self.vertical_gap
    }
}
