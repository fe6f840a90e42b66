//! Output formatting for CLI commands.
//!
//! Layouts are printed either as JSON, for the graph renderer, or as a short
//! human-readable summary.
//!
//! Submodules:
//! - [`color`]: Color and styling helpers

pub mod color;

use crate::domain::LayoutResult;
use std::env;
use std::io::{self, Write};

pub use color::{error, info, success, warning};

use color::{bold, dimmed};

/// Configuration for output formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputConfig {
    /// Whether to use colors in output.
    pub use_colors: bool,
}

impl OutputConfig {
    /// Create an `OutputConfig` by reading from environment variables.
    ///
    /// Reads:
    /// - `NO_COLOR`: Standard env var to disable colors (any value disables colors)
    /// - `PKGFLOW_COLOR`: Set to "0" or "false" to disable colors (default: true)
    #[must_use]
    pub fn from_env() -> Self {
        // Respect NO_COLOR standard (https://no-color.org/)
        let use_colors = env::var_os("NO_COLOR").is_none()
            && env::var("PKGFLOW_COLOR")
                .map(|v| v != "0" && !v.eq_ignore_ascii_case("false"))
                .unwrap_or(true);
        Self { use_colors }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { use_colors: true }
    }
}

/// How a layout is written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Compact JSON on one line
    Json,
    /// Indented JSON
    PrettyJson,
    /// Human-readable summary
    Summary,
}

/// Write `result` in the requested mode.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_layout<W: Write>(
    w: &mut W,
    result: &LayoutResult,
    mode: OutputMode,
    config: &OutputConfig,
) -> io::Result<()> {
    match mode {
        OutputMode::Json => {
            serde_json::to_writer(&mut *w, result)?;
            writeln!(w)
        }
        OutputMode::PrettyJson => {
            serde_json::to_writer_pretty(&mut *w, result)?;
            writeln!(w)
        }
        OutputMode::Summary => write_summary(w, result, config),
    }
}

/// Write a human-readable summary of `result`.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_summary<W: Write>(
    w: &mut W,
    result: &LayoutResult,
    config: &OutputConfig,
) -> io::Result<()> {
    let stats = &result.stats;

    writeln!(
        w,
        "{} {}",
        bold("Layout:", config),
        info(&format!("{} packages", result.flow_nodes.len()), config)
    )?;
    writeln!(
        w,
        "  {} {} in {} layers",
        dimmed("connected:", config),
        stats.connected,
        stats.layers
    )?;
    writeln!(w, "  {} {}", dimmed("isolated: ", config), stats.isolated)?;
    writeln!(w, "  {} {}", dimmed("rows:     ", config), stats.rows)?;

    if result.cycle_nodes.is_empty() {
        writeln!(w, "{}", success("No dependency cycles", config))?;
    } else {
        let ids: Vec<&str> = result.cycle_nodes.iter().map(String::as_str).collect();
        writeln!(
            w,
            "{} {}",
            error(&format!("Cycles ({}):", ids.len()), config),
            ids.join(", ")
        )?;
    }

    let affected: Vec<&str> = result.affected_ids().collect();
    if !affected.is_empty() {
        writeln!(
            w,
            "{} {}",
            warning(&format!("Affected ({}):", affected.len()), config),
            affected.join(", ")
        )?;
    }

    if stats.skipped_edges > 0 {
        writeln!(
            w,
            "{}",
            warning(
                &format!(
                    "Ignored {} edge(s) with an unknown endpoint",
                    stats.skipped_edges
                ),
                config
            )
        )?;
    }
    if stats.duplicate_nodes > 0 {
        writeln!(
            w,
            "{}",
            warning(
                &format!("Ignored {} duplicate node id(s)", stats.duplicate_nodes),
                config
            )
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::domain::{DependencyEdge, DependencyNode, LayoutRequest};
    use crate::layout::compute_layout;

    const PLAIN: OutputConfig = OutputConfig { use_colors: false };

    fn node(id: &str) -> DependencyNode {
        DependencyNode::new(id, id, "lib", id)
    }

    fn render(result: &LayoutResult, mode: OutputMode) -> String {
        let mut buf = Vec::new();
        write_layout(&mut buf, result, mode, &PLAIN).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn summary_lists_cycles_and_affected() {
        let request = LayoutRequest::new(
            vec![node("a"), node("b"), node("solo")],
            vec![
                DependencyEdge::new("a", "b"),
                DependencyEdge::new("b", "a"),
                DependencyEdge::new("a", "missing"),
            ],
        )
        .with_affected(["b"]);
        let result = compute_layout(&request, &LayoutConfig::default()).unwrap();

        let text = render(&result, OutputMode::Summary);
        assert!(text.contains("Layout: 3 packages"));
        assert!(text.contains("connected: 2 in 1 layers"));
        assert!(text.contains("Cycles (2): a, b"));
        assert!(text.contains("Affected (1): b"));
        assert!(text.contains("Ignored 1 edge(s)"));
    }

    #[test]
    fn summary_reports_acyclic_graph() {
        let request = LayoutRequest::new(vec![node("a")], vec![]);
        let result = compute_layout(&request, &LayoutConfig::default()).unwrap();

        let text = render(&result, OutputMode::Summary);
        assert!(text.contains("No dependency cycles"));
        assert!(!text.contains("Affected"));
    }

    #[test]
    fn json_modes_parse_back() {
        let edges = vec![DependencyEdge::new("a", "b")];
        let request = LayoutRequest::new(vec![node("a"), node("b")], edges);
        let result = compute_layout(&request, &LayoutConfig::default()).unwrap();

        let compact = render(&result, OutputMode::Json);
        let pretty = render(&result, OutputMode::PrettyJson);
        assert_eq!(compact.lines().count(), 1);
        assert!(pretty.lines().count() > 1);

        let a: serde_json::Value = serde_json::from_str(&compact).unwrap();
        let b: serde_json::Value = serde_json::from_str(&pretty).unwrap();
        assert_eq!(a, b);
    }
}
