//! CLI argument parsing and command dispatch.
//!
//! This module provides the command-line interface for pkgflow using clap's
//! derive API.
//!
//! # Commands
//!
//! - `layout`: Lay out one request and print the result
//! - `serve`: Answer JSONL requests on stdin until it closes
//! - `schema`: Print the JSON Schema of the wire protocol
//! - `config`: Print the effective layout configuration
//!
//! # Global Flags
//!
//! - `--config <FILE>`: YAML layout configuration (applies to all commands)
//!
//! # Example
//!
//! ```bash
//! pkgflow layout --input graph.json --pretty
//! pkgflow layout --input graph.json --affected ui,api --summary
//! nx-graph-export | pkgflow serve --config layout.yaml
//! ```

mod args;
mod execute;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use args::{LayoutArgs, SchemaArgs, SchemaKind, ServeArgs};

/// Pkgflow - layered layout for monorepo dependency graphs
///
/// Reads package nodes and dependency edges, and computes positions,
/// dependency cycles and isolated packages for a node-link diagram.
#[derive(Parser, Debug)]
#[command(name = "pkgflow")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// YAML layout configuration file
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Lay out a single request
    ///
    /// Reads one JSON request from a file or stdin and writes the layout as
    /// JSON, or as a summary with `--summary`.
    Layout(LayoutArgs),

    /// Run the layout worker over stdin/stdout
    ///
    /// Each stdin line is one JSON request; each stdout line is the matching
    /// response. Logs go to stderr.
    Serve(ServeArgs),

    /// Print the JSON Schema of the wire protocol
    Schema(SchemaArgs),

    /// Print the effective layout configuration as YAML
    Config,
}

impl Cli {
    /// Parse CLI arguments from command line
    #[must_use]
    pub fn parse_args() -> Self {
        <Self as Parser>::parse()
    }

    /// Parse CLI arguments from an iterator (for testing)
    ///
    /// # Errors
    ///
    /// Returns clap's error for invalid arguments.
    pub fn try_parse_from<I, T>(iter: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// Execute the CLI command
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or the command
    /// fails.
    pub async fn execute(&self) -> Result<()> {
        use crate::config::LayoutConfig;

        let config = LayoutConfig::load_or_default(self.config.as_deref()).await?;

        match &self.command {
            Commands::Layout(args) => execute::execute_layout(args, config).await,
            Commands::Serve(args) => execute::execute_serve(args, config).await,
            Commands::Schema(args) => execute::execute_schema(args),
            Commands::Config => execute::execute_config(&config),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_defaults() {
        let cli = Cli::try_parse_from(["pkgflow", "layout"]).unwrap();
        let Commands::Layout(args) = cli.command else {
            panic!("expected layout command");
        };
        assert!(args.input.is_none());
        assert!(args.output.is_none());
        assert!(!args.pretty && !args.summary);
        assert!(args.affected.is_empty());
    }

    #[test]
    fn global_config_after_subcommand() {
        let cli = Cli::try_parse_from(["pkgflow", "serve", "--config", "layout.yaml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("layout.yaml")));
        assert!(matches!(cli.command, Commands::Serve(_)));
    }

    #[test]
    fn affected_is_comma_separated() {
        let cli = Cli::try_parse_from(["pkgflow", "layout", "--affected", "ui,api"]).unwrap();
        let Commands::Layout(args) = cli.command else {
            panic!("expected layout command");
        };
        assert_eq!(args.affected, vec!["ui", "api"]);
    }

    #[test]
    fn pretty_conflicts_with_summary() {
        let parsed = Cli::try_parse_from(["pkgflow", "layout", "--pretty", "--summary"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn queue_depth_must_be_positive() {
        let parsed = Cli::try_parse_from(["pkgflow", "serve", "--queue-depth", "0"]);
        assert!(parsed.is_err());
        let cli = Cli::try_parse_from(["pkgflow", "serve", "--queue-depth", "4"]).unwrap();
        let Commands::Serve(args) = cli.command else {
            panic!("expected serve command");
        };
        assert_eq!(args.queue_depth, 4);
    }

    #[test]
    fn queue_depth_defaults_and_rejects_overflow() {
        let cli = Cli::try_parse_from(["pkgflow", "serve"]).unwrap();
        let Commands::Serve(args) = cli.command else {
            panic!("expected serve command");
        };
        assert_eq!(args.queue_depth, crate::worker::DEFAULT_QUEUE_DEPTH);
        let parsed = Cli::try_parse_from(["pkgflow", "serve", "--queue-depth", "70000"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn command_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn schema_kind_defaults_to_request() {
        let cli = Cli::try_parse_from(["pkgflow", "schema"]).unwrap();
        let Commands::Schema(args) = cli.command else {
            panic!("expected schema command");
        };
        assert_eq!(args.kind, SchemaKind::Request);
    }
}
