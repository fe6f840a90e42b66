//! CLI argument structs for all commands.

use clap::builder::TypedValueParser;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::worker::DEFAULT_QUEUE_DEPTH;

/// Arguments for the `layout` command
#[derive(Parser, Debug, Clone)]
pub struct LayoutArgs {
    /// Request file (JSON); reads stdin when omitted
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Write the layout to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Indent the JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Print a human-readable summary instead of JSON
    #[arg(long, conflicts_with = "pretty")]
    pub summary: bool,

    /// Extra affected package ids (comma-separated), added to the request's own
    #[arg(short, long, value_delimiter = ',')]
    pub affected: Vec<String>,
}

/// Arguments for the `serve` command
#[derive(Parser, Debug, Clone)]
pub struct ServeArgs {
    /// Maximum number of requests waiting for the worker
    #[arg(
        long,
        default_value_t = DEFAULT_QUEUE_DEPTH,
        value_parser = clap::value_parser!(u16).range(1..).map(usize::from)
    )]
    pub queue_depth: usize,
}

/// Arguments for the `schema` command
#[derive(Parser, Debug, Clone)]
pub struct SchemaArgs {
    /// Which message to describe
    #[arg(value_enum, default_value = "request")]
    pub kind: SchemaKind,
}

/// Protocol message selector for `schema`
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaKind {
    /// A layout request
    Request,
    /// A worker response line
    Response,
    /// The YAML layout configuration
    Config,
}
