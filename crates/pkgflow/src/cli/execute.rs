//! Command execution logic for all CLI commands.

use anyhow::{Context, Result};
use std::io::{self, Write};
use tokio::io::AsyncReadExt;

use super::args::{LayoutArgs, SchemaArgs, SchemaKind, ServeArgs};
use crate::config::LayoutConfig;
use crate::domain::LayoutRequest;
use crate::output::{self, OutputConfig, OutputMode};
use crate::serve::serve;
use crate::worker::{LayoutWorker, WorkerResponse};

/// Execute the `layout` command
pub async fn execute_layout(args: &LayoutArgs, config: LayoutConfig) -> Result<()> {
    let raw = match &args.input {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read request from {}", path.display()))?,
        None => {
            let mut raw = String::new();
            tokio::io::stdin()
                .read_to_string(&mut raw)
                .await
                .context("Failed to read request from stdin")?;
            raw
        }
    };

    let mut request: LayoutRequest =
        serde_json::from_str(&raw).context("Request is not a valid layout request")?;
    for id in &args.affected {
        if !request.affected_nodes.contains(id) {
            request.affected_nodes.push(id.clone());
        }
    }
    tracing::debug!(
        nodes = request.nodes.len(),
        edges = request.edges.len(),
        affected = request.affected_nodes.len(),
        "Parsed layout request"
    );

    let worker = LayoutWorker::spawn(config);
    let result = worker.handle().layout(request).await;
    let stats = worker.shutdown().await?;
    tracing::debug!(?stats, "Worker finished");
    let result = result.context("Graph layout failed")?;

    let mode = if args.summary {
        OutputMode::Summary
    } else if args.pretty {
        OutputMode::PrettyJson
    } else {
        OutputMode::Json
    };

    match &args.output {
        Some(path) => {
            // Files never get color codes
            let mut buf = Vec::new();
            output::write_layout(&mut buf, &result, mode, &OutputConfig { use_colors: false })?;
            tokio::fs::write(path, buf)
                .await
                .with_context(|| format!("Failed to write layout to {}", path.display()))?;
            tracing::info!(
                path = %path.display(),
                nodes = result.flow_nodes.len(),
                "Layout written"
            );
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            output::write_layout(&mut handle, &result, mode, &OutputConfig::from_env())?;
            handle.flush()?;
        }
    }

    Ok(())
}

/// Execute the `serve` command
pub async fn execute_serve(args: &ServeArgs, config: LayoutConfig) -> Result<()> {
    tracing::info!(
        queue_depth = args.queue_depth,
        "Layout worker listening on stdin"
    );

    let worker = LayoutWorker::with_queue_depth(config, args.queue_depth);
    let handle = worker.handle();
    let (stdin, stdout) = (tokio::io::stdin(), tokio::io::stdout());
    let summary = serve(stdin, stdout, &handle).await;
    drop(handle);
    let stats = worker.shutdown().await?;
    let summary = summary?;

    tracing::info!(
        responses = summary.responses(),
        malformed = summary.malformed(),
        completed = stats.completed,
        failed = stats.failed,
        "Layout worker stopped"
    );
    Ok(())
}

/// Execute the `schema` command
pub fn execute_schema(args: &SchemaArgs) -> Result<()> {
    let schema = match args.kind {
        SchemaKind::Request => schemars::schema_for!(LayoutRequest),
        SchemaKind::Response => schemars::schema_for!(WorkerResponse),
        SchemaKind::Config => schemars::schema_for!(LayoutConfig),
    };

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    serde_json::to_writer_pretty(&mut handle, &schema)?;
    writeln!(handle)?;
    Ok(())
}

/// Execute the `config` command
pub fn execute_config(config: &LayoutConfig) -> Result<()> {
    let yaml = config.to_yaml()?;
    print!("{yaml}");
    Ok(())
}
