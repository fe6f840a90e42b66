//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use pkgflow::domain::{DependencyEdge, DependencyNode, LayoutRequest};
use std::path::Path;
use std::process::{Command, Output};

/// A library package named after its id.
pub fn package(id: &str) -> DependencyNode {
    DependencyNode::new(id, id, "library", format!("packages/{id}"))
}

/// Build a request from node ids and `(source, target)` pairs.
pub fn request(ids: &[&str], edges: &[(&str, &str)]) -> LayoutRequest {
    LayoutRequest::new(
        ids.iter().map(|id| package(id)).collect(),
        edges
            .iter()
            .map(|(source, target)| DependencyEdge::new(*source, *target))
            .collect(),
    )
}

/// Run the pkgflow binary in `dir`, feeding `stdin` to it.
pub fn run_pkgflow(dir: &Path, args: &[&str], stdin: &str) -> Output {
    use std::io::Write;
    use std::process::Stdio;

    let mut child = Command::new(env!("CARGO_BIN_EXE_pkgflow"))
        .args(args)
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute pkgflow binary");

    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(stdin.as_bytes())
        .expect("Failed to write stdin");

    child.wait_with_output().expect("Failed to wait for pkgflow")
}
