//! Compile edges: one per (target, source).

use super::edge::{BuildEdge, EdgeKind};
use super::escape::{escape, source_to_object};
use crate::target::{TargetSet, TargetSpec, Tool};
use crate::toolchain::ToolchainConfig;

/// Emit compile edges for every source of every target, libraries first.
pub fn emit(targets: &TargetSet, toolchain: &ToolchainConfig) -> Vec<BuildEdge> {
    let mut edges = Vec::with_capacity(targets.source_count());
    for target in targets.iter() {
        emit_target(target, targets, toolchain, &mut edges);
    }
    edges
}

fn emit_target(
    target: &TargetSpec,
    targets: &TargetSet,
    toolchain: &ToolchainConfig,
    edges: &mut Vec<BuildEdge>,
) {
    let includes: Vec<String> = targets
        .include_dirs
        .iter()
        .chain(&target.include_dirs)
        .map(|dir| format!("-I{}", escape(dir)))
        .collect();

    // Concatenated, never deduplicated: later flags may override earlier ones.
    let cflags: Vec<String> = toolchain
        .cflags
        .iter()
        .chain(&targets.cflags)
        .chain(&target.cflags)
        .cloned()
        .collect();

    let cflags_cc: Vec<String> = toolchain
        .cflags_cc
        .iter()
        .chain(&targets.cflags_cc)
        .chain(&target.cflags_cc)
        .cloned()
        .collect();

    for source in &target.sources {
        let tool = target.tool_for(source);
        let mut edge = BuildEdge::new(
            EdgeKind::Compile,
            source_to_object(source, toolchain.extensions.object),
            tool.rule(),
        );
        edge.inputs.push(source_input(targets, source));
        edge.bind("includes", &includes);
        edge.bind("cflags", &cflags);
        if tool == Tool::Cxx {
            edge.bind("cflags_cc", &cflags_cc);
        }
        edges.push(edge);
    }
}

fn source_input(targets: &TargetSet, source: &str) -> String {
    match &targets.source_root {
        Some(root) => escape(&root.join(source).to_string_lossy()),
        None => escape(source),
    }
}
