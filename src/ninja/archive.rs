//! Archive edges: one per static library.

use super::edge::{BuildEdge, EdgeKind};
use super::escape::{library_file_name, source_to_object};
use crate::target::TargetSet;
use crate::toolchain::ToolchainConfig;

pub const RULE: &str = "alink_thin";

pub fn emit(targets: &TargetSet, toolchain: &ToolchainConfig) -> Vec<BuildEdge> {
    targets
        .static_libraries
        .values()
        .map(|lib| {
            let mut edge = BuildEdge::new(
                EdgeKind::Archive,
                library_file_name(&lib.name, toolchain.extensions.static_library),
                RULE,
            );
            // An empty library still gets its (empty) archive.
            edge.inputs = lib
                .sources
                .iter()
                .map(|src| source_to_object(src, toolchain.extensions.object))
                .collect();
            if !toolchain.arflags.is_empty() {
                edge.bind("arflags", &toolchain.arflags);
            }
            edge
        })
        .collect()
}
