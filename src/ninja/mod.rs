//! Ninja build file synthesis
//!
//! Turns a [`TargetSet`](crate::target::TargetSet) and a resolved
//! [`ToolchainConfig`](crate::toolchain::ToolchainConfig) into build
//! statements and renders them into a complete `build.ninja`.

pub mod archive;
pub mod compile;
pub mod compose;
pub mod edge;
pub mod escape;
pub mod link;
pub mod templates;

pub use compose::{compose, write_build_file};
pub use edge::{BuildEdge, EdgeKind};
pub use escape::{escape, library_file_name, source_to_object};

use crate::target::TargetSet;
use crate::toolchain::ToolchainConfig;

/// All edges of a run: compile edges, then archives, then links.
pub fn emit_edges(targets: &TargetSet, toolchain: &ToolchainConfig) -> Vec<BuildEdge> {
    let mut edges = compile::emit(targets, toolchain);
    edges.extend(archive::emit(targets, toolchain));
    edges.extend(link::emit(targets, toolchain));
    edges
}
