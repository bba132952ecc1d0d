//! Link edges: one per executable.

use super::edge::{BuildEdge, EdgeKind};
use super::escape::{library_file_name, source_to_object};
use crate::target::TargetSet;
use crate::toolchain::ToolchainConfig;

pub const RULE: &str = "link";

/// Emit link edges.
///
/// Library order is kept exactly as declared, both in the implicit inputs
/// and on the command line: static archive resolution is order sensitive on
/// most linkers.
pub fn emit(targets: &TargetSet, toolchain: &ToolchainConfig) -> Vec<BuildEdge> {
    let ldflags: Vec<String> = toolchain
        .ldflags
        .iter()
        .chain(&targets.ldflags)
        .cloned()
        .collect();

    targets
        .executables
        .values()
        .map(|exe| {
            let libs: Vec<String> = exe
                .libs
                .iter()
                .map(|lib| library_file_name(lib, toolchain.extensions.static_library))
                .collect();

            let mut edge = BuildEdge::new(
                EdgeKind::Link,
                format!("{}{}", exe.name, toolchain.extensions.executable),
                RULE,
            );
            edge.inputs = exe
                .sources
                .iter()
                .map(|src| source_to_object(src, toolchain.extensions.object))
                .collect();
            edge.bind("ldflags", &ldflags);
            edge.bind("solibs", &toolchain.system_libs);
            edge.bind("libs", &libs);
            edge.implicit_inputs = libs;
            edge
        })
        .collect()
}
