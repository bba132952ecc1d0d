//! Build file assembly and the single write at the end of a run.

use super::edge::BuildEdge;
use crate::error::{GenError, Result};
use crate::toolchain::ToolchainConfig;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;
use tracing::debug;

/// Assemble the whole build file in memory.
///
/// Layout: toolchain variables, a blank line, the platform's rule
/// declarations, then one statement per edge. The text always ends with a
/// newline.
pub fn compose(toolchain: &ToolchainConfig, edges: &[BuildEdge]) -> String {
    let mut out = String::new();

    for (name, value) in toolchain.header_bindings() {
        out.push_str(name);
        out.push_str(" = ");
        out.push_str(value);
        out.push('\n');
    }
    out.push('\n');

    out.push_str(&toolchain.template);
    if !out.ends_with('\n') {
        out.push('\n');
    }

    for edge in edges {
        out.push_str(&edge.to_string());
        out.push('\n');
    }

    out
}

/// Write `text` to `path`, creating the parent directory if needed.
///
/// The text goes to a sibling temporary file first and is renamed into
/// place, so readers never observe a half-written build file.
pub fn write_build_file(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| GenError::io(parent, e))?;
    }

    replace_via_tmp(path, |file| {
        file.write_all(text.as_bytes())?;
        file.sync_all()
    })?;

    debug!(path = %path.display(), bytes = text.len(), "wrote build file");
    Ok(())
}

/// Fill `<path>.tmp` with `fill` and rename it over `path`. The temporary
/// file is removed whenever any step fails.
fn replace_via_tmp(path: &Path, fill: impl FnOnce(&mut File) -> io::Result<()>) -> Result<()> {
    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = Path::new(&tmp_name);

    let mut file = File::create(tmp_path).map_err(|e| GenError::io(tmp_path, e))?;
    let filled = fill(&mut file);
    drop(file);
    if let Err(e) = filled {
        let _ = fs::remove_file(tmp_path);
        return Err(GenError::io(tmp_path, e));
    }

    if let Err(e) = fs::rename(tmp_path, path) {
        let _ = fs::remove_file(tmp_path);
        return Err(GenError::io(path, e));
    }
    Ok(())
}
