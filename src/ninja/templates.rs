//! Built-in rule templates, one per platform.

use crate::error::{GenError, Result};
use crate::toolchain::Platform;
use std::fs;
use std::path::Path;

const LINUX: &str = include_str!("templates/build.ninja.template");
const MAC: &str = include_str!("templates/build_mac.ninja.template");
const AIX: &str = include_str!("templates/build_aix.ninja.template");
const WINDOWS: &str = include_str!("templates/build_vs.ninja.template");

pub fn builtin(platform: Platform) -> &'static str {
    match platform {
        Platform::Linux => LINUX,
        Platform::Mac => MAC,
        Platform::Aix => AIX,
        Platform::Windows => WINDOWS,
    }
}

/// Rule template for `platform`, read from `template_dir` when one is given.
pub fn load(platform: Platform, template_dir: Option<&Path>) -> Result<String> {
    let Some(dir) = template_dir else {
        return Ok(builtin(platform).to_string());
    };

    let path = dir.join(platform.template_file_name());
    if !path.is_file() {
        return Err(GenError::config(format!(
            "rule template for {} not found at {}",
            platform,
            path.display()
        )));
    }
    fs::read_to_string(&path).map_err(|e| GenError::io(path, e))
}
