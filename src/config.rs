//! Manifest file parsing (`bootninja.toml`).
//!
//! A manifest is plain data: generation-wide settings, toolchain overrides,
//! and the static libraries and executables to build. Platform differences
//! are expressed as `platform.<key>` overlays appended onto the base lists,
//! so one generic routine ([`Manifest::assemble`]) produces the
//! [`TargetSet`] for any platform.

use crate::error::{GenError, Result};
use crate::target::{TargetKind, TargetSet, TargetSpec, Tool};
use crate::toolchain::{Platform, ToolchainOverrides};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_MANIFEST: &str = "bootninja.toml";

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(default)]
    pub generation: GenerationConfig,
    #[serde(default)]
    pub toolchain: ToolchainOverrides,
    #[serde(default)]
    pub static_libraries: BTreeMap<String, TargetConfig>,
    #[serde(default)]
    pub executables: BTreeMap<String, TargetConfig>,
    #[serde(default)]
    pub buildflag_headers: Vec<BuildflagHeaderConfig>,
    pub build_date: Option<BuildDateConfig>,
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
pub struct GenerationConfig {
    pub source_root: Option<PathBuf>,
    #[serde(default)]
    pub include_dirs: Vec<String>,
    #[serde(default)]
    pub cflags: Vec<String>,
    #[serde(default)]
    pub cflags_cc: Vec<String>,
    #[serde(default)]
    pub ldflags: Vec<String>,
    /// Targets handed to ninja when none are given on the command line.
    #[serde(default)]
    pub targets: Vec<String>,
    /// Reject executables that name undeclared libraries.
    #[serde(default = "default_true")]
    pub verify_libs: bool,
    #[serde(default)]
    pub platform: BTreeMap<String, GenerationOverlay>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            source_root: None,
            include_dirs: Vec::new(),
            cflags: Vec::new(),
            cflags_cc: Vec::new(),
            ldflags: Vec::new(),
            targets: Vec::new(),
            verify_libs: true,
            platform: BTreeMap::new(),
        }
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct GenerationOverlay {
    #[serde(default)]
    pub include_dirs: Vec<String>,
    #[serde(default)]
    pub cflags: Vec<String>,
    #[serde(default)]
    pub cflags_cc: Vec<String>,
    #[serde(default)]
    pub ldflags: Vec<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct TargetConfig {
    pub tool: Option<Tool>,
    #[serde(default)]
    pub sources: Vec<String>,
    #[serde(default)]
    pub include_dirs: Vec<String>,
    #[serde(default)]
    pub cflags: Vec<String>,
    #[serde(default)]
    pub cflags_cc: Vec<String>,
    #[serde(default)]
    pub libs: Vec<String>,
    /// Append every static library of the run after `libs`.
    #[serde(default)]
    pub link_all_libraries: bool,
    /// Restrict the target to these platform keys.
    pub only: Option<Vec<String>>,
    #[serde(default)]
    pub platform: BTreeMap<String, TargetOverlay>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct TargetOverlay {
    #[serde(default)]
    pub sources: Vec<String>,
    #[serde(default)]
    pub include_dirs: Vec<String>,
    #[serde(default)]
    pub cflags: Vec<String>,
    #[serde(default)]
    pub cflags_cc: Vec<String>,
    #[serde(default)]
    pub libs: Vec<String>,
}

/// Value of a build flag; booleans become `1`/`0`.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum FlagValue {
    Bool(bool),
    Int(i64),
    Text(String),
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
pub struct BuildflagHeaderConfig {
    /// Path of the header relative to the generated-sources directory.
    pub header: String,
    #[serde(default)]
    pub flags: BTreeMap<String, FlagValue>,
    #[serde(default)]
    pub platform: BTreeMap<String, BTreeMap<String, FlagValue>>,
}

/// `[build_date]`: a header defining `BUILD_DATE`.
///
/// The date is never read from the clock, so regenerating with the same
/// manifest produces the same header.
#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct BuildDateConfig {
    #[serde(default = "default_build_date_header")]
    pub header: String,
    /// `Mmm dd yyyy hh:mm:ss`, the layout of the C `__DATE__ __TIME__` pair.
    #[serde(default = "default_build_date")]
    pub date: String,
}

pub const DEFAULT_BUILD_DATE_HEADER: &str = "base/generated_build_date.h";
pub const DEFAULT_BUILD_DATE: &str = "Jan 01 2000 00:00:00";

fn default_build_date_header() -> String {
    DEFAULT_BUILD_DATE_HEADER.to_string()
}

fn default_build_date() -> String {
    DEFAULT_BUILD_DATE.to_string()
}

fn default_true() -> bool {
    true
}

/// Load and parse a manifest file.
pub fn load_manifest(path: &Path) -> Result<Manifest> {
    let text = fs::read_to_string(path).map_err(|e| GenError::io(path, e))?;
    parse_manifest(&text, path)
}

pub fn parse_manifest(text: &str, path: &Path) -> Result<Manifest> {
    toml::from_str(text).map_err(|source| GenError::Manifest {
        path: path.to_path_buf(),
        source,
    })
}

/// Overlay tables whose key applies to `platform`, in key order.
///
/// Unknown keys are rejected so a typo cannot silently drop sources.
pub(crate) fn overlays_for<'a, T>(
    overlays: &'a BTreeMap<String, T>,
    platform: Platform,
    owner: &str,
) -> Result<Vec<&'a T>> {
    let mut selected = Vec::new();
    for (key, overlay) in overlays {
        check_platform_key(key, owner)?;
        if platform.matches_key(key) {
            selected.push(overlay);
        }
    }
    Ok(selected)
}

fn check_platform_key(key: &str, owner: &str) -> Result<()> {
    if key.eq_ignore_ascii_case("posix") || key.parse::<Platform>().is_ok() {
        Ok(())
    } else {
        Err(GenError::config(format!(
            "{}: unrecognized platform key '{}'",
            owner, key
        )))
    }
}

impl Manifest {
    /// Build the immutable target set for `platform`.
    pub fn assemble(&self, platform: Platform) -> Result<TargetSet> {
        let generation = &self.generation;
        let mut set = TargetSet {
            source_root: generation.source_root.clone(),
            include_dirs: generation.include_dirs.clone(),
            cflags: generation.cflags.clone(),
            cflags_cc: generation.cflags_cc.clone(),
            ldflags: generation.ldflags.clone(),
            ..Default::default()
        };
        for overlay in overlays_for(&generation.platform, platform, "[generation]")? {
            set.include_dirs.extend(overlay.include_dirs.iter().cloned());
            set.cflags.extend(overlay.cflags.iter().cloned());
            set.cflags_cc.extend(overlay.cflags_cc.iter().cloned());
            set.ldflags.extend(overlay.ldflags.iter().cloned());
        }

        for (name, cfg) in &self.static_libraries {
            if let Some(lib) = cfg.assemble(name, TargetKind::StaticLibrary, platform)? {
                if !lib.libs.is_empty() || cfg.link_all_libraries {
                    return Err(GenError::config(format!(
                        "static library '{}' cannot link other libraries",
                        name
                    )));
                }
                set.insert(lib);
            }
        }

        let all_libraries: Vec<String> = set.static_libraries.keys().cloned().collect();
        for (name, cfg) in &self.executables {
            if let Some(mut exe) = cfg.assemble(name, TargetKind::Executable, platform)? {
                if cfg.link_all_libraries {
                    exe.libs.extend(all_libraries.iter().cloned());
                }
                set.insert(exe);
            }
        }

        Ok(set)
    }

    /// Toolchain overrides declared in the manifest. Relative `tool_dir`
    /// and `template_dir` entries are anchored at `manifest_dir`.
    pub fn toolchain_overrides(&self, manifest_dir: &Path) -> ToolchainOverrides {
        let mut overrides = self.toolchain.clone();
        for dir in [&mut overrides.tool_dir, &mut overrides.template_dir]
            .into_iter()
            .flatten()
        {
            if is_manifest_relative(dir) {
                let joined = manifest_dir.join(&*dir);
                *dir = std::path::absolute(&joined).unwrap_or(joined);
            }
        }
        overrides
    }
}

/// Relative on every platform. `C:/VC/bin` is relative to a unix `Path` but
/// names a Windows tool directory, so drive and root prefixes are kept as is.
fn is_manifest_relative(path: &Path) -> bool {
    let text = path.to_string_lossy();
    let bytes = text.as_bytes();
    let drive = bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':';
    path.is_relative() && !drive && !text.starts_with(['/', '\\'])
}

impl TargetConfig {
    fn assemble(
        &self,
        name: &str,
        kind: TargetKind,
        platform: Platform,
    ) -> Result<Option<TargetSpec>> {
        let owner = format!("{} '{}'", kind, name);

        if let Some(only) = &self.only {
            for key in only {
                check_platform_key(key, &owner)?;
            }
            if !only.iter().any(|key| platform.matches_key(key)) {
                return Ok(None);
            }
        }

        let mut target = TargetSpec::new(name, kind);
        target.tool = self.tool;
        target.sources = self.sources.clone();
        target.include_dirs = self.include_dirs.clone();
        target.cflags = self.cflags.clone();
        target.cflags_cc = self.cflags_cc.clone();
        target.libs = self.libs.clone();

        for overlay in overlays_for(&self.platform, platform, &owner)? {
            target.sources.extend(overlay.sources.iter().cloned());
            target.include_dirs.extend(overlay.include_dirs.iter().cloned());
            target.cflags.extend(overlay.cflags.iter().cloned());
            target.cflags_cc.extend(overlay.cflags_cc.iter().cloned());
            target.libs.extend(overlay.libs.iter().cloned());
        }

        Ok(Some(target))
    }
}
