//! The generation pipeline: targets + toolchain → `build.ninja`.

use crate::buildflags::{self, BuildDateHeader};
use crate::config::Manifest;
use crate::error::Result;
use crate::ninja::{self, BuildEdge};
use crate::target::TargetSet;
use crate::toolchain::{self, BuildMode, Platform, ToolchainConfig, ToolchainOverrides};
use crate::validate;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const BUILD_FILE: &str = "build.ninja";
/// Generated headers live here, relative to the build directory.
pub const GEN_DIR: &str = "gen";

/// Everything one run needs, fully resolved by the caller.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub targets: TargetSet,
    pub platform: Platform,
    pub mode: BuildMode,
    pub overrides: ToolchainOverrides,
    pub verify_libs: bool,
}

/// Result of a run, kept for reporting.
#[derive(Debug, Clone)]
pub struct Generated {
    pub toolchain: ToolchainConfig,
    pub edges: Vec<BuildEdge>,
    pub text: String,
}

/// Produce the build file text without touching the filesystem (apart from
/// reading an overridden rule template).
pub fn render(request: &GenerateRequest) -> Result<Generated> {
    let toolchain = toolchain::resolve(request.platform, request.mode, &request.overrides)?;

    if request.verify_libs {
        validate::check_library_references(&request.targets)?;
    }

    let edges = ninja::emit_edges(&request.targets, &toolchain);
    debug!(
        edges = edges.len(),
        sources = request.targets.source_count(),
        "emitted build edges"
    );
    let text = ninja::compose(&toolchain, &edges);

    Ok(Generated {
        toolchain,
        edges,
        text,
    })
}

/// Render and write the build file to `out_path`.
///
/// Nothing is written unless rendering succeeds.
pub fn generate(request: &GenerateRequest, out_path: &Path) -> Result<Generated> {
    let generated = render(request)?;
    ninja::write_build_file(out_path, &generated.text)?;
    info!(
        path = %out_path.display(),
        platform = %request.platform,
        mode = request.mode.as_str(),
        "generated build file"
    );
    Ok(generated)
}

/// Options for a manifest-driven run.
#[derive(Debug, Clone)]
pub struct ManifestRun {
    /// Directory the manifest was loaded from; anchors relative paths.
    pub manifest_dir: PathBuf,
    pub out_dir: PathBuf,
    pub platform: Platform,
    pub mode: BuildMode,
    /// Overrides from the command line and environment, layered over the
    /// manifest's `[toolchain]` table.
    pub overrides: ToolchainOverrides,
    /// `Some(false)` forces permissive library references.
    pub verify_libs: Option<bool>,
}

/// Assemble a manifest for the run's platform, anchoring relative source and
/// include paths at the source root.
pub fn assemble_targets(manifest: &Manifest, run: &ManifestRun) -> Result<TargetSet> {
    let mut targets = manifest.assemble(run.platform)?;

    let root = match &targets.source_root {
        Some(root) if root.is_absolute() => root.clone(),
        Some(root) => absolute(&run.manifest_dir.join(root)),
        None => absolute(&run.manifest_dir),
    };

    let anchor = |dirs: &mut Vec<String>| {
        for dir in dirs.iter_mut() {
            if Path::new(dir.as_str()).is_relative() {
                *dir = root.join(dir.as_str()).to_string_lossy().to_string();
            }
        }
    };
    anchor(&mut targets.include_dirs);
    for lib in targets.static_libraries.values_mut() {
        anchor(&mut lib.include_dirs);
    }
    for exe in targets.executables.values_mut() {
        anchor(&mut exe.include_dirs);
    }

    if !manifest.buildflag_headers.is_empty() || manifest.build_date.is_some() {
        targets.include_dirs.insert(0, GEN_DIR.to_string());
    }
    targets.source_root = Some(root);
    Ok(targets)
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Generate `<out_dir>/build.ninja` and the generated headers from a
/// manifest.
pub fn generate_from_manifest(manifest: &Manifest, run: &ManifestRun) -> Result<Generated> {
    let targets = assemble_targets(manifest, run)?;
    let request = GenerateRequest {
        targets,
        platform: run.platform,
        mode: run.mode,
        overrides: run
            .overrides
            .clone()
            .or(manifest.toolchain_overrides(&run.manifest_dir)),
        verify_libs: run.verify_libs.unwrap_or(manifest.generation.verify_libs),
    };

    // Render first so configuration errors leave the output directory alone.
    let generated = render(&request)?;
    let build_date = manifest
        .build_date
        .as_ref()
        .map(BuildDateHeader::resolve)
        .transpose()?;

    let gen_dir = run.out_dir.join(GEN_DIR);
    let headers = buildflags::write_all(&manifest.buildflag_headers, run.platform, &gen_dir)?;
    if !headers.is_empty() {
        info!(count = headers.len(), dir = %gen_dir.display(), "wrote buildflag headers");
    }
    if let Some(header) = build_date {
        header.write(&gen_dir)?;
    }

    let out_path = run.out_dir.join(BUILD_FILE);
    ninja::write_build_file(&out_path, &generated.text)?;
    info!(
        path = %out_path.display(),
        platform = %run.platform,
        mode = run.mode.as_str(),
        edges = generated.edges.len(),
        "generated build file"
    );
    Ok(generated)
}
