//! `gen` and `build` command handlers.

use anyhow::{Context, Result};
use colored::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use super::GenArgs;
use crate::config::Manifest;
use crate::executor::NinjaInvocation;
use crate::generate::{self, BUILD_FILE, Generated, ManifestRun};
use crate::ninja::EdgeKind;
use crate::ui;

/// Handle `bootninja gen`.
pub fn handle_gen(args: &GenArgs) -> Result<Generated> {
    let (manifest, run) = args.resolve()?;
    run_gen(&manifest, &run)
}

fn run_gen(manifest: &Manifest, run: &ManifestRun) -> Result<Generated> {
    let start = Instant::now();
    let generated = generate::generate_from_manifest(manifest, run)?;

    ui::success(format!(
        "Generated {} ({} edges, {} {}) in {:.2?}",
        run.out_dir.join(BUILD_FILE).display(),
        generated.edges.len(),
        run.platform.to_string().cyan(),
        run.mode.as_str(),
        start.elapsed()
    ));
    Ok(generated)
}

/// Handle `bootninja build`: generate, run ninja, optionally copy the result.
pub fn handle_build(
    args: &GenArgs,
    targets: &[String],
    output: Option<&Path>,
    verbose: bool,
) -> Result<()> {
    let (manifest, run) = args.resolve()?;
    let generated = run_gen(&manifest, &run)?;

    let targets = if targets.is_empty() {
        manifest.generation.targets.clone()
    } else {
        targets.to_vec()
    };

    let mut ninja = NinjaInvocation::new(&run.out_dir, targets.clone());
    ninja.verbose = verbose;
    println!("{} Running ninja...", "▶".green());
    ninja.run()?;

    if let Some(dest) = output {
        let built = primary_output(&generated, &targets).context(
            "--output needs a target to copy; name one or declare an executable",
        )?;
        let src = run.out_dir.join(&built);
        copy_output(&src, dest)?;
        ui::success(format!("Copied {} to {}", src.display(), dest.display()));
    }

    Ok(())
}

/// First requested target, or the first linked executable.
fn primary_output(generated: &Generated, targets: &[String]) -> Option<PathBuf> {
    if let Some(first) = targets.first() {
        return Some(PathBuf::from(first));
    }
    generated
        .edges
        .iter()
        .find(|e| e.kind == EdgeKind::Link)
        .map(|e| PathBuf::from(&e.output))
}

fn copy_output(src: &Path, dest: &Path) -> Result<()> {
    if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    // fs::copy keeps the permission bits, so the copy stays executable.
    fs::copy(src, dest)
        .with_context(|| format!("Failed to copy {} to {}", src.display(), dest.display()))?;
    Ok(())
}
