//! CLI command handlers
//!
//! Each subcommand resolves its inputs at the process boundary (arguments,
//! environment, manifest) and hands fully resolved values to the library.

pub mod generate;
pub mod target;
pub mod toolchain;

use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};

use crate::config::{self, DEFAULT_MANIFEST, Manifest};
use crate::generate::ManifestRun;
use crate::toolchain::{BuildMode, Platform, ToolchainOverrides};

/// Arguments shared by `gen` and `build`.
#[derive(Args, Debug, Clone)]
pub struct GenArgs {
    /// Manifest describing the targets
    #[arg(short, long, default_value = DEFAULT_MANIFEST)]
    pub manifest: PathBuf,
    /// Directory receiving build.ninja and all build outputs
    #[arg(short = 'C', long, default_value = "out")]
    pub out_dir: PathBuf,
    /// Target platform (windows, linux, mac, aix) [default: host]
    #[arg(long)]
    pub platform: Option<String>,
    /// Debug build (no optimization, full symbols). Defaults to release
    #[arg(short, long)]
    pub debug: bool,
    /// Do not check that executables only link declared libraries
    #[arg(long)]
    pub lenient_libs: bool,
    /// C compiler (overrides CC)
    #[arg(long)]
    pub cc: Option<String>,
    /// C++ compiler (overrides CXX)
    #[arg(long)]
    pub cxx: Option<String>,
    /// Linker (overrides LD)
    #[arg(long)]
    pub ld: Option<String>,
    /// Archiver (overrides AR)
    #[arg(long)]
    pub ar: Option<String>,
}

impl GenArgs {
    fn cli_overrides(&self) -> ToolchainOverrides {
        ToolchainOverrides {
            cc: self.cc.clone(),
            cxx: self.cxx.clone(),
            ld: self.ld.clone(),
            ar: self.ar.clone(),
            ..Default::default()
        }
    }

    /// Resolve platform, manifest and overrides into one run description.
    ///
    /// The platform is parsed before anything is read so an unknown
    /// identifier fails without side effects.
    pub fn resolve(&self) -> Result<(Manifest, ManifestRun)> {
        let platform = parse_platform(self.platform.as_deref())?;
        let manifest = load_manifest(&self.manifest)?;

        let run = ManifestRun {
            manifest_dir: manifest_dir(&self.manifest),
            out_dir: self.out_dir.clone(),
            platform,
            mode: BuildMode::from_debug_flag(self.debug),
            // Command line beats environment; the manifest comes last.
            overrides: self.cli_overrides().or(ToolchainOverrides::from_env()),
            verify_libs: self.lenient_libs.then_some(false),
        };
        Ok((manifest, run))
    }
}

pub fn parse_platform(platform: Option<&str>) -> Result<Platform> {
    let platform = match platform {
        Some(name) => name.parse::<Platform>()?,
        None => Platform::host()?,
    };
    Ok(platform)
}

pub fn load_manifest(path: &Path) -> Result<Manifest> {
    if !path.exists() {
        return Err(anyhow::anyhow!(
            "{} not found.\n\n💡 Tip: pass --manifest <path> or run from the directory containing it.",
            path.display()
        ));
    }
    config::load_manifest(path).with_context(|| format!("Failed to load {}", path.display()))
}

fn manifest_dir(manifest: &Path) -> PathBuf {
    match manifest.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_dir() {
        assert_eq!(manifest_dir(Path::new("bootninja.toml")), PathBuf::from("."));
        assert_eq!(
            manifest_dir(Path::new("tools/gn/bootninja.toml")),
            PathBuf::from("tools/gn")
        );
    }

    #[test]
    fn test_parse_platform_error_is_configuration() {
        let err = parse_platform(Some("plan9")).unwrap_err();
        let gen_err = err.downcast_ref::<crate::GenError>().unwrap();
        assert!(matches!(gen_err, crate::GenError::Configuration(_)));
    }

    #[test]
    fn test_missing_manifest() {
        let err = load_manifest(Path::new("definitely/not/here.toml")).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }
}
