//! Toolchain selection
//!
//! Maps a platform, a build mode and caller overrides to one immutable
//! [`ToolchainConfig`]. Resolution is a pure function of its inputs: the
//! environment is read only by [`ToolchainOverrides::from_env`] at the
//! process boundary.

pub mod platform;
pub mod types;

mod posix;
mod windows;

pub use platform::{Platform, WindowsArch};
pub use types::{BuildMode, Extensions, ToolchainConfig, ToolchainOverrides};

use crate::error::Result;
use crate::ninja::templates;
use tracing::debug;

/// Resolve the toolchain for `platform` in `mode`.
pub fn resolve(
    platform: Platform,
    mode: BuildMode,
    overrides: &ToolchainOverrides,
) -> Result<ToolchainConfig> {
    let template = templates::load(platform, overrides.template_dir.as_deref())?;

    let config = match platform {
        Platform::Windows => windows::resolve(mode, overrides, template),
        Platform::Linux | Platform::Mac | Platform::Aix => {
            posix::resolve(platform, mode, overrides, template)
        }
    };

    debug!(
        platform = %platform,
        mode = mode.as_str(),
        cc = %config.cc,
        cxx = %config.cxx,
        ld = %config.ld,
        ar = %config.ar,
        "resolved toolchain"
    );
    Ok(config)
}
