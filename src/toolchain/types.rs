use super::platform::{Platform, WindowsArch};
use serde::Deserialize;
use std::path::PathBuf;

/// Optimization profile of a generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuildMode {
    Debug,
    #[default]
    Release,
}

impl BuildMode {
    pub fn from_debug_flag(debug: bool) -> Self {
        if debug {
            BuildMode::Debug
        } else {
            BuildMode::Release
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BuildMode::Debug => "debug",
            BuildMode::Release => "release",
        }
    }
}

/// Caller-supplied replacements for the platform's default toolchain.
///
/// Every field is independent; `None` keeps the platform convention. Flag
/// fields are free-form strings split on whitespace when resolved.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ToolchainOverrides {
    pub cc: Option<String>,
    pub cxx: Option<String>,
    pub ld: Option<String>,
    pub ar: Option<String>,
    pub cflags: Option<String>,
    pub cflags_cc: Option<String>,
    pub ldflags: Option<String>,
    pub arflags: Option<String>,
    /// Directory holding `cl.exe`, `link.exe` and `lib.exe` on Windows.
    pub tool_dir: Option<PathBuf>,
    /// Directory to load rule templates from instead of the built-in ones.
    pub template_dir: Option<PathBuf>,
    /// Target architecture for the Windows linker. Never read from a
    /// manifest; set at the process boundary.
    #[serde(skip)]
    pub windows_arch: Option<WindowsArch>,
}

impl ToolchainOverrides {
    /// Read overrides from the process environment.
    ///
    /// This is the only place the crate consults environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            cc: get("CC"),
            cxx: get("CXX"),
            ld: get("LD"),
            ar: get("AR"),
            cflags: get("CFLAGS"),
            cflags_cc: get("CXXFLAGS"),
            ldflags: get("LDFLAGS"),
            arflags: get("ARFLAGS"),
            tool_dir: None,
            template_dir: None,
            // Set by vcvarsall.bat
            windows_arch: get("Platform").and_then(|v| v.parse().ok()),
        }
    }

    /// Layer `self` over `base`: any value present in `self` wins.
    pub fn or(self, base: ToolchainOverrides) -> ToolchainOverrides {
        ToolchainOverrides {
            cc: self.cc.or(base.cc),
            cxx: self.cxx.or(base.cxx),
            ld: self.ld.or(base.ld),
            ar: self.ar.or(base.ar),
            cflags: self.cflags.or(base.cflags),
            cflags_cc: self.cflags_cc.or(base.cflags_cc),
            ldflags: self.ldflags.or(base.ldflags),
            arflags: self.arflags.or(base.arflags),
            tool_dir: self.tool_dir.or(base.tool_dir),
            template_dir: self.template_dir.or(base.template_dir),
            windows_arch: self.windows_arch.or(base.windows_arch),
        }
    }
}

/// File-name conventions of a platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extensions {
    pub object: &'static str,
    pub static_library: &'static str,
    pub executable: &'static str,
}

/// A fully resolved toolchain for one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolchainConfig {
    pub platform: Platform,
    pub mode: BuildMode,

    /// C compiler command
    pub cc: String,
    /// C++ compiler command
    pub cxx: String,
    /// Linker command (usually the C++ driver on POSIX)
    pub ld: String,
    /// Archiver command, possibly with leading arguments (`ar -X64`)
    pub ar: String,

    pub cflags: Vec<String>,
    pub cflags_cc: Vec<String>,
    pub ldflags: Vec<String>,
    pub arflags: Vec<String>,

    /// Frameworks, import libraries or `-l` libraries passed at link time.
    pub system_libs: Vec<String>,

    pub extensions: Extensions,

    /// Rule declarations for this platform.
    pub template: String,
}

impl ToolchainConfig {
    /// Variable bindings written at the top of the build file.
    pub fn header_bindings(&self) -> [(&'static str, &str); 4] {
        [
            ("cc", self.cc.as_str()),
            ("cxx", self.cxx.as_str()),
            ("ar", self.ar.as_str()),
            ("ld", self.ld.as_str()),
        ]
    }
}

pub(crate) fn split_flags(flags: Option<&str>) -> Vec<String> {
    flags
        .map(|f| f.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_from_lookup_reads_conventional_names() {
        let env: HashMap<&str, &str> = [
            ("CC", "clang"),
            ("CXX", "clang++"),
            ("CXXFLAGS", "-Wall -Wextra"),
            ("Platform", "x86"),
            ("LD", "  "),
        ]
        .into_iter()
        .collect();

        let overrides = ToolchainOverrides::from_lookup(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(overrides.cc.as_deref(), Some("clang"));
        assert_eq!(overrides.cxx.as_deref(), Some("clang++"));
        assert_eq!(overrides.cflags_cc.as_deref(), Some("-Wall -Wextra"));
        assert_eq!(overrides.windows_arch, Some(WindowsArch::X86));
        // Blank values count as unset.
        assert_eq!(overrides.ld, None);
        assert_eq!(overrides.ar, None);
    }

    #[test]
    fn test_unrecognized_arch_is_ignored() {
        let overrides = ToolchainOverrides::from_lookup(|k| {
            (k == "Platform").then(|| "arm64".to_string())
        });
        assert_eq!(overrides.windows_arch, None);
    }

    #[test]
    fn test_or_prefers_self() {
        let cli = ToolchainOverrides {
            cc: Some("gcc-13".into()),
            ..Default::default()
        };
        let manifest = ToolchainOverrides {
            cc: Some("cc".into()),
            ar: Some("llvm-ar".into()),
            ..Default::default()
        };
        let merged = cli.or(manifest);
        assert_eq!(merged.cc.as_deref(), Some("gcc-13"));
        assert_eq!(merged.ar.as_deref(), Some("llvm-ar"));
    }

    #[test]
    fn test_split_flags() {
        assert_eq!(split_flags(Some(" -O1  -g ")), vec!["-O1", "-g"]);
        assert!(split_flags(None).is_empty());
    }
}
