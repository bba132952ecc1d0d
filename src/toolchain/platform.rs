//! Target platform identifiers.

use crate::error::GenError;
use std::fmt;
use std::str::FromStr;

/// Platforms a build file can be generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Platform {
    Windows,
    Linux,
    Mac,
    /// AIX and other generic POSIX hosts using the AIX conventions.
    Aix,
}

impl Platform {
    pub const ALL: [Platform; 4] = [
        Platform::Windows,
        Platform::Linux,
        Platform::Mac,
        Platform::Aix,
    ];

    /// Platform of the running host.
    pub fn host() -> Result<Self, GenError> {
        if cfg!(target_os = "windows") {
            Ok(Platform::Windows)
        } else if cfg!(target_os = "linux") {
            Ok(Platform::Linux)
        } else if cfg!(target_os = "macos") {
            Ok(Platform::Mac)
        } else if cfg!(target_os = "aix") {
            Ok(Platform::Aix)
        } else {
            Err(GenError::config(format!(
                "unsupported host platform '{}', pass --platform explicitly",
                std::env::consts::OS
            )))
        }
    }

    pub fn is_posix(&self) -> bool {
        !matches!(self, Platform::Windows)
    }

    /// Canonical manifest key.
    pub fn key(&self) -> &'static str {
        match self {
            Platform::Windows => "windows",
            Platform::Linux => "linux",
            Platform::Mac => "mac",
            Platform::Aix => "aix",
        }
    }

    /// Whether a manifest overlay key applies to this platform.
    ///
    /// `posix` selects every non-Windows platform.
    pub fn matches_key(&self, key: &str) -> bool {
        match key.parse::<Platform>() {
            Ok(p) => p == *self,
            Err(_) => key.eq_ignore_ascii_case("posix") && self.is_posix(),
        }
    }

    /// File name of the platform's rule template.
    pub fn template_file_name(&self) -> &'static str {
        match self {
            Platform::Windows => "build_vs.ninja.template",
            Platform::Mac => "build_mac.ninja.template",
            Platform::Aix => "build_aix.ninja.template",
            Platform::Linux => "build.ninja.template",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Platform {
    type Err = GenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "windows" | "win" | "win32" => Ok(Platform::Windows),
            "linux" => Ok(Platform::Linux),
            "mac" | "macos" | "darwin" | "osx" => Ok(Platform::Mac),
            "aix" => Ok(Platform::Aix),
            _ => Err(GenError::config(format!("unrecognized platform '{}'", s))),
        }
    }
}

/// Architecture targeted by the Windows linker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowsArch {
    X86,
    X64,
}

impl WindowsArch {
    /// Default from the host machine when no indicator was supplied.
    pub fn host() -> Self {
        match std::env::consts::ARCH {
            "x86_64" => WindowsArch::X64,
            _ => WindowsArch::X86,
        }
    }

    pub fn machine_flag(&self) -> &'static str {
        match self {
            WindowsArch::X86 => "/MACHINE:x86",
            WindowsArch::X64 => "/MACHINE:x64",
        }
    }
}

impl FromStr for WindowsArch {
    type Err = GenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "x64" | "amd64" | "x86_64" => Ok(WindowsArch::X64),
            "x86" => Ok(WindowsArch::X86),
            _ => Err(GenError::config(format!("unrecognized architecture '{}'", s))),
        }
    }
}
