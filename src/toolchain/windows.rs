//! MSVC toolchain (cl.exe / link.exe / lib.exe).

use super::platform::{Platform, WindowsArch};
use super::types::{BuildMode, Extensions, ToolchainConfig, ToolchainOverrides, split_flags};
use std::path::Path;

const COMMON_CFLAGS: &[&str] = &[
    "/FS",
    "/Gy",
    "/W3",
    "/wd4244",
    "/Zi",
    "/DWIN32_LEAN_AND_MEAN",
    "/DNOMINMAX",
    "/D_CRT_SECURE_NO_DEPRECATE",
    "/D_SCL_SECURE_NO_DEPRECATE",
    "/D_WIN32_WINNT=0x0A00",
    "/DWINVER=0x0A00",
    "/DUNICODE",
    "/D_UNICODE",
];

// No RTTI, no exceptions.
const CXX_FLAGS: &[&str] = &["/GR-", "/D_HAS_EXCEPTIONS=0"];

const RELEASE_CFLAGS: &[&str] = &["/Ox", "/DNDEBUG", "/GL"];
const RELEASE_LDFLAGS: &[&str] = &["/LTCG", "/OPT:REF", "/OPT:ICF"];
const RELEASE_ARFLAGS: &[&str] = &["/LTCG"];

const SYSTEM_LIBS: &[&str] = &[
    "advapi32.lib",
    "dbghelp.lib",
    "kernel32.lib",
    "ole32.lib",
    "shell32.lib",
    "user32.lib",
    "userenv.lib",
    "version.lib",
    "winmm.lib",
    "ws2_32.lib",
    "Shlwapi.lib",
];

fn tool_path(tool_dir: Option<&Path>, exe: &str) -> String {
    match tool_dir {
        Some(dir) => dir.join(exe).to_string_lossy().to_string(),
        None => exe.to_string(),
    }
}

fn to_strings(flags: &'static [&'static str]) -> impl Iterator<Item = String> {
    flags.iter().map(|f| f.to_string())
}

pub(super) fn resolve(
    mode: BuildMode,
    overrides: &ToolchainOverrides,
    template: String,
) -> ToolchainConfig {
    let tool_dir = overrides.tool_dir.as_deref();
    let cc = overrides
        .cc
        .clone()
        .unwrap_or_else(|| tool_path(tool_dir, "cl.exe"));
    let cxx = overrides
        .cxx
        .clone()
        .unwrap_or_else(|| tool_path(tool_dir, "cl.exe"));
    let ld = overrides
        .ld
        .clone()
        .unwrap_or_else(|| tool_path(tool_dir, "link.exe"));
    let ar = overrides
        .ar
        .clone()
        .unwrap_or_else(|| tool_path(tool_dir, "lib.exe"));

    let mut cflags = split_flags(overrides.cflags.as_deref());
    let mut ldflags = split_flags(overrides.ldflags.as_deref());
    let mut arflags = split_flags(overrides.arflags.as_deref());
    if mode == BuildMode::Release {
        cflags.extend(to_strings(RELEASE_CFLAGS));
        ldflags.extend(to_strings(RELEASE_LDFLAGS));
        arflags.extend(to_strings(RELEASE_ARFLAGS));
    }
    cflags.extend(to_strings(COMMON_CFLAGS));

    let mut cflags_cc = split_flags(overrides.cflags_cc.as_deref());
    cflags_cc.extend(to_strings(CXX_FLAGS));

    let arch = overrides.windows_arch.unwrap_or_else(WindowsArch::host);
    ldflags.push(arch.machine_flag().to_string());

    ToolchainConfig {
        platform: Platform::Windows,
        mode,
        cc,
        cxx,
        ld,
        ar,
        cflags,
        cflags_cc,
        ldflags,
        arflags,
        system_libs: to_strings(SYSTEM_LIBS).collect(),
        extensions: Extensions {
            object: ".obj",
            static_library: ".lib",
            executable: ".exe",
        },
        template,
    }
}
