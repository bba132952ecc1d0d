//! GCC/Clang style toolchains for Linux, macOS and AIX.

use super::platform::Platform;
use super::types::{BuildMode, Extensions, ToolchainConfig, ToolchainOverrides, split_flags};

const ABI_FLAGS: &[&str] = &[
    "-D_FILE_OFFSET_BITS=64",
    "-D__STDC_CONSTANT_MACROS",
    "-D__STDC_FORMAT_MACROS",
    "-pthread",
    "-pipe",
    "-fno-exceptions",
];

const CXX_FLAGS: &[&str] = &["-std=c++14", "-Wno-c++11-narrowing"];

const LINUX_LIBS: &[&str] = &["-lc", "-lgcc_s", "-lm", "-lpthread", "-lrt", "-latomic"];

const MAC_FRAMEWORKS: &[&str] = &["AppKit", "CoreFoundation", "Foundation", "Security"];

pub(super) fn resolve(
    platform: Platform,
    mode: BuildMode,
    overrides: &ToolchainOverrides,
    template: String,
) -> ToolchainConfig {
    let (default_cc, default_ar) = match platform {
        Platform::Aix => ("gcc", "ar -X64"),
        _ => ("cc", "ar"),
    };

    let cc = overrides.cc.clone().unwrap_or_else(|| default_cc.to_string());
    let cxx = overrides.cxx.clone().unwrap_or_else(|| "c++".to_string());
    let ld = overrides.ld.clone().unwrap_or_else(|| cxx.clone());
    let ar = overrides.ar.clone().unwrap_or_else(|| default_ar.to_string());

    // Caller flags first, platform defaults after.
    let mut cflags = split_flags(overrides.cflags.as_deref());
    if platform == Platform::Mac {
        cflags.push("-Wno-deprecated-declarations".to_string());
    }
    match mode {
        BuildMode::Debug => cflags.extend(["-O0", "-g"].map(String::from)),
        BuildMode::Release => cflags.extend(["-O2", "-g0"].map(String::from)),
    }
    cflags.extend(ABI_FLAGS.iter().map(|f| f.to_string()));

    let mut cflags_cc = split_flags(overrides.cflags_cc.as_deref());
    cflags_cc.extend(CXX_FLAGS.iter().map(|f| f.to_string()));

    let mut ldflags = split_flags(overrides.ldflags.as_deref());
    let arflags = split_flags(overrides.arflags.as_deref());

    let system_libs = match platform {
        Platform::Mac => MAC_FRAMEWORKS
            .iter()
            .flat_map(|fw| ["-framework".to_string(), fw.to_string()])
            .collect(),
        Platform::Aix => {
            cflags.push("-maix64".to_string());
            ldflags.extend(["-maix64", "-Wl,-bbigtoc", "-pthread"].map(String::from));
            vec!["-lrt".to_string()]
        }
        _ => LINUX_LIBS.iter().map(|l| l.to_string()).collect(),
    };

    ToolchainConfig {
        platform,
        mode,
        cc,
        cxx,
        ld,
        ar,
        cflags,
        cflags_cc,
        ldflags,
        arflags,
        system_libs,
        extensions: Extensions {
            object: ".o",
            static_library: ".a",
            executable: "",
        },
        template,
    }
}
