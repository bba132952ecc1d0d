//! Integration tests for the generation pipeline
//!
//! These drive the library end to end: targets in, `build.ninja` text (and
//! files on disk) out.

use std::fs;
use std::path::Path;

use bootninja::GenError;
use bootninja::config::parse_manifest;
use bootninja::generate::{self, GEN_DIR, GenerateRequest, ManifestRun, render};
use bootninja::ninja::EdgeKind;
use bootninja::target::{TargetKind, TargetSet, TargetSpec};
use bootninja::toolchain::{BuildMode, Platform, ToolchainOverrides};

fn core_and_app() -> TargetSet {
    let mut set = TargetSet::default();
    set.insert(TargetSpec::new("core", TargetKind::StaticLibrary).with_sources(["a.cc", "b.c"]));
    set.insert(
        TargetSpec::new("app", TargetKind::Executable)
            .with_sources(["main.cc"])
            .with_libs(["core"]),
    );
    set
}

fn request(targets: TargetSet, platform: Platform) -> GenerateRequest {
    GenerateRequest {
        targets,
        platform,
        mode: BuildMode::Release,
        overrides: ToolchainOverrides::default(),
        verify_libs: true,
    }
}

/// The `build` lines of a generated file, without their bindings.
fn build_lines(text: &str) -> Vec<&str> {
    text.lines().filter(|l| l.starts_with("build ")).collect()
}

#[test]
fn test_core_and_app_on_linux() {
    let generated = render(&request(core_and_app(), Platform::Linux)).unwrap();

    assert_eq!(
        build_lines(&generated.text),
        vec![
            "build a.o: cxx a.cc",
            "build b.o: cc b.c",
            "build main.o: cxx main.cc",
            "build core.a: alink_thin a.o b.o",
            "build app: link main.o | core.a",
        ]
    );

    let link = generated.edges.last().unwrap();
    assert_eq!(link.kind, EdgeKind::Link);
    assert_eq!(link.binding("libs"), Some("core.a"));
    assert!(link.binding("solibs").unwrap().contains("-lpthread"));

    // The cc edge carries no C++-only flags.
    let b = &generated.edges[1];
    assert!(b.binding("cflags_cc").is_none());
    assert!(b.binding("cflags").unwrap().contains("-O2"));
}

#[test]
fn test_core_and_app_on_windows() {
    let generated = render(&request(core_and_app(), Platform::Windows)).unwrap();
    let lines = build_lines(&generated.text);

    assert!(lines.contains(&"build a.obj: cxx a.cc"));
    assert!(lines.contains(&"build core.lib: alink_thin a.obj b.obj"));
    assert!(lines.contains(&"build app.exe: link main.obj | core.lib"));
    assert!(generated.text.starts_with("cc = cl.exe\n"));
}

#[test]
fn test_each_platform_uses_its_own_rules() {
    let text = |platform| render(&request(core_and_app(), platform)).unwrap().text;

    let linux = text(Platform::Linux);
    assert!(linux.contains("$ar rcsT $arflags"));

    let mac = text(Platform::Mac);
    assert!(mac.contains("libtool -static $arflags"));
    assert!(!mac.contains("rcsT"));

    let aix = text(Platform::Aix);
    assert!(aix.contains("$ar rcs $arflags"));
    assert!(!aix.contains("rcsT"));
    assert!(!aix.contains("--start-group"));

    let windows = text(Platform::Windows);
    assert!(windows.contains("ninja -t msvc -- $cc"));
    assert!(!windows.contains("-MMD"));
}

#[test]
fn test_header_then_rules_then_edges() {
    let generated = render(&request(core_and_app(), Platform::Linux)).unwrap();
    let text = &generated.text;

    let header = text.find("cc = ").unwrap();
    let rule = text.find("rule cxx").unwrap();
    let first_build = text.find("build ").unwrap();
    assert!(header < rule && rule < first_build);
    assert!(text.ends_with('\n'));
}

#[test]
fn test_one_compile_edge_per_source() {
    let mut set = TargetSet::default();
    let sources: Vec<String> = (0..25).map(|i| format!("src/file_{i}.cc")).collect();
    set.insert(TargetSpec::new("big", TargetKind::StaticLibrary).with_sources(sources.clone()));

    let generated = render(&request(set, Platform::Linux)).unwrap();
    let outputs: Vec<&str> = generated
        .edges
        .iter()
        .filter(|e| e.kind == EdgeKind::Compile)
        .map(|e| e.output.as_str())
        .collect();

    assert_eq!(outputs.len(), sources.len());
    let mut unique = outputs.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), outputs.len());
}

#[test]
fn test_output_is_deterministic() {
    let first = render(&request(core_and_app(), Platform::Mac)).unwrap();
    let second = render(&request(core_and_app(), Platform::Mac)).unwrap();
    assert_eq!(first.text, second.text);
}

#[test]
fn test_declared_order_is_kept() {
    let mut set = TargetSet::default();
    set.insert(TargetSpec::new("zeta", TargetKind::StaticLibrary).with_sources(["z.cc"]));
    set.insert(TargetSpec::new("alpha", TargetKind::StaticLibrary).with_sources(["y.cc", "x.cc"]));
    set.insert(
        TargetSpec::new("app", TargetKind::Executable)
            .with_sources(["main.cc"])
            .with_libs(["zeta", "alpha"]),
    );

    let generated = render(&request(set, Platform::Linux)).unwrap();
    let lines = build_lines(&generated.text);
    assert!(lines.contains(&"build alpha.a: alink_thin y.o x.o"));
    assert!(lines.contains(&"build app: link main.o | zeta.a alpha.a"));
}

#[test]
fn test_empty_library_still_archived() {
    let mut set = TargetSet::default();
    set.insert(TargetSpec::new("empty", TargetKind::StaticLibrary));

    let generated = render(&request(set, Platform::Linux)).unwrap();
    assert_eq!(build_lines(&generated.text), vec!["build empty.a: alink_thin"]);
}

#[test]
fn test_paths_with_spaces_are_escaped() {
    let mut set = TargetSet::default();
    set.insert(
        TargetSpec::new("core", TargetKind::StaticLibrary).with_sources(["my dir/a file.cc"]),
    );

    let generated = render(&request(set, Platform::Linux)).unwrap();
    assert!(
        generated
            .text
            .contains("build my$ dir/a$ file.o: cxx my$ dir/a$ file.cc")
    );
}

#[test]
fn test_failed_generation_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out").join("build.ninja");

    let mut set = TargetSet::default();
    set.insert(TargetSpec::new("app", TargetKind::Executable).with_libs(["missing"]));

    let err = generate::generate(&request(set, Platform::Linux), &out).unwrap_err();
    assert!(matches!(err, GenError::Configuration(_)));
    assert!(!out.exists());
}

#[test]
fn test_generate_from_manifest_writes_files() {
    let manifest = parse_manifest(
        r#"
[generation]
source_root = "src"

[static_libraries.base]
sources = ["base/files.cc", "base/values.cc"]

[static_libraries.base.platform.linux]
sources = ["base/posix.cc"]

[executables.gn]
sources = ["gn/main.cc"]
link_all_libraries = true

[[buildflag_headers]]
header = "base/debug/debugging_buildflags.h"
flags = { ENABLE_STACK_TRACE = false, SYSTEM_VERSION = 3 }

[build_date]
date = "Mar 07 2021 05:00:00"
"#,
        Path::new("bootninja.toml"),
    )
    .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let run = ManifestRun {
        manifest_dir: dir.path().to_path_buf(),
        out_dir: dir.path().join("out"),
        platform: Platform::Linux,
        mode: BuildMode::Debug,
        overrides: ToolchainOverrides::default(),
        verify_libs: None,
    };

    let generated = generate::generate_from_manifest(&manifest, &run).unwrap();

    let text = fs::read_to_string(run.out_dir.join("build.ninja")).unwrap();
    assert_eq!(text, generated.text);
    assert!(text.contains("base/posix.o"));
    assert!(text.contains("build gn: link gn/main.o | base.a"));
    assert!(text.contains(&format!("-I{}", GEN_DIR)));

    let header = fs::read_to_string(
        run.out_dir
            .join(GEN_DIR)
            .join("base/debug/debugging_buildflags.h"),
    )
    .unwrap();
    assert!(header.contains("#define BUILDFLAG_INTERNAL_ENABLE_STACK_TRACE() (0)"));
    assert!(header.contains("#define BUILDFLAG_INTERNAL_SYSTEM_VERSION() (3)"));

    let date = fs::read_to_string(
        run.out_dir
            .join(GEN_DIR)
            .join("base/generated_build_date.h"),
    )
    .unwrap();
    assert!(date.contains("#define BUILD_DATE \"Mar 07 2021 05:00:00\"\n"));
}

#[test]
fn test_bad_build_date_writes_nothing() {
    let manifest = parse_manifest(
        "[static_libraries.core]\nsources = [\"a.cc\"]\n\n[build_date]\ndate = \"yesterday\"\n",
        Path::new("bootninja.toml"),
    )
    .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let run = ManifestRun {
        manifest_dir: dir.path().to_path_buf(),
        out_dir: dir.path().join("out"),
        platform: Platform::Linux,
        mode: BuildMode::Release,
        overrides: ToolchainOverrides::default(),
        verify_libs: None,
    };

    assert!(generate::generate_from_manifest(&manifest, &run).is_err());
    assert!(!run.out_dir.exists());
}
