//! # bootninja - Ninja bootstrap generator
//!
//! bootninja turns a declarative description of C/C++ static libraries and
//! executables into a complete `build.ninja`, so a tool can be built from
//! source with nothing but a compiler and `ninja`.
//!
//! ## Pipeline
//!
//! 1. [`config`] loads a `bootninja.toml` manifest and assembles the
//!    targets for one platform.
//! 2. [`toolchain`] resolves compiler, linker, archiver and default flags.
//! 3. [`ninja`] emits compile, archive and link edges and composes the file.
//!
//! ```rust
//! use bootninja::generate::{GenerateRequest, render};
//! use bootninja::target::{TargetKind, TargetSet, TargetSpec};
//! use bootninja::toolchain::{BuildMode, Platform, ToolchainOverrides};
//!
//! let mut targets = TargetSet::default();
//! targets.insert(TargetSpec::new("core", TargetKind::StaticLibrary).with_sources(["a.cc", "b.c"]));
//! targets.insert(
//!     TargetSpec::new("app", TargetKind::Executable)
//!         .with_sources(["main.cc"])
//!         .with_libs(["core"]),
//! );
//!
//! let generated = render(&GenerateRequest {
//!     targets,
//!     platform: Platform::Linux,
//!     mode: BuildMode::Release,
//!     overrides: ToolchainOverrides::default(),
//!     verify_libs: true,
//! })
//! .unwrap();
//! assert!(generated.text.contains("build core.a: alink_thin a.o b.o"));
//! ```

/// Generated buildflag headers.
pub mod buildflags;

/// CLI command handlers used by the `bootninja` binary.
pub mod commands;

/// Manifest file parsing (`bootninja.toml`).
pub mod config;

/// Error taxonomy shared by every stage.
pub mod error;

/// Invocation of the external ninja executor.
pub mod executor;

/// The end-to-end generation pipeline.
pub mod generate;

/// Build edge emission and build file composition.
pub mod ninja;

/// Target descriptions.
pub mod target;

/// Toolchain selection per platform and mode.
pub mod toolchain;

/// Terminal UI utilities (status lines, tables).
pub mod ui;

/// Pre-emission checks on assembled targets.
pub mod validate;

pub use error::{GenError, Result};
