//! # bootninja CLI Entry Point
//!
//! Parses arguments with clap, sets up logging and routes to the handlers in
//! [`bootninja::commands`].
//!
//! ## Commands
//!
//! - `gen`: write `build.ninja` and generated headers into the build dir
//! - `build`: `gen`, then run ninja, optionally copying the result out
//! - `targets`: list the targets assembled for a platform
//! - `toolchain`: show the resolved compiler, linker and flags

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use bootninja::GenError;
use bootninja::commands::{self, GenArgs};
use bootninja::config::DEFAULT_MANIFEST;
use bootninja::ui;

#[cfg(windows)]
#[link(name = "kernel32")]
unsafe extern "system" {
    fn SetConsoleOutputCP(wCodePageID: u32) -> i32;
}

#[cfg(windows)]
fn enable_utf8_console() {
    unsafe {
        SetConsoleOutputCP(65001);
    }
}

#[cfg(not(windows))]
fn enable_utf8_console() {}

#[derive(Parser)]
#[command(name = "bootninja")]
#[command(about = "Generate a ninja build file for bootstrapping C/C++ tools", version = env!("CARGO_PKG_VERSION"))]
#[command(propagate_version = true)]
struct Cli {
    /// Debug logging (BOOTNINJA_LOG or RUST_LOG take precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate build.ninja from a manifest
    Gen(GenArgs),
    /// Generate, then build with ninja
    Build {
        #[command(flatten)]
        gen_args: GenArgs,
        /// Copy the first built target here afterwards
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Targets to build [default: manifest `targets`, else everything]
        targets: Vec<String>,
    },
    /// List the targets assembled for a platform
    Targets {
        #[arg(short, long, default_value = DEFAULT_MANIFEST)]
        manifest: PathBuf,
        /// Target platform [default: host]
        #[arg(long)]
        platform: Option<String>,
    },
    /// Show the resolved toolchain
    Toolchain(GenArgs),
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        "bootninja=debug"
    } else {
        "bootninja=warn"
    };
    let filter = EnvFilter::try_from_env("BOOTNINJA_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Gen(args) => commands::generate::handle_gen(args).map(|_| ()),
        Commands::Build {
            gen_args,
            output,
            targets,
        } => commands::generate::handle_build(gen_args, targets, output.as_deref(), cli.verbose),
        Commands::Targets { manifest, platform } => {
            commands::target::handle_targets(manifest, platform.as_deref())
        }
        Commands::Toolchain(args) => commands::toolchain::handle_toolchain(args),
    }
}

fn main() {
    enable_utf8_console();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(&cli) {
        ui::fail(format!("{:#}", err));
        // A failed ninja run keeps ninja's own exit code.
        let code = err
            .chain()
            .find_map(|cause| cause.downcast_ref::<GenError>())
            .map_or(1, GenError::exit_code);
        std::process::exit(code);
    }
}
