//! `toolchain` command handler
//!
//! Prints the toolchain that `gen` would use, with every override source
//! already applied.

use anyhow::Result;
use colored::*;

use super::GenArgs;
use crate::toolchain::{self, BuildMode, ToolchainConfig, ToolchainOverrides};
use crate::ui;

pub fn handle_toolchain(args: &GenArgs) -> Result<()> {
    let platform = super::parse_platform(args.platform.as_deref())?;
    let mode = BuildMode::from_debug_flag(args.debug);

    // The manifest is optional here; without one only CLI and env apply.
    let manifest_overrides = if args.manifest.exists() {
        super::load_manifest(&args.manifest)?
            .toolchain_overrides(&super::manifest_dir(&args.manifest))
    } else {
        ToolchainOverrides::default()
    };
    let overrides = args
        .cli_overrides()
        .or(ToolchainOverrides::from_env())
        .or(manifest_overrides);

    let tc = toolchain::resolve(platform, mode, &overrides)?;

    println!(
        "{} Toolchain for {} ({})",
        "🔧".cyan(),
        platform.to_string().bold(),
        mode.as_str()
    );
    println!("{}", "─".repeat(50).dimmed());
    toolchain_table(&tc).print();
    Ok(())
}

fn toolchain_table(tc: &ToolchainConfig) -> ui::Table {
    let mut table = ui::Table::new(&["Setting", "Value"]);
    for (key, value) in tc.header_bindings() {
        table.add_row(vec![key.cyan().to_string(), value.to_string()]);
    }
    let lists = [
        ("cflags", &tc.cflags),
        ("cflags_cc", &tc.cflags_cc),
        ("ldflags", &tc.ldflags),
        ("arflags", &tc.arflags),
        ("system libs", &tc.system_libs),
    ];
    for (key, values) in lists {
        let value = if values.is_empty() {
            "-".dimmed().to_string()
        } else {
            values.join(" ")
        };
        table.add_row(vec![key.cyan().to_string(), value]);
    }
    let ext = &tc.extensions;
    table.add_row(vec![
        "extensions".cyan().to_string(),
        format!(
            "obj {} / lib {} / exe {}",
            ext.object,
            ext.static_library,
            if ext.executable.is_empty() { "(none)" } else { ext.executable }
        ),
    ]);
    table
}
