//! `targets` command handler
//!
//! Lists the targets a manifest assembles for one platform, after overlays
//! and `only` filters have been applied.

use anyhow::Result;
use colored::*;
use std::path::Path;

use crate::target::{TargetKind, TargetSet};
use crate::ui;

pub fn handle_targets(manifest_path: &Path, platform: Option<&str>) -> Result<()> {
    let platform = super::parse_platform(platform)?;
    let manifest = super::load_manifest(manifest_path)?;
    let set = manifest.assemble(platform)?;

    println!(
        "{} Targets for {} ({})",
        "🎯".cyan(),
        platform.to_string().bold(),
        manifest_path.display()
    );
    println!("{}", "─".repeat(50).dimmed());

    let table = target_table(&set);
    if table.is_empty() {
        ui::warn("No targets are declared for this platform");
        return Ok(());
    }
    table.print();
    println!(
        "\n  {} libraries, {} executables, {} sources",
        set.static_libraries.len(),
        set.executables.len(),
        set.source_count()
    );
    Ok(())
}

fn target_table(set: &TargetSet) -> ui::Table {
    let mut table = ui::Table::new(&["Name", "Kind", "Sources", "Links"]);
    for target in set.iter() {
        let name = match target.kind {
            TargetKind::StaticLibrary => target.name.cyan().to_string(),
            TargetKind::Executable => target.name.green().bold().to_string(),
        };
        let links = if target.libs.is_empty() {
            "-".dimmed().to_string()
        } else {
            target.libs.join(", ")
        };
        table.add_row(vec![
            name,
            target.kind.to_string(),
            target.sources.len().to_string(),
            links,
        ]);
    }
    table
}
