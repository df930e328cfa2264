//! @acp:module "List Command"
//! @acp:summary "Show generated icons and where they came from"
//! @acp:domain cli
//! @acp:layer handler

use anyhow::{Context, Result};
use console::style;

use super::Project;
use crate::config::OutputShape;
use crate::listing::{inspect_barrel, inspect_folder, ListingEntry, Provenance};
use crate::storage::Storage;

/// Options for the list command
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    /// Output as JSON
    pub json: bool,
}

/// Execute the list command
pub fn execute_list(options: ListOptions, project: &Project) -> Result<()> {
    let tracking = project.config.track_source;

    let entries = match project.output_shape() {
        OutputShape::Barrel(path) => {
            let text = project.read_barrel(&path)?;
            inspect_barrel(&text, tracking)
                .with_context(|| format!("Failed to read icons from {}", path.display()))?
        }
        OutputShape::Folder(dir) => {
            let mut files = Vec::new();
            for (name, path) in project.folder_components(&dir)? {
                files.push((name, project.storage.read(&path)?));
            }
            inspect_folder(&files, tracking)
        }
    };

    if options.json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    print_entries(&entries, project.config.output.display().to_string());
    Ok(())
}

fn print_entries(entries: &[ListingEntry], output: String) {
    if entries.is_empty() {
        println!("{} No icons in {}", style("→").cyan(), output);
        return;
    }

    let width = entries.iter().map(|e| e.name.len()).max().unwrap_or(0);
    for entry in entries {
        match &entry.provenance {
            Provenance::Untracked => println!("  {}", style(&entry.name).cyan()),
            Provenance::Known(source) => println!(
                "  {:width$}  {}",
                style(&entry.name).cyan(),
                style(source).dim()
            ),
            Provenance::Unknown => println!(
                "  {:width$}  {}",
                style(&entry.name).cyan(),
                style("unknown source").yellow()
            ),
        }
    }

    println!(
        "\n{} {} icon{} in {}",
        style("✓").green(),
        entries.len(),
        if entries.len() == 1 { "" } else { "s" },
        output
    );
}
