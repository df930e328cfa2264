//! @acp:module "Remove Command"
//! @acp:summary "Delete icons from the generated module or icon folder"
//! @acp:domain cli
//! @acp:layer handler

use anyhow::{bail, Result};
use console::style;

use super::Project;
use crate::config::OutputShape;
use crate::document::ModuleDocument;
use crate::folder;
use crate::icon::ComponentName;
use crate::prompt::{AssumeYes, Confirm, Confirmation, TerminalConfirm};
use crate::storage::Storage;

/// Options for the remove command
#[derive(Debug, Clone, Default)]
pub struct RemoveOptions {
    /// Component names to remove
    pub names: Vec<String>,
    /// Skip the confirmation prompt
    pub yes: bool,
}

/// Execute the remove command
pub fn execute_remove(options: RemoveOptions, project: &Project) -> Result<()> {
    let mut names = options
        .names
        .iter()
        .map(String::as_str)
        .map(ComponentName::parse)
        .collect::<std::result::Result<Vec<_>, _>>()?;
    names.sort();
    names.dedup();

    let confirm: Box<dyn Confirm> = if options.yes {
        Box::new(AssumeYes)
    } else {
        Box::new(TerminalConfirm)
    };

    match project.output_shape() {
        OutputShape::Barrel(path) => {
            let mut document = ModuleDocument::parse(&project.read_barrel(&path)?)?;
            let entries = document.entries()?;
            check_present(&names, |name| entries.iter().any(|e| e == name.as_str()))?;

            if !confirmed(confirm.as_ref(), &names)? {
                return Ok(());
            }

            for name in &names {
                document.remove(name)?;
            }
            project.storage.write(&path, &document.render())?;
            println!("{} Updated {}", style("✓").green(), path.display());
        }
        OutputShape::Folder(dir) => {
            let components = project.folder_components(&dir)?;
            check_present(&names, |name| components.iter().any(|(n, _)| n == name))?;

            if !confirmed(confirm.as_ref(), &names)? {
                return Ok(());
            }

            for (_, path) in components.iter().filter(|(n, _)| names.contains(n)) {
                project.storage.remove(path)?;
                println!("{} Removed {}", style("✓").green(), path.display());
            }

            let dialect = project.config.dialect();
            let remaining: Vec<ComponentName> = components
                .into_iter()
                .map(|(name, _)| name)
                .filter(|name| !names.contains(name))
                .collect();
            let barrel = dir.join(folder::barrel_file_name(dialect));
            project
                .storage
                .write(&barrel, &folder::build_barrel(&remaining, dialect.typescript))?;
            println!("{} Updated {}", style("✓").green(), barrel.display());
        }
    }

    Ok(())
}

fn check_present(names: &[ComponentName], exists: impl Fn(&ComponentName) -> bool) -> Result<()> {
    let missing: Vec<String> = names
        .iter()
        .filter(|name| !exists(name))
        .map(|name| name.to_string())
        .collect();
    if !missing.is_empty() {
        bail!("No icon named {}", missing.join(", "));
    }
    Ok(())
}

fn confirmed(confirm: &dyn Confirm, names: &[ComponentName]) -> Result<bool> {
    let list = names
        .iter()
        .map(|name| name.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    let prompt = format!("Remove {list}?");

    match confirm.confirm(&prompt)? {
        Confirmation::Yes => Ok(true),
        Confirmation::No | Confirmation::Cancelled => {
            println!("{} Nothing removed", style("!").yellow());
            Ok(false)
        }
    }
}
