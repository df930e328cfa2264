//! @acp:module "Commands"
//! @acp:summary "CLI command implementations"
//! @acp:domain cli
//! @acp:layer handler
//!
//! Each command lives in its own submodule with an options struct and an
//! `execute_*` entry point.

pub mod add;
pub mod init;
pub mod list;
pub mod remove;

pub use add::{execute_add, execute_add_with, AddOptions};
pub use init::{execute_init, InitOptions};
pub use list::{execute_list, ListOptions};
pub use remove::{execute_remove, RemoveOptions};

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::{Config, OutputShape};
use crate::error::IconError;
use crate::folder;
use crate::icon::ComponentName;
use crate::storage::{DiskStorage, Storage};

/// @acp:summary "Loaded config plus storage rooted at the project directory"
pub struct Project {
    pub config: Config,
    pub storage: DiskStorage,
}

impl Project {
    /// Load the config at `config_path` (relative to `root` unless absolute)
    pub fn load(root: &Path, config_path: &Path) -> Result<Self> {
        let path = root.join(config_path);
        let config = Config::load(&path).map_err(|err| match err {
            IconError::ConfigMissing(_) => anyhow::anyhow!(
                "{err}\n  Run 'iconsmith init' to set up the project"
            ),
            other => anyhow::Error::new(other),
        })?;

        Ok(Self {
            config,
            storage: DiskStorage::new(root),
        })
    }

    /// Read the barrel file, with a hint when it has not been created yet
    pub fn read_barrel(&self, path: &Path) -> Result<String> {
        if !self.storage.exists(path) {
            anyhow::bail!(
                "{} does not exist. Run 'iconsmith init' to create it",
                path.display()
            );
        }
        Ok(self.storage.read(path)?)
    }

    /// Component files currently in the icon folder, with their names
    pub fn folder_components(&self, dir: &Path) -> Result<Vec<(ComponentName, PathBuf)>> {
        let dialect = self.config.dialect();
        let files = self
            .storage
            .list(dir)
            .with_context(|| format!("Failed to list {}", dir.display()))?;

        Ok(folder::scan_existing(&files, dialect.component_extension())
            .into_iter()
            .map(|name| {
                let path = dir.join(folder::component_file_name(&name, dialect));
                (name, path)
            })
            .collect())
    }

    pub fn output_shape(&self) -> OutputShape {
        self.config.output_shape()
    }
}
