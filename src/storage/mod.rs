//! @acp:module "Storage"
//! @acp:summary "Project-relative file access for generated artifacts"
//! @acp:domain storage
//! @acp:layer service

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::error::{IconError, Result};

/// @acp:summary "Narrow file access used by commands; paths are relative to the project root"
pub trait Storage {
    fn exists(&self, path: &Path) -> bool;
    fn read(&self, path: &Path) -> Result<String>;
    /// Write `contents`, creating parent directories as needed
    fn write(&self, path: &Path, contents: &str) -> Result<()>;
    /// File names directly inside `dir`, sorted; empty when `dir` does not exist
    fn list(&self, dir: &Path) -> Result<Vec<String>>;
    fn remove(&self, path: &Path) -> Result<()>;
}

/// @acp:summary "Storage backed by the local filesystem under a root directory"
#[derive(Debug, Clone)]
pub struct DiskStorage {
    root: PathBuf,
}

impl DiskStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }
}

impl Storage for DiskStorage {
    fn exists(&self, path: &Path) -> bool {
        self.resolve(path).exists()
    }

    fn read(&self, path: &Path) -> Result<String> {
        let full = self.resolve(path);
        fs::read_to_string(&full).map_err(|e| IconError::io(full, e))
    }

    fn write(&self, path: &Path, contents: &str) -> Result<()> {
        let full = self.resolve(path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).map_err(|e| IconError::io(parent, e))?;
        }
        debug!(path = %full.display(), bytes = contents.len(), "writing file");
        fs::write(&full, contents).map_err(|e| IconError::io(full, e))
    }

    fn list(&self, dir: &Path) -> Result<Vec<String>> {
        let full = self.resolve(dir);
        if !full.is_dir() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in WalkDir::new(&full).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| {
                let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| full.clone());
                let source = e
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("filesystem loop"));
                IconError::io(path, source)
            })?;
            if entry.file_type().is_file() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }

        names.sort();
        Ok(names)
    }

    fn remove(&self, path: &Path) -> Result<()> {
        let full = self.resolve(path);
        debug!(path = %full.display(), "removing file");
        fs::remove_file(&full).map_err(|e| IconError::io(full, e))
    }
}
