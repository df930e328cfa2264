//! @acp:module "Errors"
//! @acp:summary "Error types shared by the icon pipeline, document model and shell"
//! @acp:domain core
//! @acp:layer model
//!
//! Per-icon errors (`InvalidIdentifier`, `FetchFailed`, `MalformedSvg`, ...) are
//! caught by the merge orchestrator and reported as outcomes. Everything else
//! aborts the operation it occurs in.

use std::path::PathBuf;

use thiserror::Error;

/// @acp:summary "Library error type"
#[derive(Debug, Error)]
pub enum IconError {
    #[error("invalid icon identifier `{input}`: {reason}")]
    InvalidIdentifier { input: String, reason: String },

    #[error("invalid component name `{name}`: {reason}")]
    InvalidName { name: String, reason: String },

    #[error("component name `{0}` collides with a reserved file in the icon folder")]
    ReservedName(String),

    #[error("--name can only be used when adding a single icon ({count} requested)")]
    NameCollisionRejected { count: usize },

    #[error("failed to fetch `{identifier}`: {reason}")]
    FetchFailed { identifier: String, reason: String },

    #[error("malformed SVG: {0}")]
    MalformedSvg(String),

    #[error("unsupported component dialect `{0}` (expected react, preact or solid)")]
    UnsupportedDialect(String),

    #[error("no entry named `{0}` in the icon module")]
    EntryNotFound(String),

    #[error("entry `{0}` already exists in the icon module")]
    DuplicateEntry(String),

    #[error("inline value for entry `{0}` must fit on one line")]
    MultilineEntry(String),

    #[error("icon module is not in the expected shape: {0}")]
    MalformedModule(String),

    #[error("failed to access {}: {source}", path.display())]
    DocumentIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no config found at {}", .0.display())]
    ConfigMissing(PathBuf),

    #[error("invalid config: {0}")]
    ConfigInvalid(String),

    #[error("operation cancelled")]
    Cancelled,

    #[error("failed to read confirmation: {0}")]
    Prompt(String),

    #[error("template error: {0}")]
    Template(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl IconError {
    /// Build a `DocumentIo` error for `path`
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        IconError::DocumentIo {
            path: path.into(),
            source,
        }
    }

    /// Whether the error only affects the icon being processed
    pub fn is_per_icon(&self) -> bool {
        matches!(
            self,
            IconError::InvalidIdentifier { .. }
                | IconError::InvalidName { .. }
                | IconError::ReservedName(_)
                | IconError::FetchFailed { .. }
                | IconError::MalformedSvg(_)
        )
    }
}

impl From<handlebars::RenderError> for IconError {
    fn from(err: handlebars::RenderError) -> Self {
        IconError::Template(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, IconError>;
