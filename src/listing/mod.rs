//! @acp:module "Listing"
//! @acp:summary "Recovers icon names and embedded provenance from generated code"
//! @acp:domain listing
//! @acp:layer service
//!
//! Provenance is only ever read back from the source attribute embedded at
//! generation time. When it is missing the icon is reported as unknown.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::document::{EntryValue, ModuleDocument};
use crate::error::Result;
use crate::icon::ComponentName;
use crate::svg::SOURCE_ATTRIBUTE;

static SOURCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r#"{}="([^"]*)""#, regex::escape(SOURCE_ATTRIBUTE))).unwrap()
});

/// @acp:summary "Where an icon came from, as far as the generated code tells"
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "source", rename_all = "lowercase")]
pub enum Provenance {
    /// Source tracking is disabled for the project
    Untracked,
    /// Tracking is enabled but the icon carries no source attribute
    Unknown,
    Known(String),
}

impl Provenance {
    fn from_code(code: &str, tracking: bool) -> Self {
        if !tracking {
            return Provenance::Untracked;
        }
        match SOURCE.captures(code) {
            Some(caps) => Provenance::Known(caps[1].to_string()),
            None => Provenance::Unknown,
        }
    }

    pub fn source(&self) -> Option<&str> {
        match self {
            Provenance::Known(source) => Some(source),
            Provenance::Untracked | Provenance::Unknown => None,
        }
    }
}

/// @acp:summary "One row of the listing view"
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingEntry {
    pub name: String,
    pub provenance: Provenance,
}

/// List the entries of a barrel, reading provenance from inline definitions
pub fn inspect_barrel(text: &str, tracking: bool) -> Result<Vec<ListingEntry>> {
    let document = ModuleDocument::parse(text)?;

    document
        .entries()?
        .into_iter()
        .map(|name| {
            let provenance = match document.entry_value(&name)? {
                Some(EntryValue::Inline(expression)) => Provenance::from_code(&expression, tracking),
                _ => Provenance::from_code("", tracking),
            };
            Ok(ListingEntry { name, provenance })
        })
        .collect()
}

/// List folder-mode components from their file contents
pub fn inspect_folder(files: &[(ComponentName, String)], tracking: bool) -> Vec<ListingEntry> {
    let mut entries: Vec<ListingEntry> = files
        .iter()
        .map(|(name, contents)| ListingEntry {
            name: name.to_string(),
            provenance: Provenance::from_code(contents, tracking),
        })
        .collect();
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    entries
}
