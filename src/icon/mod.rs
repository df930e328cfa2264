//! @acp:module "Icon Identity"
//! @acp:summary "Registry identifiers and the component names derived from them"
//! @acp:domain core
//! @acp:layer model
//!
//! An [`IconIdentifier`] (`lucide:arrow-right`) names an icon in the registry and
//! is only ever used as a provenance key. The generated code refers to icons by
//! [`ComponentName`] (`ArrowRight`).

pub mod name;

pub use name::{ComponentName, RESERVED_FILE_STEMS};

use std::fmt;
use std::str::FromStr;

use crate::error::{IconError, Result};

/// Characters that would need escaping in a URL path or a JSX attribute string
const FORBIDDEN: &[char] = &['"', '\'', '&', '<', '>', '{', '}', '/', '\\', '?', '#'];

/// @acp:summary "A `<collection>:<name>` registry key"
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IconIdentifier {
    collection: String,
    name: String,
}

impl IconIdentifier {
    /// Registry namespace (`lucide`)
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Icon key within the collection (`arrow-right`)
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl FromStr for IconIdentifier {
    type Err = IconError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = |reason: &str| IconError::InvalidIdentifier {
            input: s.to_string(),
            reason: reason.to_string(),
        };

        if s.chars().any(char::is_whitespace) {
            return Err(invalid("identifiers cannot contain whitespace"));
        }
        if let Some(c) = s.chars().find(|c| FORBIDDEN.contains(c)) {
            return Err(invalid(&format!("identifiers cannot contain `{c}`")));
        }

        let (collection, name) = s
            .split_once(':')
            .ok_or_else(|| invalid("expected the form <collection>:<name>"))?;

        if collection.is_empty() {
            return Err(invalid("collection is empty"));
        }
        if name.is_empty() {
            return Err(invalid("icon name is empty"));
        }
        if name.contains(':') {
            return Err(invalid("expected exactly one `:`"));
        }

        Ok(Self {
            collection: collection.to_string(),
            name: name.to_string(),
        })
    }
}

impl fmt::Display for IconIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.collection, self.name)
    }
}
