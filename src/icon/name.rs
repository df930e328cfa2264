//! @acp:module "Component Naming"
//! @acp:summary "PascalCase component names, labels and reserved-name checks"
//! @acp:domain core
//! @acp:layer model

use std::fmt;

use super::IconIdentifier;
use crate::error::{IconError, Result};

/// File stems that folder mode generates itself and never treats as icons
pub const RESERVED_FILE_STEMS: &[&str] = &["index", "types"];

/// @acp:summary "Validated PascalCase component identifier"
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentName(String);

impl ComponentName {
    /// Derive a name from the identifier's icon key.
    ///
    /// The key is split on non-alphanumerics and each segment is capitalized:
    /// `arrow-right-2` becomes `ArrowRight2`. Names that would start with a
    /// digit get an `Icon` prefix.
    pub fn derive(identifier: &IconIdentifier) -> Result<Self> {
        let mut name: String = identifier
            .name()
            .split(|c: char| !c.is_ascii_alphanumeric())
            .filter(|segment| !segment.is_empty())
            .map(capitalize)
            .collect();

        if name.is_empty() {
            return Err(IconError::InvalidIdentifier {
                input: identifier.to_string(),
                reason: "icon name has no alphanumeric characters".to_string(),
            });
        }

        if name.starts_with(|c: char| c.is_ascii_digit()) {
            name.insert_str(0, "Icon");
        }

        Ok(Self(name))
    }

    /// Validate an explicitly supplied name
    pub fn parse(name: &str) -> Result<Self> {
        let invalid = |reason: &str| IconError::InvalidName {
            name: name.to_string(),
            reason: reason.to_string(),
        };

        let mut chars = name.chars();
        match chars.next() {
            None => return Err(invalid("name is empty")),
            Some(c) if !c.is_ascii_uppercase() => {
                return Err(invalid("components must start with an uppercase letter"))
            }
            Some(_) => {}
        }

        if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$') {
            return Err(invalid("only letters, digits, `_` and `$` are allowed"));
        }

        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Human-readable label with spaces at camel boundaries (`ArrowRight2` -> `Arrow Right 2`)
    pub fn label(&self) -> String {
        let chars: Vec<char> = self.0.chars().collect();
        let mut label = String::with_capacity(self.0.len() + 4);

        for (i, &c) in chars.iter().enumerate() {
            if i > 0 {
                let prev = chars[i - 1];
                let next = chars.get(i + 1).copied();
                let boundary = (c.is_ascii_uppercase()
                    && (prev.is_ascii_lowercase() || prev.is_ascii_digit()))
                    || (c.is_ascii_uppercase()
                        && prev.is_ascii_uppercase()
                        && next.is_some_and(|n| n.is_ascii_lowercase()))
                    || (c.is_ascii_digit() && prev.is_ascii_alphabetic());
                if boundary {
                    label.push(' ');
                }
            }
            if c != '_' && c != '$' {
                label.push(c);
            }
        }

        label
    }

    /// Whether the name would clash with a generated file in folder mode
    pub fn is_reserved_file_stem(&self) -> bool {
        RESERVED_FILE_STEMS
            .iter()
            .any(|stem| self.0.eq_ignore_ascii_case(stem))
    }
}

impl fmt::Display for ComponentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ComponentName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn derive(id: &str) -> String {
        ComponentName::derive(&id.parse().unwrap()).unwrap().to_string()
    }

    #[test]
    fn test_derive_pascal_case() {
        assert_eq!(derive("lucide:check"), "Check");
        assert_eq!(derive("lucide:arrow-right"), "ArrowRight");
        assert_eq!(derive("mdi:account_circle-outline"), "AccountCircleOutline");
        assert_eq!(derive("tabler:arrow-right-2"), "ArrowRight2");
    }

    #[test]
    fn test_derive_leading_digit() {
        assert_eq!(derive("mdi:123"), "Icon123");
        assert_eq!(derive("mdi:3d-rotation"), "Icon3dRotation");
    }

    #[test]
    fn test_derive_rejects_symbol_only_names() {
        let id = "mdi:---".parse().unwrap();
        assert!(ComponentName::derive(&id).is_err());
    }

    #[test]
    fn test_parse_custom_name() {
        assert!(ComponentName::parse("MyCheck").is_ok());
        assert!(ComponentName::parse("myCheck").is_err());
        assert!(ComponentName::parse("My-Check").is_err());
        assert!(ComponentName::parse("").is_err());
    }

    #[test]
    fn test_label() {
        let label = |s: &str| ComponentName::parse(s).unwrap().label();
        assert_eq!(label("Check"), "Check");
        assert_eq!(label("ArrowRight"), "Arrow Right");
        assert_eq!(label("ArrowRight2"), "Arrow Right 2");
        assert_eq!(label("HTMLLogo"), "HTML Logo");
    }

    #[test]
    fn test_reserved_file_stems() {
        assert!(ComponentName::parse("Index").unwrap().is_reserved_file_stem());
        assert!(ComponentName::parse("Types").unwrap().is_reserved_file_stem());
        assert!(!ComponentName::parse("Home").unwrap().is_reserved_file_stem());
    }
}
