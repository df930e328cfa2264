//! @acp:module "Accessibility Injection"
//! @acp:summary "Applies the project-wide accessibility strategy to an SVG root"
//! @acp:domain svg
//! @acp:layer service

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::tree::Element;

/// Root attributes owned by the accessibility step
const A11Y_ATTRIBUTES: &[&str] = &["aria-hidden", "role", "aria-label"];

/// @acp:summary "How generated icons are exposed to assistive technology"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum A11yStrategy {
    /// `aria-hidden="true"`: decorative icons
    #[default]
    Hidden,
    /// `role="img"` with an `aria-label` derived from the component name
    Img,
    /// `role="presentation"`
    Presentation,
    /// Leave the root untouched
    None,
}

impl A11yStrategy {
    pub fn all() -> &'static [A11yStrategy] {
        &[
            A11yStrategy::Hidden,
            A11yStrategy::Img,
            A11yStrategy::Presentation,
            A11yStrategy::None,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            A11yStrategy::Hidden => "hidden",
            A11yStrategy::Img => "img",
            A11yStrategy::Presentation => "presentation",
            A11yStrategy::None => "none",
        }
    }
}

impl FromStr for A11yStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hidden" => Ok(A11yStrategy::Hidden),
            "img" => Ok(A11yStrategy::Img),
            "presentation" => Ok(A11yStrategy::Presentation),
            "none" => Ok(A11yStrategy::None),
            _ => Err(format!(
                "Unknown a11y strategy: {}. Use hidden, img, presentation or none",
                s
            )),
        }
    }
}

impl fmt::Display for A11yStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Apply `strategy` to `root`
///
/// Attributes the strategy sets are updated in place; the other accessibility
/// attributes are removed, so repeated application leaves the root unchanged.
pub fn apply(root: &mut Element, strategy: A11yStrategy, label: &str) {
    let wanted: Vec<(&str, &str)> = match strategy {
        A11yStrategy::Hidden => vec![("aria-hidden", "true")],
        A11yStrategy::Img => vec![("role", "img"), ("aria-label", label)],
        A11yStrategy::Presentation => vec![("role", "presentation")],
        A11yStrategy::None => Vec::new(),
    };

    for key in A11Y_ATTRIBUTES {
        if !wanted.iter().any(|(k, _)| k == key) {
            root.remove_attribute(key);
        }
    }
    for (key, value) in wanted {
        root.set_attribute(key, value);
    }
}
