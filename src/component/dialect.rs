//! @acp:module "Component Dialects"
//! @acp:summary "Closed set of target frameworks and their surface-syntax descriptors"
//! @acp:domain component
//! @acp:layer model

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::IconError;

/// @acp:summary "Supported component frameworks"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Framework {
    #[default]
    React,
    Preact,
    Solid,
}

impl Framework {
    pub fn all() -> &'static [Framework] {
        &[Framework::React, Framework::Preact, Framework::Solid]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Framework::React => "react",
            Framework::Preact => "preact",
            Framework::Solid => "solid",
        }
    }
}

impl FromStr for Framework {
    type Err = IconError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "react" => Ok(Framework::React),
            "preact" => Ok(Framework::Preact),
            "solid" | "solid-js" => Ok(Framework::Solid),
            _ => Err(IconError::UnsupportedDialect(s.to_string())),
        }
    }
}

impl TryFrom<String> for Framework {
    type Error = IconError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How SVG attribute names are spelled in JSX
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeCase {
    /// `stroke-width` -> `strokeWidth`, `class` -> `className`
    Camel,
    /// SVG names are kept as written
    Svg,
}

/// @acp:summary "Surface-syntax rules for one framework"
#[derive(Debug)]
pub struct DialectDescriptor {
    pub framework: Framework,
    pub attribute_case: AttributeCase,
    /// Render `style="..."` as an object literal
    pub style_object: bool,
    /// Props type used in typed signatures
    pub props_type: &'static str,
    /// Import that brings `props_type` into scope
    pub type_import: &'static str,
}

static DESCRIPTORS: [DialectDescriptor; 3] = [
    DialectDescriptor {
        framework: Framework::React,
        attribute_case: AttributeCase::Camel,
        style_object: true,
        props_type: "SVGProps<SVGSVGElement>",
        type_import: r#"import type { SVGProps } from "react";"#,
    },
    DialectDescriptor {
        framework: Framework::Preact,
        attribute_case: AttributeCase::Svg,
        style_object: false,
        props_type: "JSX.SVGAttributes<SVGSVGElement>",
        type_import: r#"import type { JSX } from "preact";"#,
    },
    DialectDescriptor {
        framework: Framework::Solid,
        attribute_case: AttributeCase::Svg,
        style_object: false,
        props_type: "JSX.SvgSVGAttributes<SVGSVGElement>",
        type_import: r#"import type { JSX } from "solid-js";"#,
    },
];

/// @acp:summary "A framework plus whether generated code is TypeScript"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dialect {
    pub framework: Framework,
    pub typescript: bool,
}

impl Dialect {
    pub fn new(framework: Framework, typescript: bool) -> Self {
        Self {
            framework,
            typescript,
        }
    }

    pub fn descriptor(&self) -> &'static DialectDescriptor {
        DESCRIPTORS
            .iter()
            .find(|d| d.framework == self.framework)
            .unwrap_or(&DESCRIPTORS[0])
    }

    /// Props type for the typed signature, `None` for JavaScript
    pub fn props_type(&self) -> Option<&'static str> {
        self.typescript.then(|| self.descriptor().props_type)
    }

    /// `import type` statement for the typed signature, `None` for JavaScript
    pub fn type_import(&self) -> Option<&'static str> {
        self.typescript.then(|| self.descriptor().type_import)
    }

    /// Extension of files holding JSX (`tsx`/`jsx`)
    pub fn component_extension(&self) -> &'static str {
        if self.typescript {
            "tsx"
        } else {
            "jsx"
        }
    }

    /// Extension of plain modules such as barrels (`ts`/`js`)
    pub fn module_extension(&self) -> &'static str {
        if self.typescript {
            "ts"
        } else {
            "js"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_framework_from_str() {
        assert_eq!("React".parse::<Framework>().unwrap(), Framework::React);
        assert_eq!("solid-js".parse::<Framework>().unwrap(), Framework::Solid);

        let err = "vue".parse::<Framework>().unwrap_err();
        assert!(matches!(err, IconError::UnsupportedDialect(ref d) if d == "vue"));
        assert!(err.to_string().contains("vue"));
    }

    #[test]
    fn test_framework_deserialize_rejects_unknown() {
        let framework: Framework = serde_json::from_str("\"preact\"").unwrap();
        assert_eq!(framework, Framework::Preact);

        let err = serde_json::from_str::<Framework>("\"svelte\"").unwrap_err();
        assert!(err.to_string().contains("svelte"));
    }

    #[test]
    fn test_every_framework_has_a_descriptor() {
        for framework in Framework::all() {
            assert_eq!(Dialect::new(*framework, true).descriptor().framework, *framework);
        }
    }

    #[test]
    fn test_untyped_dialect_has_no_props_type() {
        let dialect = Dialect::new(Framework::React, false);
        assert_eq!(dialect.props_type(), None);
        assert_eq!(dialect.type_import(), None);
        assert_eq!(dialect.component_extension(), "jsx");
        assert_eq!(dialect.module_extension(), "js");
    }
}
