//! @acp:module "Component Synthesizer"
//! @acp:summary "Turns a transformed SVG into a framework component definition"
//! @acp:domain component
//! @acp:layer service
//!
//! Synthesis is pure: identical inputs yield byte-identical output, which is
//! what lets a replace with an unchanged icon leave the document untouched.
//! The dialect only controls surface syntax, never the SVG content.

pub mod dialect;
pub mod jsx;
pub mod templates;

pub use dialect::{Dialect, DialectDescriptor, Framework};

use crate::error::Result;
use crate::icon::ComponentName;
use crate::svg::SvgDocument;

/// @acp:summary "A synthesized component: its name and its JSX arrow-function expression"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentDefinition {
    pub name: ComponentName,
    pub dialect: Dialect,
    expression: String,
}

impl ComponentDefinition {
    /// Arrow-function expression, used verbatim as an inline map value
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// File name of the stand-alone module (`Check.tsx`)
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.name, self.dialect.component_extension())
    }

    /// Render a stand-alone module with the component as its default export
    pub fn to_module(&self) -> Result<String> {
        templates::render_component(
            self.name.as_str(),
            &self.expression,
            self.dialect.type_import(),
        )
    }
}

/// Synthesize the component `name` from an already transformed `svg`
pub fn synthesize(svg: &SvgDocument, name: &ComponentName, dialect: Dialect) -> Result<ComponentDefinition> {
    let root = svg.root()?;
    let markup = jsx::render(&root, dialect.descriptor());

    let params = match dialect.props_type() {
        Some(props_type) => format!("(props: {props_type})"),
        None => "(props)".to_string(),
    };

    Ok(ComponentDefinition {
        name: name.clone(),
        dialect,
        expression: format!("{params} => ({markup})"),
    })
}
