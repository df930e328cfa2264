//! @acp:module "Component Templates"
//! @acp:summary "Handlebars templates for stand-alone component and types files"
//! @acp:domain component
//! @acp:layer service

use std::sync::LazyLock;

use handlebars::Handlebars;
use serde_json::json;

use crate::error::{IconError, Result};

const COMPONENT_TEMPLATE: &str = "{{#if type_import}}{{type_import}}\n\n{{/if}}const {{name}} = {{expression}};\n\nexport default {{name}};\n";

const TYPES_TEMPLATE: &str = "{{import_stmt}}\n\nexport type {{type_name}} = {{props_type}};\n";

/// Name of the props alias exported by the types file
pub const PROPS_TYPE_NAME: &str = "IconProps";

static TEMPLATES: LazyLock<std::result::Result<Handlebars<'static>, String>> = LazyLock::new(|| {
    let mut registry = Handlebars::new();
    registry.register_escape_fn(handlebars::no_escape);
    registry
        .register_template_string("component", COMPONENT_TEMPLATE)
        .map_err(|e| e.to_string())?;
    registry
        .register_template_string("types", TYPES_TEMPLATE)
        .map_err(|e| e.to_string())?;
    Ok(registry)
});

fn registry() -> Result<&'static Handlebars<'static>> {
    TEMPLATES
        .as_ref()
        .map_err(|e| IconError::Template(e.clone()))
}

/// Render a stand-alone module exporting one component by default
pub fn render_component(name: &str, expression: &str, type_import: Option<&str>) -> Result<String> {
    let data = json!({
        "name": name,
        "expression": expression,
        "type_import": type_import,
    });
    Ok(registry()?.render("component", &data)?)
}

/// Render the shared types file re-exporting the dialect's props type
pub fn render_types(props_type: &str, import_stmt: &str) -> Result<String> {
    let data = json!({
        "import_stmt": import_stmt,
        "type_name": PROPS_TYPE_NAME,
        "props_type": props_type,
    });
    Ok(registry()?.render("types", &data)?)
}
