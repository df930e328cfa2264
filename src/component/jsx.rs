//! @acp:module "JSX Rendering"
//! @acp:summary "Renders an SVG element tree as single-line JSX for a dialect"
//! @acp:domain component
//! @acp:layer service

use crate::svg::{Element, Node};

use super::dialect::{AttributeCase, DialectDescriptor};

/// Characters that cannot appear verbatim in JSX text
const JSX_TEXT_SPECIAL: &[char] = &['{', '}', '<', '>', '&'];

/// Line breaks would split a map entry across lines
const LINE_BREAKS: &[char] = &['\n', '\r'];

/// Render `root` as JSX, spreading `props` onto the root element
pub fn render(root: &Element, descriptor: &DialectDescriptor) -> String {
    let mut out = String::new();
    write_element(root, descriptor, true, &mut out);
    out
}

fn write_element(element: &Element, descriptor: &DialectDescriptor, is_root: bool, out: &mut String) {
    out.push('<');
    out.push_str(&element.name);

    for (key, value) in &element.attributes {
        if let Some(attribute) = render_attribute(key, value, descriptor) {
            out.push(' ');
            out.push_str(&attribute);
        }
    }
    if is_root {
        out.push_str(" {...props}");
    }

    if element.children.is_empty() {
        out.push_str(" />");
        return;
    }

    out.push('>');
    for child in &element.children {
        match child {
            Node::Element(child) => write_element(child, descriptor, false, out),
            Node::Text(text) => out.push_str(&render_text(text)),
        }
    }
    out.push_str("</");
    out.push_str(&element.name);
    out.push('>');
}

fn render_attribute(key: &str, value: &str, descriptor: &DialectDescriptor) -> Option<String> {
    if key == "style" && descriptor.style_object {
        let object = style_object(value)?;
        return Some(format!("style={{{object}}}"));
    }

    let name = match descriptor.attribute_case {
        AttributeCase::Camel => camel_case_attribute(key),
        AttributeCase::Svg => key.to_string(),
    };

    // JSX attribute strings have no escapes; fall back to an expression.
    if value.contains(['"', '&']) || value.contains(LINE_BREAKS) {
        return Some(format!("{name}={{{}}}", json_string(value)));
    }
    Some(format!("{name}=\"{value}\""))
}

/// React spelling of an SVG attribute name
pub fn camel_case_attribute(key: &str) -> String {
    match key {
        "class" => return "className".to_string(),
        "for" => return "htmlFor".to_string(),
        _ => {}
    }
    if key.starts_with("data-") || key.starts_with("aria-") {
        return key.to_string();
    }
    camelize(key, &['-', ':'])
}

fn camelize(key: &str, separators: &[char]) -> String {
    let mut out = String::with_capacity(key.len());
    for (i, segment) in key.split(separators).enumerate() {
        if i == 0 {
            out.push_str(segment);
            continue;
        }
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

/// `fill:red; stroke-width: 2` -> `{ fill: "red", strokeWidth: "2" }`
fn style_object(style: &str) -> Option<String> {
    let properties: Vec<String> = style
        .split(';')
        .filter_map(|declaration| {
            let (property, value) = declaration.split_once(':')?;
            let property = property.trim();
            let value = value.trim();
            if property.is_empty() || value.is_empty() {
                return None;
            }
            let key = if property.starts_with("--") {
                json_string(property)
            } else {
                camelize(property, &['-'])
            };
            Some(format!("{key}: {}", json_string(value)))
        })
        .collect();

    if properties.is_empty() {
        return None;
    }
    Some(format!("{{ {} }}", properties.join(", ")))
}

fn render_text(text: &str) -> String {
    if text.contains(JSX_TEXT_SPECIAL) || text.contains(LINE_BREAKS) {
        format!("{{{}}}", json_string(text))
    } else {
        text.to_string()
    }
}

fn json_string(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}
