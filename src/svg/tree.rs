//! @acp:module "SVG Tree"
//! @acp:summary "Minimal element tree over quick-xml events, plus compact serialization"
//! @acp:domain svg
//! @acp:layer parser
//!
//! Only elements and text survive parsing. Comments, declarations, doctypes and
//! processing instructions are dropped on the way in, CDATA becomes text.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{IconError, Result};

/// A node in the SVG tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// An SVG element with ordered attributes
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set an attribute, replacing the value in place if the key is already present
    pub fn set_attribute(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => *existing = value,
            None => self.attributes.push((key.to_string(), value)),
        }
    }

    pub fn remove_attribute(&mut self, key: &str) -> Option<String> {
        let index = self.attributes.iter().position(|(k, _)| k == key)?;
        Some(self.attributes.remove(index).1)
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|child| match child {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    /// Whether this element or any descendant carries an attribute with `prefix`
    pub fn uses_attribute_prefix(&self, prefix: &str) -> bool {
        self.attributes.iter().any(|(k, _)| k.starts_with(prefix))
            || self
                .child_elements()
                .any(|child| child.uses_attribute_prefix(prefix))
    }
}

/// Parse markup into its top-level nodes
pub fn parse(markup: &str) -> Result<Vec<Node>> {
    let mut reader = Reader::from_str(markup);
    let mut stack: Vec<Element> = Vec::new();
    let mut top: Vec<Node> = Vec::new();

    loop {
        let event = reader
            .read_event()
            .map_err(|e| IconError::MalformedSvg(e.to_string()))?;

        match event {
            Event::Start(start) => stack.push(element_from(&start)?),
            Event::Empty(start) => {
                let element = element_from(&start)?;
                attach(&mut stack, &mut top, Node::Element(element));
            }
            Event::End(end) => {
                let element = stack.pop().ok_or_else(|| {
                    IconError::MalformedSvg(format!(
                        "unexpected closing tag </{}>",
                        String::from_utf8_lossy(end.name().as_ref())
                    ))
                })?;
                attach(&mut stack, &mut top, Node::Element(element));
            }
            Event::Text(text) => {
                let text = text
                    .unescape()
                    .map_err(|e| IconError::MalformedSvg(e.to_string()))?;
                attach(&mut stack, &mut top, Node::Text(text.into_owned()));
            }
            Event::CData(data) => {
                let text = String::from_utf8_lossy(&data.into_inner()).into_owned();
                attach(&mut stack, &mut top, Node::Text(text));
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(IconError::MalformedSvg(format!("unclosed <{}>", open.name)));
    }

    Ok(top)
}

fn element_from(start: &BytesStart<'_>) -> Result<Element> {
    let mut element = Element::new(String::from_utf8_lossy(start.name().as_ref()));

    for attribute in start.attributes() {
        let attribute = attribute.map_err(|e| IconError::MalformedSvg(e.to_string()))?;
        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        let value = attribute
            .unescape_value()
            .map_err(|e| IconError::MalformedSvg(e.to_string()))?;
        element.set_attribute(&key, value.into_owned());
    }

    Ok(element)
}

fn attach(stack: &mut [Element], top: &mut Vec<Node>, node: Node) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => top.push(node),
    }
}

/// Serialize an element as compact XML
pub fn to_xml(element: &Element) -> String {
    let mut out = String::new();
    write_element(element, &mut out);
    out
}

fn write_element(element: &Element, out: &mut String) {
    out.push('<');
    out.push_str(&element.name);
    for (key, value) in &element.attributes {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(&escape_attribute(value));
        out.push('"');
    }

    if element.children.is_empty() {
        out.push_str("/>");
        return;
    }

    out.push('>');
    for child in &element.children {
        match child {
            Node::Element(child) => write_element(child, out),
            Node::Text(text) => out.push_str(&escape_text(text)),
        }
    }
    out.push_str("</");
    out.push_str(&element.name);
    out.push('>');
}

pub(crate) fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

pub(crate) fn escape_attribute(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nested_elements() {
        let nodes = parse(r#"<svg a="1"><g><path d="M0 0"/></g></svg>"#).unwrap();
        assert_eq!(nodes.len(), 1);
        let Node::Element(svg) = &nodes[0] else {
            panic!("expected element");
        };
        assert_eq!(svg.name, "svg");
        assert_eq!(svg.attribute("a"), Some("1"));
        let g = svg.child_elements().next().unwrap();
        assert_eq!(g.child_elements().next().unwrap().attribute("d"), Some("M0 0"));
    }

    #[test]
    fn test_parse_drops_comments_and_declarations() {
        let nodes = parse("<?xml version=\"1.0\"?><!-- hi --><svg/>").unwrap();
        assert_eq!(nodes, vec![Node::Element(Element::new("svg"))]);
    }

    #[test]
    fn test_parse_rejects_mismatched_tags() {
        assert!(parse("<svg><g></svg>").is_err());
        assert!(parse("<svg><g>").is_err());
    }

    #[test]
    fn test_serialize_escapes() {
        let mut element = Element::new("title");
        element.set_attribute("data-x", "a\"b&c");
        element.children.push(Node::Text("1 < 2".to_string()));
        assert_eq!(
            to_xml(&element),
            r#"<title data-x="a&quot;b&amp;c">1 &lt; 2</title>"#
        );
    }

    #[test]
    fn test_set_attribute_replaces_in_place() {
        let mut element = Element::new("svg");
        element.set_attribute("a", "1");
        element.set_attribute("b", "2");
        element.set_attribute("a", "3");
        assert_eq!(
            element.attributes,
            vec![("a".to_string(), "3".to_string()), ("b".to_string(), "2".to_string())]
        );
    }
}
