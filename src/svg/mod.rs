//! @acp:module "SVG Transform Pipeline"
//! @acp:summary "Normalizes and annotates raw registry SVG before it becomes a component"
//! @acp:domain svg
//! @acp:layer service
//!
//! # Pipeline
//!
//! 1. **Optimize**: structural cleanup ([`optimize`])
//! 2. **Accessibility**: apply the project's [`A11yStrategy`] using the resolved component name
//! 3. **Provenance**: set or strip [`SOURCE_ATTRIBUTE`]
//! 4. **Title**: inject `<title>` as the first child when requested
//!
//! Each step is idempotent, so `transform(transform(svg)) == transform(svg)`.

pub mod a11y;
pub mod optimize;
pub mod tree;

pub use a11y::A11yStrategy;
pub use optimize::OptimizeOptions;
pub use tree::{Element, Node};

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{IconError, Result};
use crate::icon::ComponentName;

/// Root attribute carrying the registry identifier an icon was fetched from
pub const SOURCE_ATTRIBUTE: &str = "data-icon-source";

static ROOT_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<svg\b[^>]*>").unwrap());

/// @acp:summary "Raw SVG markup with a single `<svg>` root"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvgDocument(String);

impl SvgDocument {
    pub fn new(markup: impl Into<String>) -> Self {
        Self(markup.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse the markup, requiring exactly one top-level `<svg>` element
    pub fn root(&self) -> Result<Element> {
        if !ROOT_TAG.is_match(&self.0) {
            return Err(IconError::MalformedSvg("no <svg> root element".to_string()));
        }

        let mut elements = Vec::new();
        for node in tree::parse(&self.0)? {
            match node {
                Node::Element(element) => elements.push(element),
                Node::Text(text) if text.trim().is_empty() => {}
                Node::Text(_) => {
                    return Err(IconError::MalformedSvg(
                        "text outside the root element".to_string(),
                    ))
                }
            }
        }

        if elements.len() > 1 {
            return Err(IconError::MalformedSvg(format!(
                "expected one root element, found {}",
                elements.len()
            )));
        }

        let root = elements
            .pop()
            .ok_or_else(|| IconError::MalformedSvg("document is empty".to_string()))?;
        if root.name != "svg" {
            return Err(IconError::MalformedSvg(format!(
                "root element is <{}>, expected <svg>",
                root.name
            )));
        }

        Ok(root)
    }
}

impl std::fmt::Display for SvgDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// @acp:summary "Per-project transform settings"
#[derive(Debug, Clone, Default)]
pub struct TransformOptions {
    pub optimize: OptimizeOptions,
    pub a11y: A11yStrategy,
    /// Registry identifier to embed, `None` when source tracking is off
    pub source: Option<String>,
    /// Title text to inject
    pub title: Option<String>,
}

/// Run the full pipeline over `svg` for the component `name`
pub fn transform(
    svg: &SvgDocument,
    name: &ComponentName,
    options: &TransformOptions,
) -> Result<SvgDocument> {
    let mut root = svg.root()?;

    optimize::optimize(&mut root, &options.optimize);
    a11y::apply(&mut root, options.a11y, &name.label());

    match &options.source {
        Some(source) => root.set_attribute(SOURCE_ATTRIBUTE, source.as_str()),
        None => {
            root.remove_attribute(SOURCE_ATTRIBUTE);
        }
    }

    if let Some(title) = &options.title {
        inject_title(&mut root, title);
    }

    if options.optimize.sort_attributes {
        optimize::sort_attributes(&mut root);
    }

    Ok(SvgDocument(tree::to_xml(&root)))
}

fn inject_title(root: &mut Element, title: &str) {
    let first_element = root
        .children
        .iter_mut()
        .find_map(|child| match child {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        });

    match first_element {
        Some(element) if element.name == "title" => {
            element.children = vec![Node::Text(title.to_string())];
        }
        _ => {
            let mut element = Element::new("title");
            element.children.push(Node::Text(title.to_string()));
            root.children.insert(0, Node::Element(element));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LUCIDE_CHECK: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="1em" height="1em" viewBox="0 0 24 24"><path fill="none" stroke="currentColor" stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M20 6L9 17l-5-5"/></svg>"#;

    fn name(s: &str) -> ComponentName {
        ComponentName::parse(s).unwrap()
    }

    #[test]
    fn test_transform_hidden_with_source() {
        let options = TransformOptions {
            source: Some("lucide:check".to_string()),
            ..Default::default()
        };
        let out = transform(&SvgDocument::new(LUCIDE_CHECK), &name("Check"), &options).unwrap();
        assert!(out.as_str().starts_with(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="1em" height="1em" aria-hidden="true" data-icon-source="lucide:check" viewBox="0 0 24 24">"#
        ));
    }

    const NESTED: &str = r#"<?xml version="1.0"?>
<svg xmlns="http://www.w3.org/2000/svg" version="1.1" viewBox="0 0 24 24" role="img" aria-label="Old">
  <title>Old title</title>
  <g fill="none" stroke="currentColor">
    <g><path d="M1 1h2"/><path d="M5 5h2"/></g>
    <g opacity=".5"><path stroke-width="2" d="M3 3v4"/></g>
    <g><metadata>editor</metadata></g>
  </g>
  <circle r="2" cx="12" cy="12"/>
</svg>"#;

    const PATHS: &str = r#"<svg viewBox="0 0 16 16" data-icon-source="old:icon" aria-hidden="false"><path d="M0 0h4"/><path d="M4 4h4"/><desc>a &amp; b</desc><path fill="none" d="M8 8h4"/><path fill="none" d="M12 12h4"/></svg>"#;

    #[test]
    fn test_transform_is_idempotent() {
        for fixture in [LUCIDE_CHECK, NESTED, PATHS] {
            for sort_attributes in [true, false] {
                for a11y in A11yStrategy::all() {
                    for source in [None, Some("lucide:check".to_string())] {
                        let options = TransformOptions {
                            optimize: OptimizeOptions {
                                sort_attributes,
                                ..Default::default()
                            },
                            a11y: *a11y,
                            source,
                            title: Some("Check".to_string()),
                        };
                        let once = transform(&SvgDocument::new(fixture), &name("Check"), &options).unwrap();
                        let twice = transform(&once, &name("Check"), &options).unwrap();
                        assert_eq!(
                            once, twice,
                            "strategy {a11y}, sorted {sort_attributes}, fixture {fixture}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_transform_strips_source_when_untracked() {
        let tracked = TransformOptions {
            source: Some("lucide:check".to_string()),
            ..Default::default()
        };
        let once = transform(&SvgDocument::new(LUCIDE_CHECK), &name("Check"), &tracked).unwrap();
        let untracked = transform(&once, &name("Check"), &TransformOptions::default()).unwrap();
        assert!(!untracked.as_str().contains(SOURCE_ATTRIBUTE));
    }

    #[test]
    fn test_title_is_first_child() {
        let options = TransformOptions {
            title: Some("Arrow Right".to_string()),
            ..Default::default()
        };
        let out = transform(&SvgDocument::new(LUCIDE_CHECK), &name("ArrowRight"), &options).unwrap();
        assert!(out.as_str().contains(r#"viewBox="0 0 24 24"><title>Arrow Right</title><path"#));
    }

    #[test]
    fn test_img_label_uses_component_name() {
        let options = TransformOptions {
            a11y: A11yStrategy::Img,
            ..Default::default()
        };
        let out = transform(&SvgDocument::new(LUCIDE_CHECK), &name("ArrowRight"), &options).unwrap();
        assert!(out.as_str().contains(r#"aria-label="Arrow Right""#));
        assert!(out.as_str().contains(r#"role="img""#));
    }

    #[test]
    fn test_malformed_svg() {
        for markup in [
            "",
            "not svg at all",
            "<div></div>",
            "<svg></svg><svg></svg>",
            "<svg><path></svg>",
            "<g><svg></svg></g>",
        ] {
            let err = transform(&SvgDocument::new(markup), &name("Bad"), &TransformOptions::default())
                .unwrap_err();
            assert!(matches!(err, IconError::MalformedSvg(_)), "{markup:?}");
        }
    }
}
