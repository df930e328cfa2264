//! @acp:module "SVG Optimizer"
//! @acp:summary "Structural SVG cleanup: editor data, empty containers, group collapsing, path merging"
//! @acp:domain svg
//! @acp:layer service
//!
//! Every rule is idempotent, so optimizing already-optimized markup is a no-op.
//! Rules run bottom-up: children are fully optimized before their parent's child
//! list is cleaned, which lets hoisted group children merge with their new siblings.

use std::cmp::Ordering;

use super::tree::{Element, Node};

/// Attribute priority used when sorting (after `xmlns*`, before everything else)
const ATTRIBUTE_ORDER: &[&str] = &[
    "id", "width", "height", "x", "x1", "x2", "y", "y1", "y2", "cx", "cy", "r", "fill", "stroke",
    "marker", "d", "points",
];

/// Elements whose text content is meaningful
const TEXT_ELEMENTS: &[&str] = &["title", "desc", "text", "tspan", "textPath", "style"];

/// Containers removed when they end up empty
const CONTAINERS: &[&str] = &["g", "defs"];

/// Path attributes that make merging unsafe
const MERGE_BLOCKERS: &[&str] = &[
    "id",
    "style",
    "opacity",
    "fill-opacity",
    "stroke-opacity",
    "marker-start",
    "marker-mid",
    "marker-end",
    "clip-path",
    "mask",
    "filter",
];

const EDITOR_PREFIXES: &[&str] = &["sodipodi:", "inkscape:", "xmlns:sodipodi", "xmlns:inkscape"];

/// @acp:summary "Toggles for individual optimization rules"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimizeOptions {
    /// Remove `<metadata>` elements
    pub remove_metadata: bool,
    /// Remove Inkscape/Sodipodi elements and attributes
    pub remove_editor_data: bool,
    /// Remove whitespace-only text outside text elements
    pub remove_whitespace: bool,
    /// Replace attribute-less `<g>` wrappers by their children
    pub collapse_groups: bool,
    /// Remove `<g>`/`<defs>` without children or id
    pub remove_empty_containers: bool,
    /// Merge adjacent stroke-only paths with identical attributes
    pub merge_paths: bool,
    /// Sort attributes into a canonical order
    pub sort_attributes: bool,
}

impl Default for OptimizeOptions {
    fn default() -> Self {
        Self {
            remove_metadata: true,
            remove_editor_data: true,
            remove_whitespace: true,
            collapse_groups: true,
            remove_empty_containers: true,
            merge_paths: true,
            sort_attributes: true,
        }
    }
}

/// Optimize an SVG root element in place
pub fn optimize(root: &mut Element, options: &OptimizeOptions) {
    root.remove_attribute("version");
    root.remove_attribute("xml:space");
    root.remove_attribute("enable-background");
    if !root.uses_attribute_prefix("xlink:") {
        root.remove_attribute("xmlns:xlink");
    }

    let fill_none = root.attribute("fill") == Some("none");
    optimize_element(root, options, fill_none);
}

fn optimize_element(element: &mut Element, options: &OptimizeOptions, inherited_fill_none: bool) {
    if options.remove_editor_data {
        element
            .attributes
            .retain(|(key, _)| !EDITOR_PREFIXES.iter().any(|p| key.starts_with(p)));
    }

    let fill_none = match element.attribute("fill") {
        Some(fill) => fill == "none",
        None => inherited_fill_none,
    };

    for child in &mut element.children {
        if let Node::Element(child) = child {
            optimize_element(child, options, fill_none);
        }
    }

    let keeps_text = TEXT_ELEMENTS.contains(&element.name.as_str());
    let children = std::mem::take(&mut element.children);
    let mut kept = Vec::with_capacity(children.len());

    for child in children {
        match child {
            Node::Text(text) => {
                if options.remove_whitespace && !keeps_text && text.trim().is_empty() {
                    continue;
                }
                kept.push(Node::Text(text));
            }
            Node::Element(child) => {
                if options.remove_metadata && child.name == "metadata" {
                    continue;
                }
                if options.remove_editor_data && is_editor_element(&child) {
                    continue;
                }
                if options.remove_empty_containers && is_empty_container(&child) {
                    continue;
                }
                if options.collapse_groups && child.name == "g" && child.attributes.is_empty() {
                    kept.extend(child.children);
                    continue;
                }
                kept.push(Node::Element(child));
            }
        }
    }

    element.children = if options.merge_paths {
        merge_adjacent_paths(kept, fill_none)
    } else {
        kept
    };

    if options.sort_attributes {
        sort_attributes(element);
    }
}

fn is_editor_element(element: &Element) -> bool {
    element.name.starts_with("sodipodi:") || element.name.starts_with("inkscape:")
}

fn is_empty_container(element: &Element) -> bool {
    CONTAINERS.contains(&element.name.as_str())
        && element.children.is_empty()
        && element.attribute("id").is_none()
}

fn merge_adjacent_paths(children: Vec<Node>, inherited_fill_none: bool) -> Vec<Node> {
    let mut merged: Vec<Node> = Vec::with_capacity(children.len());

    for child in children {
        if let (Some(Node::Element(previous)), Node::Element(current)) = (merged.last_mut(), &child) {
            if can_merge(previous, current, inherited_fill_none) {
                let tail = current.attribute("d").unwrap_or_default().trim().to_string();
                let head = previous.attribute("d").unwrap_or_default().trim_end().to_string();
                previous.set_attribute("d", head + &tail);
                continue;
            }
        }
        merged.push(child);
    }

    merged
}

fn can_merge(previous: &Element, current: &Element, inherited_fill_none: bool) -> bool {
    if previous.name != "path" || current.name != "path" {
        return false;
    }
    if !previous.children.is_empty() || !current.children.is_empty() {
        return false;
    }
    if [previous, current]
        .iter()
        .any(|p| MERGE_BLOCKERS.iter().any(|key| p.attribute(key).is_some()))
    {
        return false;
    }

    // Overlapping filled subpaths can cancel each other out; stroke-only paths cannot.
    let fill_none = match previous.attribute("fill") {
        Some(fill) => fill == "none",
        None => inherited_fill_none,
    };
    if !fill_none {
        return false;
    }

    let starts_absolute = current
        .attribute("d")
        .is_some_and(|d| d.trim_start().starts_with('M'));
    if !starts_absolute || previous.attribute("d").is_none() {
        return false;
    }

    let without_d = |element: &Element| {
        let mut attributes: Vec<_> = element
            .attributes
            .iter()
            .filter(|(key, _)| key != "d")
            .cloned()
            .collect();
        attributes.sort();
        attributes
    };
    without_d(previous) == without_d(current)
}

/// Sort attributes: `xmlns` declarations, then the priority list, then alphabetical
pub fn sort_attributes(element: &mut Element) {
    element
        .attributes
        .sort_by(|(a, _), (b, _)| compare_attributes(a, b));
}

fn compare_attributes(a: &str, b: &str) -> Ordering {
    attribute_rank(a)
        .cmp(&attribute_rank(b))
        .then_with(|| a.cmp(b))
}

fn attribute_rank(key: &str) -> (u8, usize) {
    if key == "xmlns" {
        return (0, 0);
    }
    if key.starts_with("xmlns:") {
        return (0, 1);
    }
    match ATTRIBUTE_ORDER.iter().position(|k| *k == key) {
        Some(position) => (1, position),
        None => (2, 0),
    }
}
