//! @acp:module "Module Document"
//! @acp:summary "Region-level editing of a generated icon barrel: imports, export map, name union type"
//! @acp:domain document
//! @acp:layer model
//!
//! The document is treated as lines with three recognised regions. Everything
//! else is carried through untouched, including the line ending style and the
//! presence of a final newline.
//!
//! ```text
//! import type { SVGProps } from "react";      <- reserved import
//! import Check from "./Check";                <- binding (relative path)
//!
//! export const icons = {                      <- export map
//!   Check,                                    <- reference entry
//!   Home: (props) => (<svg {...props} />),    <- inline entry
//! };
//!
//! export type IconName = "Check" | "Home";    <- derived type, always regenerated
//! ```
//!
//! Map entries start at exactly two spaces of indentation. Deeper indented
//! lines continue the entry above them.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{IconError, Result};
use crate::icon::ComponentName;

/// First line of every document created by `iconsmith init`
pub const GENERATED_HEADER: &str =
    "// Generated by iconsmith. Entries are kept sorted; use `iconsmith add` to change them.";

static MAP_OPEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^export\s+const\s+([A-Za-z_$][\w$]*)\s*(?::[^=]*)?=\s*\{\s*$").unwrap()
});

static MAP_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\}\s*(?:as\s+const\s*)?;?\s*$").unwrap());

static ENTRY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^  ([A-Za-z_$][\w$]*)\s*(?:(:)|,?\s*$)").unwrap());

static BINDING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^import\s+(?:\{\s*([A-Za-z_$][\w$]*)\s*\}|([A-Za-z_$][\w$]*))\s+from\s+["'](\.{1,2}/[^"']*)["'];?\s*$"#,
    )
    .unwrap()
});

static TYPE_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^export\s+type\s+([A-Za-z_$][\w$]*)\s*=").unwrap());

static STRING_LITERAL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"^"[^"]*"$"#).unwrap());

/// @acp:summary "Value of a map entry"
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryValue {
    /// Component expression written directly into the map
    Inline(String),
    /// Map key referring to an import binding from `path`
    Reference { path: String },
}

#[derive(Debug)]
struct EntrySpan {
    name: String,
    start: usize,
    end: usize,
    inline: bool,
}

#[derive(Debug)]
struct Binding {
    name: String,
    line: usize,
    path: Range<usize>,
}

#[derive(Debug)]
struct TypeRegion {
    name: String,
    start: usize,
    end: usize,
}

/// Line indices of every region, recomputed after each edit
#[derive(Debug)]
struct Layout {
    map_open: usize,
    map_close: usize,
    entries: Vec<EntrySpan>,
    bindings: Vec<Binding>,
    last_import: Option<usize>,
    first_import: Option<usize>,
    type_region: Option<TypeRegion>,
}

impl Layout {
    fn entry(&self, name: &str) -> Option<&EntrySpan> {
        self.entries.iter().find(|e| e.name == name)
    }

    fn binding(&self, name: &str) -> Option<&Binding> {
        self.bindings.iter().find(|b| b.name == name)
    }

    fn listed(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter(|e| e.inline || self.binding(&e.name).is_some())
            .map(|e| e.name.clone())
            .collect()
    }
}

/// @acp:summary "A parsed barrel module"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDocument {
    lines: Vec<String>,
    line_ending: &'static str,
    trailing_newline: bool,
}

impl ModuleDocument {
    /// Parse `text`, failing with `MalformedModule` when it has no export map
    pub fn parse(text: &str) -> Result<Self> {
        let line_ending = if text.contains("\r\n") { "\r\n" } else { "\n" };
        let trailing_newline = text.ends_with('\n');

        let mut lines: Vec<String> = text
            .split('\n')
            .map(|line| match line_ending {
                "\r\n" => line.strip_suffix('\r').unwrap_or(line).to_string(),
                _ => line.to_string(),
            })
            .collect();
        if trailing_newline {
            lines.pop();
        }

        let document = Self {
            lines,
            line_ending,
            trailing_newline,
        };
        document.layout()?;
        Ok(document)
    }

    /// Render the initial document: header, reserved imports, an empty map and,
    /// when `typed`, a `never` name type
    pub fn empty(map_name: &str, type_name: &str, imports: &[&str], typed: bool) -> Self {
        let mut lines = vec![GENERATED_HEADER.to_string(), String::new()];
        if !imports.is_empty() {
            lines.extend(imports.iter().map(|line| line.to_string()));
            lines.push(String::new());
        }
        lines.push(format!("export const {map_name} = {{"));
        lines.push("};".to_string());
        if typed {
            lines.push(String::new());
            lines.push(type_line::<&str>(type_name, &[]));
        }

        Self {
            lines,
            line_ending: "\n",
            trailing_newline: true,
        }
    }

    /// Entry names in map order
    ///
    /// Inline entries always count; reference entries count only when their
    /// import binding exists.
    pub fn entries(&self) -> Result<Vec<String>> {
        Ok(self.layout()?.listed())
    }

    pub fn contains(&self, name: &str) -> Result<bool> {
        Ok(self.entries()?.iter().any(|entry| entry == name))
    }

    /// Current value of the entry `name`
    pub fn entry_value(&self, name: &str) -> Result<Option<EntryValue>> {
        let layout = self.layout()?;
        let Some(span) = layout.entry(name) else {
            return Ok(None);
        };

        if !span.inline {
            return Ok(layout.binding(name).map(|binding| EntryValue::Reference {
                path: self.lines[binding.line][binding.path.clone()].to_string(),
            }));
        }

        let text = self.lines[span.start..span.end].join(self.line_ending);
        let expression = text
            .trim_start()
            .strip_prefix(name)
            .map(|rest| rest.trim_start().trim_start_matches(':'))
            .unwrap_or_default()
            .trim()
            .trim_end_matches(',')
            .trim_end();
        Ok(Some(EntryValue::Inline(expression.to_string())))
    }

    /// Insert `name` at its sorted position among the existing keys
    pub fn insert_sorted(&mut self, name: &ComponentName, value: &EntryValue) -> Result<()> {
        check_single_line(name, value)?;
        let layout = self.layout()?;
        if layout.entry(name.as_str()).is_some() {
            return Err(IconError::DuplicateEntry(name.to_string()));
        }

        let line = entry_line(name, value);
        match layout.entries.iter().find(|e| e.name.as_str() > name.as_str()) {
            Some(next) => self.lines.insert(next.start, line),
            None => match layout.entries.last() {
                Some(last) => {
                    self.ensure_trailing_comma(last.end - 1);
                    self.lines.insert(last.end, line);
                }
                None => self.lines.insert(layout.map_close, line),
            },
        }

        if let EntryValue::Reference { path } = value {
            self.upsert_binding(name, path)?;
        }
        self.regenerate_type()
    }

    /// Substitute the entry `name` in place, leaving every other line untouched
    pub fn replace(&mut self, name: &ComponentName, value: &EntryValue) -> Result<()> {
        check_single_line(name, value)?;
        let layout = self.layout()?;
        let span = layout
            .entry(name.as_str())
            .ok_or_else(|| IconError::EntryNotFound(name.to_string()))?;

        self.lines
            .splice(span.start..span.end, std::iter::once(entry_line(name, value)));

        match value {
            EntryValue::Reference { path } => self.upsert_binding(name, path)?,
            EntryValue::Inline(_) => self.remove_binding(name.as_str())?,
        }
        self.regenerate_type()
    }

    /// Delete the entry `name` and its import binding
    pub fn remove(&mut self, name: &ComponentName) -> Result<()> {
        let layout = self.layout()?;
        let span = layout
            .entry(name.as_str())
            .ok_or_else(|| IconError::EntryNotFound(name.to_string()))?;

        self.lines.drain(span.start..span.end);
        self.remove_binding(name.as_str())?;
        self.regenerate_type()
    }

    /// Add a reserved import line (such as a type import) unless already present
    pub fn ensure_import(&mut self, import: &str) -> Result<()> {
        let layout = self.layout()?;
        let present = self.lines[..layout.map_open]
            .iter()
            .any(|line| line.trim() == import.trim());
        if present {
            return Ok(());
        }

        match layout.first_import {
            Some(index) => self.lines.insert(index, import.to_string()),
            None => {
                self.lines.insert(layout.map_open, String::new());
                self.lines.insert(layout.map_open, import.to_string());
            }
        }
        Ok(())
    }

    /// Serialize back to text with the original line ending and final newline
    pub fn render(&self) -> String {
        let mut out = self.lines.join(self.line_ending);
        if self.trailing_newline {
            out.push_str(self.line_ending);
        }
        out
    }

    fn layout(&self) -> Result<Layout> {
        let lines = &self.lines;

        let map_open = lines
            .iter()
            .position(|line| MAP_OPEN.is_match(line))
            .ok_or_else(|| {
                IconError::MalformedModule("no `export const <name> = {` block found".to_string())
            })?;
        let map_close = lines[map_open + 1..]
            .iter()
            .position(|line| MAP_CLOSE.is_match(line))
            .map(|offset| map_open + 1 + offset)
            .ok_or_else(|| IconError::MalformedModule("export map is never closed".to_string()))?;

        let mut entries: Vec<EntrySpan> = Vec::new();
        for (index, line) in lines.iter().enumerate().take(map_close).skip(map_open + 1) {
            if let Some(caps) = ENTRY.captures(line) {
                entries.push(EntrySpan {
                    name: caps[1].to_string(),
                    start: index,
                    end: index + 1,
                    inline: caps.get(2).is_some(),
                });
            } else if !line.trim().is_empty() {
                if let Some(last) = entries.last_mut() {
                    last.end = index + 1;
                }
            }
        }

        let mut bindings = Vec::new();
        let mut first_import = None;
        let mut last_import = None;
        for (index, line) in lines.iter().enumerate().take(map_open) {
            if !line.starts_with("import") {
                continue;
            }
            first_import.get_or_insert(index);
            last_import = Some(index);

            if let Some(caps) = BINDING.captures(line) {
                let name = caps.get(1).or_else(|| caps.get(2)).map(|m| m.as_str());
                if let (Some(name), Some(path)) = (name, caps.get(3)) {
                    bindings.push(Binding {
                        name: name.to_string(),
                        line: index,
                        path: path.range(),
                    });
                }
            }
        }

        let type_region = (0..lines.len())
            .filter(|index| !(map_open..=map_close).contains(index))
            .find_map(|index| type_region_at(lines, index));

        Ok(Layout {
            map_open,
            map_close,
            entries,
            bindings,
            last_import,
            first_import,
            type_region,
        })
    }

    fn ensure_trailing_comma(&mut self, index: usize) {
        let line = &mut self.lines[index];
        if !line.trim_end().ends_with(',') {
            line.truncate(line.trim_end().len());
            line.push(',');
        }
    }

    fn upsert_binding(&mut self, name: &ComponentName, path: &str) -> Result<()> {
        let layout = self.layout()?;
        if let Some(binding) = layout.binding(name.as_str()) {
            self.lines[binding.line].replace_range(binding.path.clone(), path);
            return Ok(());
        }

        let line = format!("import {name} from \"{path}\";");
        let index = match layout.bindings.iter().find(|b| b.name.as_str() > name.as_str()) {
            Some(next) => next.line,
            None => match (layout.bindings.last(), layout.last_import) {
                (Some(last), _) => last.line + 1,
                (None, Some(last_import)) => last_import + 1,
                (None, None) => {
                    self.lines.insert(layout.map_open, String::new());
                    layout.map_open
                }
            },
        };
        self.lines.insert(index, line);
        Ok(())
    }

    fn remove_binding(&mut self, name: &str) -> Result<()> {
        if let Some(binding) = self.layout()?.binding(name) {
            self.lines.remove(binding.line);
        }
        Ok(())
    }

    fn regenerate_type(&mut self) -> Result<()> {
        let layout = self.layout()?;
        if let Some(region) = &layout.type_region {
            let line = type_line(&region.name, &layout.listed());
            self.lines.splice(region.start..region.end, std::iter::once(line));
        }
        Ok(())
    }
}

impl std::fmt::Display for ModuleDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}

/// A derived name type: `export type X = "A" | "B";` or `never`, possibly over several lines
fn type_region_at(lines: &[String], start: usize) -> Option<TypeRegion> {
    let caps = TYPE_START.captures(&lines[start])?;
    let end = (start..lines.len()).find(|&i| lines[i].trim_end().ends_with(';'))? + 1;

    let statement = lines[start..end].join(" ");
    let body = statement.split_once('=')?.1.trim().trim_end_matches(';').trim();

    let is_name_union = body == "never" || {
        let mut members = body.split('|').map(str::trim).filter(|m| !m.is_empty()).peekable();
        members.peek().is_some() && members.all(|m| STRING_LITERAL.is_match(m))
    };

    is_name_union.then(|| TypeRegion {
        name: caps[1].to_string(),
        start,
        end,
    })
}

/// Continuation lines of an inline value could be read back as entries
fn check_single_line(name: &ComponentName, value: &EntryValue) -> Result<()> {
    match value {
        EntryValue::Inline(expression) if expression.contains(['\n', '\r']) => {
            Err(IconError::MultilineEntry(name.to_string()))
        }
        _ => Ok(()),
    }
}

fn entry_line(name: &ComponentName, value: &EntryValue) -> String {
    match value {
        EntryValue::Inline(expression) => format!("  {name}: {expression},"),
        EntryValue::Reference { .. } => format!("  {name},"),
    }
}

/// `export type <type_name> = "A" | "B";`, or `never` for no names
pub fn type_line<S: AsRef<str>>(type_name: &str, names: &[S]) -> String {
    if names.is_empty() {
        return format!("export type {type_name} = never;");
    }
    let union = names
        .iter()
        .map(|name| serde_json::Value::String(name.as_ref().to_string()).to_string())
        .collect::<Vec<_>>()
        .join(" | ");
    format!("export type {type_name} = {union};")
}

/// Entry names of `text` in map order
pub fn list_entries(text: &str) -> Result<Vec<String>> {
    ModuleDocument::parse(text)?.entries()
}

/// Insert `name` into `text` at its sorted position
pub fn insert_sorted(text: &str, name: &ComponentName, value: &EntryValue) -> Result<String> {
    let mut document = ModuleDocument::parse(text)?;
    document.insert_sorted(name, value)?;
    Ok(document.render())
}

/// Replace the entry `name` in `text` in place
pub fn replace(text: &str, name: &ComponentName, value: &EntryValue) -> Result<String> {
    let mut document = ModuleDocument::parse(text)?;
    document.replace(name, value)?;
    Ok(document.render())
}

/// Remove the entry `name` from `text`
pub fn remove(text: &str, name: &ComponentName) -> Result<String> {
    let mut document = ModuleDocument::parse(text)?;
    document.remove(name)?;
    Ok(document.render())
}
