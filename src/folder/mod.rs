//! @acp:module "Folder Mode"
//! @acp:summary "One component file per icon plus a regenerated barrel and shared types file"
//! @acp:domain folder
//! @acp:layer service
//!
//! The barrel is never patched. It is rebuilt from the full set of component
//! files every time, so it cannot drift from the directory contents.

use std::path::Path;

use crate::component::templates::{self, PROPS_TYPE_NAME};
use crate::component::Dialect;
use crate::document::{type_line, GENERATED_HEADER};
use crate::error::Result;
use crate::icon::ComponentName;

/// Export map name used by generated barrels
pub const MAP_NAME: &str = "icons";

/// Name union type exported by typed barrels
pub const NAME_TYPE: &str = "IconName";

/// Shared types file (TypeScript only)
pub const TYPES_FILE: &str = "types.ts";

/// Barrel file name for `dialect` (`index.ts`/`index.js`)
pub fn barrel_file_name(dialect: Dialect) -> String {
    format!("index.{}", dialect.module_extension())
}

/// Component file name for `name` (`Check.tsx`)
pub fn component_file_name(name: &ComponentName, dialect: Dialect) -> String {
    format!("{name}.{}", dialect.component_extension())
}

/// Component names present in a folder listing
///
/// Keeps files with extension `ext`, drops reserved stems and stems that are
/// not valid component names, and returns the rest sorted.
pub fn scan_existing<S: AsRef<str>>(file_names: &[S], ext: &str) -> Vec<ComponentName> {
    let mut names: Vec<ComponentName> = file_names
        .iter()
        .map(|file| Path::new(file.as_ref()))
        .filter(|path| path.extension().is_some_and(|e| e == ext))
        .filter_map(|path| path.file_stem()?.to_str())
        .filter_map(|stem| ComponentName::parse(stem).ok())
        .filter(|name| !name.is_reserved_file_stem())
        .collect();

    names.sort();
    names.dedup();
    names
}

/// Regenerate the barrel from the full set of names
pub fn build_barrel(names: &[ComponentName], typed: bool) -> String {
    let mut names = names.to_vec();
    names.sort();
    names.dedup();

    let mut lines = vec![GENERATED_HEADER.to_string(), String::new()];

    if !names.is_empty() {
        lines.extend(
            names
                .iter()
                .map(|name| format!("import {name} from \"./{name}\";")),
        );
        lines.push(String::new());
    }

    lines.push(format!("export const {MAP_NAME} = {{"));
    lines.extend(names.iter().map(|name| format!("  {name},")));
    lines.push("};".to_string());

    if typed {
        let keys: Vec<&str> = names.iter().map(ComponentName::as_str).collect();
        lines.push(String::new());
        lines.push(type_line(NAME_TYPE, &keys));
        lines.push(format!(
            "export type {{ {PROPS_TYPE_NAME} }} from \"./types\";"
        ));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Render the shared types file
pub fn build_types_file(props_type: &str, import_stmt: &str) -> Result<String> {
    templates::render_types(props_type, import_stmt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::Framework;
    use crate::document::list_entries;
    use pretty_assertions::assert_eq;

    fn names(list: &[&str]) -> Vec<ComponentName> {
        list.iter().map(|n| ComponentName::parse(n).unwrap()).collect()
    }

    #[test]
    fn test_scan_existing_filters_and_sorts() {
        let files = [
            "index.ts",
            "types.ts",
            "Home.tsx",
            "Check.tsx",
            "Index.tsx",
            "notes.md",
            "lowercase.tsx",
            "Check.jsx",
        ];
        assert_eq!(scan_existing(&files, "tsx"), names(&["Check", "Home"]));
    }

    #[test]
    fn test_build_barrel_typed() {
        let out = build_barrel(&names(&["Home", "Check"]), true);
        assert_eq!(
            out,
            format!(
                concat!(
                    "{}\n\n",
                    "import Check from \"./Check\";\n",
                    "import Home from \"./Home\";\n",
                    "\n",
                    "export const icons = {{\n",
                    "  Check,\n",
                    "  Home,\n",
                    "}};\n",
                    "\n",
                    "export type IconName = \"Check\" | \"Home\";\n",
                    "export type {{ IconProps }} from \"./types\";\n"
                ),
                GENERATED_HEADER
            )
        );
        assert_eq!(list_entries(&out).unwrap(), vec!["Check", "Home"]);
    }

    #[test]
    fn test_build_barrel_empty() {
        let out = build_barrel(&[], true);
        assert!(out.contains("export const icons = {\n};\n"));
        assert!(out.contains("export type IconName = never;\n"));
        assert!(list_entries(&out).unwrap().is_empty());

        let untyped = build_barrel(&[], false);
        assert!(!untyped.contains("export type"));
    }

    #[test]
    fn test_file_names() {
        let dialect = Dialect::new(Framework::React, false);
        assert_eq!(barrel_file_name(dialect), "index.js");
        assert_eq!(
            component_file_name(&ComponentName::parse("Check").unwrap(), dialect),
            "Check.jsx"
        );
    }

    #[test]
    fn test_build_types_file() {
        let out = build_types_file(
            "SVGProps<SVGSVGElement>",
            r#"import type { SVGProps } from "react";"#,
        )
        .unwrap();
        assert!(out.ends_with("export type IconProps = SVGProps<SVGSVGElement>;\n"));
    }
}
