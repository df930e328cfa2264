//! @acp:module "Merge Targets"
//! @acp:summary "Accumulators a batch folds icons into: a barrel document or an icon folder"
//! @acp:domain merge
//! @acp:layer service

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use crate::component::{ComponentDefinition, Dialect};
use crate::document::{EntryValue, ModuleDocument};
use crate::error::{IconError, Result};
use crate::folder;
use crate::icon::ComponentName;

use super::PendingWrite;

/// How an icon landed in the target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeKind {
    Added,
    Replaced,
}

/// @acp:summary "In-memory state a batch is folded into"
pub trait MergeTarget {
    /// Whether `name` is already present
    fn contains(&self, name: &ComponentName) -> Result<bool>;

    /// Reject names this target cannot hold
    fn validate(&self, _name: &ComponentName) -> Result<()> {
        Ok(())
    }

    /// Insert or replace a component; the kind reflects the state at call time
    fn upsert(&mut self, definition: &ComponentDefinition) -> Result<MergeKind>;

    /// Files to persist for the accumulated state
    fn finish(&self) -> Result<Vec<PendingWrite>>;
}

/// @acp:summary "Single-file barrel with inline component definitions"
#[derive(Debug, Clone)]
pub struct BarrelTarget {
    path: PathBuf,
    document: ModuleDocument,
    dialect: Dialect,
}

impl BarrelTarget {
    /// Parse the existing barrel; a malformed module aborts before any fetch
    pub fn new(path: impl Into<PathBuf>, text: &str, dialect: Dialect) -> Result<Self> {
        Ok(Self {
            path: path.into(),
            document: ModuleDocument::parse(text)?,
            dialect,
        })
    }

    pub fn document(&self) -> &ModuleDocument {
        &self.document
    }
}

impl MergeTarget for BarrelTarget {
    fn contains(&self, name: &ComponentName) -> Result<bool> {
        self.document.contains(name.as_str())
    }

    fn upsert(&mut self, definition: &ComponentDefinition) -> Result<MergeKind> {
        let value = EntryValue::Inline(definition.expression().to_string());
        if let Some(import) = self.dialect.type_import() {
            self.document.ensure_import(import)?;
        }

        if self.document.contains(definition.name.as_str())? {
            self.document.replace(&definition.name, &value)?;
            Ok(MergeKind::Replaced)
        } else {
            match self.document.insert_sorted(&definition.name, &value) {
                Ok(()) => Ok(MergeKind::Added),
                // A reference key without its import is not listed but still owns the slot
                Err(IconError::DuplicateEntry(_)) => {
                    self.document.replace(&definition.name, &value)?;
                    Ok(MergeKind::Added)
                }
                Err(err) => Err(err),
            }
        }
    }

    fn finish(&self) -> Result<Vec<PendingWrite>> {
        Ok(vec![PendingWrite {
            path: self.path.clone(),
            contents: self.document.render(),
        }])
    }
}

/// @acp:summary "Folder of per-icon modules with a regenerated barrel"
#[derive(Debug, Clone)]
pub struct FolderTarget {
    dir: PathBuf,
    dialect: Dialect,
    names: BTreeSet<ComponentName>,
    pending: BTreeMap<ComponentName, String>,
}

impl FolderTarget {
    /// Start from the file names currently in `dir`
    pub fn new<S: AsRef<str>>(dir: impl Into<PathBuf>, file_names: &[S], dialect: Dialect) -> Self {
        let names = folder::scan_existing(file_names, dialect.component_extension());
        Self {
            dir: dir.into(),
            dialect,
            names: names.into_iter().collect(),
            pending: BTreeMap::new(),
        }
    }

    fn file(&self, name: impl AsRef<Path>) -> PathBuf {
        self.dir.join(name)
    }
}

impl MergeTarget for FolderTarget {
    fn contains(&self, name: &ComponentName) -> Result<bool> {
        Ok(self.names.contains(name))
    }

    fn validate(&self, name: &ComponentName) -> Result<()> {
        if name.is_reserved_file_stem() {
            return Err(IconError::ReservedName(name.to_string()));
        }
        Ok(())
    }

    fn upsert(&mut self, definition: &ComponentDefinition) -> Result<MergeKind> {
        let module = definition.to_module()?;
        self.pending.insert(definition.name.clone(), module);

        if self.names.insert(definition.name.clone()) {
            Ok(MergeKind::Added)
        } else {
            Ok(MergeKind::Replaced)
        }
    }

    fn finish(&self) -> Result<Vec<PendingWrite>> {
        let mut writes: Vec<PendingWrite> = self
            .pending
            .iter()
            .map(|(name, contents)| PendingWrite {
                path: self.file(folder::component_file_name(name, self.dialect)),
                contents: contents.clone(),
            })
            .collect();

        let names: Vec<ComponentName> = self.names.iter().cloned().collect();
        writes.push(PendingWrite {
            path: self.file(folder::barrel_file_name(self.dialect)),
            contents: folder::build_barrel(&names, self.dialect.typescript),
        });

        if let (Some(props_type), Some(import)) = (self.dialect.props_type(), self.dialect.type_import()) {
            writes.push(PendingWrite {
                path: self.file(folder::TYPES_FILE),
                contents: folder::build_types_file(props_type, import)?,
            });
        }

        Ok(writes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{synthesize, Framework};
    use crate::svg::SvgDocument;

    fn definition(name: &str, dialect: Dialect) -> ComponentDefinition {
        synthesize(
            &SvgDocument::new("<svg><path d=\"M0 0\"/></svg>"),
            &ComponentName::parse(name).unwrap(),
            dialect,
        )
        .unwrap()
    }

    #[test]
    fn test_barrel_adds_type_import_once() {
        let dialect = Dialect::new(Framework::React, true);
        let mut target = BarrelTarget::new("icons.tsx", "export const icons = {\n};\n", dialect).unwrap();

        assert_eq!(target.upsert(&definition("Home", dialect)).unwrap(), MergeKind::Added);
        assert_eq!(target.upsert(&definition("Home", dialect)).unwrap(), MergeKind::Replaced);

        let text = target.finish().unwrap().remove(0).contents;
        assert_eq!(text.matches("import type { SVGProps }").count(), 1);
        assert!(text.contains("  Home: (props: SVGProps<SVGSVGElement>) => (<svg {...props}>"));
    }

    #[test]
    fn test_folder_rejects_reserved_names() {
        let target = FolderTarget::new("icons", &["index.ts"], Dialect::new(Framework::React, true));
        let err = target.validate(&ComponentName::parse("Index").unwrap()).unwrap_err();
        assert!(matches!(err, IconError::ReservedName(_)));
    }

    #[test]
    fn test_folder_writes_component_barrel_and_types() {
        let dialect = Dialect::new(Framework::Preact, true);
        let mut target = FolderTarget::new("src/icons", &["Alarm.tsx", "index.ts", "types.ts"], dialect);
        assert!(target.contains(&ComponentName::parse("Alarm").unwrap()).unwrap());

        target.upsert(&definition("Check", dialect)).unwrap();
        let paths: Vec<PathBuf> = target.finish().unwrap().into_iter().map(|w| w.path).collect();
        assert_eq!(
            paths,
            vec![
                PathBuf::from("src/icons/Check.tsx"),
                PathBuf::from("src/icons/index.ts"),
                PathBuf::from("src/icons/types.ts"),
            ]
        );
    }

    #[test]
    fn test_folder_javascript_has_no_types_file() {
        let dialect = Dialect::new(Framework::Solid, false);
        let mut target = FolderTarget::new("icons", &[] as &[&str], dialect);
        target.upsert(&definition("Check", dialect)).unwrap();

        let writes = target.finish().unwrap();
        assert_eq!(writes.len(), 2);
        assert!(writes[1].contents.contains("import Check from \"./Check\";"));
        assert!(!writes[1].contents.contains("export type"));
    }
}
