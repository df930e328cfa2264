//! @acp:module "Configuration"
//! @acp:summary "Project configuration loading, schema validation and defaults"
//! @acp:domain cli
//! @acp:layer config

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::component::{Dialect, Framework};
use crate::error::{IconError, Result};
use crate::registry::DEFAULT_REGISTRY;
use crate::svg::A11yStrategy;

/// Config file name, looked up in the project root
pub const CONFIG_FILE: &str = "iconsmith.config.json";

const SCHEMA: &str = include_str!("../../schemas/v1/config.schema.json");

static SCHEMA_VALUE: LazyLock<Value> =
    LazyLock::new(|| serde_json::from_str(SCHEMA).unwrap_or(Value::Bool(true)));

fn default_config_schema() -> String {
    "https://iconsmith.dev/schemas/v1/config.schema.json".to_string()
}

fn default_output() -> PathBuf {
    PathBuf::from("src/icons.tsx")
}

fn default_true() -> bool {
    true
}

fn default_registry() -> String {
    DEFAULT_REGISTRY.to_string()
}

/// @acp:summary "Project configuration (schema-compliant)"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// JSON Schema URL for editor validation
    #[serde(rename = "$schema", default = "default_config_schema")]
    pub schema: String,

    /// Barrel file or icon folder, relative to the project root
    #[serde(default = "default_output")]
    pub output: PathBuf,

    #[serde(default)]
    pub framework: Framework,

    #[serde(default = "default_true")]
    pub typescript: bool,

    /// Embed `data-icon-source` in generated icons
    #[serde(default)]
    pub track_source: bool,

    #[serde(default)]
    pub a11y: A11yStrategy,

    /// Inject a `<title>` into every icon
    #[serde(default)]
    pub titles: bool,

    /// Iconify-compatible API base URL
    #[serde(default = "default_registry")]
    pub registry: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema: default_config_schema(),
            output: default_output(),
            framework: Framework::default(),
            typescript: true,
            track_source: false,
            a11y: A11yStrategy::default(),
            titles: false,
            registry: default_registry(),
        }
    }
}

/// Shape of the generated artifact, decided by the configured output path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputShape {
    /// One module holding every icon inline
    Barrel(PathBuf),
    /// One file per icon plus a generated `index` and `types`
    Folder(PathBuf),
}

impl Config {
    /// @acp:summary "Load and validate config from a file"
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(IconError::ConfigMissing(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path).map_err(|e| IconError::io(path, e))?;
        Self::from_json(&content)
    }

    /// @acp:summary "Parse config text, reporting every schema violation"
    pub fn from_json(content: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(content)
            .map_err(|e| IconError::ConfigInvalid(format!("not valid JSON: {e}")))?;

        let validator = jsonschema::validator_for(&SCHEMA_VALUE)
            .map_err(|e| IconError::ConfigInvalid(format!("invalid schema: {e}")))?;
        let violations: Vec<String> = validator
            .iter_errors(&value)
            .map(|e| {
                let location = e.instance_path.to_string();
                if location.is_empty() {
                    e.to_string()
                } else {
                    format!("{location}: {e}")
                }
            })
            .collect();
        if !violations.is_empty() {
            return Err(IconError::ConfigInvalid(violations.join("; ")));
        }

        serde_json::from_value(value).map_err(|e| IconError::ConfigInvalid(e.to_string()))
    }

    /// @acp:summary "Save config to a file"
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut content = serde_json::to_string_pretty(self)?;
        content.push('\n');
        std::fs::write(path, content).map_err(|e| IconError::io(path, e))
    }

    pub fn dialect(&self) -> Dialect {
        Dialect::new(self.framework, self.typescript)
    }

    /// A path with an extension is a barrel file, anything else is a folder
    pub fn output_shape(&self) -> OutputShape {
        if self.output.extension().is_some() {
            OutputShape::Barrel(self.output.clone())
        } else {
            OutputShape::Folder(self.output.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config = Config::from_json(r#"{ "output": "src/icons" }"#).unwrap();
        assert_eq!(config.output, PathBuf::from("src/icons"));
        assert_eq!(config.framework, Framework::React);
        assert!(config.typescript);
        assert!(!config.track_source);
        assert_eq!(config.registry, DEFAULT_REGISTRY);
        assert_eq!(config.output_shape(), OutputShape::Folder(PathBuf::from("src/icons")));
    }

    #[test]
    fn test_camel_case_fields() {
        let config = Config::from_json(
            r#"{ "output": "icons.jsx", "framework": "solid", "typescript": false, "trackSource": true, "a11y": "img" }"#,
        )
        .unwrap();
        assert!(config.track_source);
        assert_eq!(config.a11y, A11yStrategy::Img);
        assert_eq!(config.dialect(), Dialect::new(Framework::Solid, false));
        assert_eq!(config.output_shape(), OutputShape::Barrel(PathBuf::from("icons.jsx")));
    }

    #[test]
    fn test_reports_every_violation() {
        let err = Config::from_json(r#"{ "framework": "vue", "typescript": "yes", "colour": 1 }"#)
            .unwrap_err();
        let IconError::ConfigInvalid(message) = err else {
            panic!("expected ConfigInvalid, got {err:?}");
        };
        assert!(message.contains("/framework"), "{message}");
        assert!(message.contains("/typescript"), "{message}");
        assert!(message.contains("colour"), "{message}");
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = Config::load(dir.path().join(CONFIG_FILE)).unwrap_err();
        assert!(matches!(err, IconError::ConfigMissing(_)));
    }

    #[test]
    fn test_save_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        let config = Config {
            track_source: true,
            ..Default::default()
        };
        config.save(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"trackSource\": true"));
        assert!(text.contains("\"$schema\""));
        assert_eq!(Config::load(&path).unwrap(), config);
    }
}
