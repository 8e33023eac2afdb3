use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::codegen::{DdlOptions, ModelOptions};
use crate::error::{SchemaGenError, SchemaGenResult};

/// Generator settings, loaded from a JSON file and overridden by CLI flags
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Model class naming
    pub model: ModelOptions,
    /// DDL generation options
    pub ddl: DdlOptions,
    /// Directory artifacts are written to
    pub output_directory: PathBuf,
    /// Database flavour passed to exporters
    pub db_type: String,
    /// Exporter used for documentation output
    pub export_type: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            model: ModelOptions::default(),
            ddl: DdlOptions::default(),
            output_directory: PathBuf::from("./schemagen_output"),
            db_type: "SqlServer".to_string(),
            export_type: "Excel".to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Load a configuration file; missing keys keep their defaults
    pub fn load(path: &Path) -> SchemaGenResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    pub fn validate(&self) -> SchemaGenResult<()> {
        if self.model.namespace.trim().is_empty() {
            return Err(SchemaGenError::config("model namespace must not be empty"));
        }
        if !self.ddl.table_description_template.has_placeholders(2) {
            return Err(SchemaGenError::config(
                "table description template needs placeholders {0} and {1}",
            ));
        }
        if !self.ddl.column_description_template.has_placeholders(3) {
            return Err(SchemaGenError::config(
                "column description template needs placeholders {0}, {1} and {2}",
            ));
        }
        if self.export_type.trim().is_empty() {
            return Err(SchemaGenError::config("export type must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::StatementTemplate;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        assert!(GeneratorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "model": {{ "namespace": "Shop.Models", "class_suffix": "Entity" }}, "ddl": {{ "include_descriptions": false }} }}"#
        )
        .unwrap();

        let config = GeneratorConfig::load(file.path()).unwrap();
        assert_eq!(config.model.namespace, "Shop.Models");
        assert_eq!(config.model.class_suffix, "Entity");
        assert!(!config.ddl.include_descriptions);
        assert_eq!(config.ddl.size_fallback, 50);
        assert_eq!(config.export_type, "Excel");
    }

    #[test]
    fn test_template_without_placeholders_is_rejected() {
        let mut config = GeneratorConfig::default();
        config.ddl.column_description_template = StatementTemplate::new("COMMENT '{2}'");
        assert!(matches!(config.validate(), Err(SchemaGenError::Config { .. })));

        let mut config = GeneratorConfig::default();
        config.model.namespace = " ".to_string();
        assert!(config.validate().is_err());
    }
}
