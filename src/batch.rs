// Parallel rendering of model and DDL artifacts for many tables
use rayon::prelude::*;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use tracing::{info, instrument, warn};

use crate::codegen::{DdlRenderer, ModelRenderer};
use crate::config::GeneratorConfig;
use crate::error::{SchemaGenError, SchemaGenResult};
use crate::types::TableEntity;

/// A table that could not be rendered or exported
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableFailure {
    /// Table name
    pub table: String,
    /// Reason the table was skipped
    pub reason: String,
}

impl TableFailure {
    pub fn new(table: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            reason: reason.into(),
        }
    }
}

/// Text artifacts generated for one table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifacts {
    /// Source table name
    pub table: String,
    /// Generated model class name
    pub class_name: String,
    /// Model source text
    pub model: String,
    /// CREATE TABLE script
    pub ddl: String,
}

/// Result of rendering a batch of tables
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// Artifacts in input order
    pub artifacts: Vec<GeneratedArtifacts>,
    /// Tables that failed, in input order
    pub failures: Vec<TableFailure>,
}

impl BatchReport {
    pub fn is_successful(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn summary(&self) -> String {
        format!(
            "{} tables rendered, {} failed",
            self.artifacts.len(),
            self.failures.len()
        )
    }
}

/// Renders model classes and DDL for many tables, one table per task
#[derive(Debug, Clone, Default)]
pub struct BatchGenerator {
    model: ModelRenderer,
    ddl: DdlRenderer,
}

impl BatchGenerator {
    pub fn new(model: ModelRenderer, ddl: DdlRenderer) -> Self {
        Self { model, ddl }
    }

    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self::new(
            ModelRenderer::with_options(config.model.clone()),
            DdlRenderer::with_options(config.ddl.clone()),
        )
    }

    /// Render every table; a failing table never stops the others
    #[instrument(skip_all, fields(tables = tables.len()))]
    pub fn generate(&self, tables: &[TableEntity]) -> BatchReport {
        let collisions = self.name_collisions(tables);

        let results: Vec<Result<GeneratedArtifacts, TableFailure>> = tables
            .par_iter()
            .enumerate()
            .map(|(index, table)| {
                if let Some(reason) = collisions.get(&index) {
                    return Err(TableFailure::new(&table.name, reason.as_str()));
                }
                self.generate_table(table)
                    .map_err(|e| TableFailure::new(&table.name, e.to_string()))
            })
            .collect();

        let mut report = BatchReport::default();
        for result in results {
            match result {
                Ok(artifacts) => report.artifacts.push(artifacts),
                Err(failure) => {
                    warn!("Failed to render table {}: {}", failure.table, failure.reason);
                    report.failures.push(failure);
                }
            }
        }

        info!("Batch complete: {}", report.summary());
        report
    }

    /// Render the model class and DDL for one table
    pub fn generate_table(&self, table: &TableEntity) -> SchemaGenResult<GeneratedArtifacts> {
        if table.name.trim().is_empty() {
            return Err(SchemaGenError::invalid_argument("table name must not be empty"));
        }
        Ok(GeneratedArtifacts {
            table: table.name.clone(),
            class_name: self.model.class_name(table),
            model: self.model.render_model(table)?,
            ddl: self.ddl.render(table)?,
        })
    }

    /// Tables whose table name or generated class name repeats an earlier one.
    ///
    /// Both names become file names, so they are compared ignoring case.
    fn name_collisions(&self, tables: &[TableEntity]) -> HashMap<usize, String> {
        let mut table_names = HashSet::new();
        let mut class_names = HashSet::new();
        let mut collisions = HashMap::new();

        for (index, table) in tables.iter().enumerate() {
            if !table_names.insert(table.name.to_lowercase()) {
                collisions.insert(index, "duplicate table name".to_string());
                continue;
            }
            let class_name = self.model.class_name(table);
            if !class_names.insert(class_name.to_lowercase()) {
                collisions.insert(index, format!("duplicate class name '{}'", class_name));
            }
        }
        collisions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ColumnEntity;

    fn table(name: &str, data_type: &str) -> TableEntity {
        TableEntity::new("dbo", name).with_column(ColumnEntity::new("Id", data_type).as_primary_key())
    }

    #[test]
    fn test_failures_are_isolated_per_table() {
        let tables = vec![
            table("Users", "int"),
            table("Broken", "frobnicate"),
            table("Orders", "bigint"),
        ];
        let report = BatchGenerator::default().generate(&tables);

        assert!(!report.is_successful());
        let rendered: Vec<&str> = report.artifacts.iter().map(|a| a.table.as_str()).collect();
        assert_eq!(rendered, vec!["Users", "Orders"]);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].table, "Broken");
        assert!(report.failures[0].reason.contains("frobnicate"));
        assert_eq!(report.summary(), "2 tables rendered, 1 failed");
    }

    #[test]
    fn test_duplicate_and_unnamed_tables_fail() {
        let tables = vec![table("Users", "int"), table("users", "int"), table("", "int")];
        let report = BatchGenerator::default().generate(&tables);

        assert_eq!(report.artifacts.len(), 1);
        assert_eq!(report.failures[0].reason, "duplicate table name");
        assert_eq!(report.failures[1].table, "");
    }

    #[test]
    fn test_trimmed_class_name_collision_fails() {
        let generator = BatchGenerator::new(
            ModelRenderer::with_options(crate::codegen::ModelOptions {
                trim_table_prefix: true,
                ..Default::default()
            }),
            DdlRenderer::new(),
        );
        let tables = vec![table("tblUser", "int"), table("User", "int")];
        let report = generator.generate(&tables);

        assert_eq!(report.artifacts.len(), 1);
        assert_eq!(report.artifacts[0].class_name, "User");
        assert_eq!(report.failures, vec![TableFailure::new("User", "duplicate class name 'User'")]);

        // without trimming the class names differ
        let report = BatchGenerator::default().generate(&tables);
        assert!(report.is_successful());
    }

    #[test]
    fn test_model_and_ddl_agree_on_identity() {
        let report = BatchGenerator::default().generate(&[table("Users", "int")]);
        let artifacts = &report.artifacts[0];
        assert_eq!(artifacts.class_name, "Users");
        assert!(artifacts.ddl.contains("IDENTITY(1,1)"));
        assert!(artifacts.model.contains("public int Id"));
    }
}
