use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::codegen::template::{SourceWriter, STATEMENT_END};
use crate::error::{SchemaGenError, SchemaGenResult};
use crate::mapping::{map_to_host_type, to_private_field_name};
use crate::types::TableEntity;

/// Naming options for generated model classes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelOptions {
    /// Namespace the classes are declared in
    pub namespace: String,
    /// Text prepended to every class name
    pub class_prefix: String,
    /// Text appended to every class name
    pub class_suffix: String,
    /// Whether `tbl`/`tab` table prefixes are dropped from class names
    pub trim_table_prefix: bool,
}

impl Default for ModelOptions {
    fn default() -> Self {
        Self {
            namespace: "Models".to_string(),
            class_prefix: String::new(),
            class_suffix: String::new(),
            trim_table_prefix: false,
        }
    }
}

/// Renders C# model classes from table metadata
#[derive(Debug, Clone, Default)]
pub struct ModelRenderer {
    options: ModelOptions,
}

impl ModelRenderer {
    /// Create a renderer with default naming options
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ModelOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ModelOptions {
        &self.options
    }

    /// Class name for a table: prefix + table name + suffix
    pub fn class_name(&self, table: &TableEntity) -> String {
        let table_name = if self.options.trim_table_prefix {
            table.trimmed_name()
        } else {
            table.name.clone()
        };
        format!(
            "{}{}{}",
            self.options.class_prefix, table_name, self.options.class_suffix
        )
    }

    /// Render the model and rewrite each column's `data_type` to its host type.
    ///
    /// The table is only modified when rendering succeeds. After this call the
    /// columns no longer carry database type tokens, so the same entity cannot
    /// be fed to DDL rendering.
    pub fn render(&self, table: Option<&mut TableEntity>) -> SchemaGenResult<String> {
        let table = table.ok_or_else(|| SchemaGenError::invalid_argument("table metadata must not be empty"))?;
        let host_types = column_host_types(table)?;
        let text = self.write_class(table, &host_types);

        for (column, host_type) in table.columns.iter_mut().zip(host_types) {
            column.data_type = host_type;
        }
        Ok(text)
    }

    /// Render the model without touching the table
    pub fn render_model(&self, table: &TableEntity) -> SchemaGenResult<String> {
        let host_types = column_host_types(table)?;
        Ok(self.write_class(table, &host_types))
    }

    fn write_class(&self, table: &TableEntity, host_types: &[String]) -> String {
        let class_name = self.class_name(table);
        debug!("Rendering model class {} for table {}", class_name, table.name);

        let mut w = SourceWriter::new();
        w.line(&format!("using System{STATEMENT_END}"));
        w.line(&format!("namespace {}", self.options.namespace));
        w.open_block();
        if let Some(description) = table.description_text() {
            w.doc_summary(description);
        }
        w.line(&format!("public class {class_name}"));
        w.open_block();

        for (column, host_type) in table.columns.iter().zip(host_types) {
            let field = to_private_field_name(&column.name);
            w.line(&format!("private {host_type} {field}{STATEMENT_END}"));
            if let Some(description) = column.description_text() {
                w.doc_summary(description);
            }
            w.line(&format!("public {host_type} {}", column.name));
            w.open_block();
            w.line(&format!("get {{ return {field}{STATEMENT_END} }}"));
            w.line(&format!("set {{ {field} = value{STATEMENT_END} }}"));
            w.close_block();
            w.blank_line();
        }

        w.close_block();
        w.close_block();
        w.finish()
    }
}

fn column_host_types(table: &TableEntity) -> SchemaGenResult<Vec<String>> {
    table
        .columns
        .iter()
        .map(|c| map_to_host_type(&c.data_type, c.nullable))
        .collect()
}

/// Render a model class in place, rewriting column types to host types
pub fn generate_model_text(
    table: Option<&mut TableEntity>,
    namespace: &str,
    class_prefix: &str,
    class_suffix: &str,
) -> SchemaGenResult<String> {
    let renderer = ModelRenderer::with_options(ModelOptions {
        namespace: namespace.to_string(),
        class_prefix: class_prefix.to_string(),
        class_suffix: class_suffix.to_string(),
        trim_table_prefix: false,
    });
    renderer.render(table)
}
