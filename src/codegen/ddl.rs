use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::codegen::template::{
    escape_sql_literal, quote_identifier, StatementTemplate, COLUMN_DESCRIPTION_TEMPLATE,
    LIST_SEPARATOR, NEWLINE, STATEMENT_END, TABLE_DESCRIPTION_TEMPLATE,
};
use crate::error::SchemaGenResult;
use crate::mapping::{default_size_for_type, DEFAULT_SIZE_FALLBACK};
use crate::types::{ColumnEntity, TableEntity};

/// Identity clause emitted for integer primary keys
pub const IDENTITY_CLAUSE: &str = "IDENTITY(1,1)";

/// Prefix of a national string literal
const NATIONAL_LITERAL_PREFIX: &str = "N'";

/// Configuration for DDL generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DdlOptions {
    /// Whether description statements follow the CREATE TABLE statement
    pub include_descriptions: bool,
    /// Table description statement; `{0}` table name, `{1}` description, `{2}` schema
    pub table_description_template: StatementTemplate,
    /// Column description statement; `{0}` table, `{1}` column, `{2}` description, `{3}` schema
    pub column_description_template: StatementTemplate,
    /// Size used for character columns declared without one
    pub size_fallback: u32,
}

impl Default for DdlOptions {
    fn default() -> Self {
        Self {
            include_descriptions: true,
            table_description_template: StatementTemplate::new(TABLE_DESCRIPTION_TEMPLATE),
            column_description_template: StatementTemplate::new(COLUMN_DESCRIPTION_TEMPLATE),
            size_fallback: DEFAULT_SIZE_FALLBACK,
        }
    }
}

/// CREATE TABLE statement with its description statements
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DdlScript {
    pub create_table: String,
    /// Table description first, then columns in declaration order
    pub descriptions: Vec<String>,
}

impl DdlScript {
    pub fn is_empty(&self) -> bool {
        self.create_table.is_empty()
    }

    /// All statements in execution order
    pub fn statements(&self) -> Vec<&str> {
        std::iter::once(self.create_table.as_str())
            .filter(|s| !s.is_empty())
            .chain(self.descriptions.iter().map(String::as_str))
            .collect()
    }
}

impl fmt::Display for DdlScript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return Ok(());
        }
        write!(f, "{}{NEWLINE}", self.create_table)?;
        for statement in &self.descriptions {
            write!(f, "{statement}{NEWLINE}")?;
        }
        Ok(())
    }
}

/// Generates SQL Server CREATE TABLE statements
#[derive(Debug, Clone, Default)]
pub struct DdlRenderer {
    options: DdlOptions,
}

impl DdlRenderer {
    /// Create a renderer with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: DdlOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &DdlOptions {
        &self.options
    }

    /// Render the DDL text; an unnamed table yields an empty string
    pub fn render(&self, table: &TableEntity) -> SchemaGenResult<String> {
        Ok(self.render_script(table)?.to_string())
    }

    pub fn render_script(&self, table: &TableEntity) -> SchemaGenResult<DdlScript> {
        if table.name.is_empty() {
            debug!("Skipping DDL for table without a name");
            return Ok(DdlScript::default());
        }

        let clauses = table
            .columns
            .iter()
            .map(|c| self.column_clause(c))
            .collect::<SchemaGenResult<Vec<_>>>()?;

        let mut create_table = format!(
            "CREATE TABLE {}.{}({NEWLINE}",
            quote_identifier(&table.schema),
            quote_identifier(&table.name)
        );
        if !clauses.is_empty() {
            create_table.push_str(&clauses.join(&format!("{LIST_SEPARATOR}{NEWLINE}")));
            create_table.push_str(NEWLINE);
        }
        create_table.push(')');
        create_table.push_str(STATEMENT_END);

        let descriptions = if self.options.include_descriptions {
            self.description_statements(table)
        } else {
            Vec::new()
        };

        Ok(DdlScript {
            create_table,
            descriptions,
        })
    }

    /// Column definition: name, type, size, key, nullability, default
    pub fn column_clause(&self, column: &ColumnEntity) -> SchemaGenResult<String> {
        let mut clause = format!("{} {}", quote_identifier(&column.name), column.data_type);

        if column.is_character_type() {
            clause.push_str(&format!("({})", self.size_text(column)?));
        }
        if column.primary_key {
            clause.push_str(" PRIMARY KEY");
        }
        if !column.nullable {
            clause.push_str(" NOT NULL");
        }

        if column.is_identity() {
            clause.push(' ');
            clause.push_str(IDENTITY_CLAUSE);
        } else if let Some(default) = column.default_text() {
            if column.is_character_type() && !default.starts_with(NATIONAL_LITERAL_PREFIX) {
                clause.push_str(&format!(" DEFAULT(N'{}')", escape_sql_literal(default)));
            } else {
                clause.push_str(&format!(" DEFAULT({default})"));
            }
        }

        Ok(clause)
    }

    fn size_text(&self, column: &ColumnEntity) -> SchemaGenResult<String> {
        Ok(match column.size {
            ColumnEntity::MAX_SIZE => "MAX".to_string(),
            0 => default_size_for_type(&column.data_type, self.options.size_fallback)?.to_string(),
            size => size.to_string(),
        })
    }

    fn description_statements(&self, table: &TableEntity) -> Vec<String> {
        let table_name = escape_sql_literal(&table.name);
        let schema = escape_sql_literal(&table.schema);

        let mut statements = Vec::new();
        if let Some(description) = table.description_text() {
            statements.push(self.options.table_description_template.fill(&[
                &table_name,
                &escape_sql_literal(description),
                &schema,
            ]));
        }
        for column in &table.columns {
            if let Some(description) = column.description_text() {
                statements.push(self.options.column_description_template.fill(&[
                    &table_name,
                    &escape_sql_literal(&column.name),
                    &escape_sql_literal(description),
                    &schema,
                ]));
            }
        }
        statements
    }
}

/// Render DDL for a table with default templates
pub fn generate_sql_statement(table: &TableEntity, include_descriptions: bool) -> SchemaGenResult<String> {
    DdlRenderer::with_options(DdlOptions {
        include_descriptions,
        ..DdlOptions::default()
    })
    .render(table)
}
