use serde::Deserialize;
use std::path::PathBuf;
use tracing::{debug, info};

use crate::error::SchemaGenResult;
use crate::metadata::row::{FromRow, Row};
use crate::types::{ColumnEntity, TableEntity};

/// Supplies populated table metadata to the generators
pub trait SchemaSource {
    fn load_tables(&self) -> SchemaGenResult<Vec<TableEntity>>;
}

/// Accepted JSON layouts: a bare array or an object with a `tables` key
#[derive(Deserialize)]
#[serde(untagged)]
enum SchemaDocument {
    Tables(Vec<TableEntity>),
    Wrapped { tables: Vec<TableEntity> },
}

/// Parse a JSON schema description
pub fn parse_schema_json(text: &str) -> SchemaGenResult<Vec<TableEntity>> {
    let document: SchemaDocument = serde_json::from_str(text)?;
    Ok(match document {
        SchemaDocument::Tables(tables) | SchemaDocument::Wrapped { tables } => tables,
    })
}

/// Reads tables from a JSON schema file
#[derive(Debug, Clone)]
pub struct JsonSchemaSource {
    path: PathBuf,
}

impl JsonSchemaSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SchemaSource for JsonSchemaSource {
    fn load_tables(&self) -> SchemaGenResult<Vec<TableEntity>> {
        let text = std::fs::read_to_string(&self.path)?;
        let tables = parse_schema_json(&text)?;
        info!("Loaded {} tables from {:?}", tables.len(), self.path);
        Ok(tables)
    }
}

/// Builds tables from flat catalog rows, one row per column.
///
/// Rows carry the table fields (`TableSchema`, `TableName`,
/// `TableDescription`) next to the column fields. Tables keep the order in
/// which they first appear; a row without `ColumnName` only declares its table.
#[derive(Debug, Clone, Default)]
pub struct RowSchemaSource {
    rows: Vec<Row>,
}

impl RowSchemaSource {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }
}

impl SchemaSource for RowSchemaSource {
    fn load_tables(&self) -> SchemaGenResult<Vec<TableEntity>> {
        let mut tables: Vec<TableEntity> = Vec::new();

        for row in &self.rows {
            let header = TableEntity::from_row(row)?;
            let column = ColumnEntity::from_row(row)?;

            let position = tables
                .iter()
                .position(|t| t.schema == header.schema && t.name == header.name);
            let table = match position {
                Some(index) => &mut tables[index],
                None => {
                    debug!("Discovered table {}.{}", header.schema, header.name);
                    tables.push(header);
                    let last = tables.len() - 1;
                    &mut tables[last]
                }
            };

            if !column.name.is_empty() {
                table.columns.push(column);
            }
        }

        info!("Assembled {} tables from {} rows", tables.len(), self.rows.len());
        Ok(tables)
    }
}
