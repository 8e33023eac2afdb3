use serde::{Deserialize, Deserializer, Serialize};

use crate::error::SchemaGenResult;
use crate::mapping::{trim_table_prefix, SqlType};

/// Schema a table belongs to when the metadata source leaves it blank
pub const DEFAULT_SCHEMA: &str = "dbo";

/// Column metadata as read from the database catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnEntity {
    /// Column name
    pub name: String,
    /// Column description (extended property)
    #[serde(default)]
    pub description: Option<String>,
    /// Database type token, e.g. `nvarchar`
    pub data_type: String,
    /// Declared size; 0 means the type default applies
    #[serde(default)]
    pub size: u32,
    /// Whether the column allows NULL values
    #[serde(default = "default_nullable")]
    pub nullable: bool,
    /// Whether the column is part of the primary key
    #[serde(default)]
    pub primary_key: bool,
    /// Default value expression, rendered verbatim
    #[serde(default, deserialize_with = "deserialize_default_value")]
    pub default_value: Option<String>,
}

/// Table metadata with its columns in declaration order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableEntity {
    /// Owning schema
    #[serde(default = "default_schema")]
    pub schema: String,
    /// Table name
    pub name: String,
    /// Table description (extended property)
    #[serde(default)]
    pub description: Option<String>,
    /// Columns in rendering order
    #[serde(default)]
    pub columns: Vec<ColumnEntity>,
}

fn default_nullable() -> bool {
    true
}

fn default_schema() -> String {
    DEFAULT_SCHEMA.to_string()
}

/// Catalog defaults arrive as strings, numbers or booleans; keep their text.
fn deserialize_default_value<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

impl ColumnEntity {
    /// Size value marking an unbounded column, e.g. `nvarchar(max)`
    pub const MAX_SIZE: u32 = i32::MAX as u32;

    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            data_type: data_type.into(),
            size: 0,
            nullable: true,
            primary_key: false,
            default_value: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    pub fn with_default(mut self, default_value: impl Into<String>) -> Self {
        self.default_value = Some(default_value.into());
        self
    }

    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Marks the column as primary key; primary keys are never nullable
    pub fn as_primary_key(mut self) -> Self {
        self.primary_key = true;
        self.nullable = false;
        self
    }

    /// Parse the type token against the recognized set
    pub fn sql_type(&self) -> SchemaGenResult<SqlType> {
        self.data_type.parse()
    }

    /// Non-empty description text
    pub fn description_text(&self) -> Option<&str> {
        self.description.as_deref().filter(|d| !d.is_empty())
    }

    /// Non-empty default value text
    pub fn default_text(&self) -> Option<&str> {
        self.default_value.as_deref().filter(|d| !d.is_empty())
    }

    /// Whether the type token names a character type
    pub fn is_character_type(&self) -> bool {
        self.data_type.to_ascii_uppercase().contains("CHAR")
    }

    /// Integer primary keys are generated as `IDENTITY(1,1)` columns
    pub fn is_identity(&self) -> bool {
        self.primary_key && self.data_type.to_ascii_uppercase().contains("INT")
    }
}

impl TableEntity {
    pub fn new(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            name: name.into(),
            description: None,
            columns: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_column(mut self, column: ColumnEntity) -> Self {
        self.columns.push(column);
        self
    }

    /// Non-empty description text
    pub fn description_text(&self) -> Option<&str> {
        self.description.as_deref().filter(|d| !d.is_empty())
    }

    /// Table name with its conventional `tbl`/`tab` prefix removed
    pub fn trimmed_name(&self) -> String {
        trim_table_prefix(&self.name)
    }

    pub fn primary_key_columns(&self) -> impl Iterator<Item = &ColumnEntity> {
        self.columns.iter().filter(|c| c.primary_key)
    }
}
