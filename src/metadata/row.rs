use std::collections::BTreeMap;

use crate::error::{SchemaGenError, SchemaGenResult};
use crate::types::{ColumnEntity, TableEntity, DEFAULT_SCHEMA};

/// A single value from a catalog query result
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Null,
    Bool(bool),
    Int(i64),
    Text(String),
}

impl CellValue {
    fn as_text(&self) -> Option<String> {
        match self {
            CellValue::Null => None,
            CellValue::Bool(b) => Some(b.to_string()),
            CellValue::Int(i) => Some(i.to_string()),
            CellValue::Text(s) => Some(s.clone()),
        }
    }

    fn as_bool(&self, field: &str) -> SchemaGenResult<bool> {
        match self {
            CellValue::Null => Ok(false),
            CellValue::Bool(b) => Ok(*b),
            CellValue::Int(i) => Ok(*i != 0),
            CellValue::Text(s) => match s.trim().to_ascii_uppercase().as_str() {
                "Y" | "YES" | "TRUE" | "1" => Ok(true),
                "N" | "NO" | "FALSE" | "0" | "" => Ok(false),
                other => Err(type_mismatch(field, "a flag", other)),
            },
        }
    }

    /// Catalogs report unbounded lengths as -1
    fn as_size(&self, field: &str) -> SchemaGenResult<u32> {
        let value = match self {
            CellValue::Null => return Ok(0),
            CellValue::Int(i) => *i,
            CellValue::Text(s) if s.trim().is_empty() => return Ok(0),
            CellValue::Text(s) => s
                .trim()
                .parse::<i64>()
                .map_err(|_| type_mismatch(field, "a size", s))?,
            CellValue::Bool(b) => return Err(type_mismatch(field, "a size", &b.to_string())),
        };
        match value {
            -1 => Ok(ColumnEntity::MAX_SIZE),
            v if v < 0 => Err(type_mismatch(field, "a size", &v.to_string())),
            v => Ok(u32::try_from(v).unwrap_or(ColumnEntity::MAX_SIZE).min(ColumnEntity::MAX_SIZE)),
        }
    }
}

fn type_mismatch(field: &str, expected: &str, found: &str) -> SchemaGenError {
    SchemaGenError::invalid_argument(format!("field '{field}' expects {expected}, found '{found}'"))
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Int(value)
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        CellValue::Int(i64::from(value))
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(CellValue::Null)
    }
}

/// One catalog result row keyed by column alias
pub type Row = BTreeMap<String, CellValue>;

/// Applies one row value onto an entity field
pub type FieldSetter<T> = fn(&mut T, &CellValue) -> SchemaGenResult<()>;

/// Entities built from catalog rows through an explicit field table
pub trait FromRow: Sized + 'static {
    /// Row column alias and the setter for the matching field
    const FIELDS: &'static [(&'static str, FieldSetter<Self>)];

    /// Entity the setters are applied to
    fn empty() -> Self;

    /// Columns are matched case-insensitively; absent columns keep their defaults
    fn from_row(row: &Row) -> SchemaGenResult<Self> {
        let mut entity = Self::empty();
        for (alias, setter) in Self::FIELDS {
            if let Some((_, value)) = row.iter().find(|(key, _)| key.eq_ignore_ascii_case(alias)) {
                setter(&mut entity, value)?;
            }
        }
        Ok(entity)
    }
}

impl FromRow for ColumnEntity {
    const FIELDS: &'static [(&'static str, FieldSetter<Self>)] = &[
        ("ColumnName", |c, v| {
            c.name = v.as_text().unwrap_or_default();
            Ok(())
        }),
        ("ColumnDescription", |c, v| {
            c.description = v.as_text().filter(|d| !d.is_empty());
            Ok(())
        }),
        ("DataType", |c, v| {
            c.data_type = v.as_text().unwrap_or_default();
            Ok(())
        }),
        ("Size", |c, v| {
            c.size = v.as_size("Size")?;
            Ok(())
        }),
        ("IsNullable", |c, v| {
            c.nullable = v.as_bool("IsNullable")?;
            Ok(())
        }),
        ("IsPrimaryKey", |c, v| {
            c.primary_key = v.as_bool("IsPrimaryKey")?;
            Ok(())
        }),
        ("DefaultValue", |c, v| {
            c.default_value = v.as_text();
            Ok(())
        }),
    ];

    fn empty() -> Self {
        ColumnEntity::new("", "")
    }
}

impl FromRow for TableEntity {
    const FIELDS: &'static [(&'static str, FieldSetter<Self>)] = &[
        ("TableSchema", |t, v| {
            t.schema = v
                .as_text()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_SCHEMA.to_string());
            Ok(())
        }),
        ("TableName", |t, v| {
            t.name = v.as_text().unwrap_or_default();
            Ok(())
        }),
        ("TableDescription", |t, v| {
            t.description = v.as_text().filter(|d| !d.is_empty());
            Ok(())
        }),
    ];

    fn empty() -> Self {
        TableEntity::new(DEFAULT_SCHEMA, "")
    }
}

/// Map every row through the entity's field table
pub fn rows_to_entities<T: FromRow>(rows: &[Row]) -> SchemaGenResult<Vec<T>> {
    rows.iter().map(T::from_row).collect()
}
