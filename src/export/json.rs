use bytes::Bytes;

use crate::error::SchemaGenResult;
use crate::export::DocExporter;
use crate::types::TableEntity;

/// Writes the tables as a pretty-printed JSON array.
///
/// The output is accepted by `JsonSchemaSource`, so it doubles as a schema
/// snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDocExporter;

impl JsonDocExporter {
    pub fn new() -> Self {
        Self
    }
}

impl DocExporter for JsonDocExporter {
    fn export_type(&self) -> &str {
        "Json"
    }

    fn file_extension(&self) -> &str {
        ".json"
    }

    fn export(&self, tables: &[TableEntity], _db_type: &str) -> SchemaGenResult<Bytes> {
        Ok(Bytes::from(serde_json::to_vec_pretty(tables)?))
    }
}
