// Schema documentation exporters
pub mod excel;
pub mod json;
pub mod layout;
pub mod reader;

#[cfg(test)]
mod tests;

use bytes::Bytes;

use crate::batch::TableFailure;
use crate::error::SchemaGenResult;
use crate::types::TableEntity;

pub use excel::ExcelDocExporter;
pub use json::JsonDocExporter;
pub use layout::{FieldSetting, InputFormatter, OutputFormatter, SpreadsheetLayout};
pub use reader::SpreadsheetReader;

/// A documentation format tables can be exported to
pub trait DocExporter: Send + Sync {
    /// Identifier used to select the exporter
    fn export_type(&self) -> &str;

    /// File extension including the leading dot
    fn file_extension(&self) -> &str;

    /// Export all tables into a single document
    fn export(&self, tables: &[TableEntity], db_type: &str) -> SchemaGenResult<Bytes>;

    /// Export and report the tables left out of the document
    fn export_report(&self, tables: &[TableEntity], db_type: &str) -> SchemaGenResult<ExportOutcome> {
        Ok(ExportOutcome {
            bytes: self.export(tables, db_type)?,
            skipped: Vec::new(),
        })
    }
}

/// Exported document plus the tables that could not be written
#[derive(Debug, Clone)]
pub struct ExportOutcome {
    pub bytes: Bytes,
    pub skipped: Vec<TableFailure>,
}

/// Exporters addressable by their export type
pub struct ExporterRegistry {
    exporters: Vec<Box<dyn DocExporter>>,
}

impl ExporterRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            exporters: Vec::new(),
        }
    }

    /// Registry with the spreadsheet and JSON exporters
    pub fn with_defaults(layout: SpreadsheetLayout) -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(ExcelDocExporter::new(layout)));
        registry.register(Box::new(JsonDocExporter::new()));
        registry
    }

    /// Add an exporter; a later exporter with the same type replaces the earlier one
    pub fn register(&mut self, exporter: Box<dyn DocExporter>) {
        self.exporters
            .retain(|e| !e.export_type().eq_ignore_ascii_case(exporter.export_type()));
        self.exporters.push(exporter);
    }

    /// Case-insensitive lookup by export type
    pub fn get(&self, export_type: &str) -> Option<&dyn DocExporter> {
        self.exporters
            .iter()
            .find(|e| e.export_type().eq_ignore_ascii_case(export_type))
            .map(|e| e.as_ref())
    }

    pub fn export_types(&self) -> Vec<&str> {
        self.exporters.iter().map(|e| e.export_type()).collect()
    }
}

impl Default for ExporterRegistry {
    fn default() -> Self {
        Self::with_defaults(SpreadsheetLayout::standard())
    }
}
