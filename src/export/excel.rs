use bytes::Bytes;
use rust_xlsxwriter::{DocProperties, Format, FormatAlign, Workbook, Worksheet};
use std::collections::HashSet;
use tracing::{debug, info, warn};

use crate::batch::TableFailure;
use crate::error::SchemaGenResult;
use crate::export::{DocExporter, ExportOutcome, SpreadsheetLayout};
use crate::types::TableEntity;

/// Writes one worksheet per table into an `.xlsx` workbook
#[derive(Debug, Clone, Default)]
pub struct ExcelDocExporter {
    layout: SpreadsheetLayout,
}

impl ExcelDocExporter {
    pub fn new(layout: SpreadsheetLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &SpreadsheetLayout {
        &self.layout
    }

    /// Export every table that can be written, collecting the ones that cannot.
    ///
    /// A table is skipped when its name is not a valid sheet name or repeats
    /// an earlier sheet (sheet names compare case-insensitively).
    pub fn export_with_report(&self, tables: &[TableEntity]) -> SchemaGenResult<ExportOutcome> {
        self.layout.validate()?;

        let mut workbook = Workbook::new();
        let properties = DocProperties::new().set_author(&self.layout.author);
        workbook.set_properties(&properties);

        let title_format = Format::new().set_bold().set_align(FormatAlign::Left);
        let header_format = Format::new().set_bold().set_align(FormatAlign::Center);

        let mut sheet_names = HashSet::new();
        let mut skipped = Vec::new();

        for table in tables {
            if !sheet_names.insert(table.name.to_lowercase()) {
                warn!("Skipping table {}: sheet name already used", table.name);
                skipped.push(TableFailure::new(&table.name, "duplicate sheet name"));
                continue;
            }
            match self.build_sheet(table, &title_format, &header_format) {
                Ok(sheet) => workbook.push_worksheet(sheet),
                Err(e) => {
                    warn!("Skipping table {}: {}", table.name, e);
                    skipped.push(TableFailure::new(&table.name, e.to_string()));
                }
            }
        }

        let buffer = workbook.save_to_buffer()?;
        info!(
            "Exported {} of {} tables to spreadsheet ({} bytes)",
            tables.len() - skipped.len(),
            tables.len(),
            buffer.len()
        );
        Ok(ExportOutcome {
            bytes: Bytes::from(buffer),
            skipped,
        })
    }

    fn build_sheet(
        &self,
        table: &TableEntity,
        title_format: &Format,
        header_format: &Format,
    ) -> SchemaGenResult<Worksheet> {
        let layout = &self.layout;
        let mut sheet = Worksheet::new();
        sheet.set_name(&table.name)?;

        let title = table.description_text().unwrap_or_default();
        let last_column = layout.column_count().saturating_sub(1);
        if last_column > 0 {
            sheet.merge_range(layout.title_row, 0, layout.title_row, last_column, title, title_format)?;
        } else {
            sheet.write_string_with_format(layout.title_row, 0, title, title_format)?;
        }

        for field in &layout.fields {
            sheet.write_string_with_format(layout.header_row, field.column_index, &field.title, header_format)?;
            sheet.set_column_width(field.column_index, field.width)?;
        }

        for (row, column) in (layout.first_data_row..).zip(&table.columns) {
            for field in &layout.fields {
                let text = (field.output)(column);
                if !text.is_empty() {
                    sheet.write_string(row, field.column_index, &text)?;
                }
            }
        }

        debug!("Built sheet {} with {} column rows", table.name, table.columns.len());
        Ok(sheet)
    }
}

impl DocExporter for ExcelDocExporter {
    fn export_type(&self) -> &str {
        "Excel"
    }

    fn file_extension(&self) -> &str {
        ".xlsx"
    }

    fn export(&self, tables: &[TableEntity], db_type: &str) -> SchemaGenResult<Bytes> {
        Ok(self.export_report(tables, db_type)?.bytes)
    }

    fn export_report(&self, tables: &[TableEntity], db_type: &str) -> SchemaGenResult<ExportOutcome> {
        debug!("Exporting {} tables from {} schema", tables.len(), db_type);
        self.export_with_report(tables)
    }
}
