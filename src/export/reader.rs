use calamine::{open_workbook_from_rs, Data, Range, Reader, Xlsx};
use std::io::Cursor;
use tracing::debug;

use crate::error::SchemaGenResult;
use crate::export::SpreadsheetLayout;
use crate::types::{ColumnEntity, TableEntity, DEFAULT_SCHEMA};

/// Reads exported spreadsheets back into table metadata
#[derive(Debug, Clone, Default)]
pub struct SpreadsheetReader {
    layout: SpreadsheetLayout,
}

impl SpreadsheetReader {
    pub fn new(layout: SpreadsheetLayout) -> Self {
        Self { layout }
    }

    /// One table per sheet; rows without a column name are skipped.
    ///
    /// Unbounded sizes are exported blank and therefore read back as 0.
    pub fn read(&self, bytes: &[u8]) -> SchemaGenResult<Vec<TableEntity>> {
        self.layout.validate()?;
        let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes))?;
        let mut tables = Vec::new();

        for sheet_name in workbook.sheet_names() {
            let range = workbook.worksheet_range(&sheet_name)?;
            let mut table = TableEntity::new(DEFAULT_SCHEMA, sheet_name.as_str());
            let title = cell_text(&range, self.layout.title_row, 0);
            if !title.is_empty() {
                table.description = Some(title);
            }

            if let Some((last_row, _)) = range.end() {
                for row in self.layout.first_data_row..=last_row {
                    if let Some(column) = self.read_column(&range, row)? {
                        table.columns.push(column);
                    }
                }
            }

            debug!("Read sheet {} with {} columns", sheet_name, table.columns.len());
            tables.push(table);
        }

        Ok(tables)
    }

    fn read_column(&self, range: &Range<Data>, row: u32) -> SchemaGenResult<Option<ColumnEntity>> {
        let mut column = ColumnEntity::new("", "");
        for field in &self.layout.fields {
            if let Some(input) = field.input {
                input(&cell_text(range, row, u32::from(field.column_index)), &mut column)?;
            }
        }
        Ok(Some(column).filter(|c| !c.name.is_empty()))
    }
}

fn cell_text(range: &Range<Data>, row: u32, column: u32) -> String {
    match range.get_value((row, column)) {
        None | Some(Data::Empty) => String::new(),
        Some(Data::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
