use std::collections::HashSet;
use std::fmt;

use crate::codegen::IDENTITY_CLAUSE;
use crate::error::{SchemaGenError, SchemaGenResult};
use crate::types::ColumnEntity;

/// Renders one column attribute as cell text
pub type OutputFormatter = fn(&ColumnEntity) -> String;

/// Applies cell text back onto a column
pub type InputFormatter = fn(&str, &mut ColumnEntity) -> SchemaGenResult<()>;

const YES: &str = "Y";
const NO: &str = "N";

/// Placement and conversion rules for one column attribute
#[derive(Clone)]
pub struct FieldSetting {
    /// Zero-based spreadsheet column
    pub column_index: u16,
    /// Header row title
    pub title: String,
    /// Column attribute to cell text
    pub output: OutputFormatter,
    /// Cell text to column attribute, when the field can be read back
    pub input: Option<InputFormatter>,
    /// Column width in characters
    pub width: f64,
}

impl fmt::Debug for FieldSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSetting")
            .field("column_index", &self.column_index)
            .field("title", &self.title)
            .field("readable", &self.input.is_some())
            .field("width", &self.width)
            .finish()
    }
}

impl FieldSetting {
    pub fn new(column_index: u16, title: impl Into<String>, output: OutputFormatter) -> Self {
        Self {
            column_index,
            title: title.into(),
            output,
            input: None,
            width: 16.0,
        }
    }

    pub fn with_input(mut self, input: InputFormatter) -> Self {
        self.input = Some(input);
        self
    }

    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }
}

/// Sheet layout handed to the spreadsheet exporter and reader
#[derive(Debug, Clone)]
pub struct SpreadsheetLayout {
    /// Row holding the merged table description
    pub title_row: u32,
    /// Row holding the field titles
    pub header_row: u32,
    /// First row of column data
    pub first_data_row: u32,
    /// Document author property
    pub author: String,
    /// Field settings, applied in order when reading
    pub fields: Vec<FieldSetting>,
}

impl Default for SpreadsheetLayout {
    fn default() -> Self {
        Self::standard()
    }
}

impl SpreadsheetLayout {
    /// Seven-column layout: name, description, key, nullable, type, size, default
    pub fn standard() -> Self {
        Self {
            title_row: 0,
            header_row: 1,
            first_data_row: 2,
            author: "schemagen".to_string(),
            fields: vec![
                FieldSetting::new(0, "Column Name", |c| c.name.clone())
                    .with_input(read_name)
                    .with_width(24.0),
                FieldSetting::new(1, "Description", |c| c.description.clone().unwrap_or_default())
                    .with_input(read_description)
                    .with_width(36.0),
                FieldSetting::new(2, "Primary Key", |c| yes_no(c.primary_key))
                    .with_input(|text, c| {
                        c.primary_key = text == YES;
                        Ok(())
                    })
                    .with_width(12.0),
                FieldSetting::new(3, "Nullable", |c| yes_no(c.nullable))
                    .with_input(|text, c| {
                        c.nullable = text == YES;
                        Ok(())
                    })
                    .with_width(10.0),
                FieldSetting::new(4, "Data Type", |c| c.data_type.to_uppercase())
                    .with_input(read_data_type),
                FieldSetting::new(5, "Size", size_text)
                    .with_input(read_size)
                    .with_width(10.0),
                FieldSetting::new(6, "Default Value", default_text)
                    .with_input(read_default)
                    .with_width(20.0),
            ],
        }
    }

    /// Replace the header title of the field in `column_index`
    pub fn with_title(mut self, column_index: u16, title: impl Into<String>) -> Self {
        if let Some(field) = self.fields.iter_mut().find(|f| f.column_index == column_index) {
            field.title = title.into();
        }
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    /// Number of spreadsheet columns spanned by the layout
    pub fn column_count(&self) -> u16 {
        self.fields
            .iter()
            .map(|f| f.column_index + 1)
            .max()
            .unwrap_or(0)
    }

    pub fn validate(&self) -> SchemaGenResult<()> {
        if self.fields.is_empty() {
            return Err(SchemaGenError::config("spreadsheet layout has no fields"));
        }
        if !(self.title_row < self.header_row && self.header_row < self.first_data_row) {
            return Err(SchemaGenError::config(
                "spreadsheet rows must be ordered title < header < data",
            ));
        }
        let mut seen = HashSet::new();
        for field in &self.fields {
            if !seen.insert(field.column_index) {
                return Err(SchemaGenError::config(format!(
                    "spreadsheet column {} is assigned twice",
                    field.column_index
                )));
            }
        }
        Ok(())
    }
}

fn yes_no(flag: bool) -> String {
    let text = if flag { YES } else { NO };
    text.to_string()
}

/// Blank for "use type default" and for unbounded sizes
fn size_text(column: &ColumnEntity) -> String {
    if column.size > 0 && column.size < ColumnEntity::MAX_SIZE {
        column.size.to_string()
    } else {
        String::new()
    }
}

/// Explicit default, else the identity clause for integer keys
fn default_text(column: &ColumnEntity) -> String {
    match column.default_text() {
        Some(default) => default.to_string(),
        None if column.is_identity() => IDENTITY_CLAUSE.to_string(),
        None => String::new(),
    }
}

fn read_name(text: &str, column: &mut ColumnEntity) -> SchemaGenResult<()> {
    column.name = text.trim().to_string();
    Ok(())
}

fn read_description(text: &str, column: &mut ColumnEntity) -> SchemaGenResult<()> {
    column.description = Some(text.to_string()).filter(|d| !d.is_empty());
    Ok(())
}

fn read_data_type(text: &str, column: &mut ColumnEntity) -> SchemaGenResult<()> {
    column.data_type = text.trim().to_lowercase();
    Ok(())
}

fn read_size(text: &str, column: &mut ColumnEntity) -> SchemaGenResult<()> {
    let text = text.trim();
    column.size = if text.is_empty() {
        0
    } else {
        text.parse::<u32>().map_err(|_| {
            SchemaGenError::invalid_argument(format!("invalid size '{}' for column '{}'", text, column.name))
        })?
    };
    Ok(())
}

/// Expects key and type to be read already
fn read_default(text: &str, column: &mut ColumnEntity) -> SchemaGenResult<()> {
    column.default_value = if text.is_empty() || (text == IDENTITY_CLAUSE && column.is_identity()) {
        None
    } else {
        Some(text.to_string())
    };
    Ok(())
}
