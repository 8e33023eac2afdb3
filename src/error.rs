use thiserror::Error;

/// Result alias used across the crate
pub type SchemaGenResult<T> = Result<T, SchemaGenError>;

/// Main error type for the schemagen system
#[derive(Error, Debug)]
pub enum SchemaGenError {
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Unrecognized database type: '{type_name}'")]
    UnrecognizedType { type_name: String },

    #[error("Export error: {message}")]
    Export { message: String },

    #[error("DDL error: {message}")]
    Ddl { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Spreadsheet write error: {0}")]
    SpreadsheetWrite(#[from] rust_xlsxwriter::XlsxError),

    #[error("Spreadsheet read error: {0}")]
    SpreadsheetRead(#[from] calamine::XlsxError),

    #[error("SQL parse error: {0}")]
    SqlParse(#[from] sqlparser::parser::ParserError),
}

impl SchemaGenError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument { message: message.into() }
    }

    pub fn unrecognized_type(type_name: impl Into<String>) -> Self {
        Self::UnrecognizedType { type_name: type_name.into() }
    }

    pub fn export(message: impl Into<String>) -> Self {
        Self::Export { message: message.into() }
    }

    pub fn ddl(message: impl Into<String>) -> Self {
        Self::Ddl { message: message.into() }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config { message: message.into() }
    }
}
