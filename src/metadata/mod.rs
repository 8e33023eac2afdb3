// Metadata input: catalog row mapping and schema sources
pub mod row;
pub mod source;


pub use row::{rows_to_entities, CellValue, FieldSetter, FromRow, Row};
pub use source::{parse_schema_json, JsonSchemaSource, RowSchemaSource, SchemaSource};
