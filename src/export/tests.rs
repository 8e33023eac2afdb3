use super::*;

#[cfg(test)]
mod excel_tests {
    use super::*;
    use crate::types::{ColumnEntity, TableEntity};

    fn users_table() -> TableEntity {
        TableEntity::new("dbo", "Users")
            .with_description("Registered users")
            .with_column(
                ColumnEntity::new("Id", "int")
                    .as_primary_key()
                    .with_description("Surrogate key"),
            )
            .with_column(ColumnEntity::new("Name", "nvarchar").with_size(100).not_null())
            .with_column(ColumnEntity::new("Bio", "nvarchar").with_size(ColumnEntity::MAX_SIZE))
            .with_column(ColumnEntity::new("Active", "bit").with_default("1"))
    }

    #[test]
    fn test_export_then_read_back() {
        let exporter = ExcelDocExporter::default();
        let outcome = exporter.export_with_report(&[users_table()]).unwrap();
        assert!(outcome.skipped.is_empty());
        assert!(!outcome.bytes.is_empty());

        let tables = SpreadsheetReader::default().read(&outcome.bytes).unwrap();
        assert_eq!(tables.len(), 1);
        let users = &tables[0];
        assert_eq!(users.name, "Users");
        assert_eq!(users.description.as_deref(), Some("Registered users"));
        assert_eq!(users.columns.len(), 4);

        let id = &users.columns[0];
        assert_eq!(id.data_type, "int");
        assert!(id.primary_key);
        assert!(!id.nullable);
        assert_eq!(id.default_value, None);
        assert_eq!(id.description.as_deref(), Some("Surrogate key"));

        let name = &users.columns[1];
        assert_eq!(name.size, 100);
        assert!(!name.nullable);

        // unbounded sizes are written blank
        assert_eq!(users.columns[2].size, 0);
        assert_eq!(users.columns[3].default_value.as_deref(), Some("1"));
        assert!(users.columns[3].nullable);
    }

    #[test]
    fn test_cells_use_flags_and_uppercase_types() {
        let layout = SpreadsheetLayout::standard();
        let id = ColumnEntity::new("Id", "int").as_primary_key();
        let cells: Vec<String> = layout.fields.iter().map(|f| (f.output)(&id)).collect();
        assert_eq!(cells, vec!["Id", "", "Y", "N", "INT", "", "IDENTITY(1,1)"]);

        let code = ColumnEntity::new("Code", "char").with_size(3);
        let cells: Vec<String> = layout.fields.iter().map(|f| (f.output)(&code)).collect();
        assert_eq!(cells, vec!["Code", "", "N", "Y", "CHAR", "3", ""]);
    }

    #[test]
    fn test_duplicate_and_invalid_sheet_names_are_skipped() {
        let tables = vec![
            users_table(),
            TableEntity::new("dbo", "USERS"),
            TableEntity::new("dbo", "Bad[Name]"),
            TableEntity::new("dbo", "Orders"),
        ];
        let outcome = ExcelDocExporter::default().export_with_report(&tables).unwrap();

        let skipped: Vec<&str> = outcome.skipped.iter().map(|f| f.table.as_str()).collect();
        assert_eq!(skipped, vec!["USERS", "Bad[Name]"]);
        assert_eq!(outcome.skipped[0].reason, "duplicate sheet name");

        let read = SpreadsheetReader::default().read(&outcome.bytes).unwrap();
        let names: Vec<&str> = read.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Users", "Orders"]);
    }

    #[test]
    fn test_custom_titles_are_exported() {
        let layout = SpreadsheetLayout::standard()
            .with_title(0, "Field")
            .with_author("docs team");
        assert_eq!(layout.fields[0].title, "Field");
        assert_eq!(layout.author, "docs team");
        assert_eq!(layout.column_count(), 7);

        let outcome = ExcelDocExporter::new(layout.clone())
            .export_with_report(&[users_table()])
            .unwrap();
        let tables = SpreadsheetReader::new(layout).read(&outcome.bytes).unwrap();
        assert_eq!(tables[0].columns.len(), 4);
    }

    #[test]
    fn test_layout_validation() {
        assert!(SpreadsheetLayout::standard().validate().is_ok());

        let mut layout = SpreadsheetLayout::standard();
        layout.header_row = 0;
        assert!(layout.validate().is_err());

        let mut layout = SpreadsheetLayout::standard();
        layout.fields[1].column_index = 0;
        assert!(layout.validate().is_err());

        let mut layout = SpreadsheetLayout::standard();
        layout.fields.clear();
        assert!(ExcelDocExporter::new(layout).export_with_report(&[]).is_err());
    }

    #[test]
    fn test_garbage_bytes_are_rejected() {
        assert!(SpreadsheetReader::default().read(b"not a workbook").is_err());
    }
}

#[cfg(test)]
mod registry_tests {
    use super::*;
    use crate::metadata::parse_schema_json;
    use crate::types::{ColumnEntity, TableEntity};

    #[test]
    fn test_default_registry_lookup_ignores_case() {
        let registry = ExporterRegistry::default();
        assert_eq!(registry.export_types(), vec!["Excel", "Json"]);
        assert_eq!(registry.get("excel").unwrap().file_extension(), ".xlsx");
        assert_eq!(registry.get("JSON").unwrap().file_extension(), ".json");
        assert!(registry.get("Word").is_none());
    }

    #[test]
    fn test_register_replaces_same_type() {
        let mut registry = ExporterRegistry::new();
        assert!(registry.export_types().is_empty());
        registry.register(Box::new(JsonDocExporter::new()));
        registry.register(Box::new(JsonDocExporter::new()));
        assert_eq!(registry.export_types(), vec!["Json"]);
    }

    #[test]
    fn test_json_export_is_a_loadable_schema() {
        let tables = vec![TableEntity::new("hr", "Staff")
            .with_column(ColumnEntity::new("Id", "bigint").as_primary_key())
            .with_column(ColumnEntity::new("Hired", "datetime").with_default("getdate()"))];

        let bytes = JsonDocExporter::new().export(&tables, "SqlServer").unwrap();
        let text = std::str::from_utf8(&bytes).unwrap();
        assert_eq!(parse_schema_json(text).unwrap(), tables);
    }
}
