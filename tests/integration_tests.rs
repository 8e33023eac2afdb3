use anyhow::Result;
use std::path::Path;
use tempfile::TempDir;

use schemagen::codegen::inspect_create_table;
use schemagen::export::SpreadsheetReader;
use schemagen::metadata::{JsonSchemaSource, SchemaSource};
use schemagen::{GeneratorConfig, Pipeline, TableEntity};

const SCHEMA_JSON: &str = r#"{
  "tables": [
    {
      "name": "tblCustomers",
      "description": "Customer accounts",
      "columns": [
        { "name": "Id", "data_type": "int", "primary_key": true, "nullable": false, "description": "Customer key" },
        { "name": "Email", "data_type": "nvarchar", "size": 256, "nullable": false },
        { "name": "Notes", "data_type": "nvarchar", "size": 2147483647 },
        { "name": "Joined", "data_type": "datetime", "default_value": "getdate()" }
      ]
    },
    {
      "schema": "sales",
      "name": "Orders",
      "columns": [
        { "name": "OrderId", "data_type": "bigint", "primary_key": true, "nullable": false },
        { "name": "Total", "data_type": "decimal" },
        { "name": "Paid", "data_type": "bit", "default_value": 0 }
      ]
    },
    {
      "name": "Legacy",
      "columns": [
        { "name": "Blob", "data_type": "geography" }
      ]
    }
  ]
}"#;

/// Test fixture holding a schema file and an output directory
struct TestWorkspace {
    dir: TempDir,
}

impl TestWorkspace {
    fn new() -> Result<Self> {
        let dir = TempDir::new()?;
        std::fs::write(dir.path().join("schema.json"), SCHEMA_JSON)?;
        Ok(Self { dir })
    }

    fn schema_path(&self) -> std::path::PathBuf {
        self.dir.path().join("schema.json")
    }

    fn output_dir(&self) -> std::path::PathBuf {
        self.dir.path().join("out")
    }

    fn config(&self) -> GeneratorConfig {
        let mut config = GeneratorConfig::default();
        config.output_directory = self.output_dir();
        config.model.namespace = "Shop.Models".to_string();
        config.model.trim_table_prefix = true;
        config
    }

    fn tables(&self) -> Result<Vec<TableEntity>> {
        Ok(JsonSchemaSource::new(self.schema_path()).load_tables()?)
    }
}

fn file_names(dir: &Path) -> Result<Vec<String>> {
    let mut names: Vec<String> = std::fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.file_name().to_string_lossy().into_owned()))
        .collect::<std::io::Result<_>>()?;
    names.sort();
    Ok(names)
}

#[tokio::test]
async fn test_full_pipeline_writes_all_artifacts() -> Result<()> {
    let workspace = TestWorkspace::new()?;
    let tables = workspace.tables()?;
    assert_eq!(tables.len(), 3);

    let pipeline = Pipeline::new(workspace.config())?;
    let output = pipeline.run_all(&tables).await?;

    // Legacy is rendered once and reported once
    assert_eq!(output.failures.len(), 1);
    assert_eq!(output.failures[0].table, "Legacy");
    assert_eq!(output.written.len(), 5);
    assert!(!output.is_successful());

    assert_eq!(
        file_names(&workspace.output_dir())?,
        vec!["Customers.cs", "Orders.cs", "Orders.sql", "schema.xlsx", "tblCustomers.sql"]
    );

    let model = std::fs::read_to_string(workspace.output_dir().join("Customers.cs"))?;
    assert!(model.starts_with("using System;\nnamespace Shop.Models\n{"));
    assert!(model.contains("public DateTime? Joined"));
    assert!(model.contains("public string Email"));
    Ok(())
}

#[tokio::test]
async fn test_generated_ddl_parses_back() -> Result<()> {
    let workspace = TestWorkspace::new()?;
    let tables = workspace.tables()?;
    let pipeline = Pipeline::new(workspace.config())?;
    pipeline.write_ddl(&tables).await?;

    let ddl = tokio::fs::read_to_string(workspace.output_dir().join("tblCustomers.sql")).await?;
    assert!(ddl.contains("[Notes] nvarchar(MAX)"));
    assert!(ddl.contains("sp_addextendedproperty"));

    let inspected = inspect_create_table(&ddl)?;
    assert_eq!(inspected.name, "tblCustomers");
    let names: Vec<&str> = inspected.columns.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Id", "Email", "Notes", "Joined"]);

    let id = &inspected.columns[0];
    assert!(id.primary_key && id.identity && !id.nullable);
    assert_eq!(inspected.columns[1].data_type, "NVARCHAR");
    assert!(!inspected.columns[1].nullable);
    assert!(inspected.columns[3].default.is_some());
    Ok(())
}

#[tokio::test]
async fn test_colliding_class_names_are_reported() -> Result<()> {
    let workspace = TestWorkspace::new()?;
    let tables = schemagen::metadata::parse_schema_json(
        r#"[{ "name": "tblUser", "columns": [{ "name": "Id", "data_type": "int" }] },
            { "name": "User", "columns": [{ "name": "Name", "data_type": "nvarchar" }] }]"#,
    )?;

    let output = Pipeline::new(workspace.config())?.write_models(&tables).await?;
    assert_eq!(output.written.len(), 1);
    assert_eq!(output.failures.len(), 1);
    assert_eq!(output.failures[0].table, "User");
    assert!(output.failures[0].reason.contains("duplicate class name"));

    assert_eq!(file_names(&workspace.output_dir())?, vec!["User.cs"]);
    let model = std::fs::read_to_string(workspace.output_dir().join("User.cs"))?;
    assert!(model.contains("public int? Id"));
    Ok(())
}

#[tokio::test]
async fn test_descriptions_use_table_schema() -> Result<()> {
    let workspace = TestWorkspace::new()?;
    let mut tables = workspace.tables()?;
    tables[1].description = Some("Sales orders".to_string());

    Pipeline::new(workspace.config())?.write_ddl(&tables).await?;
    let ddl = tokio::fs::read_to_string(workspace.output_dir().join("Orders.sql")).await?;
    assert!(ddl.starts_with("CREATE TABLE [sales].[Orders]("));
    assert!(ddl.contains("N'SCHEMA', N'sales', N'TABLE', N'Orders'"));
    Ok(())
}

#[tokio::test]
async fn test_ddl_without_descriptions() -> Result<()> {
    let workspace = TestWorkspace::new()?;
    let mut config = workspace.config();
    config.ddl.include_descriptions = false;

    let pipeline = Pipeline::new(config)?;
    pipeline.write_ddl(&workspace.tables()?).await?;

    let ddl = tokio::fs::read_to_string(workspace.output_dir().join("tblCustomers.sql")).await?;
    assert!(!ddl.contains("sp_addextendedproperty"));
    assert!(ddl.trim_end().ends_with(");"));
    Ok(())
}

#[tokio::test]
async fn test_spreadsheet_export_reads_back() -> Result<()> {
    let workspace = TestWorkspace::new()?;
    let tables = workspace.tables()?;
    let pipeline = Pipeline::new(workspace.config())?;
    let output = pipeline.write_export(&tables).await?;
    assert!(output.is_successful());

    let bytes = tokio::fs::read(workspace.output_dir().join("schema.xlsx")).await?;
    let read = SpreadsheetReader::default().read(&bytes)?;
    let names: Vec<&str> = read.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["tblCustomers", "Orders", "Legacy"]);

    let customers = &read[0];
    assert_eq!(customers.description.as_deref(), Some("Customer accounts"));
    assert_eq!(customers.columns[0].default_value, None);
    assert!(customers.columns[0].primary_key);
    assert_eq!(customers.columns[1].size, 256);
    assert_eq!(customers.columns[2].size, 0);
    assert_eq!(read[1].columns[2].default_value.as_deref(), Some("0"));
    Ok(())
}

#[tokio::test]
async fn test_json_export_and_unknown_export_type() -> Result<()> {
    let workspace = TestWorkspace::new()?;
    let tables = workspace.tables()?;

    let mut config = workspace.config();
    config.export_type = "json".to_string();
    Pipeline::new(config)?.write_export(&tables).await?;
    let snapshot = JsonSchemaSource::new(workspace.output_dir().join("schema.json")).load_tables()?;
    assert_eq!(snapshot, tables);

    let mut config = workspace.config();
    config.export_type = "Word".to_string();
    let result = Pipeline::new(config)?.write_export(&tables).await;
    assert!(result.unwrap_err().to_string().contains("Word"));
    Ok(())
}

#[tokio::test]
async fn test_invalid_config_is_rejected() {
    let mut config = GeneratorConfig::default();
    config.model.namespace = String::new();
    assert!(Pipeline::new(config).is_err());
}
