use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::{info, warn, Level};

use schemagen::codegen::inspect_create_table;
use schemagen::export::SpreadsheetReader;
use schemagen::metadata::{JsonSchemaSource, SchemaSource};
use schemagen::{GeneratorConfig, Pipeline, PipelineOutput, TableEntity};

#[derive(Parser)]
#[command(name = "schemagen")]
#[command(about = "Generate model classes, CREATE TABLE scripts and schema documents from table metadata")]
#[command(version = "0.1.0")]
#[command(after_help = "EXAMPLES:
    # Model classes for every table in a schema file
    schemagen model -s schema.json --namespace Shop.Models

    # DDL without description statements
    schemagen ddl -s schema.json --no-descriptions

    # Spreadsheet documentation
    schemagen export -s schema.json --format excel

    # Everything, into a custom directory
    schemagen all -s schema.json -o ./generated

    # Check a generated script
    schemagen inspect --ddl ./generated/Users.sql")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Set log level explicitly
    #[arg(long, global = true, value_enum)]
    log_level: Option<LogLevel>,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    /// JSON configuration file; flags override its values
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory generated files are written to
    #[arg(short, long, global = true, value_name = "DIR")]
    output_dir: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Debug)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ExportFormat {
    Excel,
    Json,
}

impl ExportFormat {
    fn export_type(self) -> &'static str {
        match self {
            ExportFormat::Excel => "Excel",
            ExportFormat::Json => "Json",
        }
    }
}

#[derive(clap::Args, Debug)]
struct SchemaArgs {
    /// Schema JSON file (array of tables or {"tables": [...]})
    #[arg(short, long, value_name = "FILE")]
    schema: PathBuf,
}

#[derive(clap::Args, Debug, Default)]
struct ModelArgs {
    /// Namespace of the generated classes
    #[arg(long)]
    namespace: Option<String>,

    /// Prefix added to every class name
    #[arg(long)]
    class_prefix: Option<String>,

    /// Suffix added to every class name
    #[arg(long)]
    class_suffix: Option<String>,

    /// Strip tbl/tab prefixes from table names when naming classes
    #[arg(long)]
    trim_prefix: bool,
}

#[derive(clap::Args, Debug, Default)]
struct DdlArgs {
    /// Leave out the description statements
    #[arg(long)]
    no_descriptions: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate one model class file per table
    Model {
        #[command(flatten)]
        input: SchemaArgs,
        #[command(flatten)]
        model: ModelArgs,
    },

    /// Generate one CREATE TABLE script per table
    Ddl {
        #[command(flatten)]
        input: SchemaArgs,
        #[command(flatten)]
        ddl: DdlArgs,
    },

    /// Export the schema into a documentation file
    Export {
        #[command(flatten)]
        input: SchemaArgs,

        /// Document format (defaults to the configured export type)
        #[arg(long, value_enum)]
        format: Option<ExportFormat>,
    },

    /// Generate models, DDL and the exported document
    All {
        #[command(flatten)]
        input: SchemaArgs,
        #[command(flatten)]
        model: ModelArgs,
        #[command(flatten)]
        ddl: DdlArgs,
    },

    /// Parse a generated CREATE TABLE script and print its columns
    Inspect {
        /// DDL script to inspect
        #[arg(long, value_name = "FILE")]
        ddl: PathBuf,
    },

    /// Read an exported spreadsheet back into schema JSON
    Read {
        /// Spreadsheet produced by `export`
        #[arg(long, value_name = "FILE")]
        spreadsheet: PathBuf,

        /// Write the JSON here instead of standard output
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    initialize_logging(&cli)?;

    info!("Starting schemagen v{}", env!("CARGO_PKG_VERSION"));

    let mut config = match &cli.config {
        Some(path) => GeneratorConfig::load(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => GeneratorConfig::default(),
    };
    if let Some(dir) = &cli.output_dir {
        config.output_directory = dir.clone();
    }

    let output = match cli.command {
        Commands::Model { input, model } => {
            apply_model_args(&mut config, model);
            let tables = load_tables(&input.schema)?;
            Pipeline::new(config)?.write_models(&tables).await?
        }
        Commands::Ddl { input, ddl } => {
            apply_ddl_args(&mut config, ddl);
            let tables = load_tables(&input.schema)?;
            Pipeline::new(config)?.write_ddl(&tables).await?
        }
        Commands::Export { input, format } => {
            if let Some(format) = format {
                config.export_type = format.export_type().to_string();
            }
            let tables = load_tables(&input.schema)?;
            Pipeline::new(config)?.write_export(&tables).await?
        }
        Commands::All { input, model, ddl } => {
            apply_model_args(&mut config, model);
            apply_ddl_args(&mut config, ddl);
            let tables = load_tables(&input.schema)?;
            Pipeline::new(config)?.run_all(&tables).await?
        }
        Commands::Inspect { ddl } => {
            return execute_inspect(&ddl).await;
        }
        Commands::Read { spreadsheet, output } => {
            return execute_read(&spreadsheet, output.as_deref()).await;
        }
    };

    report_output(&output);
    if !output.is_successful() {
        std::process::exit(1);
    }
    Ok(())
}

fn load_tables(path: &Path) -> Result<Vec<TableEntity>> {
    JsonSchemaSource::new(path)
        .load_tables()
        .with_context(|| format!("failed to load schema from {}", path.display()))
}

fn apply_model_args(config: &mut GeneratorConfig, args: ModelArgs) {
    if let Some(namespace) = args.namespace {
        config.model.namespace = namespace;
    }
    if let Some(prefix) = args.class_prefix {
        config.model.class_prefix = prefix;
    }
    if let Some(suffix) = args.class_suffix {
        config.model.class_suffix = suffix;
    }
    if args.trim_prefix {
        config.model.trim_table_prefix = true;
    }
}

fn apply_ddl_args(config: &mut GeneratorConfig, args: DdlArgs) {
    if args.no_descriptions {
        config.ddl.include_descriptions = false;
    }
}

fn report_output(output: &PipelineOutput) {
    for path in &output.written {
        info!("Wrote {}", path.display());
    }
    for failure in &output.failures {
        eprintln!("✗ {}: {}", failure.table, failure.reason);
    }
    info!("Summary: {}", output.summary());
}

async fn execute_inspect(path: &Path) -> Result<()> {
    let ddl = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    let table = inspect_create_table(&ddl)?;

    println!("{}", table.name);
    for column in &table.columns {
        let mut flags = Vec::new();
        if column.primary_key {
            flags.push("PK".to_string());
        }
        if column.identity {
            flags.push("IDENTITY".to_string());
        }
        let nullability = if column.nullable { "NULL" } else { "NOT NULL" };
        flags.push(nullability.to_string());
        if let Some(default) = &column.default {
            flags.push(format!("DEFAULT {}", default));
        }
        println!("  {} {} {}", column.name, column.data_type, flags.join(" "));
    }
    Ok(())
}

async fn execute_read(path: &Path, output: Option<&Path>) -> Result<()> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    let tables = SpreadsheetReader::default().read(&bytes)?;
    if tables.is_empty() {
        warn!("No sheets found in {}", path.display());
    }

    let json = serde_json::to_string_pretty(&tables)?;
    match output {
        Some(target) => {
            tokio::fs::write(target, json).await?;
            info!("Wrote {} tables to {}", tables.len(), target.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}

/// Initialize logging based on CLI configuration
fn initialize_logging(cli: &Cli) -> Result<()> {
    let log_level = if let Some(level) = &cli.log_level {
        level.clone().into()
    } else if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    if cli.json_logs {
        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_target(false)
            .with_thread_ids(cli.verbose)
            .with_file(cli.verbose)
            .with_line_number(cli.verbose)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_target(false)
            .with_thread_ids(cli.verbose)
            .with_file(cli.verbose)
            .with_line_number(cli.verbose)
            .init();
    }

    Ok(())
}
