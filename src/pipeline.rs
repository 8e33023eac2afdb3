// Output pipeline: renders artifacts and writes them to the output directory
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

use crate::batch::{BatchGenerator, BatchReport, TableFailure};
use crate::config::GeneratorConfig;
use crate::error::{SchemaGenError, SchemaGenResult};
use crate::export::{ExporterRegistry, SpreadsheetLayout};
use crate::types::TableEntity;

/// Base name of the exported documentation file
pub const EXPORT_FILE_STEM: &str = "schema";

/// Files written by one pipeline step and the tables left out
#[derive(Debug, Clone, Default, Serialize)]
pub struct PipelineOutput {
    /// Paths written, in input order
    pub written: Vec<PathBuf>,
    /// Tables that produced no output
    pub failures: Vec<TableFailure>,
}

impl PipelineOutput {
    pub fn is_successful(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn summary(&self) -> String {
        format!(
            "{} files written, {} tables failed",
            self.written.len(),
            self.failures.len()
        )
    }

    fn merge(&mut self, other: PipelineOutput) {
        self.written.extend(other.written);
        self.failures.extend(other.failures);
    }
}

/// Which artifacts a run produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Artifact {
    Model,
    Ddl,
}

pub struct Pipeline {
    config: GeneratorConfig,
    generator: BatchGenerator,
    exporters: ExporterRegistry,
}

impl Pipeline {
    /// Validate the configuration and build the renderers it describes
    pub fn new(config: GeneratorConfig) -> SchemaGenResult<Self> {
        config.validate()?;
        Ok(Self {
            generator: BatchGenerator::from_config(&config),
            exporters: ExporterRegistry::with_defaults(SpreadsheetLayout::standard()),
            config,
        })
    }

    pub fn with_exporters(mut self, exporters: ExporterRegistry) -> Self {
        self.exporters = exporters;
        self
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn output_directory(&self) -> &Path {
        &self.config.output_directory
    }

    /// Write one `<Class>.cs` file per table
    #[instrument(skip_all, fields(tables = tables.len()))]
    pub async fn write_models(&self, tables: &[TableEntity]) -> SchemaGenResult<PipelineOutput> {
        let report = self.generator.generate(tables);
        self.write_artifacts(report, &[Artifact::Model]).await
    }

    /// Write one `<table>.sql` file per table
    #[instrument(skip_all, fields(tables = tables.len()))]
    pub async fn write_ddl(&self, tables: &[TableEntity]) -> SchemaGenResult<PipelineOutput> {
        let report = self.generator.generate(tables);
        self.write_artifacts(report, &[Artifact::Ddl]).await
    }

    /// Export every table into `schema<ext>` using the configured export type
    #[instrument(skip_all, fields(tables = tables.len()))]
    pub async fn write_export(&self, tables: &[TableEntity]) -> SchemaGenResult<PipelineOutput> {
        let export_type = &self.config.export_type;
        let exporter = self.exporters.get(export_type).ok_or_else(|| {
            SchemaGenError::export(format!(
                "unknown export type '{}', available: {}",
                export_type,
                self.exporters.export_types().join(", ")
            ))
        })?;

        let outcome = exporter.export_report(tables, &self.config.db_type)?;
        for failure in &outcome.skipped {
            warn!("Table {} left out of export: {}", failure.table, failure.reason);
        }

        self.ensure_output_directory().await?;
        let path = self
            .output_directory()
            .join(format!("{}{}", EXPORT_FILE_STEM, exporter.file_extension()));
        tokio::fs::write(&path, &outcome.bytes).await?;
        info!("Export written to {:?} ({} bytes)", path, outcome.bytes.len());

        Ok(PipelineOutput {
            written: vec![path],
            failures: outcome.skipped,
        })
    }

    /// Models, DDL and the exported document in one run; each table is rendered once
    pub async fn run_all(&self, tables: &[TableEntity]) -> SchemaGenResult<PipelineOutput> {
        let report = self.generator.generate(tables);
        let mut output = self
            .write_artifacts(report, &[Artifact::Model, Artifact::Ddl])
            .await?;
        output.merge(self.write_export(tables).await?);
        info!("Pipeline complete: {}", output.summary());
        Ok(output)
    }

    async fn write_artifacts(
        &self,
        report: BatchReport,
        artifacts: &[Artifact],
    ) -> SchemaGenResult<PipelineOutput> {
        self.ensure_output_directory().await?;

        let mut output = PipelineOutput {
            written: Vec::with_capacity(report.artifacts.len() * artifacts.len()),
            failures: report.failures,
        };
        for generated in &report.artifacts {
            for artifact in artifacts {
                let (file_name, text) = match artifact {
                    Artifact::Model => (format!("{}.cs", generated.class_name), &generated.model),
                    Artifact::Ddl => (format!("{}.sql", generated.table), &generated.ddl),
                };
                let path = self.output_directory().join(file_name);
                tokio::fs::write(&path, text).await?;
                output.written.push(path);
            }
        }

        info!("{:?} output: {}", artifacts, output.summary());
        Ok(output)
    }

    async fn ensure_output_directory(&self) -> SchemaGenResult<()> {
        tokio::fs::create_dir_all(self.output_directory()).await?;
        Ok(())
    }
}
