pub mod batch;
pub mod codegen;
pub mod config;
pub mod error;
pub mod export;
pub mod mapping;
pub mod metadata;
pub mod pipeline;
pub mod types;

pub use batch::{BatchGenerator, BatchReport, GeneratedArtifacts, TableFailure};
pub use config::GeneratorConfig;
pub use error::{SchemaGenError, SchemaGenResult};
pub use pipeline::{Pipeline, PipelineOutput};
pub use types::{ColumnEntity, TableEntity};
