#![deny(missing_docs)]

//! # wsgen Core
//!
//! Core library for the web service schema to Rust record generator.
//!
//! Pipeline: [`schema`] -> [`selector`] -> [`emitter`], driven by [`generator`].

/// Shared error types.
pub mod error;

/// Schema document model and decoding.
pub mod schema;

/// Endpoint allow-list filtering.
pub mod selector;

/// Identifier derivation.
pub mod naming;

/// Record construction and rendering.
pub mod emitter;

/// The generation pipeline.
pub mod generator;

/// Response example decoding.
pub mod response;

pub use emitter::{
    build_records, emit_index, emit_unit, render_records, GeneratedField, GeneratedRecord,
    OutputUnit, FIELD_TYPE, GENERATED_HEADER,
};
pub use error::{AppError, AppResult};
pub use generator::{
    generate, run, run_with_paths, DirectorySink, DryRunSink, GenerationReport,
    GeneratorConfig, OutputSink,
};
pub use naming::{field_name, module_name, to_upper_camel, type_name};
pub use response::ResponseExample;
pub use schema::{load_schema, Action, Api, Param, Service};
pub use selector::{endpoint_of, select, AllowList, SelectedService};
