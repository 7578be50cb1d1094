//! # Generator
//!
//! The generation pipeline: schema -> selected services -> rendered units -> sink.
//!
//! Schema acquisition failures abort the run. Failures while producing or
//! writing a single unit are recorded in the [`GenerationReport`] and the
//! remaining endpoints are still processed.

use crate::emitter::{emit_index, emit_unit, OutputUnit};
use crate::error::{AppError, AppResult};
use crate::naming::module_name;
use crate::schema::{load_schema, Api};
use crate::selector::{endpoint_of, select, AllowList};
use indexmap::IndexMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Default location of the schema file.
pub const DEFAULT_SCHEMA_PATH: &str = "gen/services.json";

/// Default output directory.
pub const DEFAULT_OUTPUT_DIR: &str = "pkg/api/";

/// Destination for rendered output units.
///
/// Abstracted to allow simulating unwritable destinations in tests.
pub trait OutputSink {
    /// Stores `contents` under `file_name` and returns the resulting path.
    fn write(&self, file_name: &str, contents: &str) -> AppResult<PathBuf>;
}

/// Writes units as files inside a directory, creating it when missing.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    root: PathBuf,
}

impl DirectorySink {
    /// Creates a sink rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl OutputSink for DirectorySink {
    fn write(&self, file_name: &str, contents: &str) -> AppResult<PathBuf> {
        let path = self.root.join(file_name);
        fs::create_dir_all(&self.root)
            .and_then(|_| fs::write(&path, contents))
            .map_err(|source| AppError::OutputWrite {
                path: path.clone(),
                source,
            })?;
        Ok(path)
    }
}

/// Reports where units would go without touching the filesystem.
#[derive(Debug, Clone)]
pub struct DryRunSink {
    root: PathBuf,
}

impl DryRunSink {
    /// Creates a sink that pretends to write below `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl OutputSink for DryRunSink {
    fn write(&self, file_name: &str, _contents: &str) -> AppResult<PathBuf> {
        Ok(self.root.join(file_name))
    }
}

/// Settings for one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Path to the schema file.
    pub schema_path: PathBuf,
    /// Directory receiving the generated files.
    pub output_dir: PathBuf,
    /// Endpoints to generate.
    pub allow_list: AllowList,
    /// Whether to write a `mod.rs` declaring the generated modules.
    pub write_index: bool,
    /// Render and validate without writing.
    pub dry_run: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            schema_path: PathBuf::from(DEFAULT_SCHEMA_PATH),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            allow_list: AllowList::default(),
            write_index: true,
            dry_run: false,
        }
    }
}

/// Outcome of a generation run.
#[derive(Debug, Default)]
pub struct GenerationReport {
    /// Endpoints written, with their destination. The index uses an empty endpoint.
    pub written: Vec<(String, PathBuf)>,
    /// Endpoints that failed, with the reason.
    pub failures: Vec<(String, AppError)>,
    /// Paths of services not in the allow-list.
    pub skipped: Vec<String>,
}

impl GenerationReport {
    /// Returns `true` if any unit failed.
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Returns `true` if any unit failed because of a naming problem.
    ///
    /// Such failures mean the schema cannot be represented as is, unlike IO failures.
    pub fn has_collisions(&self) -> bool {
        self.collision_count() > 0
    }

    /// Number of units that failed because of a naming problem.
    pub fn collision_count(&self) -> usize {
        self.failures
            .iter()
            .filter(|(_, e)| {
                matches!(
                    e,
                    AppError::NameCollision { .. } | AppError::InvalidIdentifier { .. }
                )
            })
            .count()
    }

    /// Endpoints successfully written, excluding the index.
    pub fn endpoints(&self) -> impl Iterator<Item = &str> {
        self.written
            .iter()
            .map(|(endpoint, _)| endpoint.as_str())
            .filter(|endpoint| !endpoint.is_empty())
    }
}

/// Generates output for every allowed service of `api` into `sink`.
///
/// Never fails as a whole: per-endpoint errors are collected in the report.
pub fn generate(
    api: &Api,
    allow_list: &AllowList,
    write_index: bool,
    sink: &impl OutputSink,
) -> GenerationReport {
    let mut report = GenerationReport::default();

    if allow_list.is_empty() {
        warn!("Allow-list is empty, nothing will be generated");
    }

    for service in &api.services {
        if !allow_list.contains(endpoint_of(&service.path)) {
            debug!("Skipping service {}", service.path);
            report.skipped.push(service.path.clone());
        }
    }

    let selected = select(&api.services, allow_list);
    // Endpoint -> path of the service that produced it
    let mut claimed: IndexMap<&str, &str> = IndexMap::new();

    for entry in &selected {
        info!("Service: {}", entry.service.path);

        if let Some(first) = claimed.get(entry.endpoint) {
            let e = AppError::NameCollision {
                scope: format!("endpoint {}", entry.endpoint),
                name: entry.endpoint.to_string(),
                keys: vec![first.to_string(), entry.service.path.clone()],
            };
            warn!("Failed to generate {}: {}", entry.endpoint, e);
            report.failures.push((entry.endpoint.to_string(), e));
            continue;
        }
        claimed.insert(entry.endpoint, &entry.service.path);

        match emit_unit(entry).and_then(|unit| store(&unit, sink)) {
            Ok(path) => {
                debug!("Wrote {} records to {:?}", entry.service.actions.len(), path);
                report.written.push((entry.endpoint.to_string(), path));
            }
            Err(e) => {
                warn!("Failed to generate {}: {}", entry.endpoint, e);
                report.failures.push((entry.endpoint.to_string(), e));
            }
        }
    }

    if write_index && !selected.is_empty() {
        let mut modules = Vec::new();
        let mut rejected = Vec::new();
        for endpoint in report.endpoints() {
            match module_name(endpoint) {
                Ok(name) => modules.push(name.to_string()),
                Err(e) => rejected.push((endpoint.to_string(), e)),
            }
        }
        for (endpoint, e) in rejected {
            warn!("Leaving {} out of the module index: {}", endpoint, e);
            report.failures.push((endpoint, e));
        }

        let index = emit_index(modules.iter().map(String::as_str));
        match index.and_then(|unit| store(&unit, sink)) {
            Ok(path) => report.written.push((String::new(), path)),
            Err(e) => {
                warn!("Failed to write module index: {}", e);
                report.failures.push((String::new(), e));
            }
        }
    }

    report
}

fn store(unit: &OutputUnit, sink: &impl OutputSink) -> AppResult<PathBuf> {
    sink.write(&unit.file_name, &unit.contents)
}

/// Loads the schema and runs generation as described by `config`.
///
/// # Errors
///
/// Returns `AppError::SchemaRead` or `AppError::SchemaDecode` when the schema
/// cannot be acquired. Nothing is written in that case.
pub fn run(config: &GeneratorConfig) -> AppResult<GenerationReport> {
    let api = load_schema(&config.schema_path)?;
    info!(
        "Loaded {} services from {:?}",
        api.services.len(),
        config.schema_path
    );
    debug!(
        "Allowed endpoints: {}",
        config.allow_list.iter().collect::<Vec<_>>().join(", ")
    );

    let report = if config.dry_run {
        generate(
            &api,
            &config.allow_list,
            config.write_index,
            &DryRunSink::new(&config.output_dir),
        )
    } else {
        generate(
            &api,
            &config.allow_list,
            config.write_index,
            &DirectorySink::new(&config.output_dir),
        )
    };

    Ok(report)
}

/// Convenience wrapper around [`run`] for a schema file and output directory
/// with every other setting at its default.
pub fn run_with_paths(schema_path: &Path, output_dir: &Path) -> AppResult<GenerationReport> {
    run(&GeneratorConfig {
        schema_path: schema_path.to_path_buf(),
        output_dir: output_dir.to_path_buf(),
        ..GeneratorConfig::default()
    })
}
