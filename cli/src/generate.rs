#![deny(missing_docs)]

//! # Generate Command
//!
//! Reads the web service schema and writes one Rust module per allowed endpoint.

use crate::error::{CliError, CliResult};
use std::path::PathBuf;
use wsgen_core::generator::{DEFAULT_OUTPUT_DIR, DEFAULT_SCHEMA_PATH};
use wsgen_core::{run, AllowList, GenerationReport, GeneratorConfig};

/// Arguments for the generate command.
#[derive(clap::Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Name of the file which contains the api definition.
    #[clap(short, long, default_value = DEFAULT_SCHEMA_PATH)]
    pub filename: PathBuf,

    /// Directory where the generated files will be stored.
    #[clap(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output: PathBuf,

    /// Endpoint to generate (repeatable). Defaults to `user_groups` and `permissions`.
    #[clap(short, long = "endpoint")]
    pub endpoints: Vec<String>,

    /// Do not write the `mod.rs` module index.
    #[clap(long)]
    pub no_index: bool,

    /// Render and validate everything without writing files.
    #[clap(long)]
    pub dry_run: bool,
}

impl GenerateArgs {
    /// Builds the generator configuration described by the arguments.
    pub fn config(&self) -> GeneratorConfig {
        let allow_list = if self.endpoints.is_empty() {
            AllowList::default()
        } else {
            self.endpoints.iter().cloned().collect()
        };

        GeneratorConfig {
            schema_path: self.filename.clone(),
            output_dir: self.output.clone(),
            allow_list,
            write_index: !self.no_index,
            dry_run: self.dry_run,
        }
    }
}

/// Executes the generation.
///
/// Write failures are printed but do not fail the command. Naming conflicts do,
/// once every endpoint has been processed.
pub fn execute(args: &GenerateArgs) -> CliResult<GenerationReport> {
    let report = run(&args.config())?;
    print_summary(&report, args.dry_run);

    if report.has_collisions() {
        return Err(CliError::Collisions(report.collision_count()));
    }

    Ok(report)
}

fn print_summary(report: &GenerationReport, dry_run: bool) {
    let verb = if dry_run { "Would write" } else { "Wrote" };

    for (_, path) in &report.written {
        println!("{} {}", verb, path.display());
    }
    for (endpoint, error) in &report.failures {
        let name = if endpoint.is_empty() {
            "module index"
        } else {
            endpoint.as_str()
        };
        println!("ERROR: {}: {}", name, error);
    }

    println!(
        "\nTotal: {} written, {} failed, {} skipped",
        report.written.len(),
        report.failures.len(),
        report.skipped.len()
    );
}
