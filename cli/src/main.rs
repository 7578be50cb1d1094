#![deny(missing_docs)]

//! # wsgen CLI
//!
//! Command Line Interface for the web service record generator.
//!
//! Reads the schema file (`--filename`, default `gen/services.json`) and writes one
//! Rust module per allowed endpoint into `--output` (default `pkg/api/`).
//!
//! Exit status is non-zero when the schema cannot be read or decoded, or when an
//! endpoint could not be generated because of a naming conflict. Write failures
//! are reported but do not change the exit status.

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

mod error;
mod generate;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Generate Rust request records from a web service schema")]
struct Cli {
    #[clap(flatten)]
    generate: generate::GenerateArgs,

    /// Verbosity level (-v, -vv, -vvv). `RUST_LOG` takes precedence when set.
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(level.into()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match generate::execute(&cli.generate) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli_structure() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["wsgen"]).unwrap();
        assert_eq!(cli.generate.filename.to_str(), Some("gen/services.json"));
        assert_eq!(cli.generate.output.to_str(), Some("pkg/api/"));
        assert!(cli.generate.endpoints.is_empty());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_repeated_endpoints() {
        let cli =
            Cli::try_parse_from(["wsgen", "-e", "issues", "--endpoint", "rules", "-vv"]).unwrap();
        assert_eq!(cli.generate.endpoints, vec!["issues", "rules"]);
        assert_eq!(cli.verbose, 2);
    }
}
