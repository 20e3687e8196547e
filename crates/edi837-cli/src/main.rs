//! # edi837-cli
//!
//! Command-line interface for 837 claim generation.
//!
//! This crate provides the `edi837` binary for generating claim files,
//! validating claim data, and exporting the loop schema for form renderers.

mod config;
mod input;
mod sample;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use config::CliConfig;
use edi837_adapter_x12::X12Serializer;
use edi837_ir::GenerationRequest;
use edi837_pipeline::{ClaimFileGenerator, PipelineConfig};
use edi837_schema::{LoopDefinition, Variant};
use edi837_validation::{StrictnessLevel, ValidationConfig, ValidationEngine};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "edi837")]
#[command(about = "X12 837 claim file generator")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate an 837 file from claim data
    Generate {
        /// Input JSON file (request or bare claim data)
        input: PathBuf,

        /// Claim type (837P or 837I); overrides the request's variant
        #[arg(short = 't', long = "type")]
        variant: Option<String>,

        /// Output directory
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Write the document to stdout instead of a file
        #[arg(long)]
        stdout: bool,

        /// Report loop ids the claim type does not declare
        #[arg(long)]
        strict: bool,
    },

    /// Validate claim data without generating a file
    Validate {
        /// Input JSON file (request or bare claim data)
        input: PathBuf,

        /// Claim type (837P or 837I); overrides the request's variant
        #[arg(short = 't', long = "type")]
        variant: Option<String>,

        /// Report loop ids the claim type does not declare
        #[arg(long)]
        strict: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
        format: ReportFormat,
    },

    /// Export the loop schema of a claim type
    Schema {
        /// Claim type (837P or 837I)
        #[arg(short = 't', long = "type", default_value = "837P")]
        variant: String,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = SchemaFormat::Json)]
        format: SchemaFormat,
    },

    /// Print a complete sample request
    Sample {
        /// Claim type (837P or 837I)
        #[arg(short = 't', long = "type", default_value = "837P")]
        variant: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ReportFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum SchemaFormat {
    Json,
    Yaml,
}

#[derive(Serialize)]
struct SchemaExport {
    variant: Variant,
    description: &'static str,
    loops: &'static [LoopDefinition],
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => CliConfig::load(path)?,
        None => CliConfig::default(),
    };

    match cli.command {
        Commands::Generate {
            input,
            variant,
            output_dir,
            stdout,
            strict,
        } => {
            let request = input::load_request(&input, variant.as_deref())?;
            let strictness = strictness(strict || config.strict);
            if stdout {
                generate_to_stdout(request, &config, strictness)
            } else {
                let output_dir = output_dir
                    .or(config.output_dir.clone())
                    .unwrap_or_else(|| PipelineConfig::default().output_dir);
                generate_to_file(request, config, output_dir, strictness)
            }
        }
        Commands::Validate {
            input,
            variant,
            strict,
            format,
        } => {
            let request = input::load_request(&input, variant.as_deref())?;
            validate(request, strictness(strict || config.strict), format)
        }
        Commands::Schema { variant, format } => {
            let variant: Variant = variant.parse()?;
            let export = SchemaExport {
                variant,
                description: variant.description(),
                loops: variant.loops(),
            };
            match format {
                SchemaFormat::Json => println!("{}", serde_json::to_string_pretty(&export)?),
                SchemaFormat::Yaml => print!("{}", serde_yaml::to_string(&export)?),
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Sample { variant } => {
            let request = sample::sample_request(variant.parse()?)?;
            println!("{}", serde_json::to_string_pretty(&request)?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn strictness(strict: bool) -> StrictnessLevel {
    if strict {
        StrictnessLevel::Strict
    } else {
        StrictnessLevel::Standard
    }
}

fn generate_to_file(
    request: GenerationRequest,
    config: CliConfig,
    output_dir: PathBuf,
    strictness: StrictnessLevel,
) -> Result<ExitCode> {
    tracing::info!("Generating {} claim into {}", request.variant, output_dir.display());
    let generator = ClaimFileGenerator::new(PipelineConfig {
        output_dir,
        strictness,
        envelope_defaults: config.envelope,
    });
    let outcome = generator.generate_request(request);

    println!("{}", outcome.message);
    if let Some(path) = &outcome.file_path {
        println!("File: {}", path.display());
    }
    for error in &outcome.errors {
        if outcome.success {
            println!("  Warning: {error}");
        } else {
            eprintln!("  {error}");
        }
    }

    Ok(if outcome.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn generate_to_stdout(
    request: GenerationRequest,
    config: &CliConfig,
    strictness: StrictnessLevel,
) -> Result<ExitCode> {
    let (identifier, mut data) = request.into_parts();
    let serializer = X12Serializer::from_identifier(&identifier)
        .with_context(|| format!("Cannot generate claim type '{identifier}'"))?;
    data.envelope_mut().fill_defaults(&config.envelope);

    let output = serializer
        .with_config(ValidationConfig { strictness })
        .serialize(&data);
    for deficiency in output.deficiencies.iter() {
        tracing::warn!("{deficiency}");
    }
    println!("{}", output.text);
    Ok(ExitCode::SUCCESS)
}

fn validate(
    request: GenerationRequest,
    strictness: StrictnessLevel,
    format: ReportFormat,
) -> Result<ExitCode> {
    let (identifier, data) = request.into_parts();
    let variant: Variant = identifier.parse()?;
    let report =
        ValidationEngine::with_config(ValidationConfig { strictness }).validate(variant, &data);

    match format {
        ReportFormat::Text => {
            if report.is_clean() {
                println!("{variant} claim data is valid.");
            }
            for message in report.messages() {
                println!("{message}");
            }
        }
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(if report.is_clean() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
