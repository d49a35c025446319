use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use lkod_core::{
    DatasetRecord, DistributionRecord, GeneratorConfig, Operation, PersistReport, chain,
    load_descriptors, map_all, persist_all,
};
use lkod_files::OutputDir;
use schemars::schema_for;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

mod logging;

use crate::logging::{LogConfig, init_logging};

#[derive(Parser)]
#[command(name = "lkod")]
#[command(about = "Generates OFN catalog records from an open-data portal export", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Map the source export and save and/or show the generated records
    Generate(GenerateArgs),
    /// Export JSON Schemas of the generated record types
    Schema {
        #[command(subcommand)]
        command: SchemaCommands,
    },
}

#[derive(Args)]
struct GenerateArgs {
    /// Config file (.toml, .yaml or .yml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Source JSON export (array of dataset descriptors)
    #[arg(long)]
    source: Option<PathBuf>,

    /// Output directory (default: ./generated)
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// save-and-show, nosave-and-show or save-and-noshow
    #[arg(long)]
    mode: Option<String>,

    /// Pretty-print written records
    #[arg(long)]
    pretty: bool,
}

#[derive(Subcommand)]
enum SchemaCommands {
    /// Export JSON Schema files for the record types
    Export {
        /// Output directory (default: ./schemas)
        #[arg(long, default_value = "schemas")]
        out_dir: PathBuf,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(&LogConfig::from_flags(cli.verbose, cli.quiet));

    match cli.command {
        Commands::Generate(args) => generate(args, &mut io::stdout().lock()),
        Commands::Schema { command } => match command {
            SchemaCommands::Export { out_dir } => schema_export(out_dir).map(|()| ExitCode::SUCCESS),
        },
    }
}

fn generate(args: GenerateArgs, out: &mut impl Write) -> Result<ExitCode> {
    let config = match &args.config {
        Some(path) => GeneratorConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => GeneratorConfig::default(),
    }
    .with_overrides(args.source, args.out_dir, args.mode, args.pretty);

    let operation = match config.mode.parse::<Operation>() {
        Ok(operation) => operation,
        Err(unknown) => {
            writeln!(out, "{unknown}")?;
            return Ok(ExitCode::FAILURE);
        }
    };

    let descriptors = load_descriptors(&config.source)?;
    let records = map_all(&descriptors)?;
    if records.is_empty() {
        writeln!(out, "No dataset descriptors in {}", config.source.display())?;
        return Ok(ExitCode::SUCCESS);
    }

    run_operation(operation, &records, &config, out)
}

fn run_operation(
    operation: Operation,
    records: &[DatasetRecord],
    config: &GeneratorConfig,
    out: &mut impl Write,
) -> Result<ExitCode> {
    info!(%operation, records = records.len(), "processing records");
    if operation.saves() {
        let mut dir = OutputDir::new(&config.out_dir);
        let report = persist_all(records, &mut dir, config.pretty);
        if !report.is_complete() {
            print_failures(&report, &mut io::stderr().lock())?;
            return Ok(ExitCode::FAILURE);
        }
        if !operation.shows() {
            writeln!(
                out,
                "Saved {} records to {}",
                report.written.len(),
                config.out_dir.display()
            )?;
        }
    }
    if operation.shows() {
        show_records(records, out)?;
    }
    Ok(ExitCode::SUCCESS)
}

fn show_records(records: &[DatasetRecord], out: &mut impl Write) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, records)?;
    writeln!(out)?;
    Ok(())
}

fn print_failures(report: &PersistReport, err: &mut impl Write) -> Result<()> {
    if let Some(setup) = &report.setup {
        writeln!(err, "Nothing saved: {}", chain(setup))?;
    }
    for failure in &report.failures {
        let name = if failure.iri.is_empty() {
            format!("record #{}", failure.index)
        } else {
            failure.iri.clone()
        };
        writeln!(err, "Not saved: {name}: {}", chain(&failure.error))?;
    }
    writeln!(
        err,
        "Saved {} of {} records",
        report.written.len(),
        report.written.len() + report.failures.len()
    )?;
    Ok(())
}

fn schema_export(out_dir: PathBuf) -> Result<()> {
    fs::create_dir_all(&out_dir)?;

    // Export DatasetRecord schema
    let dataset_schema = schema_for!(DatasetRecord);
    let dataset_json = serde_json::to_string_pretty(&dataset_schema)?;
    fs::write(out_dir.join("DatasetRecord.schema.json"), dataset_json)?;

    // Export DistributionRecord schema
    let distribution_schema = schema_for!(DistributionRecord);
    let distribution_json = serde_json::to_string_pretty(&distribution_schema)?;
    fs::write(out_dir.join("DistributionRecord.schema.json"), distribution_json)?;

    println!("Exported schemas to {}", out_dir.display());
    Ok(())
}
