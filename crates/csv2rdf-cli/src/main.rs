//! csv2rdf Command-Line Tool
//!
//! Translates a CSV file into RDF/XML using a schema config file, or a schema
//! derived by asking questions about the header line.

mod error;
mod formatter;
mod interactive;
mod paths;

use clap::Parser;
use csv2rdf_core::{
    derive_schema, load_config_file, read_header, translate_file, SchemaRegistry,
    TranslateOptions, DEFAULT_VOCABULARY,
};
use error::CliError;
use formatter::OutputFormat;
use interactive::ConsolePrompter;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// csv2rdf Command-Line Tool
#[derive(Parser, Debug)]
#[command(name = "csv2rdf")]
#[command(version, about = "Translate CSV files into RDF/XML")]
pub struct Args {
    /// Input CSV file
    #[arg(default_value = paths::DEFAULT_INPUT)]
    pub input: PathBuf,

    /// Schema config file (defaults to <input>-config.csv)
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Output RDF file (defaults to <input>.rdf)
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Write a derived schema to the config path
    #[arg(long)]
    pub save_config: bool,

    /// Print the schema instead of translating
    #[arg(long)]
    pub inspect: bool,

    /// Output format for --inspect and the run summary
    #[arg(long, default_value = "table", value_enum)]
    pub format: OutputFormat,

    /// Namespace of the property elements
    #[arg(long, default_value = DEFAULT_VOCABULARY)]
    pub vocabulary: String,

    /// Write instances only, without class and property descriptions
    #[arg(long)]
    pub instances_only: bool,
}

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("csv2rdf=info,csv2rdf_core=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), CliError> {
    if !args.input.is_file() {
        return Err(CliError::MissingInput(args.input));
    }

    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| paths::config_path_for(&args.input));
    let mut registry = load_schema(&args, &config_path)?;

    let formatter = formatter::create_formatter(args.format);
    if args.inspect {
        println!("{}", formatter.format_schema(&registry)?);
        return Ok(());
    }

    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| paths::output_path_for(&args.input));
    let mut options = TranslateOptions::new().with_vocabulary(args.vocabulary.as_str());
    if args.instances_only {
        options = options.without_schema();
    }

    println!("Reading CSV from {}", args.input.display());
    println!("Writing RDF to {}", output_path.display());
    let stats = translate_file(&mut registry, &args.input, &output_path, &options)?;
    println!("{}", formatter.format_summary(&stats));
    Ok(())
}

/// Load the schema from its config file, or derive it on the console.
fn load_schema(args: &Args, config_path: &Path) -> Result<SchemaRegistry, CliError> {
    let mut registry = SchemaRegistry::new();
    if config_path.is_file() {
        load_config_file(config_path, &mut registry)?;
        return Ok(registry);
    }

    eprintln!(
        "could not open config file {}, building the schema from the header",
        config_path.display()
    );
    let header = read_header(&args.input)?;
    let mut prompter = ConsolePrompter::new()?;
    let registry = derive_schema(&header, &mut prompter)?;

    if args.save_config {
        registry.write_config_file(config_path)?;
        println!("Saved schema to {}", config_path.display());
    }
    Ok(registry)
}
