use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use formcsv::{below_path_value, get_path, read_table, table_to_json, FormError, KeyPath, ReaderConfig};
use log::{debug, info, warn};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Form-field CSV parser and document helper tool
#[derive(Parser)]
#[command(name = "formcsv")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Reader limits file (JSON)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse CSV text into a JSON array of records
    Parse {
        /// Input file (use '-' for stdin)
        #[arg(short, long, value_name = "FILE", default_value = "-")]
        input: String,

        /// Output file (use '-' for stdout)
        #[arg(short, long, value_name = "FILE", default_value = "-")]
        output: String,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Print the value at a dotted key path in a JSON document
    Get {
        /// Input JSON document (use '-' for stdin)
        #[arg(short, long, value_name = "FILE", default_value = "-")]
        input: String,

        /// Dotted key path, e.g. fields.tags.0
        #[arg(short, long, value_name = "PATH")]
        path: String,
    },

    /// List the attachments stored below a path prefix
    Attachments {
        /// Input JSON document (use '-' for stdin)
        #[arg(short, long, value_name = "FILE", default_value = "-")]
        input: String,

        /// Path prefix, without the trailing slash
        #[arg(short, long, value_name = "PREFIX")]
        prefix: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity flags
    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(config_path) => load_config(config_path)?,
        None => ReaderConfig::default(),
    };

    match cli.command {
        Commands::Parse {
            input,
            output,
            pretty,
        } => parse_command(&input, &output, pretty, &config, cli.quiet)?,
        Commands::Get { input, path } => get_command(&input, &path)?,
        Commands::Attachments { input, prefix } => attachments_command(&input, &prefix)?,
    }

    Ok(())
}

/// Set up logging based on verbosity flags
fn setup_logging(verbose: bool, quiet: bool) {
    let log_level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .init();

    debug!("Logging initialized at {} level", log_level);
}

/// Load reader limits from a JSON file
fn load_config(path: &Path) -> Result<ReaderConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config = ReaderConfig::from_json(&text).map_err(|e| map_form_error(e, "Config"))?;
    debug!("Loaded config: {:?}", config);
    Ok(config)
}

/// Read input from file or stdin
fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read from stdin")?;
        Ok(buffer)
    } else {
        fs::read_to_string(input).with_context(|| format!("Failed to read input file: {}", input))
    }
}

/// Write output to file or stdout
fn write_output(output: &str, content: &str) -> Result<()> {
    if output == "-" {
        io::stdout()
            .write_all(content.as_bytes())
            .context("Failed to write to stdout")?;
        io::stdout().flush().context("Failed to flush stdout")?;
    } else {
        fs::write(output, content)
            .with_context(|| format!("Failed to write output file: {}", output))?;
    }
    Ok(())
}

/// Read and decode a JSON document
fn read_document(input: &str) -> Result<serde_json::Value> {
    let text = read_input(input)?;
    serde_json::from_str(&text)
        .map_err(|e| map_form_error(FormError::from(e), "Document decoding"))
}

fn to_json(value: &serde_json::Value, pretty: bool) -> Result<String> {
    let mut text = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .context("Failed to encode JSON")?;
    text.push('\n');
    Ok(text)
}

/// Execute the parse command
fn parse_command(
    input: &str,
    output: &str,
    pretty: bool,
    config: &ReaderConfig,
    quiet: bool,
) -> Result<()> {
    let start_time = Instant::now();

    info!("Parsing CSV: {} -> {}", input, output);

    let text = read_input(input)?;
    if text.is_empty() {
        warn!("Input is empty");
    }

    let table = read_table(&text, config).map_err(|e| map_form_error(e, "CSV parsing"))?;
    let fields: usize = table.iter().map(Vec::len).sum();

    write_output(output, &to_json(&table_to_json(&table), pretty)?)?;

    let duration = start_time.elapsed();
    if !quiet {
        eprintln!("✓ Parsed {} records, {} fields", table.len(), fields);
        eprintln!("  Input:       {} bytes", text.len());
        eprintln!("  Time:        {:.3}s", duration.as_secs_f64());
    }

    info!("Parse completed in {:.3}s", duration.as_secs_f64());

    Ok(())
}

/// Execute the get command
fn get_command(input: &str, path: &str) -> Result<()> {
    let doc = read_document(input)?;
    let key_path = KeyPath::parse_dotted(path);
    debug!("Looking up {} keys", key_path.len());

    match get_path(&doc, key_path) {
        Some(value) => write_output("-", &to_json(value, true)?),
        None => anyhow::bail!("No value at path '{}'", path),
    }
}

/// Execute the attachments command
fn attachments_command(input: &str, prefix: &str) -> Result<()> {
    let doc = read_document(input)?;
    let below = below_path_value(&doc, prefix);
    info!("{} attachments below '{}'", below.len(), prefix);

    write_output("-", &to_json(&serde_json::Value::Object(below), true)?)
}

/// Map FormError to anyhow::Error with context
fn map_form_error(error: FormError, context: &str) -> anyhow::Error {
    match error {
        FormError::InputTooLarge { size, limit } => anyhow::anyhow!(
            "{}: input of {} bytes exceeds the {} byte limit",
            context,
            size,
            limit
        ),
        FormError::TooManyRecords { limit } => {
            anyhow::anyhow!("{}: more than {} records", context, limit)
        }
        FormError::TooManyFields { record, limit } => anyhow::anyhow!(
            "{}: record {} has more than {} fields",
            context,
            record,
            limit
        ),
        FormError::JsonParseError(e) => anyhow::anyhow!("{}: JSON parse error: {}", context, e),
        FormError::IoError(e) => anyhow::anyhow!("{}: IO error: {}", context, e),
        other => anyhow::anyhow!("{}: {}", context, other),
    }
}
