//! PHY Compensation Table Generator
//!
//! Command-line front end that precomputes the timing-alignment and
//! frequency-offset tables and serializes them for the compensation kernels.

mod config;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use config::TablegenConfig;
use phy::{FrequencyOffsetTable, TimingAlignmentTable};
use serde::Serialize;

/// PHY compensation table generator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// FFT length (overrides the config file for both tables)
    #[arg(long)]
    fft_size: Option<usize>,

    /// Maximum timing offset magnitude in samples
    #[arg(long)]
    cp_len: Option<usize>,

    /// Number of active subcarriers
    #[arg(long)]
    num_subcarriers: Option<usize>,

    /// Which tables to generate
    #[arg(long, value_enum, default_value = "both")]
    table: TableSelection,

    /// Output format
    #[arg(long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Output file path
    #[arg(short, long, default_value = "phy_tables.json")]
    output: PathBuf,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum TableSelection {
    Ta,
    Fo,
    Both,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum OutputFormat {
    Json,
    Bin,
}

/// On-disk record holding the generated tables and their parameters
#[derive(Debug, Serialize)]
struct TableFile {
    #[serde(skip_serializing_if = "Option::is_none")]
    timing_alignment: Option<TimingAlignmentTable>,
    #[serde(skip_serializing_if = "Option::is_none")]
    frequency_offset: Option<FrequencyOffsetTable>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    fmt().with_env_filter(env_filter).with_target(true).init();

    let mut config = match &args.config {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            TablegenConfig::from_file(path)?
        }
        None => TablegenConfig::default(),
    };

    // CLI overrides apply on top of the file values
    if let Some(fft_size) = args.fft_size {
        config.ta.fft_size = fft_size;
        config.fo.fft_size = fft_size;
    }
    if let Some(cp_len) = args.cp_len {
        config.ta.cyclic_prefix_len = cp_len;
    }
    if let Some(num_subcarriers) = args.num_subcarriers {
        config.ta.num_subcarriers = num_subcarriers;
    }

    let timing_alignment = match args.table {
        TableSelection::Ta | TableSelection::Both => {
            let request = config.ta.to_request();
            let table = TimingAlignmentTable::generate(request)
                .context("Timing-alignment table generation failed")?;
            info!(
                "Timing-alignment table: fft_size={}, cp_len={}, subcarriers={}, {} int16 words",
                request.fft_size,
                request.cyclic_prefix_len,
                request.num_subcarriers,
                request.buffer_len()
            );
            Some(table)
        }
        TableSelection::Fo => None,
    };

    let frequency_offset = match args.table {
        TableSelection::Fo | TableSelection::Both => {
            let request = config.fo.to_request();
            let table = FrequencyOffsetTable::generate(request)
                .context("Frequency-offset table generation failed")?;
            info!(
                "Frequency-offset table: fft_size={}, {} int16 words",
                request.fft_size,
                request.buffer_len()
            );
            Some(table)
        }
        TableSelection::Ta => None,
    };

    let table_file = TableFile {
        timing_alignment,
        frequency_offset,
    };

    let file = File::create(&args.output)
        .with_context(|| format!("Failed to create output file {}", args.output.display()))?;
    let writer = BufWriter::new(file);
    match args.format {
        OutputFormat::Json => serde_json::to_writer_pretty(writer, &table_file)
            .context("Failed to write JSON output")?,
        OutputFormat::Bin => {
            bincode::serialize_into(writer, &table_file).context("Failed to write binary output")?
        }
    }

    info!("Tables written to {}", args.output.display());
    Ok(())
}
