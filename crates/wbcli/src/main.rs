//! wbcli - batch MIDI preprocessing for ML datasets
//!
//! Subcommands:
//! - `wbcli process <root>` - preprocess every MIDI file under a directory
//!   and write a JSON summary
//! - `wbcli inspect <file>` - preprocess one file and print its summary

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use washboard::{PrepConfig, Preprocessor};

mod dataset;
mod summary;

#[derive(Parser)]
#[command(name = "wbcli")]
#[command(about = "MIDI dataset preprocessing: piano rolls and chord labels")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Preprocess a dataset directory and write a JSON summary
    Process {
        /// Dataset root, searched recursively for .mid/.midi files
        root: PathBuf,

        /// Output path for the JSON summary (overwritten)
        #[arg(short, long, default_value = "preprocess_summary.json")]
        output: PathBuf,

        /// Stop after this many files
        #[arg(long)]
        max_files: Option<usize>,

        /// TOML file overriding pipeline defaults
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Piano-roll sampling rate in columns per second
        #[arg(long)]
        fs: Option<f64>,

        /// Quantization grid subdivisions per beat
        #[arg(long)]
        ticks_per_beat: Option<u32>,
    },

    /// Preprocess a single file and print its summary to stdout
    Inspect {
        /// MIDI file path
        file: PathBuf,

        /// TOML file overriding pipeline defaults
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Process {
            root,
            output,
            max_files,
            config,
            fs,
            ticks_per_beat,
        } => {
            let mut prep_config = load_config(config.as_deref())?;
            if let Some(fs) = fs {
                prep_config.fs = fs;
            }
            if let Some(tpb) = ticks_per_beat {
                prep_config.ticks_per_beat = tpb;
            }

            let preprocessor = Preprocessor::new(prep_config);
            let summaries = dataset::run_batch(&preprocessor, &root, max_files)?;
            summary::write_summary(&summaries, &output)?;
            println!("Results saved to {}", output.display());
        }
        Commands::Inspect { file, config } => {
            let preprocessor = Preprocessor::new(load_config(config.as_deref())?);
            let bytes = std::fs::read(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            let result = preprocessor
                .process(&bytes)
                .with_context(|| format!("preprocessing {}", file.display()))?;
            let file_summary = summary::FileSummary::new(0, &file, &result);
            println!("{}", serde_json::to_string_pretty(&file_summary)?);
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<PrepConfig> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
        }
        None => Ok(PrepConfig::default()),
    }
}
