use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};
use colored::*;
use std::path::{Path, PathBuf};

use sortrs::calibrate::{DistanceCalibrator, DistanceMode};
use sortrs::config::AppConfig;
use sortrs::error::SorTraceError;
use sortrs::events::EventTableBuilder;
use sortrs::export::{self, AnalysisReport, ExportFormat};
use sortrs::import::BlocksImporter;
use sortrs::logging::{init_logging, LogLevel};
use sortrs::models::MeasurementBlocks;
use sortrs::report;
use sortrs::summary::SummaryAggregator;

/// sortrs - OTDR trace loss and length analysis
///
/// Reads the JSON dump produced by the SOR decoder, reconciles the distance
/// encoding, builds the calibrated event-loss table and reports fiber length
/// and attenuation the way the reference trace viewer displays them.
#[derive(Parser)]
#[command(name = "sortrs")]
#[command(version = "0.1.0")]
#[command(about = "OTDR trace loss/length analysis", long_about = None)]
struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Increase verbosity of output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a decoded trace and print the loss report
    Analyze {
        /// Decoded-blocks JSON dump (decoder output)
        file: PathBuf,

        /// Distance scale: auto, oneway or twoway (default from config)
        #[arg(short, long)]
        distance: Option<String>,

        /// Also write the event table as CSV
        #[arg(long, value_name = "FILE")]
        csv: Option<PathBuf>,

        /// Also write the full report as JSON
        #[arg(long, value_name = "FILE")]
        json: Option<PathBuf>,

        /// Also plot the trace waveform as PNG
        #[cfg(feature = "charts")]
        #[arg(long, value_name = "FILE")]
        plot: Option<PathBuf>,

        /// Number of event rows to show (default from config)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Export the analysis without the console report
    Export {
        /// Decoded-blocks JSON dump (decoder output)
        file: PathBuf,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Export format (csv, json)
        #[arg(short = 'f', long, default_value = "csv")]
        format: String,

        /// Distance scale: auto, oneway or twoway (default from config)
        #[arg(short, long)]
        distance: Option<String>,
    },

    /// Show or initialize application configuration
    Config {
        /// Print the effective configuration
        #[arg(short, long)]
        list: bool,

        /// Write a default configuration file
        #[arg(long)]
        init: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        let message = match e.downcast_ref::<SorTraceError>() {
            Some(err) => err.user_message(),
            None => format!("{:#}", e),
        };
        eprintln!("{}", message.red());
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = AppConfig::load_or_default(cli.config.as_deref());

    let mut log_config = config.logging.clone();
    if cli.verbose > 0 {
        log_config.level = LogLevel::from_verbosity(cli.verbose);
    }
    init_logging(&log_config)?;

    match cli.command {
        Commands::Analyze {
            file,
            distance,
            csv,
            json,
            #[cfg(feature = "charts")]
            plot,
            limit,
        } => {
            let mode = resolve_mode(distance.as_deref(), &config)?;
            let limit = limit.unwrap_or(config.settings.report_event_limit);

            let (blocks, analysis) = analyze(&file, mode)?;

            println!();
            print!(
                "{}",
                report::render_summary(&analysis.source, analysis.distance_factor, &analysis.summary)
            );
            let table = report::render_event_table(&analysis.events, limit);
            if !table.is_empty() {
                println!();
                print!("{}", table);
            }

            if let Some(path) = csv {
                export::export_analysis(ExportFormat::Csv, &analysis, &path)
                    .map_err(SorTraceError::from)?;
                println!("{}", format!("✓ CSV written: {}", path.display()).green());
            }

            if let Some(path) = json {
                export::export_analysis(ExportFormat::Json, &analysis, &path)
                    .map_err(SorTraceError::from)?;
                println!("{}", format!("✓ JSON written: {}", path.display()).green());
            }

            #[cfg(feature = "charts")]
            if let Some(path) = plot {
                sortrs::plot::plot_trace(&blocks, analysis.distance_factor, &path)?;
                println!("{}", format!("✓ PNG written: {}", path.display()).green());
            }

            #[cfg(not(feature = "charts"))]
            let _ = blocks;

            Ok(())
        }

        Commands::Export {
            file,
            output,
            format,
            distance,
        } => {
            let mode = resolve_mode(distance.as_deref(), &config)?;
            let format = ExportFormat::from_str(&format).map_err(SorTraceError::from)?;

            let (_, analysis) = analyze(&file, mode)?;
            export::export_analysis(format, &analysis, &output).map_err(SorTraceError::from)?;

            println!(
                "{}",
                format!("✓ Export written: {}", output.display()).green()
            );
            Ok(())
        }

        Commands::Config { list, init } => {
            if init {
                let path = cli
                    .config
                    .clone()
                    .unwrap_or_else(AppConfig::default_config_path);
                AppConfig::default().save_to_file(&path)?;
                println!("{}", format!("✓ Config written: {}", path.display()).green());
            }

            if list || !init {
                let rendered = toml::to_string_pretty(&config)?;
                print!("{}", rendered);
            }
            Ok(())
        }
    }
}

/// Run the full pipeline on one decoded dump.
fn analyze(file: &Path, mode: DistanceMode) -> Result<(MeasurementBlocks, AnalysisReport)> {
    let blocks = BlocksImporter::import_file(file)?;

    let factor = DistanceCalibrator::resolve(mode, &blocks);
    let rows = EventTableBuilder::build(&blocks, factor);
    let summary = SummaryAggregator::summarize(&blocks, &rows);

    let analysis = AnalysisReport {
        source: file.display().to_string(),
        distance_factor: factor,
        generated_at: Utc::now(),
        summary,
        events: rows,
    };

    Ok((blocks, analysis))
}

fn resolve_mode(arg: Option<&str>, config: &AppConfig) -> Result<DistanceMode> {
    match arg {
        Some(s) => s
            .parse::<DistanceMode>()
            .map_err(|e| anyhow::anyhow!(e)),
        None => Ok(config.settings.default_distance_mode),
    }
}
