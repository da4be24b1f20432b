use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{anyhow, Result};
use clap::Parser;
use eframe::egui;

use genre_scout::analysis::{aggregate, FilterSpec, GroupResult};
use genre_scout::app::ChartWindow;
use genre_scout::config::{default_groups, DEFAULT_DATA_FILE};
use genre_scout::data::loader::{load_file, LoadError};
use genre_scout::report::{format_table, parse_group_arg, to_json, total_matches, NO_MATCHES_HINT};

const TITLE: &str = "Supply vs. Success (Dictionary Tag Data)";

/// One-shot genre report: game count and median reviews per tag group.
#[derive(Debug, Parser)]
#[command(name = "genre-report", version)]
struct Args {
    /// Dataset to analyse (.csv, .tsv or .parquet)
    #[arg(default_value = DEFAULT_DATA_FILE)]
    data: PathBuf,

    /// Group to compare, as NAME=tag1,tag2[!excluded1,excluded2]; repeatable.
    /// Defaults to Puzzle, Detective Puzzle, Horror, Cozy Farm and RPG.
    #[arg(long = "group", value_name = "NAME=TAGS", value_parser = parse_group_arg)]
    groups: Vec<(String, FilterSpec)>,

    /// Also report the share of games with at least this many reviews
    #[arg(long)]
    threshold: Option<f64>,

    /// Print results as JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Open a chart window after printing (only when something matched)
    #[arg(long)]
    chart: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let dataset = match load_file(&args.data) {
        Ok(ds) => ds,
        Err(e @ LoadError::NotFound(_)) => return Err(e.into()),
        Err(e) => return Err(anyhow!(e).context(format!("loading {}", args.data.display()))),
    };
    log::info!("Processing {} games", dataset.len());

    let groups = if args.groups.is_empty() {
        default_groups()
    } else {
        args.groups
    };

    let results = aggregate(&dataset.records, &groups, args.threshold);

    if args.json {
        println!("{}", to_json(&results)?);
    } else {
        println!("\n--- Steam Genre Analysis ---");
        println!("{}", format_table(&results)?);
    }

    if total_matches(&results) == 0 {
        // Keep stdout parseable when it carries JSON.
        if args.json {
            eprintln!("{NO_MATCHES_HINT}");
        } else {
            println!("{NO_MATCHES_HINT}");
        }
        return Ok(());
    }

    if args.chart {
        show_chart(results)?;
    }
    Ok(())
}

fn show_chart(results: Vec<GroupResult>) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1000.0, 600.0]),
        ..Default::default()
    };
    eframe::run_native(
        TITLE,
        options,
        Box::new(|_cc| Ok(Box::new(ChartWindow::new(TITLE, results)))),
    )
    .map_err(|e| anyhow!("chart window failed: {e}"))
}
