use std::path::PathBuf;

use clap::Parser;
use eframe::egui;

use genre_scout::app::GenreScoutApp;
use genre_scout::config::DEFAULT_DATA_FILE;
use genre_scout::state::AppState;

/// Interactive genre research: profiles of tag groups compared side by side.
#[derive(Debug, Parser)]
#[command(name = "genre-scout", version)]
struct Args {
    /// Dataset to open at startup (.csv, .tsv or .parquet)
    #[arg(default_value = DEFAULT_DATA_FILE)]
    data: PathBuf,
}

fn main() -> eframe::Result {
    env_logger::init();
    let args = Args::parse();

    let mut state = AppState::default();
    if args.data.exists() {
        state.load(&args.data);
    } else {
        log::info!(
            "{} not found; waiting for File → Open…",
            args.data.display()
        );
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 820.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Genre Scout – Steam Genre Research",
        options,
        Box::new(|_cc| Ok(Box::new(GenreScoutApp::new(state)))),
    )
}
