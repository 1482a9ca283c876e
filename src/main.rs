use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Local;
use tracing::info;
use tracing_subscriber::EnvFilter;

use net_nitty::{config, export, nitty_scrape, ranker};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(err) = run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.txt".to_string());
    let config = config::load(Path::new(&config_path))?;

    if config.visible_columns.is_empty() {
        info!("No VISIBLE_COLUMNS specified. Doing nothing, buh bye.");
        return Ok(());
    }

    let formula = config.formula.as_ref().filter(|f| f.enabled);
    let select_mode = formula.is_some_and(|f| f.select_mode);

    let year = nitty_scrape::season_year(Local::now().date_naive());
    let rows = nitty_scrape::fetch_nitty_rows(year)?;
    info!("Getting all team stats");
    let teams = nitty_scrape::collect_team_records(&rows, &config, year, select_mode)?;

    let teams = match formula {
        Some(formula) => {
            info!("Sorting results and writing to file");
            ranker::rank(teams, formula, select_mode)
        }
        None => {
            info!("Writing results to file");
            teams
        }
    };

    let fname = export::report_filename(formula.is_some(), select_mode, Local::now());
    let path = PathBuf::from(&fname);
    export::write_report(&path, &teams, &config.visible_columns)?;
    info!("Generated report at {}", path.display());
    Ok(())
}
