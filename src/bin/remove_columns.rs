//! Remove configured columns from a detection CSV, splitting the
//! combined `data_pas` timestamp into a (`data`, `hora_utc`) pair
//! rounded to the nearest hour.
//!
//! Writes to `<input>_no_cols.csv` unless an output path is given.

use std::path::{Path, PathBuf};
use std::process::exit;

use inmet_focos_prep::config::PrepConfig;
use inmet_focos_prep::csvio;
use inmet_focos_prep::logging::{self, Tool};
use inmet_focos_prep::model::PrepError;
use inmet_focos_prep::transform::prune;

const USAGE: &str = "Usage: remove_columns <input_csv> [output_csv] [--config <path>]";

fn main() {
    let mut positional: Vec<String> = Vec::new();
    let mut config_path: Option<String> = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--config" {
            match args.next() {
                Some(path) => config_path = Some(path),
                None => {
                    eprintln!("{}", USAGE);
                    exit(2);
                }
            }
        } else {
            positional.push(arg);
        }
    }

    if positional.is_empty() || positional.len() > 2 {
        eprintln!("{}", USAGE);
        exit(2);
    }

    let input = PathBuf::from(&positional[0]);
    let output = positional
        .get(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| csvio::with_suffix(&input, "_no_cols.csv"));

    if let Err(e) = run(&input, &output, config_path.as_deref()) {
        logging::error(Tool::Prune, &e.to_string());
        exit(1);
    }
}

fn run(input: &Path, output: &Path, config_path: Option<&str>) -> Result<(), PrepError> {
    let config = match config_path {
        Some(path) => PrepConfig::load(Path::new(path))?,
        None => PrepConfig::load_or_default()?,
    };

    let table = csvio::read_table(input, None)?;
    let outcome = prune::prune_columns(&table, &config.prune);

    let Some(pruned) = outcome.table else {
        println!(
            "None of the columns {:?} were found. Leaving the file unchanged.",
            config.prune.columns
        );
        return Ok(());
    };

    csvio::write_table_atomic(output, &pruned)?;
    println!("Removed columns: {:?}", outcome.removed);
    if outcome.timestamp_split {
        println!(
            "Split '{}' into (data, hora_utc), rounded to the nearest hour.",
            config.prune.timestamp_column
        );
    }
    println!("Output written to: {}", output.display());

    logging::log_run_summary(
        Tool::Prune,
        table.rows.len(),
        pruned.rows.len(),
        outcome.unparsed_timestamps,
    );
    Ok(())
}
