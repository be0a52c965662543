//! Expand `f_data` into (`f_day`, `f_month`, `f_year`) and `f_hora_utc`
//! into a cyclical (`hour_sin`, `hour_cos`) pair.
//!
//! Overwrites in place after creating a `.bak` sibling, or writes
//! `<input>.dt.csv` with `--no-inplace`.

use std::path::{Path, PathBuf};
use std::process::exit;

use inmet_focos_prep::config::PrepConfig;
use inmet_focos_prep::csvio;
use inmet_focos_prep::logging::{self, Tool};
use inmet_focos_prep::model::PrepError;
use inmet_focos_prep::transform::cyclical;

const USAGE: &str =
    "Usage: transform_date_time -i <input_csv> [--no-inplace] [--encoding <label>] [--config <path>]";

fn main() {
    let mut input: Option<String> = None;
    let mut in_place = true;
    let mut encoding: Option<String> = None;
    let mut config_path: Option<String> = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-i" | "--input" => input = args.next(),
            "--no-inplace" => in_place = false,
            "--encoding" => encoding = args.next(),
            "--config" => config_path = args.next(),
            _ => {
                eprintln!("{}", USAGE);
                exit(2);
            }
        }
    }

    let Some(input) = input else {
        eprintln!("{}", USAGE);
        exit(2);
    };

    if let Err(e) = run(
        Path::new(&input),
        in_place,
        encoding.as_deref(),
        config_path.as_deref(),
    ) {
        logging::error(Tool::Cyclical, &e.to_string());
        exit(1);
    }
}

fn run(
    input: &Path,
    in_place: bool,
    encoding: Option<&str>,
    config_path: Option<&str>,
) -> Result<(), PrepError> {
    let config = match config_path {
        Some(path) => PrepConfig::load(Path::new(path))?,
        None => PrepConfig::load_or_default()?,
    };

    let table = csvio::read_table(input, encoding)?;
    let outcome = cyclical::expand_temporal_features(&table, &config.cyclical);

    let Some(expanded) = outcome.table else {
        println!(
            "No {} or {} columns found; nothing to do.",
            config.cyclical.date_column, config.cyclical.time_column
        );
        return Ok(());
    };

    if in_place {
        let backup = csvio::create_backup(input)?;
        csvio::write_table_atomic(input, &expanded)?;
        println!("Transformed date/time columns. Backup at {}", backup.display());
    } else {
        let output: PathBuf = csvio::with_suffix(input, ".dt.csv");
        csvio::write_table_atomic(&output, &expanded)?;
        println!("Transformed date/time columns. Output at {}", output.display());
    }

    logging::log_run_summary(Tool::Cyclical, table.rows.len(), expanded.rows.len(), 0);
    Ok(())
}
