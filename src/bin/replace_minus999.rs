//! Blank every cell equal to the missing-data sentinel (default -999).
//!
//! Overwrites the input in place after creating a `.bak` sibling, or
//! writes `<input>.replaced.csv` with `--no-inplace`.

use std::path::{Path, PathBuf};
use std::process::exit;

use inmet_focos_prep::config::PrepConfig;
use inmet_focos_prep::csvio;
use inmet_focos_prep::logging::{self, Tool};
use inmet_focos_prep::model::PrepError;
use inmet_focos_prep::transform::sentinel;

const USAGE: &str =
    "Usage: replace_minus999 -i <input_csv> [--no-inplace] [--encoding <label>] [--config <path>]";

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
        logging::error(Tool::Sentinel, &e.to_string());
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

    let mut rows = csvio::read_raw_rows(input, encoding)?;
    let replaced = sentinel::replace_sentinel(&mut rows, config.sentinel.value);

    if in_place {
        let backup = csvio::create_backup(input)?;
        csvio::write_rows_atomic(input, &rows)?;
        println!(
            "Replaced {} cells. Original backed up to: {}",
            replaced,
            backup.display()
        );
    } else {
        let output: PathBuf = csvio::with_suffix(input, ".replaced.csv");
        csvio::write_rows_atomic(&output, &rows)?;
        println!(
            "Replaced {} cells. Output written to: {}",
            replaced,
            output.display()
        );
    }

    logging::log_run_summary(Tool::Sentinel, rows.len(), rows.len(), 0);
    Ok(())
}
