//! One-hot encode a categorical column (default `f_bioma`).
//!
//! Two passes: the first discovers the ordered category set, the second
//! rewrites every row with one binary column per category. Overwrites
//! in place after creating a `.bak` sibling, or writes
//! `<input>.onehot.csv` with `--no-inplace`.

use std::path::{Path, PathBuf};
use std::process::exit;

use inmet_focos_prep::config::PrepConfig;
use inmet_focos_prep::csvio;
use inmet_focos_prep::logging::{self, Tool};
use inmet_focos_prep::model::PrepError;
use inmet_focos_prep::transform::onehot;

const USAGE: &str = "Usage: one_hot_encode -i <input_csv> [--column <name>] [--no-inplace] \
[--encoding <label>] [--config <path>]";

fn main() {
    let mut input: Option<String> = None;
    let mut column: Option<String> = None;
    let mut in_place = true;
    let mut encoding: Option<String> = None;
    let mut config_path: Option<String> = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-i" | "--input" => input = args.next(),
            "--column" => column = args.next(),
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
        column.as_deref(),
        in_place,
        encoding.as_deref(),
        config_path.as_deref(),
    ) {
        logging::error(Tool::OneHot, &e.to_string());
        exit(1);
    }
}

fn run(
    input: &Path,
    column: Option<&str>,
    in_place: bool,
    encoding: Option<&str>,
    config_path: Option<&str>,
) -> Result<(), PrepError> {
    let config = match config_path {
        Some(path) => PrepConfig::load(Path::new(path))?,
        None => PrepConfig::load_or_default()?,
    };
    let column = column.unwrap_or(&config.onehot.column);

    let table = csvio::read_table(input, encoding)?;
    let outcome = onehot::one_hot_encode(&table, column)?;

    let Some(encoded) = outcome.table else {
        println!("No non-empty categories found in column '{}'; nothing to encode.", column);
        return Ok(());
    };

    if in_place {
        let backup = csvio::create_backup(input)?;
        csvio::write_table_atomic(input, &encoded)?;
        println!(
            "One-hot encoded {} categories for column '{}'. Backup: {}",
            outcome.categories.len(),
            column,
            backup.display()
        );
    } else {
        let output: PathBuf = csvio::with_suffix(input, ".onehot.csv");
        csvio::write_table_atomic(&output, &encoded)?;
        println!(
            "One-hot encoded {} categories for column '{}'. Output: {}",
            outcome.categories.len(),
            column,
            output.display()
        );
    }

    logging::log_run_summary(Tool::OneHot, table.rows.len(), encoded.rows.len(), 0);
    Ok(())
}
