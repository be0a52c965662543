//! Drop columns whose header is blank or an `Unnamed:`-style
//! placeholder.
//!
//! Overwrites the input in place after creating a `.bak` sibling, or
//! writes `<input>.cleaned.csv` with `--no-inplace`. Running it on its
//! own output reports zero columns removed.

use std::path::{Path, PathBuf};
use std::process::exit;

use inmet_focos_prep::csvio;
use inmet_focos_prep::logging::{self, Tool};
use inmet_focos_prep::model::PrepError;
use inmet_focos_prep::transform::headers;

const USAGE: &str =
    "Usage: remove_empty_column -i <input_csv> [--no-inplace] [--encoding <label>]";

fn main() {
    let mut input: Option<String> = None;
    let mut in_place = true;
    let mut encoding: Option<String> = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-i" | "--input" => input = args.next(),
            "--no-inplace" => in_place = false,
            "--encoding" => encoding = args.next(),
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

    if let Err(e) = run(Path::new(&input), in_place, encoding.as_deref()) {
        logging::error(Tool::Headers, &e.to_string());
        exit(1);
    }
}

fn run(input: &Path, in_place: bool, encoding: Option<&str>) -> Result<(), PrepError> {
    let table = csvio::read_table(input, encoding)?;
    let outcome = headers::remove_empty_headers(&table);

    let Some(cleaned) = outcome.table else {
        println!("No unnamed/empty header columns found.");
        return Ok(());
    };

    if in_place {
        let backup = csvio::create_backup(input)?;
        csvio::write_table_atomic(input, &cleaned)?;
        println!(
            "Removed {} empty/unnamed column(s). Original backed up to: {}",
            outcome.removed,
            backup.display()
        );
    } else {
        let output: PathBuf = csvio::with_suffix(input, ".cleaned.csv");
        csvio::write_table_atomic(&output, &cleaned)?;
        println!(
            "Removed {} empty/unnamed column(s). Output written to: {}",
            outcome.removed,
            output.display()
        );
    }

    logging::log_run_summary(Tool::Headers, table.rows.len(), cleaned.rows.len(), 0);
    Ok(())
}
