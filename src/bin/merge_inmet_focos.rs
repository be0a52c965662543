//! Join an INMET station export with a fire-detection CSV by UTC hour.
//!
//! Only detections whose locality matches the configured target (default
//! Belo Horizonte) are considered. Output columns are the INMET columns
//! followed by the detection columns prefixed with `f_`.

use std::path::{Path, PathBuf};
use std::process::exit;

use inmet_focos_prep::config::PrepConfig;
use inmet_focos_prep::csvio;
use inmet_focos_prep::logging::{self, LogLevel, Tool};
use inmet_focos_prep::merge;
use inmet_focos_prep::model::PrepError;

const USAGE: &str = "Usage: merge_inmet_focos <inmet_csv> <focos_csv> [output_csv] [--config <path>]";

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

    if positional.len() < 2 || positional.len() > 3 {
        eprintln!("{}", USAGE);
        exit(2);
    }

    let inmet = PathBuf::from(&positional[0]);
    let focos = PathBuf::from(&positional[1]);
    let output = positional
        .get(2)
        .map(PathBuf::from)
        .unwrap_or_else(|| csvio::with_suffix(&focos, "_merged_with_inmet.csv"));

    if let Err(e) = run(&inmet, &focos, &output, config_path.as_deref()) {
        logging::error(Tool::Merge, &e.to_string());
        exit(1);
    }
}

fn run(
    inmet: &Path,
    focos: &Path,
    output: &Path,
    config_path: Option<&str>,
) -> Result<(), PrepError> {
    let config = match config_path {
        Some(path) => PrepConfig::load(Path::new(path))?,
        None => PrepConfig::load_or_default()?,
    };
    let min_level = if config.merge.report_skipped_rows {
        LogLevel::Debug
    } else {
        LogLevel::Info
    };
    logging::init_logger(min_level, None);

    println!("Reading INMET station file: {}", inmet.display());
    let station = csvio::read_station_table(inmet, None)?;
    println!("Station rows read: {}", station.rows.len());

    println!("Reading detection file: {}", focos.display());
    let detections = csvio::read_table(focos, None)?;
    println!("Detection rows read: {}", detections.rows.len());

    let (joined, summary) = merge::merge_tables(&station, &detections, &config.merge)?;
    println!(
        "Detections in {} (distinct hours): {}",
        config.merge.locality, summary.distinct_hours
    );

    csvio::write_table_atomic(output, &joined)?;
    println!("Rows written to output file: {}", summary.rows_written);
    println!("Output: {}", output.display());

    logging::log_run_summary(
        Tool::Merge,
        summary.station_rows,
        summary.rows_written,
        summary.station_skipped + summary.detection_skipped,
    );
    Ok(())
}
