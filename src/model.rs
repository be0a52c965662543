/// Core data types for the INMET/focos CSV preparation tools.
///
/// This module defines the shared domain model imported by all other
/// modules. It contains no I/O and no external dependencies — only types
/// and their small accessors.

use crate::textnorm;

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

/// An in-memory CSV table: an ordered header plus ordered rows of raw
/// text cells.
///
/// Rows are allowed to be shorter than the header (a common artifact of
/// hand-edited exports); `cell` treats missing trailing cells as empty
/// rather than panicking or erroring.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(header: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Table { header, rows }
    }

    /// The cell at `col` in `row`, with missing trailing cells read as "".
    pub fn cell<'a>(&'a self, row: &'a [String], col: usize) -> &'a str {
        row.get(col).map(String::as_str).unwrap_or("")
    }

    /// Case/accent-insensitive column lookup. Returns the index of the
    /// first header whose folded name equals the folded needle.
    pub fn find_column(&self, name: &str) -> Option<usize> {
        let needle = textnorm::fold(name);
        self.header.iter().position(|h| textnorm::fold(h) == needle)
    }

    /// Exact-match column lookup first, then fold-insensitive. Mirrors
    /// how callers name columns: exact when they know the file, folded
    /// when they only know the convention.
    pub fn find_column_exact_or_folded(&self, name: &str) -> Option<usize> {
        self.header
            .iter()
            .position(|h| h == name)
            .or_else(|| self.find_column(name))
    }
}

// ---------------------------------------------------------------------------
// Timestamp key
// ---------------------------------------------------------------------------

/// The hour-granularity key the temporal join operates on.
///
/// Minutes and seconds are discarded before a key is ever constructed —
/// two records match iff their (year, month, day, hour) tuples are equal.
/// How a full timestamp is reduced to this key (floor vs round-to-nearest)
/// is the caller's choice; see `timeparse` for the two policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimestampKey {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
}

impl std::fmt::Display for TimestampKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}h",
            self.year, self.month, self.day, self.hour
        )
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that abort a tool run with a non-zero exit.
///
/// Row-level problems (bad date token, short row) are never represented
/// here — they are recovered locally, counted, and reported in the run
/// summary. These variants are the structural failures.
#[derive(Debug)]
pub enum PrepError {
    /// The input file has no header row at all.
    EmptyInput(String),
    /// A required key column is missing from the header.
    MissingColumn { file: String, column: String },
    /// The INMET preamble scan never found the header line.
    HeaderNotFound(String),
    /// The file could not be decoded with any known encoding.
    Undecodable(String),
    /// The configuration file exists but cannot be parsed.
    Config(String),
    /// Underlying I/O failure (open, read, persist).
    Io(std::io::Error),
    /// CSV-layer failure (malformed quoting, write error).
    Csv(csv::Error),
}

impl std::fmt::Display for PrepError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PrepError::EmptyInput(path) => write!(f, "Empty input file: {}", path),
            PrepError::MissingColumn { file, column } => {
                write!(f, "Required column '{}' not found in {}", column, file)
            }
            PrepError::HeaderNotFound(path) => {
                write!(f, "Header line (with 'Data' and 'Hora') not found in {}", path)
            }
            PrepError::Undecodable(path) => {
                write!(f, "Could not decode {} with any known encoding", path)
            }
            PrepError::Config(msg) => write!(f, "Configuration error: {}", msg),
            PrepError::Io(e) => write!(f, "I/O error: {}", e),
            PrepError::Csv(e) => write!(f, "CSV error: {}", e),
        }
    }
}

impl std::error::Error for PrepError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PrepError::Io(e) => Some(e),
            PrepError::Csv(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PrepError {
    fn from(e: std::io::Error) -> Self {
        PrepError::Io(e)
    }
}

impl From<csv::Error> for PrepError {
    fn from(e: csv::Error) -> Self {
        PrepError::Csv(e)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
