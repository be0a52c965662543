/// CSV file I/O for the preparation tools.
///
/// Reading: files are decoded UTF-8 first with a Windows-1252 fallback
/// (legacy INMET exports), then parsed with a flexible reader so short
/// rows survive. The INMET format additionally carries a metadata
/// preamble before its semicolon-delimited header; `read_station_table`
/// scans past it.
///
/// Writing: output always goes to a temp file in the destination
/// directory and is moved into place only after the write fully
/// succeeds. In-place tools copy a `.bak` sibling before the move, so an
/// interrupted run leaves the original untouched.

use std::fs;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, WriterBuilder};
use encoding_rs::{Encoding, WINDOWS_1252};

use crate::model::{PrepError, Table};

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// Read and decode a file.
///
/// With `encoding_label` set, that encoding is used outright and
/// malformed sequences are replaced (the label goes through the WHATWG
/// registry, so `latin1`/`cp1252` resolve to Windows-1252). Without a
/// label, strict UTF-8 is tried first and Windows-1252 second; if the
/// fallback also reports errors the file is declared undecodable.
pub fn decode_file(path: &Path, encoding_label: Option<&str>) -> Result<String, PrepError> {
    let bytes = fs::read(path)?;

    let text = match encoding_label {
        Some(label) => {
            let enc = Encoding::for_label(label.as_bytes()).ok_or_else(|| {
                PrepError::Undecodable(format!("{} (unknown encoding '{}')", path.display(), label))
            })?;
            let (text, _, _) = enc.decode(&bytes);
            text.into_owned()
        }
        None => match String::from_utf8(bytes) {
            Ok(s) => s,
            Err(e) => {
                let bytes = e.into_bytes();
                let (text, _, had_errors) = WINDOWS_1252.decode(&bytes);
                if had_errors {
                    return Err(PrepError::Undecodable(path.display().to_string()));
                }
                text.into_owned()
            }
        },
    };

    // Strip a UTF-8 BOM if the export carried one.
    Ok(text.strip_prefix('\u{feff}').unwrap_or(&text).to_string())
}

// ---------------------------------------------------------------------------
// Reading
// ---------------------------------------------------------------------------

/// Read a comma-delimited table: first record is the header, every
/// following record a row. An input with no records at all is a
/// structural error.
pub fn read_table(path: &Path, encoding_label: Option<&str>) -> Result<Table, PrepError> {
    let text = decode_file(path, encoding_label)?;
    parse_table(&text, b',').ok_or_else(|| PrepError::EmptyInput(path.display().to_string()))
}

/// Read every record of a file without header interpretation. Used by
/// the sentinel replacer, which treats the header as just another row.
pub fn read_raw_rows(path: &Path, encoding_label: Option<&str>) -> Result<Vec<Vec<String>>, PrepError> {
    let text = decode_file(path, encoding_label)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    if rows.is_empty() {
        return Err(PrepError::EmptyInput(path.display().to_string()));
    }
    Ok(rows)
}

/// Read an INMET station export.
///
/// These files open with a metadata preamble (station name, latitude,
/// ...) before the real header. The first line containing both `Data`
/// and `Hora` starts the semicolon-delimited CSV region; everything
/// above it is discarded.
pub fn read_station_table(path: &Path, encoding_label: Option<&str>) -> Result<Table, PrepError> {
    let text = decode_file(path, encoding_label)?;
    let header_offset = text
        .lines()
        .position(|line| line.contains("Data") && line.contains("Hora"))
        .ok_or_else(|| PrepError::HeaderNotFound(path.display().to_string()))?;
    let data_region: Vec<&str> = text.lines().skip(header_offset).collect();
    parse_table(&data_region.join("\n"), b';')
        .ok_or_else(|| PrepError::EmptyInput(path.display().to_string()))
}

fn parse_table(text: &str, delimiter: u8) -> Option<Table> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(text.as_bytes());
    let mut records = reader.records();
    let header = match records.next() {
        Some(Ok(record)) => record.iter().map(str::to_string).collect(),
        _ => return None,
    };
    let mut rows = Vec::new();
    for record in records {
        if let Ok(record) = record {
            rows.push(record.iter().map(str::to_string).collect());
        }
    }
    Some(Table::new(header, rows))
}

// ---------------------------------------------------------------------------
// Writing
// ---------------------------------------------------------------------------

/// Write a table to `target` through a same-directory temp file.
pub fn write_table_atomic(target: &Path, table: &Table) -> Result<(), PrepError> {
    atomic_write(target, |w| {
        w.write_record(&table.header)?;
        for row in &table.rows {
            w.write_record(row)?;
        }
        Ok(())
    })
}

/// Write raw records (no header semantics) to `target` atomically.
pub fn write_rows_atomic(target: &Path, rows: &[Vec<String>]) -> Result<(), PrepError> {
    atomic_write(target, |w| {
        for row in rows {
            w.write_record(row)?;
        }
        Ok(())
    })
}

fn atomic_write<F>(target: &Path, emit: F) -> Result<(), PrepError>
where
    F: FnOnce(&mut csv::Writer<&mut fs::File>) -> Result<(), csv::Error>,
{
    let dir = match target.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::Builder::new()
        .prefix(".prep_")
        .suffix(".csv")
        .tempfile_in(dir)?;
    {
        let mut writer = WriterBuilder::new().from_writer(tmp.as_file_mut());
        emit(&mut writer)?;
        writer.flush().map_err(PrepError::Io)?;
    }
    tmp.persist(target).map_err(|e| PrepError::Io(e.error))?;
    Ok(())
}

/// Copy `original` to a `.bak` sibling. Called by in-place tools before
/// the atomic move overwrites the original.
pub fn create_backup(original: &Path) -> Result<PathBuf, PrepError> {
    let bak = backup_path(original);
    fs::copy(original, &bak)?;
    Ok(bak)
}

// ---------------------------------------------------------------------------
// Path bookkeeping
// ---------------------------------------------------------------------------

/// `<dir>/<name>.bak` for `<dir>/<name>` — the whole file name keeps its
/// extension, `.bak` is appended.
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".bak");
    path.with_file_name(name)
}

/// `<dir>/<stem><suffix>` for `<dir>/<stem>.csv` — e.g. a suffix of
/// `".cleaned.csv"` or `"_no_cols.csv"` replaces the extension.
pub fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!("{}{}", stem, suffix))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_bytes(dir: &tempfile::TempDir, name: &str, bytes: &[u8]) -> PathBuf {
        let path = dir.path().join(name);
        let mut f = fs::File::create(&path).expect("create test file");
        f.write_all(bytes).expect("write test file");
        path
    }

    #[test]
    fn test_read_table_pads_nothing_but_tolerates_short_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_bytes(&dir, "t.csv", b"a,b,c\n1,2,3\n4,5\n");
        let table = read_table(&path, None).unwrap();
        assert_eq!(table.header, vec!["a", "b", "c"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.cell(&table.rows[1], 2), "");
    }

    #[test]
    fn test_read_table_rejects_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_bytes(&dir, "empty.csv", b"");
        match read_table(&path, None) {
            Err(PrepError::EmptyInput(_)) => {}
            other => panic!("expected EmptyInput, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_falls_back_to_windows_1252() {
        let dir = tempfile::tempdir().unwrap();
        // "São" with 0xE3 — invalid UTF-8, valid Windows-1252.
        let path = write_bytes(&dir, "latin.csv", b"municipio\nS\xe3o Paulo\n");
        let table = read_table(&path, None).unwrap();
        assert_eq!(table.rows[0][0], "São Paulo");
    }

    #[test]
    fn test_decode_honors_explicit_label() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_bytes(&dir, "latin.csv", b"S\xe3o\n");
        let text = decode_file(&path, Some("latin1")).unwrap();
        assert_eq!(text.trim(), "São");
    }

    #[test]
    fn test_decode_rejects_unknown_label() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_bytes(&dir, "x.csv", b"a\n");
        assert!(decode_file(&path, Some("no-such-encoding")).is_err());
    }

    #[test]
    fn test_decode_strips_utf8_bom() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_bytes(&dir, "bom.csv", b"\xef\xbb\xbfa,b\n1,2\n");
        let table = read_table(&path, None).unwrap();
        assert_eq!(table.header[0], "a", "BOM must not stick to the first header");
    }

    #[test]
    fn test_station_table_skips_metadata_preamble() {
        let dir = tempfile::tempdir().unwrap();
        let body = b"Estacao: BELO HORIZONTE - PAMPULHA\nLatitude: -19.88\n\
Data;Hora UTC;Temperatura\n2024/01/02;0600 UTC;21.4\n";
        let path = write_bytes(&dir, "inmet.csv", body);
        let table = read_station_table(&path, None).unwrap();
        assert_eq!(table.header[0], "Data");
        assert_eq!(table.header[1], "Hora UTC");
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0][2], "21.4");
    }

    #[test]
    fn test_station_table_without_header_line_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_bytes(&dir, "inmet.csv", b"Estacao: X\nLatitude: 1\n");
        match read_station_table(&path, None) {
            Err(PrepError::HeaderNotFound(_)) => {}
            other => panic!("expected HeaderNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_atomic_write_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.csv");
        let table = Table::new(
            vec!["a".into(), "b".into()],
            vec![vec!["1".into(), "2".into()]],
        );
        write_table_atomic(&target, &table).unwrap();
        let back = read_table(&target, None).unwrap();
        assert_eq!(back, table);
    }

    #[test]
    fn test_backup_path_appends_bak_to_full_name() {
        assert_eq!(
            backup_path(Path::new("/data/focos.csv")),
            PathBuf::from("/data/focos.csv.bak")
        );
    }

    #[test]
    fn test_with_suffix_replaces_extension() {
        assert_eq!(
            with_suffix(Path::new("/data/focos.csv"), "_no_cols.csv"),
            PathBuf::from("/data/focos_no_cols.csv")
        );
        assert_eq!(
            with_suffix(Path::new("/data/focos.csv"), ".cleaned.csv"),
            PathBuf::from("/data/focos.cleaned.csv")
        );
    }
}
