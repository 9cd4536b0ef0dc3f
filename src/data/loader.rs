use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use csv::{ByteRecord, ErrorKind, ReaderBuilder};

use super::model::{Group, Series, SeriesCollection};
use crate::error::IngestError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load every `.csv` file in `dir` into a [`SeriesCollection`].
///
/// Returns `Ok(None)` when the directory holds no file with at least one
/// valid row. Files that cannot be read are logged and skipped.
pub fn load_dir(dir: &Path) -> Result<Option<SeriesCollection>, IngestError> {
    match std::fs::metadata(dir) {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => {
            return Err(IngestError::MissingInput {
                path: dir.to_path_buf(),
            })
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(IngestError::MissingInput {
                path: dir.to_path_buf(),
            })
        }
        Err(e) => return Err(IngestError::read_failure(dir, e)),
    }

    let files = csv_files(dir)?;
    log::debug!("found {} csv files in {}", files.len(), dir.display());

    let mut series = Vec::with_capacity(files.len());
    for path in &files {
        match load_file(path) {
            Ok(Some(s)) => {
                log::debug!(
                    "{}: {} points in group '{}'",
                    path.display(),
                    s.x().len(),
                    s.group()
                );
                series.push(s);
            }
            Ok(None) => log::info!("{}: no valid rows, skipping", path.display()),
            Err(e) => log::error!("{:#}", anyhow::Error::from(e)),
        }
    }

    if series.is_empty() {
        return Ok(None);
    }
    Ok(Some(SeriesCollection::new(series)))
}

/// `.csv` entries of `dir`, sorted by path.
fn csv_files(dir: &Path) -> Result<Vec<PathBuf>, IngestError> {
    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::read_failure(dir, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| IngestError::read_failure(dir, e))?.path();
        let is_csv = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
        // dangling links are kept; opening them fails per file
        if is_csv && !path.is_dir() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Load one results file. `Ok(None)` means the file had no valid rows.
pub fn load_file(path: &Path) -> Result<Option<Series>, IngestError> {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let (title, group) = Group::classify(&stem);

    let file = File::open(path).map_err(|e| IngestError::read_failure(path, e))?;
    let points =
        parse_series(file, &path.display().to_string()).map_err(|e| IngestError::read_failure(path, e))?;

    Ok(Series::new(title, group, points))
}

// ---------------------------------------------------------------------------
// Row parsing
// ---------------------------------------------------------------------------

/// Parse `<x>,<y>[,...]` rows from `reader`.
///
/// Lines are split on commas only; quote characters are ordinary bytes.
/// Empty lines are ignored. Rows with fewer than two fields or a
/// non-numeric x/y are skipped with a warning naming `source` and the line
/// number. Only I/O failures are returned as errors.
pub fn parse_series<R: Read>(reader: R, source: &str) -> io::Result<Vec<(f64, f64)>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(reader);

    let mut points = Vec::new();
    let mut record = ByteRecord::new();
    loop {
        match rdr.read_byte_record(&mut record) {
            Ok(false) => break,
            Ok(true) => {}
            Err(e) => {
                let line = e.position().map(|p| p.line()).unwrap_or(0);
                match e.into_kind() {
                    ErrorKind::Io(io_err) => return Err(io_err),
                    other => {
                        log::warn!("{source}, line {line}: unreadable row ({other:?})");
                        continue;
                    }
                }
            }
        }

        let line = record.position().map(|p| p.line()).unwrap_or(0);
        if is_blank(&record) {
            continue;
        }
        match parse_point(&record) {
            Some(point) => points.push(point),
            None => {
                let raw: Vec<_> = record.iter().map(String::from_utf8_lossy).collect();
                log::warn!("{source}, line {line}: invalid value -> {}", raw.join(","));
            }
        }
    }

    Ok(points)
}

fn is_blank(record: &ByteRecord) -> bool {
    record.iter().all(|f| f.trim_ascii().is_empty())
}

fn parse_point(record: &ByteRecord) -> Option<(f64, f64)> {
    if record.len() < 2 {
        return None;
    }
    let x = parse_field(record.get(0)?)?;
    let y = parse_field(record.get(1)?)?;
    Some((x, y))
}

fn parse_field(raw: &[u8]) -> Option<f64> {
    std::str::from_utf8(raw).ok()?.trim().parse::<f64>().ok()
}
