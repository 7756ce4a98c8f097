//! Readers for the two reference tables.

use csv::{ReaderBuilder, StringRecord, Trim};
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

use crate::error::ReferenceError;
use crate::models::CoordinateRow;

const BOM: char = '\u{feff}';

/// Rows read from a table, plus the error that stopped reading early.
///
/// Rows before a bad record are kept, so a damaged table still yields a
/// partial index.
#[derive(Debug)]
pub struct TableRows<T> {
    pub rows: Vec<T>,
    pub error: Option<ReferenceError>,
}

impl<T> TableRows<T> {
    /// Strict view: any bad record fails the whole table.
    pub fn into_result(self) -> Result<Vec<T>, ReferenceError> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.rows),
        }
    }
}

/// Load `(name, code)` pairs from the comma-delimited code table.
pub fn load_codes(
    path: &Path,
    name_column: &str,
    code_column: &str,
) -> Result<TableRows<(String, String)>, ReferenceError> {
    info!("Loading district codes from {}", path.display());

    //schema

    //KOD_KU,NAZOV_KU,KOD_OBCE
    //801011,Nitra,500011
    //808130,Zobor,500011

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(b',')
        .flexible(true)
        .trim(Trim::All)
        .from_reader(open_table(path)?);

    let headers = headers(&mut reader, path)?;
    let name_idx = column_index(&headers, name_column, path)?;
    let code_idx = column_index(&headers, code_column, path)?;

    let mut pairs = Vec::new();
    let mut error = None;
    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(source) => {
                error = Some(csv_error(path, source));
                break;
            }
        };
        match (record.get(name_idx), record.get(code_idx)) {
            (Some(name), Some(code)) if !name.is_empty() => {
                pairs.push((name.to_string(), code.to_string()));
            }
            _ => debug!("Skipping short row {:?} in {}", record.position(), path.display()),
        }
    }

    info!("Loaded {} district codes", pairs.len());
    Ok(TableRows { rows: pairs, error })
}

/// Load `(name, x, y)` rows from the semicolon-delimited coordinate table.
pub fn load_coordinates(
    path: &Path,
    name_column: &str,
    x_column: &str,
    y_column: &str,
) -> Result<TableRows<CoordinateRow>, ReferenceError> {
    info!("Loading district coordinates from {}", path.display());

    //schema

    //<BOM>NAZOV;X;Y
    //Nitra;18.0845;48.3076

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(b';')
        .flexible(true)
        .trim(Trim::All)
        .from_reader(open_table(path)?);

    let headers = headers(&mut reader, path)?;
    let name_idx = column_index(&headers, name_column, path)?;
    let x_idx = column_index(&headers, x_column, path)?;
    let y_idx = column_index(&headers, y_column, path)?;

    let mut rows = Vec::new();
    let mut error = None;
    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(source) => {
                error = Some(csv_error(path, source));
                break;
            }
        };
        match (record.get(name_idx), record.get(x_idx), record.get(y_idx)) {
            (Some(name), Some(x), Some(y)) if !name.is_empty() => rows.push(CoordinateRow {
                name: name.to_string(),
                x: x.to_string(),
                y: y.to_string(),
            }),
            _ => debug!("Skipping short row {:?} in {}", record.position(), path.display()),
        }
    }

    info!("Loaded {} district coordinates", rows.len());
    Ok(TableRows { rows, error })
}

/// Open a table, decompressing `.gz` files on the fly.
fn open_table(path: &Path) -> Result<Box<dyn Read>, ReferenceError> {
    let file = File::open(path).map_err(|source| ReferenceError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    if path.extension().map_or(false, |e| e == "gz") {
        Ok(Box::new(GzDecoder::new(file)))
    } else {
        Ok(Box::new(file))
    }
}

fn headers<R: Read>(
    reader: &mut csv::Reader<R>,
    path: &Path,
) -> Result<StringRecord, ReferenceError> {
    reader
        .headers()
        .cloned()
        .map_err(|source| csv_error(path, source))
}

/// Find a header column, ignoring surrounding whitespace and a leading BOM.
fn column_index(
    headers: &StringRecord,
    column: &str,
    path: &Path,
) -> Result<usize, ReferenceError> {
    headers
        .iter()
        .position(|h| h.trim_start_matches(BOM).trim() == column)
        .ok_or_else(|| ReferenceError::MissingColumn {
            path: path.to_path_buf(),
            column: column.to_string(),
        })
}

fn csv_error(path: &Path, source: csv::Error) -> ReferenceError {
    ReferenceError::Csv {
        path: path.to_path_buf(),
        source,
    }
}
