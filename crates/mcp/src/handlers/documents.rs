//! Text and table extraction for PDF, DOCX and spreadsheet files.
//!
//! Spreadsheets are any workbook calamine opens, plus comma or tab separated
//! text sheets.
//!
//! The parsers are blocking, so they run on the blocking thread pool. Results
//! are capped to keep responses small.

use crate::errors::MethodError;
use crate::methods::PathParams;
use calamine::{Data, Reader, open_workbook_auto};
use serde_json::{Map, Number, Value};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Maximum number of characters returned for extracted document text.
pub const MAX_TEXT_CHARS: usize = 3000;
/// Maximum number of rows returned from a spreadsheet.
pub const MAX_SHEET_ROWS: usize = 50;

const EMPTY_HEADER: &str = "__EMPTY";

pub async fn read_pdf(params: &PathParams) -> Result<Value, MethodError> {
    let bytes = tokio::fs::read(&params.path)
        .await
        .map_err(|e| MethodError::io(&params.path, e))?;

    let text = run_blocking(move || {
        pdf_extract::extract_text_from_mem(&bytes).map_err(|e| MethodError::Document(e.to_string()))
    })
    .await?;

    debug!(
        "Extracted {} chars from PDF {}",
        text.chars().count(),
        params.path.display()
    );
    Ok(Value::String(truncate_chars(&text, MAX_TEXT_CHARS)))
}

pub async fn read_docx(params: &PathParams) -> Result<Value, MethodError> {
    tokio::fs::metadata(&params.path)
        .await
        .map_err(|e| MethodError::io(&params.path, e))?;

    let path = params.path.clone();
    let text = run_blocking(move || {
        docx_lite::extract_text(&path).map_err(|e| MethodError::Document(e.to_string()))
    })
    .await?;

    debug!(
        "Extracted {} chars from DOCX {}",
        text.chars().count(),
        params.path.display()
    );
    Ok(Value::String(truncate_chars(&text, MAX_TEXT_CHARS)))
}

/// Rows of the first worksheet as objects keyed by the header row.
pub async fn read_excel(params: &PathParams) -> Result<Value, MethodError> {
    tokio::fs::metadata(&params.path)
        .await
        .map_err(|e| MethodError::io(&params.path, e))?;

    let path = params.path.clone();
    let records = run_blocking(move || first_sheet_records(&path)).await?;

    Ok(Value::Array(records))
}

async fn run_blocking<T, F>(task: F) -> Result<T, MethodError>
where
    F: FnOnce() -> Result<T, MethodError> + Send + 'static,
    T: Send + 'static,
{
    // Parsers can panic on malformed input; that still counts as a parse failure.
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| MethodError::Document(format!("Failed to parse document: {e}")))?
}

/// Cuts `text` after `limit` characters without splitting a code point.
pub(crate) fn truncate_chars(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((index, _)) => text[..index].to_string(),
        None => text.to_string(),
    }
}

fn first_sheet_records(path: &Path) -> Result<Vec<Value>, MethodError> {
    if let Some(delimiter) = text_sheet_delimiter(path) {
        return text_sheet_records(path, delimiter);
    }

    let mut workbook =
        open_workbook_auto(path).map_err(|e| MethodError::Document(e.to_string()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| MethodError::Document("Workbook contains no sheets".to_string()))?
        .map_err(|e| MethodError::Document(e.to_string()))?;

    Ok(sheet_records(range.rows(), MAX_SHEET_ROWS))
}

fn text_sheet_delimiter(path: &Path) -> Option<u8> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    match extension.as_str() {
        "csv" | "txt" => Some(b','),
        "tsv" | "tab" => Some(b'\t'),
        _ => None,
    }
}

fn text_sheet_records(path: &Path, delimiter: u8) -> Result<Vec<Value>, MethodError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .has_headers(false)
        .from_path(path)
        .map_err(|e| MethodError::Document(e.to_string()))?;

    let rows = reader
        .byte_records()
        .map(|record| {
            record.map(|fields| {
                fields
                    .iter()
                    .map(|field| text_cell(&String::from_utf8_lossy(field)))
                    .collect::<Vec<Data>>()
            })
        })
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| MethodError::Document(e.to_string()))?;

    Ok(sheet_records(rows.iter().map(Vec::as_slice), MAX_SHEET_ROWS))
}

// Text cells are typed the way a spreadsheet import types them.
fn text_cell(field: &str) -> Data {
    if field.is_empty() {
        return Data::Empty;
    }
    if let Ok(int) = field.parse::<i64>() {
        return Data::Int(int);
    }
    match field.parse::<f64>() {
        Ok(float) if float.is_finite() => Data::Float(float),
        _ => match field {
            "TRUE" | "true" => Data::Bool(true),
            "FALSE" | "false" => Data::Bool(false),
            _ => Data::String(field.to_string()),
        },
    }
}

/// Converts sheet rows into records. The first row names the columns, blank
/// rows are skipped and every record carries every column, with missing cells
/// as empty strings.
pub(crate) fn sheet_records<'a>(
    mut rows: impl Iterator<Item = &'a [Data]>,
    limit: usize,
) -> Vec<Value> {
    let Some(header_row) = rows.next() else {
        return vec![];
    };
    let headers = header_names(header_row);

    rows.filter(|row| !row.iter().all(is_blank))
        .take(limit)
        .map(|row| {
            let record: Map<String, Value> = headers
                .iter()
                .enumerate()
                .map(|(index, header)| {
                    let value = row
                        .get(index)
                        .map(cell_value)
                        .unwrap_or_else(|| Value::String(String::new()));
                    (header.clone(), value)
                })
                .collect();
            Value::Object(record)
        })
        .collect()
}

fn header_names(row: &[Data]) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();

    row.iter()
        .map(|cell| {
            let text = cell_text(cell);
            let base = if text.is_empty() {
                EMPTY_HEADER.to_string()
            } else {
                text
            };

            let count = seen.entry(base.clone()).or_insert(0);
            let name = if *count == 0 {
                base
            } else {
                format!("{base}_{count}")
            };
            *count += 1;
            name
        })
        .collect()
}

fn is_blank(cell: &Data) -> bool {
    match cell {
        Data::Empty => true,
        Data::String(s) => s.is_empty(),
        _ => false,
    }
}

fn cell_value(cell: &Data) -> Value {
    match cell {
        Data::Empty => Value::String(String::new()),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => Value::String(s.clone()),
        Data::Int(i) => Value::from(*i),
        Data::Float(f) => float_value(*f),
        Data::Bool(b) => Value::Bool(*b),
        // Dates are reported as their spreadsheet serial number.
        Data::DateTime(dt) => float_value(dt.as_f64()),
        Data::Error(e) => Value::String(e.to_string()),
    }
}

fn cell_text(cell: &Data) -> String {
    match cell_value(cell) {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

// Largest integer an f64 holds exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

fn float_value(f: f64) -> Value {
    if f.fract() == 0.0 && f.abs() < MAX_SAFE_INTEGER {
        Value::from(f as i64)
    } else {
        Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or_else(|| Value::String(f.to_string()))
    }
}
