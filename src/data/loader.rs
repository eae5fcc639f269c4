use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, Int32Array, Int64Array};
use arrow::datatypes::DataType;
use arrow::util::display::array_value_to_string;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use thiserror::Error;

use super::model::{ColumnIndex, Dataset};

/// Field separator of the bank campaign files.
pub const DELIMITER: u8 = b';';

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a dataset could not be loaded.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file is missing or cannot be opened.
    #[error("data file '{}' was not found", .0.display())]
    SourceNotFound(PathBuf),
    /// The file opened but could not be decoded.
    #[error(transparent)]
    Malformed(#[from] anyhow::Error),
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the campaign dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv` / `.txt` – `;`-separated text with a header row
/// * `.parquet`      – integer `age` column, any other columns as text
pub fn load_file(path: &Path) -> Result<Dataset, LoadError> {
    let file = File::open(path).map_err(|e| {
        log::debug!("opening {}: {e}", path.display());
        LoadError::SourceNotFound(path.to_path_buf())
    })?;

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" | "txt" => read_csv(file),
        "parquet" | "pq" => read_parquet(file),
        other => Err(anyhow::anyhow!("Unsupported file extension: .{other}")),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    Ok(dataset)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Parse `;`-separated CSV with a header row.
///
/// Quoted cells (`"admin."`) are unquoted; every row must have as many
/// cells as the header.
pub fn read_csv<R: Read>(input: R) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(true)
        .from_reader(input);

    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();
    let columns = ColumnIndex::locate(&headers)?;

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;
        let cells: Vec<String> = row.iter().map(|c| c.to_string()).collect();
        records.push(columns.record_from_cells(cells, row_no)?);
    }

    Ok(Dataset::from_records(headers, records))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Read a Parquet file: `age` must be Int32/Int64, other columns are rendered
/// to text cells (nulls become empty cells).
fn read_parquet(file: File) -> Result<Dataset> {
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let headers: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let columns = ColumnIndex::locate(&headers)?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let age_col = batch.column(columns.age);

        for row in 0..batch.num_rows() {
            let row_no = records.len();
            let mut cells = Vec::with_capacity(headers.len());
            for (col_idx, col) in batch.columns().iter().enumerate() {
                let cell = if col_idx == columns.age {
                    extract_age(age_col, row)
                        .with_context(|| format!("Row {row_no}: failed to read 'age'"))?
                        .to_string()
                } else if col.is_null(row) {
                    String::new()
                } else {
                    array_value_to_string(col.as_ref(), row).with_context(|| {
                        format!("Row {row_no}: failed to read '{}'", headers[col_idx])
                    })?
                };
                cells.push(cell);
            }
            records.push(columns.record_from_cells(cells, row_no)?);
        }
    }

    Ok(Dataset::from_records(headers, records))
}

/// Extract an integer age from an Int32/Int64 column at the given row.
fn extract_age(col: &Arc<dyn Array>, row: usize) -> Result<i64> {
    if col.is_null(row) {
        bail!("null age");
    }
    match col.data_type() {
        DataType::Int64 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int64Array>()
                .context("expected Int64Array")?;
            Ok(arr.value(row))
        }
        DataType::Int32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int32Array>()
                .context("expected Int32Array")?;
            Ok(arr.value(row) as i64)
        }
        other => bail!("Expected integer 'age' column, got {other:?}"),
    }
}
