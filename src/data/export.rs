use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use super::loader::DELIMITER;
use super::model::{ColumnIndex, Record};

// ---------------------------------------------------------------------------
// CSV export
// ---------------------------------------------------------------------------

/// Serialise `records` as `;`-separated UTF-8 with a header row.
///
/// Cells are written as they were read, so inert columns pass through.
pub fn to_csv_bytes(headers: &[String], records: &[Record]) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(DELIMITER)
        .from_writer(Vec::new());

    writer.write_record(headers).context("writing CSV header")?;
    for (row_no, rec) in records.iter().enumerate() {
        writer
            .write_record(&rec.cells)
            .with_context(|| format!("writing CSV row {row_no}"))?;
    }

    writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("flushing CSV buffer: {}", e.error()))
}

/// Write the CSV export to `path`.
pub fn save_csv(path: &Path, headers: &[String], records: &[Record]) -> Result<()> {
    let bytes = to_csv_bytes(headers, records)?;
    std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))
}

// ---------------------------------------------------------------------------
// Parquet export
// ---------------------------------------------------------------------------

/// Write `records` to a Parquet file: `age` as Int64, every other column Utf8.
pub fn save_parquet(path: &Path, headers: &[String], records: &[Record]) -> Result<()> {
    let columns = ColumnIndex::locate(headers)?;

    let fields: Vec<Field> = headers
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let dtype = if i == columns.age {
                DataType::Int64
            } else {
                DataType::Utf8
            };
            Field::new(name, dtype, false)
        })
        .collect();
    let schema = Arc::new(Schema::new(fields));

    let arrays: Vec<ArrayRef> = (0..headers.len())
        .map(|i| -> ArrayRef {
            if i == columns.age {
                Arc::new(Int64Array::from(
                    records.iter().map(|r| r.age).collect::<Vec<_>>(),
                ))
            } else {
                Arc::new(StringArray::from(
                    records
                        .iter()
                        .map(|r| r.cells.get(i).map(String::as_str).unwrap_or(""))
                        .collect::<Vec<_>>(),
                ))
            }
        })
        .collect();

    let batch =
        RecordBatch::try_new(schema.clone(), arrays).context("building parquet record batch")?;

    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}
