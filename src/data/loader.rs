use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{Array, AsArray};
use arrow::datatypes::{
    DataType, Float32Type, Float64Type, Int16Type, Int32Type, Int64Type, UInt16Type, UInt32Type,
    UInt64Type,
};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{IndicatorRow, IndicatorTable, SourceId};
use crate::config::DataSources;
use crate::error::LoadError;

/// Extensions [`load_file`] can read, in lookup order.
pub const SOURCE_EXTENSIONS: [&str; 4] = ["csv", "json", "parquet", "pq"];

/// Row key columns every source must provide.
pub const COUNTRY_COLUMN: &str = "country";
pub const YEAR_COLUMN: &str = "year";

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load all three tables in priority order. Any missing or unreadable source
/// fails the whole load.
pub fn load_sources(sources: &DataSources) -> Result<Vec<IndicatorTable>, LoadError> {
    sources
        .ordered_paths()
        .into_iter()
        .map(|(source, path)| {
            if !path.is_file() {
                return Err(LoadError::SourceNotFound {
                    source: anyhow::anyhow!("file does not exist"),
                    path,
                });
            }
            let table = load_file(source, &path)
                .map_err(|source| LoadError::SourceNotFound {
                    path: path.clone(),
                    source,
                })?;
            log::info!(
                "Loaded {} rows from {} ({}) with columns {:?}",
                table.len(),
                source,
                path.display(),
                table.columns
            );
            Ok(table)
        })
        .collect()
}

/// Load one indicator table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, one row per (country, year)
/// * `.json`    – `[{ "country": "...", "year": 2022, "mfg_value_pct": 28.4, ... }, ...]`
/// * `.parquet` – flat columns: utf8 `country`, integer `year`, numeric indicators
pub fn load_file(source: SourceId, path: &Path) -> Result<IndicatorTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(source, path),
        "json" => load_json(source, path),
        "parquet" | "pq" => load_parquet(source, path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// Cell – one raw value before it is assigned a role
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
enum Cell {
    Text(String),
    Number(f64),
    Null,
}

impl Cell {
    fn country(&self) -> Option<String> {
        match self {
            Cell::Text(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            _ => None,
        }
    }

    fn year(&self) -> Option<i32> {
        match self {
            Cell::Number(v) if v.fract() == 0.0 && v.is_finite() => i32::try_from(*v as i64).ok(),
            Cell::Text(s) => s.trim().parse::<i32>().ok(),
            _ => None,
        }
    }

    fn value(&self) -> Option<f64> {
        let v = match self {
            Cell::Number(v) => *v,
            Cell::Text(s) => s.trim().parse::<f64>().ok()?,
            Cell::Null => return None,
        };
        v.is_finite().then_some(v)
    }
}

static NULL_CELL: Cell = Cell::Null;

fn guess_cell_type(s: &str) -> Cell {
    let s = s.trim();
    if s.is_empty() {
        return Cell::Null;
    }
    match s.parse::<f64>() {
        Ok(v) => Cell::Number(v),
        Err(_) => Cell::Text(s.to_string()),
    }
}

// ---------------------------------------------------------------------------
// TableBuilder – shared row assembly for every format
// ---------------------------------------------------------------------------

struct TableBuilder {
    source: SourceId,
    headers: Vec<String>,
    country_idx: usize,
    year_idx: usize,
    rows: Vec<IndicatorRow>,
    skipped: usize,
}

impl TableBuilder {
    fn new(source: SourceId, headers: Vec<String>) -> Result<Self> {
        let country_idx = headers
            .iter()
            .position(|h| h == COUNTRY_COLUMN)
            .with_context(|| format!("missing '{COUNTRY_COLUMN}' column"))?;
        let year_idx = headers
            .iter()
            .position(|h| h == YEAR_COLUMN)
            .with_context(|| format!("missing '{YEAR_COLUMN}' column"))?;

        Ok(Self {
            source,
            headers,
            country_idx,
            year_idx,
            rows: Vec::new(),
            skipped: 0,
        })
    }

    /// `cells` is aligned with the headers; short records are padded with nulls.
    fn push(&mut self, row_no: usize, cells: &[Cell]) {
        let cell = |idx: usize| cells.get(idx).unwrap_or(&NULL_CELL);

        let country = cell(self.country_idx).country();
        let year = cell(self.year_idx).year();
        let (Some(country), Some(year)) = (country, year) else {
            log::warn!("{}: skipping row {row_no} without a country/year key", self.source);
            self.skipped += 1;
            return;
        };

        let values: BTreeMap<String, f64> = self
            .headers
            .iter()
            .enumerate()
            .filter(|(idx, _)| *idx != self.country_idx && *idx != self.year_idx)
            .filter_map(|(idx, name)| Some((name.clone(), cell(idx).value()?)))
            .collect();

        self.rows.push(IndicatorRow {
            country,
            year,
            values,
        });
    }

    fn finish(self) -> IndicatorTable {
        if self.skipped > 0 {
            log::warn!("{}: {} rows skipped", self.source, self.skipped);
        }
        let columns = self
            .headers
            .into_iter()
            .enumerate()
            .filter(|(idx, _)| *idx != self.country_idx && *idx != self.year_idx)
            .map(|(_, name)| name)
            .collect();
        IndicatorTable::new(self.source, columns, self.rows)
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, then one row per observation.
/// Quoted fields may contain commas (`"Korea, Rep."`).
fn load_csv(source: SourceId, path: &Path) -> Result<IndicatorTable> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .flexible(true)
        .from_path(path)
        .context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut builder = TableBuilder::new(source, headers)?;

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        // Country names are never numbers, even when they parse as one.
        let cells: Vec<Cell> = record
            .iter()
            .enumerate()
            .map(|(idx, raw)| {
                if idx == builder.country_idx {
                    Cell::Text(raw.to_string())
                } else {
                    guess_cell_type(raw)
                }
            })
            .collect();
        builder.push(row_no, &cells);
    }

    Ok(builder.finish())
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "country": "Kenya", "year": 2022, "mfg_value_pct": 7.1 },
///   ...
/// ]
/// ```
///
/// The column set is the union of the record keys.
fn load_json(source: SourceId, path: &Path) -> Result<IndicatorTable> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root
        .as_array()
        .context("Expected top-level JSON array")?;

    let mut headers: Vec<String> = Vec::new();
    let mut objects = Vec::with_capacity(records.len());
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;
        for key in obj.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
        objects.push(obj);
    }

    let mut builder = TableBuilder::new(source, headers.clone())?;
    for (row_no, obj) in objects.into_iter().enumerate() {
        let cells: Vec<Cell> = headers
            .iter()
            .map(|h| obj.get(h).map(json_to_cell).unwrap_or(Cell::Null))
            .collect();
        builder.push(row_no, &cells);
    }

    Ok(builder.finish())
}

fn json_to_cell(val: &JsonValue) -> Cell {
    match val {
        JsonValue::String(s) => Cell::Text(s.clone()),
        JsonValue::Number(n) => n.as_f64().map(Cell::Number).unwrap_or(Cell::Null),
        _ => Cell::Null,
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file holding one indicator table.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(source: SourceId, path: &Path) -> Result<IndicatorTable> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let headers: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build().context("building parquet reader")?;

    let mut table = TableBuilder::new(source, headers)?;
    let mut row_no = 0;

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let columns = batch.columns();

        for row in 0..batch.num_rows() {
            let cells: Vec<Cell> = columns.iter().map(|col| extract_cell(col, row)).collect();
            table.push(row_no, &cells);
            row_no += 1;
        }
    }

    Ok(table.finish())
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_cell(col: &Arc<dyn Array>, row: usize) -> Cell {
    if col.is_null(row) {
        return Cell::Null;
    }
    let number = match col.data_type() {
        DataType::Utf8 => {
            return col
                .as_string_opt::<i32>()
                .map(|s| Cell::Text(s.value(row).to_string()))
                .unwrap_or(Cell::Null)
        }
        DataType::LargeUtf8 => {
            return col
                .as_string_opt::<i64>()
                .map(|s| Cell::Text(s.value(row).to_string()))
                .unwrap_or(Cell::Null)
        }
        DataType::Int16 => col.as_primitive_opt::<Int16Type>().map(|a| a.value(row) as f64),
        DataType::Int32 => col.as_primitive_opt::<Int32Type>().map(|a| a.value(row) as f64),
        DataType::Int64 => col.as_primitive_opt::<Int64Type>().map(|a| a.value(row) as f64),
        DataType::UInt16 => col.as_primitive_opt::<UInt16Type>().map(|a| a.value(row) as f64),
        DataType::UInt32 => col.as_primitive_opt::<UInt32Type>().map(|a| a.value(row) as f64),
        DataType::UInt64 => col.as_primitive_opt::<UInt64Type>().map(|a| a.value(row) as f64),
        DataType::Float32 => col.as_primitive_opt::<Float32Type>().map(|a| a.value(row) as f64),
        DataType::Float64 => col.as_primitive_opt::<Float64Type>().map(|a| a.value(row)),
        _ => None,
    };
    number.map(Cell::Number).unwrap_or(Cell::Null)
}
