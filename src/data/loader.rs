use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::file::reader::ChunkReader;
use serde_json::Value as JsonValue;

use super::error::DatasetError;
use super::model::{
    LaunchDataset, LaunchRecord, BOOSTER_COLUMN, CLASS_COLUMN, PAYLOAD_COLUMN, REQUIRED_COLUMNS,
    SITE_COLUMN,
};

/// Published SpaceX launch table used when no source is given.
pub const DEFAULT_SOURCE: &str = "https://cf-courses-data.s3.us.cloud-object-storage.appdomain.cloud/IBM-DS0321EN-SkillsNetwork/datasets/spacex_launch_dash.csv";

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// On-disk / on-wire layout of a dataset, picked from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Csv,
    Json,
    Parquet,
}

impl Format {
    /// Dispatch by extension. URLs without an extension are assumed to be CSV.
    pub fn detect(source: &str) -> Result<Self> {
        let path = source.split(['?', '#']).next().unwrap_or(source);
        let file_name = path.rsplit('/').next().unwrap_or(path);
        let ext = match file_name.rsplit_once('.') {
            Some((_, ext)) => ext.to_ascii_lowercase(),
            None if is_remote(source) => return Ok(Format::Csv),
            None => bail!("Cannot tell the format of '{source}' (no file extension)"),
        };

        match ext.as_str() {
            "csv" => Ok(Format::Csv),
            "json" => Ok(Format::Json),
            "parquet" | "pq" => Ok(Format::Parquet),
            other => bail!("Unsupported file extension: .{other}"),
        }
    }
}

/// Load the launch dataset from an `http(s)://` URL or a local path.
pub fn load_source(source: &str) -> Result<LaunchDataset> {
    let dataset = if is_remote(source) {
        load_url(source)
    } else {
        load_file(Path::new(source))
    }
    .with_context(|| format!("loading launch dataset from {source}"))?;

    log::info!(
        "Loaded {} launches from {} sites ({} booster categories)",
        dataset.len(),
        dataset.sites().len(),
        dataset.booster_categories().len()
    );
    Ok(dataset)
}

/// Load a launch dataset from a local file.
pub fn load_file(path: &Path) -> Result<LaunchDataset> {
    match Format::detect(&path.to_string_lossy())? {
        Format::Csv => {
            let file = File::open(path).context("opening CSV")?;
            parse_csv(file)
        }
        Format::Json => {
            let bytes = std::fs::read(path).context("reading JSON file")?;
            parse_json(&bytes)
        }
        Format::Parquet => {
            let file = File::open(path).context("opening parquet file")?;
            parse_parquet(file)
        }
    }
}

fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Fetch the whole resource once with the blocking client.
fn load_url(url: &str) -> Result<LaunchDataset> {
    let format = Format::detect(url)?;
    log::info!("Fetching launch dataset from {url}");

    let body = reqwest::blocking::get(url)
        .with_context(|| format!("requesting {url}"))?
        .error_for_status()
        .context("server returned an error status")?
        .bytes()
        .context("reading response body")?;

    match format {
        Format::Csv => parse_csv(&body[..]),
        Format::Json => parse_json(&body),
        Format::Parquet => parse_parquet(body),
    }
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

/// Header positions of the required columns.
struct ColumnIndex {
    site: usize,
    payload: usize,
    booster: usize,
    class: usize,
}

impl ColumnIndex {
    fn locate(headers: &[String]) -> Result<Self, DatasetError> {
        let find = |name: &'static str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or(DatasetError::MissingColumn(name))
        };
        Ok(Self {
            site: find(SITE_COLUMN)?,
            payload: find(PAYLOAD_COLUMN)?,
            booster: find(BOOSTER_COLUMN)?,
            class: find(CLASS_COLUMN)?,
        })
    }
}

/// CSV layout: header row with column names, one launch per row.
/// Columns other than the four required ones are ignored.
fn parse_csv<R: Read>(input: R) -> Result<LaunchDataset> {
    let mut reader = csv::Reader::from_reader(input);
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    let columns = ColumnIndex::locate(&headers)?;

    let mut records = Vec::new();

    for (row, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row}"))?;
        let cell = |idx: usize| record.get(idx).unwrap_or("").trim();

        let payload = cell(columns.payload);
        let payload_kg = payload
            .parse::<f64>()
            .map_err(|_| DatasetError::InvalidPayload {
                row,
                value: payload.to_string(),
            })?;
        let class = cell(columns.class);
        let class_value = class.parse::<f64>().map_err(|_| DatasetError::InvalidClass {
            row,
            value: class.to_string(),
        })?;

        records.push(LaunchRecord::from_cells(
            row,
            cell(columns.site),
            payload_kg,
            cell(columns.booster),
            class_value,
        )?);
    }

    Ok(LaunchDataset::from_records(records)?)
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "Launch Site": "CCAFS LC-40",
///     "Payload Mass (kg)": 525.0,
///     "Booster Version Category": "v1.0",
///     "class": 0
///   },
///   ...
/// ]
/// ```
fn parse_json(bytes: &[u8]) -> Result<LaunchDataset> {
    let root: JsonValue = serde_json::from_slice(bytes).context("parsing JSON")?;
    let rows = root.as_array().context("Expected top-level JSON array")?;

    let mut records = Vec::with_capacity(rows.len());

    for (row, value) in rows.iter().enumerate() {
        let obj = value
            .as_object()
            .with_context(|| format!("Row {row} is not a JSON object"))?;
        let field = |name: &'static str| obj.get(name).ok_or(DatasetError::MissingColumn(name));

        let site = json_text(field(SITE_COLUMN)?)
            .with_context(|| format!("Row {row}: '{SITE_COLUMN}' is not a string"))?;
        let booster = json_text(field(BOOSTER_COLUMN)?)
            .with_context(|| format!("Row {row}: '{BOOSTER_COLUMN}' is not a string"))?;

        let payload = field(PAYLOAD_COLUMN)?;
        let payload_kg = json_number(payload).ok_or_else(|| DatasetError::InvalidPayload {
            row,
            value: payload.to_string(),
        })?;
        let class = field(CLASS_COLUMN)?;
        let class_value = json_number(class).ok_or_else(|| DatasetError::InvalidClass {
            row,
            value: class.to_string(),
        })?;

        records.push(LaunchRecord::from_cells(row, site, payload_kg, booster, class_value)?);
    }

    Ok(LaunchDataset::from_records(records)?)
}

fn json_text(val: &JsonValue) -> Option<&str> {
    val.as_str()
}

/// Numbers, booleans (for `class`) and numeric strings are accepted.
fn json_number(val: &JsonValue) -> Option<f64> {
    match val {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        JsonValue::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Parquet
// ---------------------------------------------------------------------------

/// Load launches from Parquet. The four required columns are looked up by
/// name; string columns may be Utf8 or LargeUtf8, numeric columns any
/// int/float width (and Boolean for `class`).
fn parse_parquet<R: ChunkReader + 'static>(input: R) -> Result<LaunchDataset> {
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(input).context("reading parquet metadata")?;

    let schema = builder.schema().clone();
    for name in REQUIRED_COLUMNS {
        if schema.index_of(name).is_err() {
            return Err(DatasetError::MissingColumn(name).into());
        }
    }

    let reader = builder.build().context("building parquet reader")?;
    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        append_batch(&batch, &mut records)?;
    }

    Ok(LaunchDataset::from_records(records)?)
}

fn append_batch(batch: &RecordBatch, records: &mut Vec<LaunchRecord>) -> Result<()> {
    let column = |name: &'static str| {
        batch
            .column_by_name(name)
            .ok_or(DatasetError::MissingColumn(name))
    };
    let site_col = column(SITE_COLUMN)?;
    let payload_col = column(PAYLOAD_COLUMN)?;
    let booster_col = column(BOOSTER_COLUMN)?;
    let class_col = column(CLASS_COLUMN)?;

    let offset = records.len();
    for i in 0..batch.num_rows() {
        let row = offset + i;
        let site = string_cell(site_col, i)
            .with_context(|| format!("Row {row}: failed to read '{SITE_COLUMN}'"))?;
        let booster = string_cell(booster_col, i)
            .with_context(|| format!("Row {row}: failed to read '{BOOSTER_COLUMN}'"))?;
        let payload_kg = numeric_cell(payload_col, i)
            .with_context(|| format!("Row {row}: failed to read '{PAYLOAD_COLUMN}'"))?;
        let class = numeric_cell(class_col, i)
            .with_context(|| format!("Row {row}: failed to read '{CLASS_COLUMN}'"))?;

        records.push(LaunchRecord::from_cells(row, &site, payload_kg, &booster, class)?);
    }
    Ok(())
}

// -- Arrow helpers --

fn string_cell(col: &ArrayRef, row: usize) -> Result<String> {
    if col.is_null(row) {
        bail!("null value");
    }
    match col.data_type() {
        DataType::Utf8 => Ok(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => Ok(col.as_string::<i64>().value(row).to_string()),
        other => bail!("expected a string column, got {other:?}"),
    }
}

fn numeric_cell(col: &ArrayRef, row: usize) -> Result<f64> {
    if col.is_null(row) {
        bail!("null value");
    }
    let value = match col.data_type() {
        DataType::Float64 => col.as_primitive::<Float64Type>().value(row),
        DataType::Float32 => col.as_primitive::<Float32Type>().value(row) as f64,
        DataType::Int64 => col.as_primitive::<Int64Type>().value(row) as f64,
        DataType::Int32 => col.as_primitive::<Int32Type>().value(row) as f64,
        DataType::Boolean => {
            if col.as_boolean().value(row) {
                1.0
            } else {
                0.0
            }
        }
        other => bail!("expected a numeric column, got {other:?}"),
    };
    Ok(value)
}
