use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::array::{
    Array, Date32Array, Date64Array, Float32Array, Float64Array, Int32Array, Int64Array,
    LargeStringArray, StringArray, TimestampMicrosecondArray, TimestampMillisecondArray,
    TimestampNanosecondArray, TimestampSecondArray, UInt32Array, UInt64Array,
};
use arrow::datatypes::{DataType, TimeUnit};
use chrono::{NaiveDate, NaiveDateTime};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;
use thiserror::Error;

use super::model::{total_reviews, GameDataset, GameRecord};
use super::tags::parse_tags;

/// Columns every input file must provide. Any other column is ignored.
pub const REQUIRED_COLUMNS: [&str; 6] =
    ["name", "release_date", "price", "positive", "negative", "tags"];

/// Accepted `release_date` layouts, tried in order (day-first where ambiguous).
const DATE_FORMATS: [&str; 9] = [
    "%Y-%m-%d",
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%d %b, %Y",
    "%d %b %Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%d %B %Y",
];

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Could not find {}", .0.display())]
    NotFound(PathBuf),
    #[error("Unsupported file extension: .{0}")]
    UnsupportedExtension(String),
    #[error("Input is missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("reading CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("reading parquet: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
    #[error("decoding record batch: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a game dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv` / `.tsv` – delimited text with a header row
/// * `.parquet`      – one row per game, same column names
pub fn load_file(path: &Path) -> Result<GameDataset, LoadError> {
    if !path.exists() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => load_delimited(path, b',')?,
        "tsv" => load_delimited(path, b'\t')?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(LoadError::UnsupportedExtension(other.to_string())),
    };

    log::debug!(
        "{}: {} records, {} without a release date, {} without tags, {} distinct tags",
        path.display(),
        dataset.len(),
        dataset
            .records
            .iter()
            .filter(|r| r.release_date.is_none())
            .count(),
        dataset.records.iter().filter(|r| r.tags.is_empty()).count(),
        dataset.tag_vocabulary.len()
    );

    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Row coercion shared by every format
// ---------------------------------------------------------------------------

/// One source row before coercion. Every field is optional; nothing here is
/// allowed to reject a row.
#[derive(Debug, Deserialize)]
struct RawGameRow {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    release_date: Option<String>,
    #[serde(default)]
    price: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    positive: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    negative: Option<f64>,
    #[serde(default)]
    tags: Option<String>,
}

impl From<RawGameRow> for GameRecord {
    fn from(raw: RawGameRow) -> Self {
        GameRecord {
            name: raw.name.unwrap_or_default(),
            release_date: raw.release_date.as_deref().and_then(parse_release_date),
            price: raw.price.as_deref().map(parse_price).unwrap_or(0.0),
            total_reviews: total_reviews(raw.positive, raw.negative),
            tags: raw.tags.as_deref().map(parse_tags).unwrap_or_default(),
        }
    }
}

/// Parse a release date, day-first. Unrecognized text gives `None`.
pub fn parse_release_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .or_else(|| {
            NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
}

/// Coerce a price cell to a number; anything non-numeric counts as free.
pub fn parse_price(s: &str) -> f64 {
    s.trim()
        .parse::<f64>()
        .ok()
        .filter(|p| p.is_finite())
        .unwrap_or(0.0)
}

// ---------------------------------------------------------------------------
// CSV / TSV loader
// ---------------------------------------------------------------------------

fn load_delimited(path: &Path, delimiter: u8) -> Result<GameDataset, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_path(path)?;

    let headers = reader.headers()?.clone();
    for col in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h.trim() == col) {
            return Err(LoadError::MissingColumn(col));
        }
    }

    let mut records = Vec::new();
    for row in reader.deserialize::<RawGameRow>() {
        records.push(GameRecord::from(row?));
    }

    Ok(GameDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with the same column names as the CSV layout.
///
/// `price` may be stored as text or as a number; the review counters may be
/// any integer or float type.
fn load_parquet(path: &Path) -> Result<GameDataset, LoadError> {
    let file = std::fs::File::open(path)?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result?;
        let schema = batch.schema();

        let column = |name: &'static str| {
            schema
                .index_of(name)
                .map(|idx| batch.column(idx).clone())
                .map_err(|_| LoadError::MissingColumn(name))
        };
        let name = column("name")?;
        let release_date = column("release_date")?;
        let price = column("price")?;
        let positive = column("positive")?;
        let negative = column("negative")?;
        let tags = column("tags")?;

        for row in 0..batch.num_rows() {
            let raw = RawGameRow {
                name: text_at(&name, row),
                release_date: text_at(&release_date, row),
                price: text_at(&price, row),
                positive: number_at(&positive, row),
                negative: number_at(&negative, row),
                tags: text_at(&tags, row),
            };
            records.push(GameRecord::from(raw));
        }
    }

    Ok(GameDataset::from_records(records))
}

// -- Arrow helpers --

/// Read a cell as text. Numeric cells are rendered so `price` columns stored
/// as floats still go through the same coercion as CSV text; date and
/// timestamp cells are rendered as `%Y-%m-%d`.
fn text_at(col: &Arc<dyn Array>, row: usize) -> Option<String> {
    if col.is_null(row) {
        return None;
    }
    let any = col.as_any();
    match col.data_type() {
        DataType::Utf8 => any
            .downcast_ref::<StringArray>()
            .map(|a| a.value(row).to_string()),
        DataType::LargeUtf8 => any
            .downcast_ref::<LargeStringArray>()
            .map(|a| a.value(row).to_string()),
        DataType::Date32 | DataType::Date64 | DataType::Timestamp(_, _) => {
            date_at(col, row).map(|d| d.format("%Y-%m-%d").to_string())
        }
        _ => number_at(col, row).map(|v| v.to_string()),
    }
}

/// Read a date or timestamp cell as a calendar date. Timestamps keep their
/// stored (UTC) date; the time of day is dropped.
fn date_at(col: &Arc<dyn Array>, row: usize) -> Option<NaiveDate> {
    let any = col.as_any();
    match col.data_type() {
        DataType::Date32 => any
            .downcast_ref::<Date32Array>()
            .and_then(|a| a.value_as_date(row)),
        DataType::Date64 => any
            .downcast_ref::<Date64Array>()
            .and_then(|a| a.value_as_date(row)),
        DataType::Timestamp(TimeUnit::Second, _) => any
            .downcast_ref::<TimestampSecondArray>()
            .and_then(|a| a.value_as_datetime(row))
            .map(|dt| dt.date()),
        DataType::Timestamp(TimeUnit::Millisecond, _) => any
            .downcast_ref::<TimestampMillisecondArray>()
            .and_then(|a| a.value_as_datetime(row))
            .map(|dt| dt.date()),
        DataType::Timestamp(TimeUnit::Microsecond, _) => any
            .downcast_ref::<TimestampMicrosecondArray>()
            .and_then(|a| a.value_as_datetime(row))
            .map(|dt| dt.date()),
        DataType::Timestamp(TimeUnit::Nanosecond, _) => any
            .downcast_ref::<TimestampNanosecondArray>()
            .and_then(|a| a.value_as_datetime(row))
            .map(|dt| dt.date()),
        _ => None,
    }
}

/// Read a cell as a number; unsupported types and unparseable text are `None`.
fn number_at(col: &Arc<dyn Array>, row: usize) -> Option<f64> {
    if col.is_null(row) {
        return None;
    }
    let any = col.as_any();
    let value = match col.data_type() {
        DataType::Float64 => any.downcast_ref::<Float64Array>().map(|a| a.value(row)),
        DataType::Float32 => any
            .downcast_ref::<Float32Array>()
            .map(|a| a.value(row) as f64),
        DataType::Int64 => any.downcast_ref::<Int64Array>().map(|a| a.value(row) as f64),
        DataType::Int32 => any.downcast_ref::<Int32Array>().map(|a| a.value(row) as f64),
        DataType::UInt64 => any
            .downcast_ref::<UInt64Array>()
            .map(|a| a.value(row) as f64),
        DataType::UInt32 => any
            .downcast_ref::<UInt32Array>()
            .map(|a| a.value(row) as f64),
        DataType::Utf8 | DataType::LargeUtf8 => {
            text_at(col, row).and_then(|s| s.trim().parse::<f64>().ok())
        }
        _ => None,
    };
    value.filter(|v| !v.is_nan())
}
