//! CSV parser for taxi trip records.
//!
//! Rows are validated one at a time; a row that fails validation is
//! rejected with a [`RowError`] and never reaches aggregation.

use std::io::Read;

use anyhow::Result;
use chrono::NaiveDateTime;
use csv::{ReaderBuilder, StringRecord};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::analyzers::types::{DATETIME_FORMAT, Journey};

pub const VENDOR_ID: &str = "VendorID";
pub const PICKUP_DATETIME: &str = "tpep_pickup_datetime";
pub const DROPOFF_DATETIME: &str = "tpep_dropoff_datetime";
pub const PASSENGER_COUNT: &str = "passenger_count";
pub const TRIP_DISTANCE: &str = "trip_distance";
pub const TOTAL_AMOUNT: &str = "total_amount";

/// Reason a CSV row was rejected.
#[derive(Debug, Error, PartialEq)]
pub enum RowError {
    #[error("missing column `{0}`")]
    MissingColumn(&'static str),
    #[error("invalid timestamp in `{column}`: {value:?}")]
    InvalidTimestamp { column: &'static str, value: String },
    #[error("invalid integer in `{column}`: {value:?}")]
    InvalidInteger { column: &'static str, value: String },
    #[error("invalid number in `{column}`: {value:?}")]
    InvalidNumber { column: &'static str, value: String },
    #[error("negative trip distance {0}")]
    NegativeDistance(f64),
    #[error("malformed row: {0}")]
    Malformed(String),
}

/// Positions of the required columns within a header row.
#[derive(Debug, Clone, Default)]
pub struct Columns {
    vendor_id: Option<usize>,
    pickup: Option<usize>,
    dropoff: Option<usize>,
    passengers: Option<usize>,
    distance: Option<usize>,
    fare: Option<usize>,
}

impl Columns {
    pub fn from_headers(headers: &StringRecord) -> Self {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);
        Columns {
            vendor_id: find(VENDOR_ID),
            pickup: find(PICKUP_DATETIME),
            dropoff: find(DROPOFF_DATETIME),
            passengers: find(PASSENGER_COUNT),
            distance: find(TRIP_DISTANCE),
            fare: find(TOTAL_AMOUNT),
        }
    }

    /// Required columns absent from the header.
    pub fn missing(&self) -> Vec<&'static str> {
        [
            (VENDOR_ID, self.vendor_id),
            (PICKUP_DATETIME, self.pickup),
            (DROPOFF_DATETIME, self.dropoff),
            (PASSENGER_COUNT, self.passengers),
            (TRIP_DISTANCE, self.distance),
            (TOTAL_AMOUNT, self.fare),
        ]
        .into_iter()
        .filter(|(_, idx)| idx.is_none())
        .map(|(name, _)| name)
        .collect()
    }
}

/// Validated rows of one input, plus how many rows were dropped.
#[derive(Debug, Default)]
pub struct Ingest {
    pub records: Vec<(String, Journey)>,
    pub rejected: usize,
}

/// Converts one CSV row into a `(vendor_id, journey)` pair.
///
/// # Errors
///
/// Returns a [`RowError`] naming the first field that failed validation.
pub fn parse_record(columns: &Columns, record: &StringRecord) -> Result<(String, Journey), RowError> {
    let vendor_id = field(record, columns.vendor_id, VENDOR_ID)?;

    let pickup = parse_datetime(field(record, columns.pickup, PICKUP_DATETIME)?, PICKUP_DATETIME)?;
    let dropoff =
        parse_datetime(field(record, columns.dropoff, DROPOFF_DATETIME)?, DROPOFF_DATETIME)?;

    let raw = field(record, columns.passengers, PASSENGER_COUNT)?;
    let passengers = raw
        .trim()
        .parse::<u32>()
        .map_err(|_| RowError::InvalidInteger {
            column: PASSENGER_COUNT,
            value: raw.to_string(),
        })?;

    let distance = parse_number(field(record, columns.distance, TRIP_DISTANCE)?, TRIP_DISTANCE)?;
    if distance < 0.0 {
        return Err(RowError::NegativeDistance(distance));
    }
    let fare = parse_number(field(record, columns.fare, TOTAL_AMOUNT)?, TOTAL_AMOUNT)?;

    Ok((
        vendor_id.to_string(),
        Journey {
            pickup,
            dropoff,
            passengers,
            distance,
            fare,
        },
    ))
}

/// Reads every row of a CSV stream, keeping the rows that validate.
///
/// Invalid rows are counted and skipped. Only I/O failures abort the read.
pub fn read_journeys<R: Read>(reader: R) -> Result<Ingest> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_reader(reader);

    let columns = Columns::from_headers(rdr.headers()?);
    let missing = columns.missing();
    if !missing.is_empty() {
        warn!(?missing, "Header lacks required columns, every row will be rejected");
    }

    let mut ingest = Ingest::default();
    let mut record = StringRecord::new();

    loop {
        let parsed = match rdr.read_record(&mut record) {
            Ok(false) => break,
            Ok(true) => parse_record(&columns, &record),
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => Err(RowError::Malformed(e.to_string())),
        };

        match parsed {
            Ok(row) => ingest.records.push(row),
            Err(reason) => {
                let line = record.position().map(|p| p.line());
                debug!(?line, %reason, "Row rejected");
                ingest.rejected += 1;
            }
        }
    }

    info!(
        accepted = ingest.records.len(),
        rejected = ingest.rejected,
        "CSV ingest complete"
    );
    Ok(ingest)
}

fn field<'r>(
    record: &'r StringRecord,
    idx: Option<usize>,
    column: &'static str,
) -> Result<&'r str, RowError> {
    idx.and_then(|i| record.get(i))
        .ok_or(RowError::MissingColumn(column))
}

fn parse_datetime(raw: &str, column: &'static str) -> Result<NaiveDateTime, RowError> {
    NaiveDateTime::parse_from_str(raw.trim(), DATETIME_FORMAT).map_err(|_| {
        RowError::InvalidTimestamp {
            column,
            value: raw.to_string(),
        }
    })
}

fn parse_number(raw: &str, column: &'static str) -> Result<f64, RowError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| RowError::InvalidNumber {
            column,
            value: raw.to_string(),
        })
}
