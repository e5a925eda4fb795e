//! Data types used by the aggregation pipeline.

use chrono::NaiveDateTime;
use serde::{Serialize, Serializer};

use crate::stats::{AggregateTotals, VendorStats};

/// Timestamp layout used by the trip records, both on input and output.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single validated taxi trip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Journey {
    #[serde(serialize_with = "serialize_datetime")]
    pub pickup: NaiveDateTime,
    #[serde(serialize_with = "serialize_datetime")]
    pub dropoff: NaiveDateTime,
    pub passengers: u32,
    pub distance: f64,
    pub fare: f64,
}

/// Ranked trips and statistics for one vendor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VendorReport {
    pub vendor_id: String,
    pub stats: VendorStats,
    pub top_trips: Vec<Journey>,
}

/// Complete result of one pipeline run, handed to the output layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripReport {
    pub totals: AggregateTotals,
    pub vendors: Vec<VendorReport>,
    pub rows_rejected: usize,
    pub top_n: usize,
}

impl TripReport {
    /// Looks up the report for `vendor_id`.
    pub fn vendor(&self, vendor_id: &str) -> Option<&VendorReport> {
        self.vendors.iter().find(|v| v.vendor_id == vendor_id)
    }
}

pub(crate) fn serialize_datetime<S>(dt: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&dt.format(DATETIME_FORMAT))
}
