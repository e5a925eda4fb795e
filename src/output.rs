//! Output formatting for trip reports.
//!
//! Supports a plain-text table report, JSON serialization, and a CSV export
//! of the ranked trips.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use csv::WriterBuilder;
use serde::Serialize;
use tracing::info;

use crate::analyzers::types::{DATETIME_FORMAT, TripReport, VendorReport, serialize_datetime};

/// Writes the report as pretty-printed JSON.
pub fn write_json<W: Write>(out: &mut W, report: &TripReport) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)?;
    Ok(())
}

/// Writes the human-readable report: global totals, then per vendor the
/// ranked trips, the vendor total distance and the vendor averages.
pub fn write_text<W: Write>(out: &mut W, report: &TripReport) -> Result<()> {
    let totals = &report.totals;
    writeln!(
        out,
        "Total passengers: {}, total distance: {:.1} miles",
        totals.passengers, totals.distance
    )?;
    writeln!(out, "Total fare: ${:.2}", totals.fare)?;

    for vendor in &report.vendors {
        writeln!(out)?;
        write_vendor(out, vendor)?;
    }

    Ok(())
}

fn write_vendor<W: Write>(out: &mut W, vendor: &VendorReport) -> Result<()> {
    let label = if vendor.vendor_id.is_empty() {
        "(none)"
    } else {
        vendor.vendor_id.as_str()
    };
    writeln!(
        out,
        "Vendor {} (top {} of {} trips by distance)",
        label,
        vendor.top_trips.len(),
        vendor.stats.trips
    )?;

    writeln!(
        out,
        "{:<19}  {:<19}  {:>10}  {:>9}  {:>9}",
        "Pickup", "Dropoff", "Passengers", "Distance", "Fare"
    )?;
    for trip in &vendor.top_trips {
        writeln!(
            out,
            "{:<19}  {:<19}  {:>10}  {:>9.2}  {:>9.2}",
            trip.pickup.format(DATETIME_FORMAT),
            trip.dropoff.format(DATETIME_FORMAT),
            trip.passengers,
            trip.distance,
            trip.fare
        )?;
    }

    let stats = &vendor.stats;
    writeln!(out)?;
    writeln!(out, "{:>14}", "Total distance")?;
    writeln!(out, "{:>14.2}", stats.total_distance)?;

    writeln!(out)?;
    writeln!(
        out,
        "{:>12}  {:>9}  {:>14}",
        "Avg distance", "Avg fare", "Avg passengers"
    )?;
    writeln!(
        out,
        "{:>12.2}  {:>9.2}  {:>14.2}",
        stats.avg_distance, stats.avg_fare, stats.avg_passengers
    )?;

    Ok(())
}

#[derive(Serialize)]
struct RankedTripRow<'a> {
    #[serde(rename = "VendorID")]
    vendor_id: &'a str,
    rank: usize,
    #[serde(rename = "tpep_pickup_datetime", serialize_with = "serialize_datetime")]
    pickup: NaiveDateTime,
    #[serde(rename = "tpep_dropoff_datetime", serialize_with = "serialize_datetime")]
    dropoff: NaiveDateTime,
    passenger_count: u32,
    trip_distance: f64,
    total_amount: f64,
}

/// Writes every vendor's ranked trips to a CSV file, replacing any existing
/// file. Returns the number of rows written.
pub fn export_csv(path: &Path, report: &TripReport) -> Result<usize> {
    let mut writer = WriterBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;

    let mut rows = 0;
    for vendor in &report.vendors {
        for (i, trip) in vendor.top_trips.iter().enumerate() {
            writer.serialize(RankedTripRow {
                vendor_id: &vendor.vendor_id,
                rank: i + 1,
                pickup: trip.pickup,
                dropoff: trip.dropoff,
                passenger_count: trip.passengers,
                trip_distance: trip.distance,
                total_amount: trip.fare,
            })?;
            rows += 1;
        }
    }
    writer.flush()?;

    info!(path = %path.display(), rows, "Ranked trips exported");
    Ok(rows)
}
