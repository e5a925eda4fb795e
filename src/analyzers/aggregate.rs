use tracing::debug;

use crate::analyzers::group::{group_by_vendor, rank_by_distance};
use crate::analyzers::types::{TripReport, VendorReport};
use crate::parser::Ingest;
use crate::stats::{AggregateTotals, VendorStats};

/// Aggregates validated journeys into a [`TripReport`].
///
/// Totals and per-vendor stats are computed over every journey; the ranked
/// top `top_n` list per vendor is kept for display only.
pub fn aggregate_trips(ingest: Ingest, top_n: usize) -> TripReport {
    let totals = AggregateTotals::from_journeys(ingest.records.iter().map(|(_, j)| j));

    let vendors = group_by_vendor(ingest.records)
        .into_iter()
        .map(|(vendor_id, journeys)| {
            let stats = VendorStats::from_journeys(&journeys);
            let top_trips = rank_by_distance(&journeys, top_n);
            debug!(
                vendor_id = %vendor_id,
                trips = stats.trips,
                ranked = top_trips.len(),
                "Vendor aggregated"
            );
            VendorReport {
                vendor_id,
                stats,
                top_trips,
            }
        })
        .collect();

    TripReport {
        totals,
        vendors,
        rows_rejected: ingest.rejected,
        top_n,
    }
}
