use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::analyzers::aggregate::aggregate_trips;
use crate::analyzers::types::TripReport;
use crate::parser::read_journeys;

/// Reads the trip CSV at `path` and runs the full aggregation pipeline.
///
/// # Errors
///
/// Fails if the file cannot be opened or read. Invalid rows are skipped.
#[tracing::instrument(skip(path), fields(path = %path.display()))]
pub fn analyze(path: &Path, top_n: usize) -> Result<TripReport> {
    let file =
        File::open(path).with_context(|| format!("failed to open trip data {}", path.display()))?;
    let ingest = read_journeys(BufReader::new(file))
        .with_context(|| format!("failed to read trip data {}", path.display()))?;

    let report = aggregate_trips(ingest, top_n);
    info!(
        vendors = report.vendors.len(),
        trips = report.totals.trips,
        rejected = report.rows_rejected,
        "Analysis complete"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    fn temp_path(name: &str) -> std::path::PathBuf {
        env::temp_dir().join(name)
    }

    #[test]
    fn test_analyze_missing_file() {
        let path = temp_path("cabstats_test_does_not_exist.csv");
        let _ = fs::remove_file(&path);

        let err = analyze(&path, 50).unwrap_err();
        assert!(err.to_string().contains("failed to open trip data"));
    }

    #[test]
    fn test_analyze_reads_file() {
        let path = temp_path("cabstats_test_analyze.csv");
        fs::write(
            &path,
            "VendorID,tpep_pickup_datetime,tpep_dropoff_datetime,passenger_count,trip_distance,total_amount\n\
             V1,2020-04-01 10:00:00,2020-04-01 10:20:00,1,5.0,20.00\n\
             V1,bad-date,2020-04-01 10:20:00,1,5.0,20.00\n",
        )
        .unwrap();

        let report = analyze(&path, 50).unwrap();
        assert_eq!(report.totals.trips, 1);
        assert_eq!(report.totals.fare, 20.0);
        assert_eq!(report.rows_rejected, 1);

        fs::remove_file(&path).unwrap();
    }
}
