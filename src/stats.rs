use serde::Serialize;

use crate::analyzers::types::Journey;
use crate::analyzers::utility::{mean, round_to};

/// Corpus-wide totals over every validated journey.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct AggregateTotals {
    pub trips: usize,
    pub distance: f64,
    pub fare: f64,
    pub passengers: u64,
}

impl AggregateTotals {
    pub fn from_journeys<'a, I>(journeys: I) -> Self
    where
        I: IntoIterator<Item = &'a Journey>,
    {
        let mut t = AggregateTotals::default();

        for j in journeys {
            t.trips += 1;
            t.distance += j.distance;
            t.fare += j.fare;
            t.passengers += u64::from(j.passengers);
        }

        t.distance = round_to(t.distance, 1);
        t.fare = round_to(t.fare, 2);
        t
    }
}

/// Per-vendor averages and totals.
///
/// Always computed over the vendor's full journey set, not the ranked subset.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct VendorStats {
    pub trips: usize,
    pub avg_distance: f64,
    pub avg_fare: f64,
    pub avg_passengers: f64,
    pub total_distance: f64,
}

impl VendorStats {
    /// An empty slice yields all-zero stats.
    pub fn from_journeys(journeys: &[Journey]) -> Self {
        let distances: Vec<f64> = journeys.iter().map(|j| j.distance).collect();
        let fares: Vec<f64> = journeys.iter().map(|j| j.fare).collect();
        let passengers: Vec<f64> = journeys.iter().map(|j| f64::from(j.passengers)).collect();

        VendorStats {
            trips: journeys.len(),
            avg_distance: round_to(mean(&distances), 2),
            avg_fare: round_to(mean(&fares), 2),
            avg_passengers: round_to(mean(&passengers), 2),
            total_distance: round_to(distances.iter().sum(), 2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn journey(passengers: u32, distance: f64, fare: f64) -> Journey {
        let pickup =
            NaiveDateTime::parse_from_str("2020-04-01 10:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
        Journey {
            pickup,
            dropoff: pickup,
            passengers,
            distance,
            fare,
        }
    }

    #[test]
    fn test_totals_empty() {
        let totals = AggregateTotals::from_journeys(std::iter::empty::<&Journey>());
        assert_eq!(totals, AggregateTotals::default());
    }

    #[test]
    fn test_totals_single_journey() {
        let totals = AggregateTotals::from_journeys(&[journey(1, 5.0, 20.0)]);

        assert_eq!(totals.trips, 1);
        assert_eq!(totals.distance, 5.0);
        assert_eq!(totals.fare, 20.0);
        assert_eq!(totals.passengers, 1);
    }

    #[test]
    fn test_totals_rounding() {
        let journeys = vec![journey(2, 1.26, 10.333), journey(3, 2.0, 5.0)];
        let totals = AggregateTotals::from_journeys(&journeys);

        assert_eq!(totals.distance, 3.3);
        assert_eq!(totals.fare, 15.33);
        assert_eq!(totals.passengers, 5);
    }

    #[test]
    fn test_vendor_stats_empty_is_zero() {
        let stats = VendorStats::from_journeys(&[]);

        assert_eq!(stats.trips, 0);
        assert_eq!(stats.avg_distance, 0.0);
        assert_eq!(stats.avg_fare, 0.0);
        assert_eq!(stats.avg_passengers, 0.0);
        assert_eq!(stats.total_distance, 0.0);
    }

    #[test]
    fn test_vendor_stats_averages() {
        let journeys = vec![
            journey(1, 2.8, 12.3),
            journey(2, 2.6, 10.8),
            journey(6, 12.23, 40.3),
        ];
        let stats = VendorStats::from_journeys(&journeys);

        assert_eq!(stats.trips, 3);
        assert_eq!(stats.avg_distance, 5.88);
        assert_eq!(stats.avg_fare, 21.13);
        assert_eq!(stats.avg_passengers, 3.0);
        assert_eq!(stats.total_distance, 17.63);
    }
}
