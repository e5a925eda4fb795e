//! Trip aggregation.
//!
//! This module groups validated journeys by vendor, ranks each vendor's
//! journeys by distance, and reduces them into totals and averages.

pub mod aggregate;
pub mod analyzer;
pub mod group;
pub mod types;
pub mod utility;
