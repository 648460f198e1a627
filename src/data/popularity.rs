//! Booking popularity encoding
//!
//! Counts bookings sharing an arrival date and compresses the counts with
//! log10. Raw counts are heavy-tailed; the compression keeps the regressor
//! from over-weighting high-volume dates. The table is a dataset-level
//! aggregate, computed once per distinct arrival date and broadcast to all
//! sharing rows.

use chrono::NaiveDate;
use std::collections::HashMap;

use crate::data::features::round2;
use crate::models::BookingRecord;

/// Count of records per arrival date
pub fn count_by_arrival(records: &[BookingRecord]) -> HashMap<NaiveDate, u64> {
    let mut counts: HashMap<NaiveDate, u64> = HashMap::new();
    for record in records {
        *counts.entry(record.arrival).or_insert(0) += 1;
    }
    counts
}

/// round(log10(count), 2) per arrival date
///
/// Counts are always >= 1 (a record self-counts), so the logarithm is
/// always defined and non-negative.
pub fn encode(counts: &HashMap<NaiveDate, u64>) -> HashMap<NaiveDate, f64> {
    counts
        .iter()
        .map(|(&arrival, &count)| (arrival, round2((count as f64).log10())))
        .collect()
}

/// Popularity table for a record set, counted and encoded in one step
pub fn popularity_table(records: &[BookingRecord]) -> HashMap<NaiveDate, f64> {
    encode(&count_by_arrival(records))
}
