//! Time-ordered train/test partitioning
//!
//! The split is chronological on creation date: everything before the cutoff
//! trains the model, everything at or after it evaluates it. No
//! randomization and no stratification; the model is scored on bookings it
//! could not have seen at training time.

use chrono::NaiveDate;

use crate::models::ExtendedRecord;

/// Partition records by creation date: `created < cutoff` goes to train,
/// the rest to test; relative order inside each half is preserved
pub fn split_by_cutoff(
    records: &[ExtendedRecord],
    cutoff: NaiveDate,
) -> (Vec<ExtendedRecord>, Vec<ExtendedRecord>) {
    records
        .iter()
        .cloned()
        .partition(|record| record.created < cutoff)
}
