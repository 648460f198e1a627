//! Record extension
//!
//! Orchestrates the full feature derivation over a raw record set: per-row
//! lead time, season, weekday and holiday flag, the dataset-level popularity
//! table, then the interaction features. Input row order is preserved in the
//! output.

use crate::data::calendar::HolidayCalendar;
use crate::data::{features, popularity};
use crate::error::PipelineError;
use crate::models::{BookingRecord, ExtendedRecord};

/// Derive all features for a raw record set
pub fn extend_records(
    records: &[BookingRecord],
    calendar: &HolidayCalendar,
) -> Result<Vec<ExtendedRecord>, PipelineError> {
    let popularity = popularity::popularity_table(records);

    records
        .iter()
        .map(|record| {
            let lead_time = features::days_between(record.created, record.arrival);
            let season = features::season_of(record.created)?;
            let weekday = features::weekday_of(record.created);

            Ok(ExtendedRecord {
                tariff_cost: record.tariff_cost,
                created: record.created,
                booking_depth: record.booking_depth,
                arrival: record.arrival,
                // every arrival date is keyed, the table is built from the same records
                popularity: popularity.get(&record.arrival).copied().unwrap_or(0.0),
                lead_time,
                season,
                weekday,
                holiday_flag: calendar.holiday_flag(record.arrival),
                lead_depth_bind: features::lead_depth_bind(lead_time, record.booking_depth),
                season_weekday_bind: features::season_weekday_bind(season, weekday),
            })
        })
        .collect()
}
