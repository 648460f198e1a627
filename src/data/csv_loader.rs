//! CSV reading and writing for the booking datasets
//!
//! All files are UTF-8, comma-separated, with a header row and `YYYY-MM-DD`
//! dates. Column labels follow the reference format verbatim. Writes replace
//! the destination file wholesale, never append.

use polars::prelude::*;
use std::fs::File;
use std::path::Path;

use crate::data::features::{parse_date, DATE_FORMAT};
use crate::error::PipelineError;
use crate::models::{
    BookingRecord, ExtendedRecord, COL_ARRIVAL, COL_CREATED, COL_DEPTH, COL_HOLIDAY,
    COL_LEAD_DEPTH_BIND, COL_LEAD_TIME, COL_POPULARITY, COL_SEASON, COL_SEASON_WEEKDAY_BIND,
    COL_TARIFF, COL_WEEKDAY,
};

fn read_csv(path: &Path) -> Result<DataFrame, PipelineError> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;
    Ok(df)
}

fn series<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Series, PipelineError> {
    df.column(name)
        .map_err(|_| PipelineError::SchemaMismatch(name.to_string()))
}

fn float_values(df: &DataFrame, name: &str) -> Result<Vec<f64>, PipelineError> {
    let cast = series(df, name)?.cast(&DataType::Float64)?;
    cast.f64()?
        .into_iter()
        .enumerate()
        .map(|(row, value)| {
            value.ok_or_else(|| PipelineError::MissingValue {
                column: name.to_string(),
                row,
            })
        })
        .collect()
}

fn int_values(df: &DataFrame, name: &str) -> Result<Vec<i64>, PipelineError> {
    let cast = series(df, name)?.cast(&DataType::Int64)?;
    cast.i64()?
        .into_iter()
        .enumerate()
        .map(|(row, value)| {
            value.ok_or_else(|| PipelineError::MissingValue {
                column: name.to_string(),
                row,
            })
        })
        .collect()
}

fn date_values(df: &DataFrame, name: &str) -> Result<Vec<chrono::NaiveDate>, PipelineError> {
    let column = series(df, name)?.str()?;
    column
        .into_iter()
        .enumerate()
        .map(|(row, value)| {
            let raw = value.ok_or_else(|| PipelineError::MissingValue {
                column: name.to_string(),
                row,
            })?;
            parse_date(raw, name, row)
        })
        .collect()
}

/// Load raw booking records
///
/// Checks that all four expected columns are present and parses both date
/// columns, failing on the first malformed row.
pub fn load_bookings<P: AsRef<Path>>(path: P) -> Result<Vec<BookingRecord>, PipelineError> {
    let df = read_csv(path.as_ref())?;

    let tariffs = float_values(&df, COL_TARIFF)?;
    let created = date_values(&df, COL_CREATED)?;
    let depths = int_values(&df, COL_DEPTH)?;
    let arrivals = date_values(&df, COL_ARRIVAL)?;

    Ok((0..df.height())
        .map(|i| BookingRecord {
            tariff_cost: tariffs[i],
            created: created[i],
            booking_depth: depths[i],
            arrival: arrivals[i],
        })
        .collect())
}

fn format_dates(dates: impl Iterator<Item = chrono::NaiveDate>) -> Vec<String> {
    dates.map(|d| d.format(DATE_FORMAT).to_string()).collect()
}

fn write_csv(mut df: DataFrame, path: &Path) -> Result<(), PipelineError> {
    let mut file = File::create(path)?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df)?;
    Ok(())
}

/// Write the extended dataset: raw columns plus popularity
pub fn write_extended<P: AsRef<Path>>(
    records: &[ExtendedRecord],
    path: P,
) -> Result<(), PipelineError> {
    let df = df!(
        COL_TARIFF => records.iter().map(|r| r.tariff_cost).collect::<Vec<f64>>(),
        COL_CREATED => format_dates(records.iter().map(|r| r.created)),
        COL_DEPTH => records.iter().map(|r| r.booking_depth).collect::<Vec<i64>>(),
        COL_ARRIVAL => format_dates(records.iter().map(|r| r.arrival)),
        COL_POPULARITY => records.iter().map(|r| r.popularity).collect::<Vec<f64>>(),
    )?;
    write_csv(df, path.as_ref())
}

/// Write a train or test split: extended columns plus all derived features
pub fn write_split<P: AsRef<Path>>(
    records: &[ExtendedRecord],
    path: P,
) -> Result<(), PipelineError> {
    let df = df!(
        COL_TARIFF => records.iter().map(|r| r.tariff_cost).collect::<Vec<f64>>(),
        COL_CREATED => format_dates(records.iter().map(|r| r.created)),
        COL_DEPTH => records.iter().map(|r| r.booking_depth).collect::<Vec<i64>>(),
        COL_ARRIVAL => format_dates(records.iter().map(|r| r.arrival)),
        COL_POPULARITY => records.iter().map(|r| r.popularity).collect::<Vec<f64>>(),
        COL_LEAD_TIME => records.iter().map(|r| r.lead_time).collect::<Vec<i64>>(),
        COL_SEASON => records.iter().map(|r| i64::from(r.season)).collect::<Vec<i64>>(),
        COL_WEEKDAY => records.iter().map(|r| i64::from(r.weekday)).collect::<Vec<i64>>(),
        COL_HOLIDAY => records.iter().map(|r| i64::from(r.holiday_flag)).collect::<Vec<i64>>(),
        COL_LEAD_DEPTH_BIND => records.iter().map(|r| r.lead_depth_bind).collect::<Vec<f64>>(),
        COL_SEASON_WEEKDAY_BIND => records.iter().map(|r| r.season_weekday_bind).collect::<Vec<f64>>(),
    )?;
    write_csv(df, path.as_ref())
}

/// Load a previously written train or test split
pub fn load_split<P: AsRef<Path>>(path: P) -> Result<Vec<ExtendedRecord>, PipelineError> {
    let df = read_csv(path.as_ref())?;

    let tariffs = float_values(&df, COL_TARIFF)?;
    let created = date_values(&df, COL_CREATED)?;
    let depths = int_values(&df, COL_DEPTH)?;
    let arrivals = date_values(&df, COL_ARRIVAL)?;
    let popularity = float_values(&df, COL_POPULARITY)?;
    let lead_times = int_values(&df, COL_LEAD_TIME)?;
    let seasons = int_values(&df, COL_SEASON)?;
    let weekdays = int_values(&df, COL_WEEKDAY)?;
    let holidays = int_values(&df, COL_HOLIDAY)?;
    let lead_depth_binds = float_values(&df, COL_LEAD_DEPTH_BIND)?;
    let season_weekday_binds = float_values(&df, COL_SEASON_WEEKDAY_BIND)?;

    Ok((0..df.height())
        .map(|i| ExtendedRecord {
            tariff_cost: tariffs[i],
            created: created[i],
            booking_depth: depths[i],
            arrival: arrivals[i],
            popularity: popularity[i],
            lead_time: lead_times[i],
            season: seasons[i] as u8,
            weekday: weekdays[i] as u8,
            holiday_flag: holidays[i] as u8,
            lead_depth_bind: lead_depth_binds[i],
            season_weekday_bind: season_weekday_binds[i],
        })
        .collect())
}
