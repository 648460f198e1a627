//! Date arithmetic and interaction features
//!
//! Pure, row-local functions: season and weekday depend only on the creation
//! date, the interaction binds only on already-derived columns. Callers
//! guarantee `lead_time >= 0` before asking for the lead/depth bind.

use chrono::{Datelike, NaiveDate};

use crate::error::PipelineError;

/// Date format of the source files
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` date, reporting the offending row and column
pub fn parse_date(value: &str, column: &str, row: usize) -> Result<NaiveDate, PipelineError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| PipelineError::MalformedDate {
        value: value.to_string(),
        column: column.to_string(),
        row,
    })
}

/// Whole days from `a` to `b`, negative when `b` precedes `a`
pub fn days_between(a: NaiveDate, b: NaiveDate) -> i64 {
    b.signed_duration_since(a).num_days()
}

/// Day of week, Monday=1 .. Sunday=7
pub fn weekday_of(date: NaiveDate) -> u8 {
    date.weekday().number_from_monday() as u8
}

/// Season bucket for a month number
///
/// {Dec,Jan,Feb}=1, {Mar,Apr,May}=2, {Jun,Jul,Aug}=3, {Sep,Oct,Nov}=4.
/// chrono never produces a month outside 1..=12, so the error arm is
/// unreachable through `season_of`.
pub fn season_of_month(month: u32) -> Result<u8, PipelineError> {
    match month {
        12 | 1 | 2 => Ok(1),
        3..=5 => Ok(2),
        6..=8 => Ok(3),
        9..=11 => Ok(4),
        other => Err(PipelineError::InvalidMonth(other)),
    }
}

/// Season bucket of a date's month
pub fn season_of(date: NaiveDate) -> Result<u8, PipelineError> {
    season_of_month(date.month())
}

/// Round to 2 decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Interaction feature: round(e^(season + weekday), 2)
pub fn season_weekday_bind(season: u8, weekday: u8) -> f64 {
    round2(f64::from(season + weekday).exp())
}

/// Interaction feature: round(sqrt(lead_time * booking_depth), 2)
///
/// Propagates NaN when the product is negative.
pub fn lead_depth_bind(lead_time: i64, booking_depth: i64) -> f64 {
    round2(((lead_time * booking_depth) as f64).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_date_valid() {
        assert_eq!(
            parse_date("2017-06-01", "Дата создания", 0).unwrap(),
            date(2017, 6, 1)
        );
    }

    #[test]
    fn test_parse_date_malformed() {
        let err = parse_date("01.06.2017", "Дата создания", 7).unwrap_err();
        match err {
            PipelineError::MalformedDate { value, column, row } => {
                assert_eq!(value, "01.06.2017");
                assert_eq!(column, "Дата создания");
                assert_eq!(row, 7);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_days_between() {
        assert_eq!(days_between(date(2017, 6, 1), date(2017, 6, 15)), 14);
        assert_eq!(days_between(date(2017, 6, 15), date(2017, 6, 1)), -14);
        assert_eq!(days_between(date(2017, 12, 31), date(2018, 1, 1)), 1);
    }

    #[test]
    fn test_weekday_of() {
        // 2018-01-01 was a Monday
        assert_eq!(weekday_of(date(2018, 1, 1)), 1);
        assert_eq!(weekday_of(date(2018, 1, 7)), 7);
        // 2017-06-01 was a Thursday
        assert_eq!(weekday_of(date(2017, 6, 1)), 4);
    }

    #[test]
    fn test_season_partitions_all_months() {
        let expected = [1, 1, 2, 2, 2, 3, 3, 3, 4, 4, 4, 1];
        for (month, season) in (1..=12).zip(expected) {
            assert_eq!(season_of_month(month).unwrap(), season, "month {month}");
        }
    }

    #[test]
    fn test_season_rejects_invalid_month() {
        assert!(matches!(
            season_of_month(0),
            Err(PipelineError::InvalidMonth(0))
        ));
        assert!(matches!(
            season_of_month(13),
            Err(PipelineError::InvalidMonth(13))
        ));
    }

    #[test]
    fn test_round2_is_idempotent() {
        let rounded = round2(11.832159566199232);
        assert_eq!(rounded, 11.83);
        assert_eq!(round2(rounded), rounded);
    }

    #[test]
    fn test_season_weekday_bind() {
        // e^(3 + 4) = 1096.633...
        assert_eq!(season_weekday_bind(3, 4), 1096.63);
        assert_eq!(season_weekday_bind(1, 1), round2(f64::exp(2.0)));
    }

    #[test]
    fn test_lead_depth_bind() {
        // sqrt(14 * 10) = 11.832...
        assert_eq!(lead_depth_bind(14, 10), 11.83);
        assert_eq!(lead_depth_bind(0, 10), 0.0);
        assert!(lead_depth_bind(-1, 10).is_nan());
    }
}
