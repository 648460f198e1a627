use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// Column labels of the reference file format, used verbatim on disk.
pub const COL_TARIFF: &str = "Стоимость тарифа";
pub const COL_CREATED: &str = "Дата создания";
pub const COL_DEPTH: &str = "Глубина бронирования";
pub const COL_ARRIVAL: &str = "Дата заезда";
pub const COL_POPULARITY: &str = "Популярность";
pub const COL_LEAD_TIME: &str = "До заезда";
pub const COL_SEASON: &str = "Сезон";
pub const COL_WEEKDAY: &str = "День недели";
pub const COL_HOLIDAY: &str = "Праздник";
pub const COL_LEAD_DEPTH_BIND: &str = "Дней_до/Глубину";
pub const COL_SEASON_WEEKDAY_BIND: &str = "День_недели/Сезон";

/// Canonical feature set for the final pipeline variant, in training order
pub const DEFAULT_FEATURES: &[&str] = &[
    COL_DEPTH,
    COL_LEAD_TIME,
    COL_SEASON,
    COL_WEEKDAY,
    COL_HOLIDAY,
    COL_LEAD_DEPTH_BIND,
    COL_SEASON_WEEKDAY_BIND,
];

/// One raw booking transaction row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingRecord {
    /// Tariff cost, the regression target
    pub tariff_cost: f64,
    /// Date the booking was made
    pub created: NaiveDate,
    /// Advance booking horizon, provided by the source
    pub booking_depth: i64,
    /// Start date of the stay
    pub arrival: NaiveDate,
}

/// Booking record with all derived features attached
///
/// Created once by the record extender and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtendedRecord {
    pub tariff_cost: f64,
    pub created: NaiveDate,
    pub booking_depth: i64,
    pub arrival: NaiveDate,
    /// log10 of the number of bookings sharing this arrival date, 2 decimals
    pub popularity: f64,
    /// Days between creation and arrival
    pub lead_time: i64,
    /// Season bucket of the creation month, 1..=4
    pub season: u8,
    /// Day of week of the creation date, Monday=1..Sunday=7
    pub weekday: u8,
    /// 2 if the arrival date is holiday-proximate, else 1
    pub holiday_flag: u8,
    /// round(sqrt(lead_time * booking_depth), 2)
    pub lead_depth_bind: f64,
    /// round(e^(season + weekday), 2)
    pub season_weekday_bind: f64,
}

impl ExtendedRecord {
    /// Numeric value of a named column, for feature extraction
    pub fn feature_value(&self, column: &str) -> Option<f64> {
        match column {
            COL_TARIFF => Some(self.tariff_cost),
            COL_DEPTH => Some(self.booking_depth as f64),
            COL_POPULARITY => Some(self.popularity),
            COL_LEAD_TIME => Some(self.lead_time as f64),
            COL_SEASON => Some(f64::from(self.season)),
            COL_WEEKDAY => Some(f64::from(self.weekday)),
            COL_HOLIDAY => Some(f64::from(self.holiday_flag)),
            COL_LEAD_DEPTH_BIND => Some(self.lead_depth_bind),
            COL_SEASON_WEEKDAY_BIND => Some(self.season_weekday_bind),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> ExtendedRecord {
        ExtendedRecord {
            tariff_cost: 1000.0,
            created: NaiveDate::from_ymd_opt(2017, 6, 1).unwrap(),
            booking_depth: 10,
            arrival: NaiveDate::from_ymd_opt(2017, 6, 15).unwrap(),
            popularity: 0.0,
            lead_time: 14,
            season: 3,
            weekday: 4,
            holiday_flag: 1,
            lead_depth_bind: 11.83,
            season_weekday_bind: 1096.63,
        }
    }

    #[test]
    fn test_feature_value_known_columns() {
        let record = sample_record();
        assert_eq!(record.feature_value(COL_DEPTH), Some(10.0));
        assert_eq!(record.feature_value(COL_LEAD_TIME), Some(14.0));
        assert_eq!(record.feature_value(COL_SEASON), Some(3.0));
        assert_eq!(record.feature_value(COL_HOLIDAY), Some(1.0));
        assert_eq!(record.feature_value(COL_TARIFF), Some(1000.0));
    }

    #[test]
    fn test_feature_value_unknown_column() {
        assert_eq!(sample_record().feature_value("нет такой колонки"), None);
    }

    #[test]
    fn test_default_features_resolve() {
        let record = sample_record();
        for name in DEFAULT_FEATURES {
            assert!(record.feature_value(name).is_some(), "unresolved {name}");
        }
    }
}
