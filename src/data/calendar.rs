//! Holiday proximity calendar
//!
//! Expands a fixed rule set of recurring holidays over a bounded year range
//! into the set of "holiday-proximate" calendar dates. The calendar is built
//! once per configured range and passed around explicitly; membership tests
//! are O(1) against the precomputed set.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Days included before each holiday occurrence
pub const WINDOW_BEFORE_DAYS: u64 = 8;
/// Days included after each holiday occurrence
pub const WINDOW_AFTER_DAYS: u64 = 1;

/// A recurring holiday, fixed month and day every year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayRule {
    pub month: u32,
    pub day: u32,
}

impl HolidayRule {
    pub const fn new(month: u32, day: u32) -> Self {
        Self { month, day }
    }
}

/// Default rule set: the New Year block Jan 1-7 plus two fixed single-day
/// holidays (Feb 23 and Mar 8)
pub fn default_rules() -> Vec<HolidayRule> {
    let mut rules: Vec<HolidayRule> = (1..=7).map(|day| HolidayRule::new(1, day)).collect();
    rules.push(HolidayRule::new(2, 23));
    rules.push(HolidayRule::new(3, 8));
    rules
}

/// Precomputed set of holiday-proximate dates
#[derive(Debug, Clone)]
pub struct HolidayCalendar {
    window: HashSet<NaiveDate>,
}

impl HolidayCalendar {
    /// Expand every holiday occurrence in `[start_year, end_year]` to the
    /// inclusive window `[holiday - 8 days, holiday + 1 day]`
    ///
    /// Overlapping windows from adjacent holidays merge by set union; the
    /// proximity flag stays binary, there are no intensity levels.
    pub fn build(rules: &[HolidayRule], start_year: i32, end_year: i32) -> Self {
        let mut window = HashSet::new();

        for year in start_year..=end_year {
            for rule in rules {
                let Some(holiday) = NaiveDate::from_ymd_opt(year, rule.month, rule.day) else {
                    continue;
                };
                let last = holiday + Days::new(WINDOW_AFTER_DAYS);
                let mut date = holiday - Days::new(WINDOW_BEFORE_DAYS);
                while date <= last {
                    window.insert(date);
                    match date.succ_opt() {
                        Some(next) => date = next,
                        None => break,
                    }
                }
            }
        }

        Self { window }
    }

    /// Whether `date` falls inside the holiday-proximity window
    pub fn is_holiday_proximate(&self, date: NaiveDate) -> bool {
        self.window.contains(&date)
    }

    /// Flag encoding used by the extended dataset: 2 if proximate, else 1
    pub fn holiday_flag(&self, arrival: NaiveDate) -> u8 {
        if self.is_holiday_proximate(arrival) {
            2
        } else {
            1
        }
    }

    /// Number of distinct proximate dates
    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_window_spans_ten_dates() {
        let calendar = HolidayCalendar::build(&[HolidayRule::new(1, 1)], 2018, 2018);
        assert_eq!(calendar.len(), 10);
        // Jan 1 -> Dec 24 through Jan 2 inclusive
        assert!(calendar.is_holiday_proximate(date(2017, 12, 24)));
        assert!(calendar.is_holiday_proximate(date(2018, 1, 1)));
        assert!(calendar.is_holiday_proximate(date(2018, 1, 2)));
        assert!(!calendar.is_holiday_proximate(date(2017, 12, 23)));
        assert!(!calendar.is_holiday_proximate(date(2018, 1, 3)));
    }

    #[test]
    fn test_adjacent_windows_merge() {
        let rules = [HolidayRule::new(1, 1), HolidayRule::new(1, 2)];
        let calendar = HolidayCalendar::build(&rules, 2018, 2018);
        // [Dec 24, Jan 2] union [Dec 25, Jan 3] = [Dec 24, Jan 3], 11 dates
        assert_eq!(calendar.len(), 11);
    }

    #[test]
    fn test_build_is_idempotent() {
        let rules = default_rules();
        let first = HolidayCalendar::build(&rules, 2017, 2018);
        let second = HolidayCalendar::build(&rules, 2017, 2018);
        assert_eq!(first.window, second.window);
    }

    #[test]
    fn test_default_rules_december_proximity() {
        let calendar = HolidayCalendar::build(&default_rules(), 2017, 2018);
        assert!(calendar.is_holiday_proximate(date(2017, 12, 26)));
        assert!(calendar.is_holiday_proximate(date(2018, 3, 8)));
        assert!(calendar.is_holiday_proximate(date(2018, 2, 24)));
        assert!(!calendar.is_holiday_proximate(date(2018, 6, 15)));
    }

    #[test]
    fn test_invalid_rule_is_skipped() {
        let calendar = HolidayCalendar::build(&[HolidayRule::new(2, 30)], 2018, 2018);
        assert!(calendar.is_empty());
    }
}
