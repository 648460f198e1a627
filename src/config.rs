//! Pipeline configuration
//!
//! Everything the batch job fixes up front: file locations, the chronological
//! split cutoff, the holiday rule set and the year range it is expanded over,
//! and the feature column list handed to the training harness. The feature
//! list is explicit configuration rather than a hardcoded set, so a run can
//! reproduce any historical feature combination.

use chrono::NaiveDate;
use std::path::{Path, PathBuf};

use crate::data::calendar::{default_rules, HolidayRule};
use crate::models::DEFAULT_FEATURES;

/// Raw input file name
pub const RAW_FILE: &str = "bookings.csv";
/// Extended dataset file name
pub const EXTENDED_FILE: &str = "bookings_extended.csv";
/// Training split file name
pub const TRAIN_FILE: &str = "train_data.csv";
/// Evaluation split file name
pub const TEST_FILE: &str = "test_data.csv";
/// Evaluation report file name
pub const REPORT_FILE: &str = "report.json";

/// Static configuration for one pipeline run
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub raw_path: PathBuf,
    pub extended_path: PathBuf,
    pub train_path: PathBuf,
    pub test_path: PathBuf,
    pub report_path: PathBuf,
    /// Bookings created before this date train the model, the rest test it
    pub cutoff: NaiveDate,
    /// Recurring holidays expanded into the proximity window
    pub holiday_rules: Vec<HolidayRule>,
    /// First year covered by the holiday window
    pub window_start_year: i32,
    /// Last year covered by the holiday window
    pub window_end_year: i32,
    /// Feature columns, in training order
    pub feature_columns: Vec<String>,
}

impl PipelineConfig {
    /// Configuration of the reference run, rooted at `data_dir`
    pub fn with_data_dir<P: AsRef<Path>>(data_dir: P) -> Self {
        let dir = data_dir.as_ref();
        Self {
            raw_path: dir.join(RAW_FILE),
            extended_path: dir.join(EXTENDED_FILE),
            train_path: dir.join(TRAIN_FILE),
            test_path: dir.join(TEST_FILE),
            report_path: dir.join(REPORT_FILE),
            cutoff: NaiveDate::from_ymd_opt(2018, 1, 1).expect("valid cutoff date"),
            holiday_rules: default_rules(),
            window_start_year: 2017,
            window_end_year: 2018,
            feature_columns: DEFAULT_FEATURES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Whether both split files already exist on disk
    pub fn splits_exist(&self) -> bool {
        self.train_path.is_file() && self.test_path.is_file()
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::with_data_dir("data")
    }
}
