//! Tariff AI - Hotel booking tariff prediction pipeline
//!
//! This library provides:
//! - Feature derivation over raw booking records (lead time, season,
//!   weekday, holiday proximity, popularity, interaction features)
//! - Deterministic time-ordered train/test partitioning
//! - A gradient boosted regressor behind a pluggable seam
//! - The evaluation harness (feature importances, rounded-prediction
//!   accuracy, RMSE, native score)
//!
//! # Example
//!
//! ```no_run
//! use tariff::config::PipelineConfig;
//! use tariff::data::{extend_records, load_bookings, split_by_cutoff, HolidayCalendar};
//!
//! let config = PipelineConfig::default();
//! let records = load_bookings(&config.raw_path).unwrap();
//! let calendar = HolidayCalendar::build(
//!     &config.holiday_rules,
//!     config.window_start_year,
//!     config.window_end_year,
//! );
//! let extended = extend_records(&records, &calendar).unwrap();
//! let (train, test) = split_by_cutoff(&extended, config.cutoff);
//! println!("{} train rows, {} test rows", train.len(), test.len());
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod evaluation;
pub mod models;
pub mod regressor;

// Re-export commonly used types
pub use config::PipelineConfig;
pub use data::{extend_records, load_bookings, split_by_cutoff, HolidayCalendar, HolidayRule};
pub use error::PipelineError;
pub use evaluation::{EvalReport, FeatureImportance};
pub use models::{BookingRecord, ExtendedRecord};
pub use regressor::{GbdtParams, GbdtRegressor, Regressor};
