//! Data loading and feature engineering modules

pub mod calendar;
pub mod csv_loader;
pub mod extender;
pub mod features;
pub mod popularity;
pub mod splitter;

// Re-export commonly used items
pub use calendar::{default_rules, HolidayCalendar, HolidayRule};
pub use csv_loader::{load_bookings, load_split, write_extended, write_split};
pub use extender::extend_records;
pub use splitter::split_by_cutoff;
