//! Data module - CSV loading and cleaning

mod cleaner;
mod loader;
mod table;
mod timestamp;

pub use cleaner::{CleanError, DataCleaner, GENDER_COLUMN, UNKNOWN_GENDER, USER_ID_COLUMN};
pub use loader::{DataLoader, LoaderError, INSTALL_TIME_COLUMN};
pub use table::{ChronoIndex, Table};
pub use timestamp::{install_cutoff, parse_timestamp, TIMESTAMP_FORMAT};
