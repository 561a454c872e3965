//! Box Data Loader - CSV loading and cleaning for the box install dataset
//!
//! Reads the dataset into a Polars-backed [`Table`], indexes it by
//! `install_time` and filters it down to clean, deduplicated rows.
//!
//! ```no_run
//! use box_data_loader::{DataLoader, LoaderConfig};
//!
//! let table = DataLoader::new(LoaderConfig::default()).load()?;
//! println!("{} rows", table.height());
//! # Ok::<(), box_data_loader::LoaderError>(())
//! ```

pub mod config;
pub mod data;

pub use config::{ConfigError, LoaderConfig, DEFAULT_DATA_PATH};
pub use data::{CleanError, DataCleaner, DataLoader, LoaderError, Table};
