//! CSV Data Loader Module
//! Reads the box dataset with Polars, indexes it by install time and cleans it.

use crate::config::LoaderConfig;
use crate::data::cleaner::{CleanError, DataCleaner};
use crate::data::table::Table;
use crate::data::timestamp::parse_timestamp;
use polars::prelude::*;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

pub const INSTALL_TIME_COLUMN: &str = "install_time";

/// Tokens read as missing besides empty fields, the usual dataframe NA set.
const MISSING_MARKERS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to open {}: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to parse CSV {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },
    #[error("Column '{column}' row {row}: {value:?} is not a YYYY-MM-DD HH:MM:SS timestamp")]
    Format {
        column: String,
        row: usize,
        value: String,
    },
    #[error("Missing required column '{0}'")]
    MissingColumn(String),
    #[error(transparent)]
    Clean(#[from] CleanError),
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// Loads the dataset described by a [`LoaderConfig`].
#[derive(Debug, Clone, Default)]
pub struct DataLoader {
    config: LoaderConfig,
}

impl DataLoader {
    pub fn new(config: LoaderConfig) -> Self {
        Self { config }
    }

    /// Load `path` with date parsing and cleaning enabled.
    pub fn load_path(path: impl AsRef<Path>) -> Result<Table, LoaderError> {
        Self::new(LoaderConfig::default().with_path(path.as_ref())).load()
    }

    /// Read the CSV, then index and clean it as configured.
    pub fn load(&self) -> Result<Table, LoaderError> {
        let path = self.config.path.as_path();
        let df = Self::read_csv(path)?;
        info!(
            path = %path.display(),
            rows = df.height(),
            columns = df.width(),
            "loaded csv"
        );

        let table = if self.config.parse_date {
            Self::index_by_install_time(df)?
        } else {
            Table::new(df)
        };

        if self.config.clean {
            Ok(DataCleaner::clean(&table)?)
        } else {
            Ok(table)
        }
    }

    /// Read a comma separated file with a header row.
    pub fn read_csv(path: &Path) -> Result<DataFrame, LoaderError> {
        let access_error = |source| LoaderError::FileAccess {
            path: path.to_path_buf(),
            source,
        };
        let file = File::open(path).map_err(access_error)?;
        if !file.metadata().map_err(access_error)?.is_file() {
            return Err(access_error(io::Error::other("not a regular file")));
        }

        CsvReadOptions::default()
            .with_has_header(true)
            // infer dtypes over every row
            .with_infer_schema_length(None)
            .with_raise_if_empty(true)
            .map_parse_options(|opts| {
                opts.with_separator(b',').with_null_values(Some(NullValues::AllColumns(
                    MISSING_MARKERS.iter().map(|m| (*m).into()).collect(),
                )))
            })
            .into_reader_with_file_handle(file)
            .finish()
            .map_err(|source| LoaderError::Parse {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Turn `install_time` into the table's chronological index and drop the column.
    ///
    /// Rows keep their file order. Null install times become `None` entries.
    pub fn index_by_install_time(df: DataFrame) -> Result<Table, LoaderError> {
        let column = df
            .column(INSTALL_TIME_COLUMN)
            .map_err(|_| LoaderError::MissingColumn(INSTALL_TIME_COLUMN.to_string()))?;
        let text = column.cast(&DataType::String)?;

        let index = text
            .str()?
            .into_iter()
            .enumerate()
            .map(|(row, value)| {
                value
                    .map(|raw| {
                        parse_timestamp(raw).ok_or_else(|| LoaderError::Format {
                            column: INSTALL_TIME_COLUMN.to_string(),
                            row,
                            value: raw.to_string(),
                        })
                    })
                    .transpose()
            })
            .collect::<Result<Vec<_>, _>>()?;
        debug!(rows = index.len(), "parsed install_time index");

        let frame = df.drop(INSTALL_TIME_COLUMN)?;
        Ok(Table::with_index(frame, index)?)
    }
}
