//! Data Cleaner Module
//! Row filters applied to a freshly loaded table.

use crate::data::table::Table;
use crate::data::timestamp::install_cutoff;
use chrono::NaiveDateTime;
use polars::prelude::*;
use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, info};

pub const USER_ID_COLUMN: &str = "user_id";
pub const GENDER_COLUMN: &str = "gender";
pub const UNKNOWN_GENDER: &str = "unknown";

#[derive(Error, Debug)]
pub enum CleanError {
    #[error("Missing required column '{0}'")]
    MissingColumn(String),
    #[error("Date filter needs a chronological index; load with parse_date enabled")]
    MissingIndex,
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// Applies the cleaning rules, each step reading the previous step's output.
pub struct DataCleaner;

impl DataCleaner {
    /// Run every cleaning step in order:
    /// missing values, duplicate `user_id`, unknown gender, install cutoff.
    pub fn clean(table: &Table) -> Result<Table, CleanError> {
        let rows_in = table.height();

        let table = Self::drop_missing(table)?;
        let table = Self::drop_duplicates(&table, USER_ID_COLUMN)?;
        let table = Self::drop_value(&table, GENDER_COLUMN, UNKNOWN_GENDER)?;
        let table = Self::keep_after(&table, install_cutoff())?;

        info!(rows_in, rows_out = table.height(), "cleaned table");
        Ok(table)
    }

    /// Drop every row holding a null, or a NaN float, in any column.
    pub fn drop_missing(table: &Table) -> Result<Table, CleanError> {
        let mut keep = vec![true; table.height()];
        for column in table.frame().get_columns() {
            if column.dtype().is_float() {
                let values = column.cast(&DataType::Float64)?;
                for (slot, value) in keep.iter_mut().zip(values.f64()?.into_iter()) {
                    if value.map_or(true, f64::is_nan) {
                        *slot = false;
                    }
                }
                continue;
            }
            if column.null_count() == 0 {
                continue;
            }
            let nulls = column.as_materialized_series().is_null();
            for (slot, is_null) in keep.iter_mut().zip(nulls.into_iter()) {
                if is_null.unwrap_or(false) {
                    *slot = false;
                }
            }
        }
        Self::apply("drop_missing", table, &keep)
    }

    /// Keep the first row for each distinct value of `column`.
    pub fn drop_duplicates(table: &Table, column: &str) -> Result<Table, CleanError> {
        let values = Self::column_as_text(table, column)?;
        let values = values.str()?;

        let mut seen = HashSet::with_capacity(values.len());
        let keep: Vec<bool> = values.into_iter().map(|v| seen.insert(v)).collect();
        Self::apply("drop_duplicates", table, &keep)
    }

    /// Drop rows where `column` equals `value` exactly.
    pub fn drop_value(table: &Table, column: &str, value: &str) -> Result<Table, CleanError> {
        let values = Self::column_as_text(table, column)?;
        let values = values.str()?;

        let keep: Vec<bool> = values.into_iter().map(|v| v != Some(value)).collect();
        Self::apply("drop_value", table, &keep)
    }

    /// Keep rows whose index timestamp is strictly after `cutoff`.
    pub fn keep_after(table: &Table, cutoff: NaiveDateTime) -> Result<Table, CleanError> {
        let index = table.index().ok_or(CleanError::MissingIndex)?;

        let keep: Vec<bool> = index
            .iter()
            .map(|stamp| stamp.is_some_and(|t| t > cutoff))
            .collect();
        Self::apply("keep_after", table, &keep)
    }

    fn column_as_text(table: &Table, column: &str) -> Result<Column, CleanError> {
        let col = table
            .frame()
            .column(column)
            .map_err(|_| CleanError::MissingColumn(column.to_string()))?;
        Ok(col.cast(&DataType::String)?)
    }

    fn apply(step: &str, table: &Table, keep: &[bool]) -> Result<Table, CleanError> {
        let result = table.retain(keep)?;
        debug!(step, dropped = table.height() - result.height(), "clean step");
        Ok(result)
    }
}
