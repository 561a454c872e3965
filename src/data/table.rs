//! Table Module
//! A Polars DataFrame paired with an optional chronological row index.

use chrono::NaiveDateTime;
use polars::prelude::*;

/// One timestamp per row, in row order. `None` marks a missing install time.
pub type ChronoIndex = Vec<Option<NaiveDateTime>>;

/// Ordered rows with named columns, optionally indexed by install time.
///
/// Every transformation returns a new `Table`; nothing here mutates in place.
#[derive(Debug, Clone)]
pub struct Table {
    frame: DataFrame,
    index: Option<ChronoIndex>,
}

impl Table {
    /// Wrap a frame that is addressed by row position only.
    pub fn new(frame: DataFrame) -> Self {
        Self { frame, index: None }
    }

    /// Wrap a frame together with its chronological index.
    pub fn with_index(frame: DataFrame, index: ChronoIndex) -> PolarsResult<Self> {
        if index.len() != frame.height() {
            return Err(PolarsError::ShapeMismatch(
                format!(
                    "index has {} entries but frame has {} rows",
                    index.len(),
                    frame.height()
                )
                .into(),
            ));
        }
        Ok(Self {
            frame,
            index: Some(index),
        })
    }

    /// Keep the rows whose mask entry is `true`, index included.
    pub fn retain(&self, keep: &[bool]) -> PolarsResult<Self> {
        let mask = BooleanChunked::from_slice("keep".into(), keep);
        let frame = self.frame.filter(&mask)?;
        let index = self.index.as_ref().map(|index| {
            index
                .iter()
                .zip(keep)
                .filter(|(_, kept)| **kept)
                .map(|(stamp, _)| *stamp)
                .collect()
        });
        Ok(Self { frame, index })
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn index(&self) -> Option<&[Option<NaiveDateTime>]> {
        self.index.as_deref()
    }

    pub fn has_index(&self) -> bool {
        self.index.is_some()
    }

    /// Get list of column names.
    pub fn column_names(&self) -> Vec<String> {
        self.frame
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.frame.height()
    }

    /// Number of columns, not counting the index.
    pub fn width(&self) -> usize {
        self.frame.width()
    }

    /// Sorted distinct non-null values of a column, rendered as text.
    pub fn unique_values(&self, column: &str) -> PolarsResult<Vec<String>> {
        let unique = self.frame.column(column)?.unique()?;
        let series = unique.as_materialized_series();
        let mut values: Vec<String> = (0..series.len())
            .filter_map(|i| {
                let val = series.get(i).ok()?;
                if val.is_null() {
                    None
                } else {
                    Some(val.to_string().trim_matches('"').to_string())
                }
            })
            .collect();
        values.sort();
        Ok(values)
    }
}

impl PartialEq for Table {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && self.frame.equals_missing(&other.frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::timestamp::parse_timestamp;

    fn sample() -> Table {
        let frame = df!(
            "user_id" => [1i64, 2, 3],
            "gender" => ["m", "f", "m"],
        )
        .unwrap();
        let index = vec![
            parse_timestamp("2018-07-02 00:00:00"),
            None,
            parse_timestamp("2018-08-01 12:30:00"),
        ];
        Table::with_index(frame, index).unwrap()
    }

    #[test]
    fn retain_filters_frame_and_index_together() {
        let table = sample();
        let kept = table.retain(&[true, false, true]).unwrap();

        assert_eq!(kept.height(), 2);
        let ids: Vec<Option<i64>> = kept
            .frame()
            .column("user_id")
            .unwrap()
            .i64()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(ids, vec![Some(1), Some(3)]);
        assert_eq!(
            kept.index().unwrap(),
            &[
                parse_timestamp("2018-07-02 00:00:00"),
                parse_timestamp("2018-08-01 12:30:00"),
            ]
        );
        // source untouched
        assert_eq!(table.height(), 3);
    }

    #[test]
    fn with_index_rejects_length_mismatch() {
        let frame = df!("user_id" => [1i64, 2]).unwrap();
        assert!(Table::with_index(frame, vec![None]).is_err());
    }

    #[test]
    fn unique_values_are_sorted_and_unquoted() {
        let table = sample();
        assert_eq!(table.unique_values("gender").unwrap(), vec!["f", "m"]);
        assert!(table.unique_values("country").is_err());
    }

    #[test]
    fn equality_includes_index() {
        let table = sample();
        let unindexed = Table::new(table.frame().clone());
        assert_ne!(table, unindexed);
        assert_eq!(table, table.clone());
        assert_eq!(table.column_names(), vec!["user_id", "gender"]);
        assert_eq!(table.width(), 2);
        assert!(table.has_index() && !unindexed.has_index());
    }
}
