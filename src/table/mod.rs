//! The aggregated result of a run: records in fetch order plus the column union.

use std::collections::HashSet;
use std::fmt;

use crate::fundamentals::FundamentalRecord;

/// Records in the order they were fetched, with a column list that grows as new
/// labels appear.
///
/// Columns start with the first record's labels (so `"Ticker"` leads) and are
/// extended by any unseen label from later records, in the order they show up.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FundamentalsTable {
    columns: Vec<String>,
    seen: HashSet<String>,
    records: Vec<FundamentalRecord>,
}

impl FundamentalsTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record and widens the column set with its new labels.
    pub fn push(&mut self, record: FundamentalRecord) {
        for label in record.labels() {
            if self.seen.insert(label.to_string()) {
                self.columns.push(label.to_string());
            }
        }
        self.records.push(record);
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn records(&self) -> &[FundamentalRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All values under `label`, one per record; `None` for records lacking it.
    pub fn column(&self, label: &str) -> Vec<Option<&str>> {
        self.records.iter().map(|r| r.get(label)).collect()
    }

    /// Header row followed by one row per record, all as strings.
    ///
    /// Cells for labels a record does not have are empty strings.
    pub fn to_rows(&self) -> Vec<Vec<String>> {
        let mut rows = Vec::with_capacity(self.records.len() + 1);
        rows.push(self.columns.clone());
        for record in &self.records {
            rows.push(
                self.columns
                    .iter()
                    .map(|c| record.get(c).unwrap_or_default().to_string())
                    .collect(),
            );
        }
        rows
    }
}

impl Extend<FundamentalRecord> for FundamentalsTable {
    fn extend<T: IntoIterator<Item = FundamentalRecord>>(&mut self, iter: T) {
        for record in iter {
            self.push(record);
        }
    }
}

impl FromIterator<FundamentalRecord> for FundamentalsTable {
    fn from_iter<T: IntoIterator<Item = FundamentalRecord>>(iter: T) -> Self {
        let mut table = Self::new();
        table.extend(iter);
        table
    }
}

/// Renders an aligned text grid, header first.
impl fmt::Display for FundamentalsTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = self.to_rows();
        let widths: Vec<usize> = (0..self.columns.len())
            .map(|i| {
                rows.iter()
                    .map(|r| r[i].chars().count())
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        for (n, row) in rows.iter().enumerate() {
            let line = row
                .iter()
                .zip(&widths)
                .map(|(cell, w)| format!("{cell:<w$}"))
                .collect::<Vec<_>>()
                .join(" | ");
            writeln!(f, "{}", line.trim_end())?;
            if n == 0 {
                let rule = widths
                    .iter()
                    .map(|w| "-".repeat(*w))
                    .collect::<Vec<_>>()
                    .join("-+-");
                writeln!(f, "{rule}")?;
            }
        }
        Ok(())
    }
}

#[cfg(feature = "dataframe")]
impl crate::core::dataframe::ToDataFrame for FundamentalsTable {
    fn to_dataframe(&self) -> polars::prelude::PolarsResult<polars::prelude::DataFrame> {
        use polars::prelude::*;

        let columns = self
            .columns
            .iter()
            .map(|name| Column::new(name.as_str().into(), self.column(name)))
            .collect::<Vec<_>>();
        DataFrame::new(columns)
    }
}
