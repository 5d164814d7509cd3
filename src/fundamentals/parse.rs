//! Pure extraction of the snapshot table. No I/O here.

use scraper::{Html, Selector};

use super::FundamentalRecord;
use crate::core::{SNAPSHOT_TABLE_CLASS, SyncError};

fn selector(css: &str) -> Result<Selector, SyncError> {
    Selector::parse(css).map_err(|e| SyncError::Data(format!("invalid selector `{css}`: {e}")))
}

/// Cell texts of every `<tr>` in the first `<table>` carrying `class`.
///
/// Rows and cells are matched at any depth below the table/row. Cell text is the
/// concatenated descendant text with surrounding whitespace stripped.
/// Returns `Ok(None)` when the page has no such table.
///
/// # Errors
///
/// Returns `SyncError::Data` if `class` does not form a valid CSS class selector.
pub fn extract_table_rows(html: &str, class: &str) -> Result<Option<Vec<Vec<String>>>, SyncError> {
    let table_sel = selector(&format!("table.{class}"))?;
    let tr = selector("tr")?;
    let td = selector("td")?;

    let document = Html::parse_document(html);
    let Some(table) = document.select(&table_sel).next() else {
        return Ok(None);
    };

    let rows = table
        .select(&tr)
        .map(|row| {
            row.select(&td)
                .map(|cell| cell.text().collect::<String>().trim().to_string())
                .collect()
        })
        .collect();
    Ok(Some(rows))
}

/// Folds rows of alternating label/value cells into a record for `ticker`.
///
/// Cells pair up as (0,1), (2,3), ... within a row; an odd trailing cell is dropped.
pub fn pair_cells<I, R>(ticker: &str, rows: I) -> FundamentalRecord
where
    I: IntoIterator<Item = R>,
    R: AsRef<[String]>,
{
    let mut record = FundamentalRecord::new(ticker);
    for row in rows {
        for pair in row.as_ref().chunks_exact(2) {
            record.insert(pair[0].clone(), pair[1].clone());
        }
    }
    record
}

/// Parses a Finviz quote page into a record for `ticker`.
///
/// # Errors
///
/// Returns `SyncError::MissingTable` when the page has no snapshot table.
pub fn parse_snapshot(html: &str, ticker: &str) -> Result<FundamentalRecord, SyncError> {
    match extract_table_rows(html, SNAPSHOT_TABLE_CLASS)? {
        Some(rows) => Ok(pair_cells(ticker, rows)),
        None => Err(SyncError::MissingTable {
            ticker: ticker.to_string(),
        }),
    }
}
