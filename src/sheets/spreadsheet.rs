use serde::de::IgnoredAny;
use url::Url;

use super::SheetsClient;
use super::wire::{
    BatchClearRequest, BatchGetResponse, BatchUpdateRequest, BatchUpdateResponse, SpreadsheetMeta,
    ValueRangeOut,
};
use crate::core::SyncError;

/// Extracts the spreadsheet id from a `.../spreadsheets/d/<id>/...` URL.
///
/// # Errors
///
/// Returns `SyncError::InvalidSpreadsheetUrl` if the URL does not parse or has no
/// id segment.
pub fn spreadsheet_id(url: &str) -> Result<String, SyncError> {
    let invalid = || SyncError::InvalidSpreadsheetUrl(url.to_string());
    let parsed = Url::parse(url).map_err(|_| invalid())?;
    let segments: Vec<&str> = parsed.path_segments().ok_or_else(invalid)?.collect();

    // `/spreadsheets/d/<id>`, possibly with a `/u/<n>` account selector in between
    let start = segments
        .iter()
        .position(|s| *s == "spreadsheets")
        .ok_or_else(invalid)?;
    let d = start
        + segments[start..]
            .iter()
            .position(|s| *s == "d")
            .ok_or_else(invalid)?;

    match segments.get(d + 1) {
        Some(id) if !id.is_empty() => Ok((*id).to_string()),
        _ => Err(invalid()),
    }
}

/// Quotes a worksheet title for A1 notation: `Ticker list` -> `'Ticker list'`.
pub fn quote_sheet_title(title: &str) -> String {
    format!("'{}'", title.replace('\'', "''"))
}

/// 1 -> `A`, 26 -> `Z`, 27 -> `AA`.
pub fn column_letter(mut col: u32) -> String {
    let mut out = Vec::new();
    while col > 0 {
        let rem = (col - 1) % 26;
        out.push(b'A' + rem as u8);
        col = (col - 1) / 26;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

/// A spreadsheet addressed by id. Opening one does no network I/O.
#[derive(Debug, Clone)]
pub struct Spreadsheet {
    client: SheetsClient,
    id: String,
}

impl Spreadsheet {
    /// # Errors
    ///
    /// Returns `SyncError::InvalidSpreadsheetUrl` if no id can be found in `url`.
    pub fn open_by_url(client: &SheetsClient, url: &str) -> Result<Self, SyncError> {
        Ok(Self::open_by_key(client, spreadsheet_id(url)?))
    }

    pub fn open_by_key(client: &SheetsClient, id: impl Into<String>) -> Self {
        Self {
            client: client.clone(),
            id: id.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    fn endpoint(&self, suffix: &str) -> Result<Url, SyncError> {
        Ok(self
            .client
            .api_base()
            .join(&format!("v4/spreadsheets/{}{suffix}", self.id))?)
    }

    /// Looks up a worksheet by title.
    ///
    /// # Errors
    ///
    /// Returns `SyncError::WorksheetNotFound` if no worksheet has that title, or
    /// the request error if the metadata call fails.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err, fields(spreadsheet = %self.id)))]
    pub async fn worksheet(&self, title: &str) -> Result<Worksheet, SyncError> {
        let mut url = self.endpoint("")?;
        url.query_pairs_mut().append_pair("fields", "sheets.properties");

        let meta: SpreadsheetMeta = self
            .client
            .send_json(self.client.http().get(url))
            .await?;

        meta.sheets
            .into_iter()
            .map(|s| s.properties)
            .find(|p| p.title == title)
            .map(|p| Worksheet {
                spreadsheet: self.clone(),
                title: p.title,
                sheet_id: p.sheet_id,
            })
            .ok_or_else(|| SyncError::WorksheetNotFound(title.to_string()))
    }
}

/// One tab of a [`Spreadsheet`].
#[derive(Debug, Clone)]
pub struct Worksheet {
    spreadsheet: Spreadsheet,
    title: String,
    sheet_id: i64,
}

impl Worksheet {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn sheet_id(&self) -> i64 {
        self.sheet_id
    }

    fn client(&self) -> &SheetsClient {
        &self.spreadsheet.client
    }

    /// Every value in column `col` (1-based), top to bottom, header included.
    ///
    /// Values come back formatted as displayed. Trailing empty cells are not
    /// returned; empty cells between values come back as `""`.
    ///
    /// # Errors
    ///
    /// Returns the request or decoding error.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err, fields(worksheet = %self.title)))]
    pub async fn col_values(&self, col: u32) -> Result<Vec<String>, SyncError> {
        let letter = column_letter(col);
        let range = format!("{}!{letter}:{letter}", quote_sheet_title(&self.title));

        let mut url = self.spreadsheet.endpoint("/values:batchGet")?;
        url.query_pairs_mut()
            .append_pair("ranges", &range)
            .append_pair("majorDimension", "COLUMNS");

        let resp: BatchGetResponse = self.client().send_json(self.client().http().get(url)).await?;

        let column = resp
            .value_ranges
            .into_iter()
            .next()
            .and_then(|vr| vr.values.into_iter().next())
            .unwrap_or_default();

        Ok(column
            .into_iter()
            .map(|v| match v {
                serde_json::Value::String(s) => s,
                serde_json::Value::Null => String::new(),
                other => other.to_string(),
            })
            .collect())
    }

    /// Erases every value in the worksheet.
    ///
    /// # Errors
    ///
    /// Returns the request error.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err, fields(worksheet = %self.title)))]
    pub async fn clear(&self) -> Result<(), SyncError> {
        let url = self.spreadsheet.endpoint("/values:batchClear")?;
        let range = quote_sheet_title(&self.title);
        let body = BatchClearRequest {
            ranges: [range.as_str()],
        };

        let _: IgnoredAny = self
            .client()
            .send_json(self.client().http().post(url).json(&body))
            .await?;
        Ok(())
    }

    /// Writes `rows` starting at `A1`, as raw strings (no formula or number parsing).
    ///
    /// # Errors
    ///
    /// Returns the request error.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, rows), err, fields(worksheet = %self.title, rows = rows.len())))]
    pub async fn update(&self, rows: &[Vec<String>]) -> Result<u64, SyncError> {
        let url = self.spreadsheet.endpoint("/values:batchUpdate")?;
        let range = format!("{}!A1", quote_sheet_title(&self.title));
        let body = BatchUpdateRequest {
            value_input_option: "RAW",
            data: [ValueRangeOut {
                range: range.as_str(),
                major_dimension: "ROWS",
                values: rows,
            }],
        };

        let resp: BatchUpdateResponse = self
            .client()
            .send_json(self.client().http().post(url).json(&body))
            .await?;
        Ok(resp.total_updated_cells.unwrap_or(0))
    }
}
