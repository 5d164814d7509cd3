//! Minimal serde mapping for the Sheets v4 payloads used here.

use serde::{Deserialize, Serialize};

/* ---------------- spreadsheet metadata ---------------- */

#[derive(Deserialize)]
pub(crate) struct SpreadsheetMeta {
    #[serde(default)]
    pub(crate) sheets: Vec<SheetNode>,
}

#[derive(Deserialize)]
pub(crate) struct SheetNode {
    pub(crate) properties: SheetProperties,
}

#[derive(Deserialize)]
pub(crate) struct SheetProperties {
    #[serde(rename = "sheetId", default)]
    pub(crate) sheet_id: i64,
    pub(crate) title: String,
}

/* ---------------- values ---------------- */

#[derive(Deserialize)]
pub(crate) struct BatchGetResponse {
    #[serde(rename = "valueRanges", default)]
    pub(crate) value_ranges: Vec<ValueRangeIn>,
}

#[derive(Deserialize)]
pub(crate) struct ValueRangeIn {
    #[serde(default)]
    pub(crate) values: Vec<Vec<serde_json::Value>>,
}

#[derive(Serialize)]
pub(crate) struct BatchClearRequest<'a> {
    pub(crate) ranges: [&'a str; 1],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BatchUpdateRequest<'a> {
    pub(crate) value_input_option: &'a str,
    pub(crate) data: [ValueRangeOut<'a>; 1],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ValueRangeOut<'a> {
    pub(crate) range: &'a str,
    pub(crate) major_dimension: &'a str,
    pub(crate) values: &'a [Vec<String>],
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BatchUpdateResponse {
    #[serde(default)]
    pub(crate) total_updated_cells: Option<u64>,
}

/* ---------------- errors ---------------- */

#[derive(Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub(crate) error: ErrorNode,
}

#[derive(Deserialize)]
pub(crate) struct ErrorNode {
    #[serde(default)]
    pub(crate) message: String,
}
