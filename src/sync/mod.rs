//! The end-to-end run: read tickers, scrape each one, overwrite the results sheet.

use crate::config::SpreadsheetConfig;
use crate::fundamentals::fetch_all;
use crate::report::Reporter;
use crate::sheets::{SheetsClient, Spreadsheet, Worksheet};
use crate::table::FundamentalsTable;
use crate::{FinvizClient, SyncError};

/// How a run ended when it did not fail outright.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The ticker worksheet was missing or had nothing below its header.
    NoTickers,
    /// Every ticker failed; the destination was left untouched.
    NoData,
    /// The destination now holds exactly this table.
    Updated(FundamentalsTable),
}

/// Column A of `worksheet` minus its first row, in sheet order.
///
/// # Errors
///
/// Returns the Sheets request error.
pub async fn read_tickers(worksheet: &Worksheet) -> Result<Vec<String>, SyncError> {
    Ok(worksheet.col_values(1).await?.into_iter().skip(1).collect())
}

/// Clears `worksheet`, then writes the header row and all data rows.
///
/// There is no rollback: if the write fails after the clear, the sheet stays empty.
///
/// # Errors
///
/// Returns `SyncError::Data` for an empty table (nothing is cleared), otherwise the
/// Sheets request error.
pub async fn write_table(worksheet: &Worksheet, table: &FundamentalsTable) -> Result<(), SyncError> {
    if table.is_empty() {
        return Err(SyncError::Data("refusing to write an empty table".into()));
    }
    worksheet.clear().await?;
    worksheet.update(&table.to_rows()).await?;
    Ok(())
}

/// A configured run. Holds its clients; [`Pipeline::run`] may be called repeatedly.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: SpreadsheetConfig,
    finviz: FinvizClient,
    spreadsheet: Spreadsheet,
}

impl Pipeline {
    /// A pipeline with default Finviz settings, authenticating to Sheets as the
    /// config's service account.
    ///
    /// # Errors
    ///
    /// Returns an error if a client cannot be built or the spreadsheet URL has no id.
    pub fn new(config: SpreadsheetConfig) -> Result<Self, SyncError> {
        let sheets = SheetsClient::from_config(&config)?;
        Self::with_clients(config, FinvizClient::builder().build()?, sheets)
    }

    /// A pipeline over caller-built clients.
    ///
    /// # Errors
    ///
    /// Returns `SyncError::InvalidSpreadsheetUrl` if `config.url` has no id.
    pub fn with_clients(
        config: SpreadsheetConfig,
        finviz: FinvizClient,
        sheets: SheetsClient,
    ) -> Result<Self, SyncError> {
        let spreadsheet = Spreadsheet::open_by_url(&sheets, &config.url)?;
        Ok(Self {
            config,
            finviz,
            spreadsheet,
        })
    }

    pub fn config(&self) -> &SpreadsheetConfig {
        &self.config
    }

    /// Runs once, reporting progress to `reporter`.
    ///
    /// A missing or empty ticker list and an all-failed scrape are reported and
    /// returned as outcomes. Per-ticker failures are warnings.
    ///
    /// # Errors
    ///
    /// Any Sheets failure while reading tickers (other than a missing worksheet) or
    /// while writing results.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, err, fields(spreadsheet = %self.spreadsheet.id())))]
    pub async fn run<R: Reporter + ?Sized>(&self, reporter: &mut R) -> Result<RunOutcome, SyncError> {
        reporter.status("Fetching tickers from Google Sheet...");
        let tickers = match self.spreadsheet.worksheet(&self.config.ticker_worksheet).await {
            Ok(ws) => read_tickers(&ws).await?,
            Err(SyncError::WorksheetNotFound(_)) => Vec::new(),
            Err(e) => return Err(e),
        };

        if tickers.is_empty() {
            reporter.error("No tickers found in Google Sheet.");
            return Ok(RunOutcome::NoTickers);
        }

        let table = fetch_all(&self.finviz, &tickers, reporter).await;
        if table.is_empty() {
            reporter.error("No data scraped.");
            return Ok(RunOutcome::NoData);
        }

        reporter.status("Writing data to Google Sheet...");
        let destination = self
            .spreadsheet
            .worksheet(&self.config.fundamentals_worksheet)
            .await?;
        write_table(&destination, &table).await?;

        reporter.success("Fundamentals successfully updated!");
        reporter.preview(&table);
        Ok(RunOutcome::Updated(table))
    }
}
