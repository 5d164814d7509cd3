//! finviz-sync: scrape Finviz snapshot fundamentals for a ticker list kept in
//! Google Sheets and write the resulting table back to the same spreadsheet.
//!
//! ```no_run
//! # use finviz_sync::{ConsoleReporter, Pipeline, SpreadsheetConfig};
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = SpreadsheetConfig::from_env()?;
//! let outcome = Pipeline::new(config)?.run(&mut ConsoleReporter).await?;
//! println!("{outcome:?}");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod core;
pub mod fundamentals;
pub mod report;
pub mod sheets;
pub mod sync;
pub mod table;

pub use config::{ServiceAccountKey, SpreadsheetConfig};
pub use crate::core::{FinvizClient, FinvizClientBuilder, SyncError};
pub use fundamentals::{FundamentalRecord, fetch_all, fetch_fundamentals};
pub use report::{ConsoleReporter, Reporter};
pub use sheets::{SheetsClient, SheetsClientBuilder, Spreadsheet, Worksheet};
pub use sync::{Pipeline, RunOutcome, read_tickers, write_table};
pub use table::FundamentalsTable;

#[cfg(feature = "dataframe")]
pub use crate::core::dataframe::ToDataFrame;
