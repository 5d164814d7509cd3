//! `finviz-sync`: one run of the Finviz → Google Sheets sync.
//!
//! Reads `GOOGLE_SHEET_URL` and `GCP_SERVICE_ACCOUNT` (or
//! `GCP_SERVICE_ACCOUNT_FILE`) from the environment, after loading a `.env` file
//! from the working directory if one exists. `RUST_LOG` controls logging.

use finviz_sync::{ConsoleReporter, Pipeline, SpreadsheetConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = SpreadsheetConfig::from_env()?;
    let pipeline = Pipeline::new(config)?;

    println!("Finviz Fundamentals Scraper");
    pipeline.run(&mut ConsoleReporter).await?;
    Ok(())
}
