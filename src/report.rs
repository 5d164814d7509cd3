//! User-facing progress and result messages.

use std::io::Write;

use crate::table::FundamentalsTable;

/// Receives the messages a run shows to the person who started it.
///
/// Nothing here is a log: these are the status lines, warnings and the final
/// table preview. Implementations decide where they go.
pub trait Reporter {
    /// Progress, e.g. `Scraping AAPL...`.
    fn status(&mut self, msg: &str);
    /// A recoverable problem; the run continues.
    fn warning(&mut self, msg: &str);
    /// A problem that ended the run early.
    fn error(&mut self, msg: &str);
    fn success(&mut self, msg: &str);
    /// The table that was written.
    fn preview(&mut self, table: &FundamentalsTable);
}

/// Prints status and success lines to stdout, warnings and errors to stderr.
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn status(&mut self, msg: &str) {
        println!("{msg}");
    }

    fn warning(&mut self, msg: &str) {
        eprintln!("warning: {msg}");
    }

    fn error(&mut self, msg: &str) {
        eprintln!("error: {msg}");
    }

    fn success(&mut self, msg: &str) {
        println!("{msg}");
    }

    fn preview(&mut self, table: &FundamentalsTable) {
        let mut out = std::io::stdout().lock();
        // a closed stdout only loses the preview
        let _ = write!(out, "\n{table}");
        let _ = out.flush();
    }
}
