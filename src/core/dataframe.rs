use polars::prelude::*;

/// Trait for converting scraped data into Polars DataFrames.
pub trait ToDataFrame {
    /// Converts the object into a Polars DataFrame.
    ///
    /// # Errors
    ///
    /// Returns an error if Polars rejects the assembled columns.
    fn to_dataframe(&self) -> PolarsResult<DataFrame>;
}
