use chrono::NaiveDate;
use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("The measurement table contains no rows")]
    EmptyDataset,

    #[error("Invalid date '{input}', expected YYYY-MM-DD")]
    InvalidDate {
        input: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Cannot shift {0} back by twelve calendar months")]
    WindowUnderflow(NaiveDate),

    #[error("Failed to evaluate a query against the dataset: {0}")]
    Frame(#[from] PolarsError),
}
