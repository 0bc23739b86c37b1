pub mod error;
pub mod precipitation;
pub mod stations;
pub mod temperature;
pub mod window;

use chrono::{Duration, NaiveDate};
use error::QueryError;

/// Converts a physical Polars date (days since the Unix epoch) back into a
/// calendar date. `None` only for values outside the chrono range.
pub(crate) fn date_from_days(days: i32) -> Option<NaiveDate> {
    NaiveDate::default().checked_add_signed(Duration::days(i64::from(days)))
}

/// Parses a caller-supplied date path segment. Rejecting malformed input here
/// keeps garbage strings from turning into silently empty query results.
pub(crate) fn parse_query_date(input: &str) -> Result<NaiveDate, QueryError> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|source| QueryError::InvalidDate {
        input: input.to_string(),
        source,
    })
}
