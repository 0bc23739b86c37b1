use crate::dataset::schema::COL_STATION;
use crate::query::error::QueryError;
use polars::prelude::*;

const COL_OBSERVATIONS: &str = "observations";

/// All station identifiers, in the order the station table stores them.
pub fn ids(stations: LazyFrame) -> Result<Vec<String>, QueryError> {
    let frame = stations.select([col(COL_STATION)]).collect()?;
    let ids = frame.column(COL_STATION)?.str()?;
    Ok(ids.into_iter().flatten().map(str::to_string).collect())
}

/// The station with the most measurement rows.
///
/// Rows are counted per station with stable grouping, then stable-sorted by
/// count descending and the head taken, so equal counts resolve to the
/// station encountered first in the table.
///
/// # Errors
///
/// [`QueryError::EmptyDataset`] when there are no measurement rows to count.
pub fn most_observed(measurements: LazyFrame) -> Result<String, QueryError> {
    let ranked = measurements
        .group_by_stable([col(COL_STATION)])
        .agg([len().alias(COL_OBSERVATIONS)])
        .sort(
            [COL_OBSERVATIONS],
            SortMultipleOptions::default()
                .with_order_descending(true)
                .with_maintain_order(true),
        )
        .limit(1)
        .collect()?;

    // grouping an empty table ranks zero rows
    let top = ranked
        .column(COL_STATION)?
        .str()?
        .into_iter()
        .flatten()
        .next()
        .map(str::to_string);
    top.ok_or(QueryError::EmptyDataset)
}
