use crate::dataset::schema::COL_DATE;
use crate::query::date_from_days;
use crate::query::error::QueryError;
use chrono::{Months, NaiveDate};
use polars::prelude::*;

/// The rolling reporting window: the most recent observation date in the
/// dataset and the date exactly twelve calendar months before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObservationWindow {
    /// Maximum `date` across the whole measurement table.
    pub latest: NaiveDate,
    /// Twelve calendar months before `latest`, inclusive lower bound.
    pub start: NaiveDate,
}

impl ObservationWindow {
    /// Resolves the window from the measurement table.
    ///
    /// The shift is month-aware rather than a fixed 365-day offset: a latest
    /// date of `2017-08-23` gives a start of `2016-08-23`, and when the day
    /// does not exist in the target month (a leap `02-29`), the start clamps
    /// to that month's last valid day.
    ///
    /// # Errors
    ///
    /// [`QueryError::EmptyDataset`] when the table has no rows, and
    /// [`QueryError::Frame`] when the underlying scan fails.
    pub fn resolve(measurements: LazyFrame) -> Result<Self, QueryError> {
        let frame = measurements.select([col(COL_DATE).max()]).collect()?;
        let latest = frame
            .column(COL_DATE)?
            .date()?
            .get(0)
            .and_then(date_from_days)
            .ok_or(QueryError::EmptyDataset)?;
        let start = latest
            .checked_sub_months(Months::new(12))
            .ok_or(QueryError::WindowUnderflow(latest))?;
        Ok(Self { latest, start })
    }
}
