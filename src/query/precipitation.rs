use crate::dataset::schema::{COL_DATE, COL_PRCP};
use crate::query::date_from_days;
use crate::query::error::QueryError;
use crate::query::window::ObservationWindow;
use chrono::NaiveDate;
use log::warn;
use polars::prelude::*;
use std::collections::BTreeMap;

/// Daily precipitation keyed by date. A `BTreeMap` keeps the serialized JSON
/// object in ascending date order.
pub type PrecipitationByDate = BTreeMap<NaiveDate, Option<f64>>;

/// Precipitation for every measurement in the last twelve months of the
/// dataset, across all stations.
///
/// Rows are folded into the map in natural table order, so when several
/// stations report the same date the last row wins. That mirrors the
/// upstream dataset's reporting convention and is deliberate; a per-station
/// breakdown is out of scope. Missing amounts stay `None`.
///
/// An empty measurement table yields an empty map rather than an error.
pub fn last_year(measurements: LazyFrame) -> Result<PrecipitationByDate, QueryError> {
    let window = match ObservationWindow::resolve(measurements.clone()) {
        Ok(window) => window,
        Err(QueryError::EmptyDataset) => {
            warn!("Measurement table is empty, returning an empty precipitation map");
            return Ok(PrecipitationByDate::new());
        }
        Err(other) => return Err(other),
    };
    since(measurements, window.start)
}

/// Precipitation for every measurement with `date >= start`.
pub fn since(measurements: LazyFrame, start: NaiveDate) -> Result<PrecipitationByDate, QueryError> {
    let frame = measurements
        .filter(col(COL_DATE).gt_eq(lit(start)))
        .select([col(COL_DATE), col(COL_PRCP)])
        .collect()?;
    let dates = frame.column(COL_DATE)?.date()?;
    let amounts = frame.column(COL_PRCP)?.f64()?;

    let mut by_date = PrecipitationByDate::new();
    for (date, amount) in dates.into_iter().zip(amounts) {
        if let Some(date) = date.and_then(date_from_days) {
            by_date.insert(date, amount);
        }
    }
    Ok(by_date)
}
