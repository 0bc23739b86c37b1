use crate::dataset::schema::{COL_DATE, COL_STATION, COL_TOBS};
use crate::query::date_from_days;
use crate::query::error::QueryError;
use crate::query::stations;
use crate::query::window::ObservationWindow;
use chrono::NaiveDate;
use log::warn;
use polars::prelude::*;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// One temperature observation, serialized as a single-entry
/// `{"YYYY-MM-DD": tobs}` object.
#[derive(Debug, Clone, PartialEq)]
pub struct TobsReading {
    pub date: NaiveDate,
    pub tobs: Option<f64>,
}

impl Serialize for TobsReading {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.date, &self.tobs)?;
        map.end()
    }
}

/// Date filter for temperature statistics: open-ended from a start date, or
/// a closed range with both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateRange {
    From(NaiveDate),
    Between(NaiveDate, NaiveDate),
}

impl DateRange {
    fn to_expr(self) -> Expr {
        match self {
            DateRange::From(start) => col(COL_DATE).gt_eq(lit(start)),
            DateRange::Between(start, end) => col(COL_DATE)
                .gt_eq(lit(start))
                .and(col(COL_DATE).lt_eq(lit(end))),
        }
    }
}

/// Aggregate temperature statistics over a date range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct TemperatureSummary {
    pub tmin: Option<f64>,
    pub tavg: Option<f64>,
    pub tmax: Option<f64>,
}

impl TemperatureSummary {
    /// True when no rows matched the range.
    pub fn is_empty(&self) -> bool {
        self.tmin.is_none() && self.tavg.is_none() && self.tmax.is_none()
    }
}

/// Temperature readings of the most-observed station over the last twelve
/// months of the dataset.
///
/// The window is resolved against the global maximum date before the station
/// filter is applied, so a station whose own records stop early can come
/// back empty. Row order and duplicates are preserved; readings are not
/// merged by date.
///
/// An empty measurement table yields an empty sequence rather than an error.
pub fn observations_last_year(measurements: LazyFrame) -> Result<Vec<TobsReading>, QueryError> {
    let window = match ObservationWindow::resolve(measurements.clone()) {
        Ok(window) => window,
        Err(QueryError::EmptyDataset) => {
            warn!("Measurement table is empty, returning no temperature observations");
            return Ok(Vec::new());
        }
        Err(other) => return Err(other),
    };
    let station = stations::most_observed(measurements.clone())?;

    let frame = measurements
        .filter(
            col(COL_STATION)
                .eq(lit(station))
                .and(col(COL_DATE).gt_eq(lit(window.start))),
        )
        .select([col(COL_DATE), col(COL_TOBS)])
        .collect()?;
    let dates = frame.column(COL_DATE)?.date()?;
    let temps = frame.column(COL_TOBS)?.f64()?;

    let mut readings = Vec::with_capacity(frame.height());
    for (date, tobs) in dates.into_iter().zip(temps) {
        if let Some(date) = date.and_then(date_from_days) {
            readings.push(TobsReading { date, tobs });
        }
    }
    Ok(readings)
}

/// `TMIN`/`TAVG`/`TMAX` of `tobs` over the rows selected by `range`.
///
/// An empty selection yields all-`None` fields; the average of nothing is
/// undefined, not zero. A start date after the end date simply selects
/// nothing.
pub fn summary(measurements: LazyFrame, range: DateRange) -> Result<TemperatureSummary, QueryError> {
    let frame = measurements
        .filter(range.to_expr())
        .select([
            col(COL_TOBS).min().alias("tmin"),
            col(COL_TOBS).mean().alias("tavg"),
            col(COL_TOBS).max().alias("tmax"),
        ])
        .collect()?;

    Ok(TemperatureSummary {
        tmin: frame.column("tmin")?.f64()?.get(0),
        tavg: frame.column("tavg")?.f64()?.get(0),
        tmax: frame.column("tmax")?.f64()?.get(0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::schema::{Measurement, COL_PRCP};
    use crate::dataset::store::ClimateStore;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn reading(station: &str, date: NaiveDate, tobs: f64) -> Measurement {
        Measurement {
            station: station.to_string(),
            date,
            prcp: None,
            tobs,
        }
    }

    fn frame(rows: &[Measurement]) -> LazyFrame {
        ClimateStore::from_records(rows, &[]).unwrap().measurements()
    }

    #[test]
    fn test_summary_over_known_values() {
        let rows = vec![
            reading("USC00519281", day(2016, 8, 23), 60.0),
            reading("USC00519281", day(2016, 8, 24), 70.0),
            reading("USC00519281", day(2016, 8, 25), 80.0),
        ];
        let stats = summary(frame(&rows), DateRange::From(day(2016, 8, 23))).unwrap();
        assert_eq!(stats.tmin, Some(60.0));
        assert_eq!(stats.tavg, Some(70.0));
        assert_eq!(stats.tmax, Some(80.0));
    }

    #[test]
    fn test_summary_closed_range_includes_both_ends() {
        let rows = vec![
            reading("USC00519281", day(2016, 8, 22), 50.0),
            reading("USC00519281", day(2016, 8, 23), 60.0),
            reading("USC00519281", day(2016, 8, 24), 70.0),
            reading("USC00519281", day(2016, 8, 25), 80.0),
        ];
        let range = DateRange::Between(day(2016, 8, 23), day(2016, 8, 24));
        let stats = summary(frame(&rows), range).unwrap();
        assert_eq!(stats.tmin, Some(60.0));
        assert_eq!(stats.tmax, Some(70.0));
    }

    #[test]
    fn test_summary_of_empty_selection_is_all_null() {
        let rows = vec![reading("USC00519281", day(2016, 8, 23), 60.0)];
        let stats = summary(frame(&rows), DateRange::From(day(2018, 1, 1))).unwrap();
        assert!(stats.is_empty());
        assert_eq!(stats.tmin, None);
        assert_eq!(stats.tavg, None);
        assert_eq!(stats.tmax, None);
    }

    #[test]
    fn test_summary_inverted_range_selects_nothing() {
        let rows = vec![reading("USC00519281", day(2016, 8, 23), 60.0)];
        let range = DateRange::Between(day(2017, 1, 1), day(2016, 1, 1));
        let stats = summary(frame(&rows), range).unwrap();
        assert!(stats.is_empty());
    }

    #[test]
    fn test_summary_skips_null_temperatures() {
        // a file can carry empty tobs cells even though the record type
        // declares the value; aggregates must ignore those rows
        let df = df!(
            COL_STATION => ["USC00519281", "USC00519281", "USC00519281"],
            COL_DATE => ["2016-08-23", "2016-08-24", "2016-08-25"],
            COL_PRCP => [Some(0.0), Some(0.0), Some(0.0)],
            COL_TOBS => [Some(60.0), None, Some(80.0)],
        )
        .unwrap();
        let frame = crate::dataset::loader::normalize_frame(
            df,
            crate::dataset::schema::ClimateTable::Measurements,
        )
        .unwrap()
        .lazy();

        let stats = summary(frame, DateRange::From(day(2016, 8, 23))).unwrap();
        assert_eq!(stats.tmin, Some(60.0));
        assert_eq!(stats.tavg, Some(70.0));
        assert_eq!(stats.tmax, Some(80.0));
    }

    #[test]
    fn test_observations_come_from_the_most_observed_station() {
        let rows = vec![
            reading("USC00519281", day(2017, 6, 1), 71.0),
            reading("USC00519281", day(2017, 6, 2), 72.0),
            reading("USC00519281", day(2017, 6, 3), 73.0),
            reading("USC00513117", day(2017, 8, 23), 81.0),
        ];
        let readings = observations_last_year(frame(&rows)).unwrap();

        assert_eq!(readings.len(), 3);
        assert_eq!(
            readings,
            vec![
                TobsReading { date: day(2017, 6, 1), tobs: Some(71.0) },
                TobsReading { date: day(2017, 6, 2), tobs: Some(72.0) },
                TobsReading { date: day(2017, 6, 3), tobs: Some(73.0) },
            ]
        );
    }

    #[test]
    fn test_observations_window_follows_the_global_max_date() {
        // USC00519281 dominates by count but stopped reporting years before
        // USC00513117 produced the dataset's latest date
        let rows = vec![
            reading("USC00519281", day(2014, 1, 1), 65.0),
            reading("USC00519281", day(2014, 1, 2), 66.0),
            reading("USC00519281", day(2014, 1, 3), 67.0),
            reading("USC00513117", day(2017, 8, 23), 81.0),
        ];
        let readings = observations_last_year(frame(&rows)).unwrap();
        assert!(readings.is_empty());
    }

    #[test]
    fn test_observations_of_empty_table() {
        let readings = observations_last_year(frame(&[])).unwrap();
        assert!(readings.is_empty());
    }

    #[test]
    fn test_tobs_reading_serializes_as_single_entry_object() {
        let reading = TobsReading {
            date: day(2016, 8, 24),
            tobs: Some(77.0),
        };
        let json = serde_json::to_value(&reading).unwrap();
        assert_eq!(json, serde_json::json!({ "2016-08-24": 77.0 }));

        let missing = TobsReading {
            date: day(2016, 8, 25),
            tobs: None,
        };
        let json = serde_json::to_value(&missing).unwrap();
        assert_eq!(json, serde_json::json!({ "2016-08-25": null }));
    }

    #[test]
    fn test_summary_serializes_with_uppercase_keys() {
        let stats = TemperatureSummary {
            tmin: Some(60.0),
            tavg: Some(70.0),
            tmax: None,
        };
        let json = serde_json::to_value(stats).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "TMIN": 60.0, "TAVG": 70.0, "TMAX": null })
        );
    }
}
