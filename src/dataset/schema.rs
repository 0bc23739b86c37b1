//! Static schema of the two dataset tables.
//!
//! The table layout is fixed at compile time: the loader checks files against
//! these column names instead of reflecting a schema at runtime, and the query
//! layer refers to columns only through the constants below.

use chrono::NaiveDate;
use polars::prelude::StrptimeOptions;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Station identifier column, present in both tables.
pub const COL_STATION: &str = "station";
/// Observation date column of the measurement table.
pub const COL_DATE: &str = "date";
/// Precipitation column of the measurement table (nullable).
pub const COL_PRCP: &str = "prcp";
/// Observed temperature column of the measurement table.
pub const COL_TOBS: &str = "tobs";
/// Human-readable station name column of the station table.
pub const COL_NAME: &str = "name";
/// Station latitude column.
pub const COL_LATITUDE: &str = "latitude";
/// Station longitude column.
pub const COL_LONGITUDE: &str = "longitude";
/// Station elevation column.
pub const COL_ELEVATION: &str = "elevation";

/// One station-day observation row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Identifier of the station that reported the observation.
    pub station: String,
    /// Calendar date of the observation.
    pub date: NaiveDate,
    /// Precipitation amount; missing when the station did not report one.
    pub prcp: Option<f64>,
    /// Observed temperature.
    pub tobs: f64,
}

impl Measurement {
    /// Column layout of the measurement table, in file order.
    pub const COLUMNS: &'static [&'static str] = &[COL_STATION, COL_DATE, COL_PRCP, COL_TOBS];
}

/// One weather-station identity row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    /// Identifier referenced by the measurement table.
    pub station: String,
    /// Human-readable station name.
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
}

impl Station {
    /// Columns the loader insists on. The descriptive columns are carried
    /// through untouched when present.
    pub const REQUIRED_COLUMNS: &'static [&'static str] = &[COL_STATION];
}

/// The two tables of the climate dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClimateTable {
    Measurements,
    Stations,
}

impl ClimateTable {
    /// Column names that must be present for the table to be queryable.
    pub fn required_columns(self) -> &'static [&'static str] {
        match self {
            ClimateTable::Measurements => Measurement::COLUMNS,
            ClimateTable::Stations => Station::REQUIRED_COLUMNS,
        }
    }
}

impl fmt::Display for ClimateTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClimateTable::Measurements => write!(f, "measurement"),
            ClimateTable::Stations => write!(f, "station"),
        }
    }
}

/// Strict `%Y-%m-%d` parsing for the observation date column.
pub(crate) fn iso_date_options() -> StrptimeOptions {
    StrptimeOptions {
        format: Some("%Y-%m-%d".into()),
        strict: true,
        exact: true,
        ..Default::default()
    }
}
