//! The main entry point for querying the climate observations dataset.
//!
//! [`Hilo`] owns the in-memory store of the two dataset tables and exposes
//! one async method per supported query. Every method takes a scoped handle
//! to the store for the duration of the call and evaluates the frame work on
//! a blocking task, so the engine can serve concurrent callers without
//! shared mutable state.

use crate::dataset::store::ClimateStore;
use crate::error::HiloError;
use crate::query;
use crate::query::precipitation::PrecipitationByDate;
use crate::query::temperature::{DateRange, TemperatureSummary, TobsReading};
use crate::query::window::ObservationWindow;
use bon::bon;
use std::path::PathBuf;
use tokio::task;

/// The query engine over the two-table climate dataset.
///
/// Create an instance with [`Hilo::open`] to load the tables from disk, or
/// [`Hilo::from_store`] to wrap an already-built [`ClimateStore`].
///
/// # Examples
///
/// ```rust,no_run
/// # use hilo::{Hilo, HiloError};
/// # use std::path::PathBuf;
/// # async fn run() -> Result<(), HiloError> {
/// let engine = Hilo::open(
///     PathBuf::from("data/hawaii_measurements.csv"),
///     PathBuf::from("data/hawaii_stations.csv"),
/// )
/// .await?;
/// let rainfall = engine.precipitation_last_year().await?;
/// println!("{} days of precipitation", rainfall.len());
/// # Ok(())
/// # }
/// ```
pub struct Hilo {
    store: ClimateStore,
}

#[bon]
impl Hilo {
    /// Opens the dataset from the two table files (CSV with a header row, or
    /// Parquet) and materializes both tables in memory.
    ///
    /// # Errors
    ///
    /// Returns [`HiloError::Dataset`] variants when a file cannot be read,
    /// a required column is missing, or a value fails to normalize.
    pub async fn open(measurements: PathBuf, stations: PathBuf) -> Result<Self, HiloError> {
        let store = ClimateStore::open(&measurements, &stations).await?;
        Ok(Self::from_store(store))
    }

    /// Wraps an existing store. Useful when the tables were built from
    /// records rather than read from disk.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use hilo::{ClimateStore, Hilo, HiloError, Station};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), HiloError> {
    /// let store = ClimateStore::from_records(
    ///     &[],
    ///     &[Station {
    ///         station: "USC00519397".to_string(),
    ///         name: "WAIKIKI 717.2, HI US".to_string(),
    ///         latitude: 21.2716,
    ///         longitude: -157.8168,
    ///         elevation: 3.0,
    ///     }],
    /// )?;
    /// let engine = Hilo::from_store(store);
    /// assert_eq!(engine.station_ids().await?, vec!["USC00519397"]);
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_store(store: ClimateStore) -> Self {
        Self { store }
    }

    /// Resolves the reporting window: the most recent observation date and
    /// the date twelve calendar months before it.
    ///
    /// # Errors
    ///
    /// Returns [`HiloError::Query`] with [`QueryError::EmptyDataset`] when
    /// the measurement table has no rows.
    ///
    /// [`QueryError::EmptyDataset`]: crate::QueryError::EmptyDataset
    pub async fn observation_window(&self) -> Result<ObservationWindow, HiloError> {
        let measurements = self.store.measurements();
        Ok(task::spawn_blocking(move || ObservationWindow::resolve(measurements)).await??)
    }

    /// Precipitation for the last twelve months of the dataset, keyed by
    /// date. For dates reported by several stations the last row in table
    /// order wins. An empty dataset yields an empty map.
    pub async fn precipitation_last_year(&self) -> Result<PrecipitationByDate, HiloError> {
        let measurements = self.store.measurements();
        Ok(task::spawn_blocking(move || query::precipitation::last_year(measurements)).await??)
    }

    /// All station identifiers, in the order the station table stores them.
    pub async fn station_ids(&self) -> Result<Vec<String>, HiloError> {
        let stations = self.store.stations();
        Ok(task::spawn_blocking(move || query::stations::ids(stations)).await??)
    }

    /// The identifier of the station with the most measurement rows. Equal
    /// counts resolve to the station encountered first in the table.
    ///
    /// # Errors
    ///
    /// Returns [`HiloError::Query`] with [`QueryError::EmptyDataset`] when
    /// there are no measurement rows to count.
    ///
    /// [`QueryError::EmptyDataset`]: crate::QueryError::EmptyDataset
    pub async fn most_observed_station(&self) -> Result<String, HiloError> {
        let measurements = self.store.measurements();
        Ok(task::spawn_blocking(move || query::stations::most_observed(measurements)).await??)
    }

    /// Temperature readings of the most-observed station over the last
    /// twelve months of the dataset. The window follows the dataset's global
    /// maximum date, not the chosen station's own most recent row. An empty
    /// dataset yields an empty sequence.
    pub async fn tobs_last_year(&self) -> Result<Vec<TobsReading>, HiloError> {
        let measurements = self.store.measurements();
        Ok(
            task::spawn_blocking(move || query::temperature::observations_last_year(measurements))
                .await??,
        )
    }

    /// Minimum, average and maximum `tobs` over a date range.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.start(&str)`: **Required.** Inclusive lower bound, `YYYY-MM-DD`.
    /// * `.end(&str)`: Optional. Inclusive upper bound; omitted means the
    ///   range is open-ended.
    ///
    /// # Errors
    ///
    /// Returns [`HiloError::Query`] with [`QueryError::InvalidDate`] when
    /// either bound fails to parse. A range matching no rows is not an
    /// error; the summary comes back with all fields `None`.
    ///
    /// [`QueryError::InvalidDate`]: crate::QueryError::InvalidDate
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use hilo::{Hilo, HiloError};
    /// # use std::path::PathBuf;
    /// # async fn run(engine: Hilo) -> Result<(), HiloError> {
    /// let from_date = engine
    ///     .temperature_summary()
    ///     .start("2016-08-23")
    ///     .call()
    ///     .await?;
    ///
    /// let between = engine
    ///     .temperature_summary()
    ///     .start("2016-08-23")
    ///     .end("2017-08-23")
    ///     .call()
    ///     .await?;
    /// println!("{:?} {:?}", from_date, between);
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub async fn temperature_summary(
        &self,
        start: &str,
        end: Option<&str>,
    ) -> Result<TemperatureSummary, HiloError> {
        let range = match end {
            Some(end) => DateRange::Between(
                query::parse_query_date(start)?,
                query::parse_query_date(end)?,
            ),
            None => DateRange::From(query::parse_query_date(start)?),
        };
        let measurements = self.store.measurements();
        Ok(task::spawn_blocking(move || query::temperature::summary(measurements, range)).await??)
    }
}
