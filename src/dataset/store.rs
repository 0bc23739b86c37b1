use crate::dataset::error::DatasetError;
use crate::dataset::loader;
use crate::dataset::schema::{
    ClimateTable, Measurement, Station, COL_DATE, COL_ELEVATION, COL_LATITUDE, COL_LONGITUDE,
    COL_NAME, COL_PRCP, COL_STATION, COL_TOBS,
};
use log::info;
use polars::prelude::*;
use std::path::Path;

/// Both dataset tables, fully materialized at startup and shared read-only
/// for the lifetime of the process.
pub struct ClimateStore {
    measurements: LazyFrame,
    stations: LazyFrame,
}

impl ClimateStore {
    /// Opens the store from the two table files (CSV with a header row, or
    /// Parquet). Both tables are materialized here so malformed data fails
    /// the startup instead of the first request.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError`] when a file cannot be read, a required column
    /// is missing, or a value cannot be brought into the expected type.
    pub async fn open(measurements: &Path, stations: &Path) -> Result<Self, DatasetError> {
        let measurements = loader::load_table(measurements, ClimateTable::Measurements).await?;
        let stations = loader::load_table(stations, ClimateTable::Stations).await?;
        info!(
            "Climate store ready: {} measurement rows, {} stations",
            measurements.height(),
            stations.height()
        );
        Ok(Self {
            measurements: measurements.lazy(),
            stations: stations.lazy(),
        })
    }

    /// Builds a store directly from typed records, bypassing the file loader.
    /// Intended for embedding and tests; an empty slice yields a valid empty
    /// table.
    pub fn from_records(
        measurements: &[Measurement],
        stations: &[Station],
    ) -> Result<Self, DatasetError> {
        let measurement_df = df!(
            COL_STATION => measurements.iter().map(|m| m.station.clone()).collect::<Vec<_>>(),
            COL_DATE => measurements.iter().map(|m| m.date.to_string()).collect::<Vec<_>>(),
            COL_PRCP => measurements.iter().map(|m| m.prcp).collect::<Vec<_>>(),
            COL_TOBS => measurements.iter().map(|m| m.tobs).collect::<Vec<_>>(),
        )
        .and_then(|df| loader::normalize_frame(df, ClimateTable::Measurements))
        .map_err(|e| DatasetError::Records {
            table: ClimateTable::Measurements,
            source: e,
        })?;

        let station_df = df!(
            COL_STATION => stations.iter().map(|s| s.station.clone()).collect::<Vec<_>>(),
            COL_NAME => stations.iter().map(|s| s.name.clone()).collect::<Vec<_>>(),
            COL_LATITUDE => stations.iter().map(|s| s.latitude).collect::<Vec<_>>(),
            COL_LONGITUDE => stations.iter().map(|s| s.longitude).collect::<Vec<_>>(),
            COL_ELEVATION => stations.iter().map(|s| s.elevation).collect::<Vec<_>>(),
        )
        .map_err(|e| DatasetError::Records {
            table: ClimateTable::Stations,
            source: e,
        })?;

        Ok(Self {
            measurements: measurement_df.lazy(),
            stations: station_df.lazy(),
        })
    }

    /// Hands out a measurement-table handle scoped to one request. The clone
    /// is cheap; dropping it at the end of the request releases it on every
    /// exit path.
    pub fn measurements(&self) -> LazyFrame {
        self.measurements.clone()
    }

    /// Station-table handle with the same scoping rules as
    /// [`ClimateStore::measurements`].
    pub fn stations(&self) -> LazyFrame {
        self.stations.clone()
    }
}
