use crate::dataset::schema::ClimateTable;
use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Failed to read the {table} table from '{path}'")]
    Read {
        table: ClimateTable,
        path: PathBuf,
        #[source]
        source: PolarsError,
    },

    #[error("Missing required column '{column}' in the {table} table at '{path}'")]
    MissingColumn {
        table: ClimateTable,
        column: &'static str,
        path: PathBuf,
    },

    // Errors while normalizing column types (inside the blocking task)
    #[error("Failed to normalize the {table} table loaded from '{path}'")]
    Normalize {
        table: ClimateTable,
        path: PathBuf,
        #[source]
        source: PolarsError,
    },

    #[error("Failed to build the {table} table from records")]
    Records {
        table: ClimateTable,
        #[source]
        source: PolarsError,
    },

    #[error("Background load task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),
}
