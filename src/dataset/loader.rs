use crate::dataset::error::DatasetError;
use crate::dataset::schema::{iso_date_options, ClimateTable, COL_DATE, COL_PRCP, COL_TOBS};
use log::info;
use polars::prelude::*;
use std::path::Path;
use tokio::task;

/// Reads one table from `path` and normalizes it for querying.
///
/// CSV files must carry a header row naming the columns; Parquet files are
/// used as written. Every column the table schema requires must be present.
/// The read and the normalization run on a blocking task since Polars file
/// handling is synchronous.
pub(crate) async fn load_table(path: &Path, table: ClimateTable) -> Result<DataFrame, DatasetError> {
    let path = path.to_path_buf();
    task::spawn_blocking(move || {
        let df = read_file(&path, table)?;
        check_required_columns(&df, table, &path)?;
        let df = normalize_frame(df, table).map_err(|e| DatasetError::Normalize {
            table,
            path: path.clone(),
            source: e,
        })?;
        info!("Loaded {} {} rows from {:?}", df.height(), table, path);
        Ok(df)
    })
    .await?
}

fn read_file(path: &Path, table: ClimateTable) -> Result<DataFrame, DatasetError> {
    let is_parquet = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("parquet"));

    let read = |e: PolarsError| DatasetError::Read {
        table,
        path: path.to_path_buf(),
        source: e,
    };

    if is_parquet {
        LazyFrame::scan_parquet(path, Default::default())
            .map_err(read)?
            .collect()
            .map_err(read)
    } else {
        CsvReadOptions::default()
            .try_into_reader_with_file_path(Some(path.to_path_buf()))
            .map_err(read)?
            .finish()
            .map_err(read)
    }
}

fn check_required_columns(
    df: &DataFrame,
    table: ClimateTable,
    path: &Path,
) -> Result<(), DatasetError> {
    let names = df.get_column_names();
    for &column in table.required_columns() {
        if !names.iter().any(|name| name.as_str() == column) {
            return Err(DatasetError::MissingColumn {
                table,
                column,
                path: path.to_path_buf(),
            });
        }
    }
    Ok(())
}

/// Brings a freshly read table into the dtypes the query layer relies on:
/// `date` becomes `Date` (parsed strictly when the file stored strings) and
/// both value columns become `Float64`. The station table needs no work, its
/// identifier loads as a string either way.
///
/// Callers must have verified the required columns first.
pub(crate) fn normalize_frame(df: DataFrame, table: ClimateTable) -> PolarsResult<DataFrame> {
    match table {
        ClimateTable::Measurements => {
            let date_expr = if matches!(df.column(COL_DATE)?.dtype(), DataType::String) {
                col(COL_DATE).str().to_date(iso_date_options())
            } else {
                col(COL_DATE).cast(DataType::Date)
            };
            df.lazy()
                .with_columns([
                    date_expr,
                    col(COL_PRCP).cast(DataType::Float64),
                    col(COL_TOBS).cast(DataType::Float64),
                ])
                .collect()
        }
        ClimateTable::Stations => Ok(df),
    }
}
