use anyhow::Context;
use clap::Parser;
use hilo::{serve, Hilo};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Serve the climate observations query API.
#[derive(Debug, Parser)]
#[command(name = "hilo", version, about)]
struct Args {
    /// CSV or Parquet file holding the measurement table.
    #[arg(long, default_value = "data/hawaii_measurements.csv")]
    measurements: PathBuf,

    /// CSV or Parquet file holding the station table.
    #[arg(long, default_value = "data/hawaii_stations.csv")]
    stations: PathBuf,

    /// Address to listen on.
    #[arg(long, default_value = "127.0.0.1:8080")]
    bind: SocketAddr,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let engine = Hilo::open(args.measurements, args.stations)
        .await
        .context("failed to open the climate dataset")?;
    serve(engine, args.bind)
        .await
        .context("the API server failed")?;
    Ok(())
}
