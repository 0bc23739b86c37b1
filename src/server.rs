//! HTTP surface of the query engine: six GET routes, JSON in and out except
//! for the plain-text index.

use crate::error::HiloError;
use crate::hilo::Hilo;
use crate::query::error::QueryError;
use crate::query::precipitation::PrecipitationByDate;
use crate::query::temperature::{TemperatureSummary, TobsReading};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use log::{error, info};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

const INDEX_BODY: &str = "\
Available routes:
/api/v1.0/precipitation
/api/v1.0/stations
/api/v1.0/tobs
/api/v1.0/<start>
/api/v1.0/<start>/<end>
";

/// Builds the application router around a shared engine.
pub fn router(engine: Arc<Hilo>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/v1.0/precipitation", get(precipitation))
        .route("/api/v1.0/stations", get(stations))
        .route("/api/v1.0/tobs", get(tobs))
        .route("/api/v1.0/{start}", get(temperature_from))
        .route("/api/v1.0/{start}/{end}", get(temperature_between))
        .with_state(engine)
}

/// Binds `addr` and serves the API until the process stops.
///
/// # Errors
///
/// Returns [`HiloError::Bind`] when the address cannot be bound and
/// [`HiloError::Serve`] when the accept loop fails.
pub async fn serve(engine: Hilo, addr: SocketAddr) -> Result<(), HiloError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| HiloError::Bind(addr, e))?;
    info!("Serving the climate API on http://{}", addr);
    axum::serve(listener, router(Arc::new(engine)))
        .await
        .map_err(HiloError::Serve)
}

async fn index() -> &'static str {
    INDEX_BODY
}

async fn precipitation(
    State(engine): State<Arc<Hilo>>,
) -> Result<Json<PrecipitationByDate>, ApiError> {
    Ok(Json(engine.precipitation_last_year().await?))
}

async fn stations(State(engine): State<Arc<Hilo>>) -> Result<Json<Vec<String>>, ApiError> {
    Ok(Json(engine.station_ids().await?))
}

async fn tobs(State(engine): State<Arc<Hilo>>) -> Result<Json<Vec<TobsReading>>, ApiError> {
    Ok(Json(engine.tobs_last_year().await?))
}

async fn temperature_from(
    State(engine): State<Arc<Hilo>>,
    Path(start): Path<String>,
) -> Result<Json<TemperatureSummary>, ApiError> {
    let stats = engine.temperature_summary().start(&start).call().await?;
    Ok(Json(stats))
}

async fn temperature_between(
    State(engine): State<Arc<Hilo>>,
    Path((start, end)): Path<(String, String)>,
) -> Result<Json<TemperatureSummary>, ApiError> {
    let stats = engine
        .temperature_summary()
        .start(&start)
        .end(&end)
        .call()
        .await?;
    Ok(Json(stats))
}

/// Maps engine failures onto HTTP statuses. Malformed input is the caller's
/// problem and carries its message; everything else is logged and answered
/// with a generic 500 body.
struct ApiError(HiloError);

impl From<HiloError> for ApiError {
    fn from(err: HiloError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            HiloError::Query(err @ QueryError::InvalidDate { .. }) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": err.to_string() })),
            )
                .into_response(),
            other => {
                error!("Request failed: {other}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "internal server error" })),
                )
                    .into_response()
            }
        }
    }
}
