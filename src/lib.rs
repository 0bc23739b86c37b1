mod dataset;
mod error;
mod hilo;
mod query;
mod server;

pub use error::HiloError;
pub use hilo::Hilo;

pub use dataset::error::DatasetError;
pub use dataset::schema::{ClimateTable, Measurement, Station};
pub use dataset::store::ClimateStore;

pub use query::error::QueryError;
pub use query::precipitation::PrecipitationByDate;
pub use query::temperature::{TemperatureSummary, TobsReading};
pub use query::window::ObservationWindow;

pub use server::{router, serve};
