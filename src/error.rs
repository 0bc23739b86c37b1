use crate::dataset::error::DatasetError;
use crate::query::error::QueryError;
use std::net::SocketAddr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HiloError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error("Failed to bind the API listener on {0}")]
    Bind(SocketAddr, #[source] std::io::Error),

    #[error("The API server terminated abnormally")]
    Serve(#[source] std::io::Error),

    #[error("Background query task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),
}
