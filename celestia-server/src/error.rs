use std::time::Duration;

use celestia_protocol::model::celestial_body::CelestialBodyId;

use crate::api::validation::ValidationError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("could not connect to database")]
    Connection(#[source] sqlx::Error),

    #[error("connecting to database timed out after {timeout:?}")]
    ConnectTimeout { timeout: Duration },

    #[error("sqlx error")]
    Sqlx(#[from] sqlx::Error),

    #[error("io error")]
    Io(#[from] std::io::Error),

    #[error("Celestial body {id} not found")]
    NotFound { id: CelestialBodyId },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}
