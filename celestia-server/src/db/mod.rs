mod connection;
#[cfg(any(test, feature = "memory"))]
mod memory;
mod postgres;

use async_trait::async_trait;
use celestia_protocol::model::celestial_body::{
    CelestialBody,
    CelestialBodyFields,
    CelestialBodyId,
};

#[cfg(any(test, feature = "memory"))]
pub use self::memory::MemoryBackend;
pub use self::{
    connection::{
        ConnectionProvider,
        Session,
        Transaction,
    },
    postgres::PgBackend,
};
use crate::error::Error;

/// Storage for celestial bodies.
///
/// `update` and `delete` return [`Error::NotFound`] when no row with the given
/// id exists at the time the statement runs.
#[async_trait]
pub trait Backend: Send + Sync + 'static {
    async fn list(&self) -> Result<Vec<CelestialBody>, Error>;

    async fn create(&self, fields: &CelestialBodyFields) -> Result<CelestialBodyId, Error>;

    async fn update(&self, id: CelestialBodyId, fields: &CelestialBodyFields) -> Result<(), Error>;

    async fn delete(&self, id: CelestialBodyId) -> Result<(), Error>;
}
