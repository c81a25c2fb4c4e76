use std::collections::BTreeMap;

use async_trait::async_trait;
use celestia_protocol::model::celestial_body::{
    CelestialBody,
    CelestialBodyFields,
    CelestialBodyId,
};
use tokio::sync::Mutex;

use crate::{
    db::Backend,
    error::Error,
};

/// [`Backend`] that keeps rows in process memory.
///
/// Used to run the HTTP layer without a database. Ids are assigned from 1
/// upwards and never reused, like a `SERIAL` column.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    state: Mutex<State>,
}

#[derive(Debug, Default)]
struct State {
    last_id: i32,
    rows: BTreeMap<CelestialBodyId, CelestialBodyFields>,
}

impl MemoryBackend {
    pub async fn len(&self) -> usize {
        self.state.lock().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl Backend for MemoryBackend {
    async fn list(&self) -> Result<Vec<CelestialBody>, Error> {
        let state = self.state.lock().await;
        Ok(state
            .rows
            .iter()
            .map(|(id, fields)| {
                CelestialBody {
                    id: *id,
                    fields: fields.clone(),
                }
            })
            .collect())
    }

    async fn create(&self, fields: &CelestialBodyFields) -> Result<CelestialBodyId, Error> {
        let mut state = self.state.lock().await;
        state.last_id += 1;
        let id = CelestialBodyId(state.last_id);
        state.rows.insert(id, fields.clone());
        Ok(id)
    }

    async fn update(&self, id: CelestialBodyId, fields: &CelestialBodyFields) -> Result<(), Error> {
        let mut state = self.state.lock().await;
        let row = state.rows.get_mut(&id).ok_or(Error::NotFound { id })?;
        *row = fields.clone();
        Ok(())
    }

    async fn delete(&self, id: CelestialBodyId) -> Result<(), Error> {
        let mut state = self.state.lock().await;
        state
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or(Error::NotFound { id })
    }
}
