use async_trait::async_trait;
use celestia_protocol::model::celestial_body::{
    CelestialBody,
    CelestialBodyFields,
    CelestialBodyId,
};

use crate::{
    config::DbConfig,
    db::{
        Backend,
        ConnectionProvider,
    },
    error::Error,
    util::sqlx::Measure,
};

// All values go through bind parameters. Never format them into the SQL text.

const SELECT_CELESTIAL_BODIES: &str = r#"
    SELECT
        id,
        name,
        body_type,
        mean_radius_km,
        mass_kg,
        distance_from_sun_km
    FROM celestial_bodies
"#;

const INSERT_CELESTIAL_BODY: &str = r#"
    INSERT INTO celestial_bodies (
        name,
        body_type,
        mean_radius_km,
        mass_kg,
        distance_from_sun_km
    )
    VALUES ($1, $2, $3, $4, $5)
    RETURNING id
"#;

const UPDATE_CELESTIAL_BODY: &str = r#"
    UPDATE celestial_bodies
    SET
        name = $1,
        body_type = $2,
        mean_radius_km = $3,
        mass_kg = $4,
        distance_from_sun_km = $5
    WHERE id = $6
"#;

const DELETE_CELESTIAL_BODY: &str = r#"
    DELETE FROM celestial_bodies
    WHERE id = $1
"#;

#[derive(Debug, sqlx::FromRow)]
struct CelestialBodyRow {
    id: i32,
    name: String,
    body_type: Option<String>,
    mean_radius_km: Option<Measure>,
    mass_kg: Option<Measure>,
    distance_from_sun_km: Option<Measure>,
}

impl From<CelestialBodyRow> for CelestialBody {
    fn from(row: CelestialBodyRow) -> Self {
        CelestialBody {
            id: CelestialBodyId(row.id),
            fields: CelestialBodyFields {
                name: row.name,
                body_type: row.body_type,
                mean_radius_km: row.mean_radius_km.map(f64::from),
                mass_kg: row.mass_kg.map(f64::from),
                distance_from_sun_km: row.distance_from_sun_km.map(f64::from),
            },
        }
    }
}

/// [`Backend`] on top of the `celestial_bodies` table.
#[derive(Clone, Debug)]
pub struct PgBackend {
    provider: ConnectionProvider,
}

impl PgBackend {
    pub fn new(provider: ConnectionProvider) -> Self {
        Self { provider }
    }

    pub fn from_config(config: &DbConfig) -> Self {
        Self::new(ConnectionProvider::new(config))
    }
}

#[async_trait]
impl Backend for PgBackend {
    async fn list(&self) -> Result<Vec<CelestialBody>, Error> {
        let mut session = self.provider.acquire().await?;

        let celestial_bodies = sqlx::query_as::<_, CelestialBodyRow>(SELECT_CELESTIAL_BODIES)
            .fetch_all(&mut *session)
            .await?
            .into_iter()
            .map(CelestialBody::from)
            .collect();

        session.close().await;

        Ok(celestial_bodies)
    }

    async fn create(&self, fields: &CelestialBodyFields) -> Result<CelestialBodyId, Error> {
        let mut session = self.provider.acquire().await?;
        let mut tx = session.transaction().await?;

        let id: i32 = sqlx::query_scalar(INSERT_CELESTIAL_BODY)
            .bind(&fields.name)
            .bind(&fields.body_type)
            .bind(fields.mean_radius_km.map(Measure))
            .bind(fields.mass_kg.map(Measure))
            .bind(fields.distance_from_sun_km.map(Measure))
            .fetch_one(&mut **tx)
            .await?;

        tx.commit().await?;
        session.close().await;

        Ok(CelestialBodyId(id))
    }

    async fn update(&self, id: CelestialBodyId, fields: &CelestialBodyFields) -> Result<(), Error> {
        let mut session = self.provider.acquire().await?;
        let mut tx = session.transaction().await?;

        let result = sqlx::query(UPDATE_CELESTIAL_BODY)
            .bind(&fields.name)
            .bind(&fields.body_type)
            .bind(fields.mean_radius_km.map(Measure))
            .bind(fields.mass_kg.map(Measure))
            .bind(fields.distance_from_sun_km.map(Measure))
            .bind(id.0)
            .execute(&mut **tx)
            .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            session.close().await;
            return Err(Error::NotFound { id });
        }

        tx.commit().await?;
        session.close().await;

        Ok(())
    }

    async fn delete(&self, id: CelestialBodyId) -> Result<(), Error> {
        let mut session = self.provider.acquire().await?;
        let mut tx = session.transaction().await?;

        let result = sqlx::query(DELETE_CELESTIAL_BODY)
            .bind(id.0)
            .execute(&mut **tx)
            .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            session.close().await;
            return Err(Error::NotFound { id });
        }

        tx.commit().await?;
        session.close().await;

        Ok(())
    }
}
