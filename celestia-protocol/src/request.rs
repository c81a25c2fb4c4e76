use serde::{
    Deserialize,
    Serialize,
};

use crate::model::celestial_body::{
    CelestialBodyFields,
    CelestialBodyId,
};

pub type CreateCelestialBody = CelestialBodyFields;

/// Full replacement of an existing record. Every field is overwritten.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UpdateCelestialBody {
    pub id: CelestialBodyId,
    #[serde(flatten)]
    pub fields: CelestialBodyFields,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteCelestialBody {
    pub id: CelestialBodyId,
}
