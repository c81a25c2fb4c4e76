use serde::{
    Deserialize,
    Serialize,
};

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
    derive_more::Into,
)]
#[serde(transparent)]
pub struct CelestialBodyId(pub i32);

/// The client-writable part of a celestial body.
///
/// Optional fields that are missing from a payload deserialize to `None`, and
/// `None` is always written out as `null`, never skipped.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CelestialBodyFields {
    pub name: String,
    pub body_type: Option<String>,
    pub mean_radius_km: Option<f64>,
    pub mass_kg: Option<f64>,
    pub distance_from_sun_km: Option<f64>,
}

impl CelestialBodyFields {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CelestialBody {
    pub id: CelestialBodyId,
    #[serde(flatten)]
    pub fields: CelestialBodyFields,
}
