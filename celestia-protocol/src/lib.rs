pub mod model;
pub mod request;

use chrono::{
    DateTime,
    Utc,
};
use semver::Version;
use serde::{
    Deserialize,
    Serialize,
};

use crate::model::celestial_body::CelestialBody;

#[derive(Debug, Serialize, Deserialize)]
pub struct ServerStatus {
    pub server_version: Version,
    pub up_since: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListCelestialBodiesResponse {
    pub celestial_bodies: Vec<CelestialBody>,
}

/// Body of every non-list response, successful or not.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
