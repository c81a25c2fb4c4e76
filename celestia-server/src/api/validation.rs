use axum::{
    async_trait,
    extract::{
        FromRequest,
        Request,
    },
    Json,
};
use celestia_protocol::{
    model::celestial_body::CelestialBodyFields,
    request::{
        DeleteCelestialBody,
        UpdateCelestialBody,
    },
};
use serde::de::DeserializeOwned;

use crate::error::Error;

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid request body: {0}")]
    Body(String),

    #[error("Field `{field}` must not be empty")]
    Empty { field: &'static str },

    /// Postgres `TEXT` cannot hold NUL.
    #[error("Field `{field}` must not contain NUL characters")]
    InvalidCharacter { field: &'static str },
}

fn check_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.contains('\0') {
        return Err(ValidationError::InvalidCharacter { field });
    }
    Ok(())
}

pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

impl Validate for CelestialBodyFields {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::Empty { field: "name" });
        }
        check_text("name", &self.name)?;
        if let Some(body_type) = &self.body_type {
            check_text("body_type", body_type)?;
        }
        Ok(())
    }
}

impl Validate for UpdateCelestialBody {
    fn validate(&self) -> Result<(), ValidationError> {
        self.fields.validate()
    }
}

impl Validate for DeleteCelestialBody {
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

/// JSON request body that has been parsed and validated.
///
/// Any rejection, including a missing content type, becomes a 400.
#[derive(Debug)]
pub struct Payload<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for Payload<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = Error;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(request, state)
            .await
            .map_err(|rejection| ValidationError::Body(rejection.body_text()))?;
        value.validate()?;
        Ok(Self(value))
    }
}
