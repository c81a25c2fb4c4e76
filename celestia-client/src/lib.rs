use std::fmt::Display;

use celestia_protocol::{
    model::celestial_body::{
        CelestialBody,
        CelestialBodyFields,
        CelestialBodyId,
    },
    request::{
        DeleteCelestialBody,
        UpdateCelestialBody,
    },
    ListCelestialBodiesResponse,
    Message,
    ServerStatus,
};
use reqwest::{
    Response,
    StatusCode,
};
use serde::de::DeserializeOwned;
use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("http error")]
    Reqwest(#[from] reqwest::Error),

    #[error("{message}")]
    NotFound { message: String },

    #[error("request rejected ({status}): {message}")]
    Rejected { status: StatusCode, message: String },

    #[error("server error ({status}): {message}")]
    Server { status: StatusCode, message: String },
}

/// Client for the celestial body collection endpoint.
///
/// `api_url` is the collection endpoint itself, e.g. `http://localhost:3000/api`.
#[derive(Clone)]
pub struct Client {
    client: reqwest::Client,
    api_url: Url,
}

impl Client {
    pub fn new(api_url: Url) -> Self {
        let client = reqwest::Client::new();
        Self { client, api_url }
    }

    fn url(&self) -> UrlBuilder {
        UrlBuilder {
            url: self.api_url.clone(),
        }
    }

    pub async fn status(&self) -> Result<ServerStatus, Error> {
        let response = self
            .client
            .get(self.url().add("status").build())
            .send()
            .await?;
        handle_response(response).await
    }

    pub async fn list(&self) -> Result<Vec<CelestialBody>, Error> {
        let response = self.client.get(self.url().build()).send().await?;
        let response: ListCelestialBodiesResponse = handle_response(response).await?;
        Ok(response.celestial_bodies)
    }

    /// The server does not report the id of the new record.
    pub async fn create(&self, fields: &CelestialBodyFields) -> Result<Message, Error> {
        let response = self
            .client
            .post(self.url().build())
            .json(fields)
            .send()
            .await?;
        handle_response(response).await
    }

    /// Replaces every field of the record with `id`.
    pub async fn update(
        &self,
        id: CelestialBodyId,
        fields: CelestialBodyFields,
    ) -> Result<Message, Error> {
        let response = self
            .client
            .put(self.url().build())
            .json(&UpdateCelestialBody { id, fields })
            .send()
            .await?;
        handle_response(response).await
    }

    pub async fn delete(&self, id: CelestialBodyId) -> Result<Message, Error> {
        let response = self
            .client
            .delete(self.url().build())
            .json(&DeleteCelestialBody { id })
            .send()
            .await?;
        handle_response(response).await
    }
}

async fn handle_response<T: DeserializeOwned>(response: Response) -> Result<T, Error> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    let message = match response.json::<Message>().await {
        Ok(message) => message.message,
        Err(_) => status.to_string(),
    };
    tracing::debug!(%status, %message, "request failed");

    if status == StatusCode::NOT_FOUND {
        Err(Error::NotFound { message })
    }
    else if status.is_client_error() {
        Err(Error::Rejected { status, message })
    }
    else {
        Err(Error::Server { status, message })
    }
}

struct UrlBuilder {
    url: Url,
}

impl UrlBuilder {
    pub fn add(mut self, segment: impl Display) -> Self {
        if let Ok(mut segments) = self.url.path_segments_mut() {
            segments.pop_if_empty().push(&segment.to_string());
        }
        self
    }

    pub fn build(self) -> Url {
        self.url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_url_is_below_the_collection() {
        for base in ["http://localhost:3000/api", "http://localhost:3000/api/"] {
            let url = UrlBuilder {
                url: Url::parse(base).unwrap(),
            }
            .add("status")
            .build();
            assert_eq!(url.as_str(), "http://localhost:3000/api/status");
        }
    }
}
