pub mod validation;

use axum::{
    extract::State,
    http::StatusCode,
    response::{
        IntoResponse,
        Response,
    },
    routing,
    Json,
    Router,
};
use celestia_protocol::{
    request::{
        CreateCelestialBody,
        DeleteCelestialBody,
        UpdateCelestialBody,
    },
    ListCelestialBodiesResponse,
    Message,
    ServerStatus,
};

use crate::{
    api::validation::Payload,
    context::Context,
    error::Error,
};

/// Routes for the collection endpoint at `base_path` and the status endpoint
/// below it. `base_path` is either empty or starts with a slash and has no
/// trailing slash.
pub fn router(base_path: &str) -> Router<Context> {
    let collection = routing::get(list_celestial_bodies)
        .post(create_celestial_body)
        .put(update_celestial_body)
        .delete(delete_celestial_body);

    let router = Router::new().route(&format!("{base_path}/status"), routing::get(get_status));

    if base_path.is_empty() {
        router.route("/", collection)
    }
    else {
        router
            .route(base_path, collection.clone())
            .route(&format!("{base_path}/"), collection)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Error::Validation(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            Error::NotFound { .. } => (StatusCode::NOT_FOUND, self.to_string()),
            Error::Connection(_) | Error::ConnectTimeout { .. } => {
                tracing::error!(error = ?self, "Database unavailable");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Database unavailable".to_owned(),
                )
            }
            _ => {
                tracing::error!(error = ?self, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_owned(),
                )
            }
        };

        (status, Json(Message::new(message))).into_response()
    }
}

async fn get_status(State(context): State<Context>) -> Json<ServerStatus> {
    Json(ServerStatus {
        server_version: semver_macro::env_version!("CARGO_PKG_VERSION"),
        up_since: context.up_since,
    })
}

async fn list_celestial_bodies(
    State(context): State<Context>,
) -> Result<Json<ListCelestialBodiesResponse>, Error> {
    let celestial_bodies = context.backend().list().await?;
    Ok(Json(ListCelestialBodiesResponse { celestial_bodies }))
}

async fn create_celestial_body(
    State(context): State<Context>,
    Payload(request): Payload<CreateCelestialBody>,
) -> Result<(StatusCode, Json<Message>), Error> {
    let id = context.backend().create(&request).await?;
    tracing::info!(%id, name = %request.name, "Created celestial body");

    Ok((
        StatusCode::CREATED,
        Json(Message::new("Celestial body created successfully")),
    ))
}

async fn update_celestial_body(
    State(context): State<Context>,
    Payload(request): Payload<UpdateCelestialBody>,
) -> Result<Json<Message>, Error> {
    context
        .backend()
        .update(request.id, &request.fields)
        .await?;
    tracing::info!(id = %request.id, "Updated celestial body");

    Ok(Json(Message::new("Celestial body updated successfully")))
}

async fn delete_celestial_body(
    State(context): State<Context>,
    Payload(request): Payload<DeleteCelestialBody>,
) -> Result<Json<Message>, Error> {
    context.backend().delete(request.id).await?;
    tracing::info!(id = %request.id, "Deleted celestial body");

    Ok(Json(Message::new("Celestial body deleted successfully")))
}
