mod common;

use axum::{
    body::Body,
    http::{
        header,
        Method,
        Request,
        StatusCode,
    },
    Router,
};
use celestia_server::{
    db::MemoryBackend,
    Builder,
};
use serde_json::{
    json,
    Value,
};

use crate::common::{
    list,
    mars,
    request,
    send,
    BASE_PATH,
};

fn router() -> Router {
    Builder::default()
        .with_backend(MemoryBackend::default())
        .with_base_path(BASE_PATH)
        .build()
        .unwrap()
}

async fn create(router: &Router, body: Value) -> i64 {
    let (status, response) = request(router, Method::POST, BASE_PATH, Some(body.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(response, json!({ "message": "Celestial body created successfully" }));

    list(router)
        .await
        .iter()
        .filter(|row| row["name"] == body["name"])
        .filter_map(|row| row["id"].as_i64())
        .max()
        .unwrap()
}

#[tokio::test]
async fn list_starts_empty() {
    let router = router();

    let (status, body) = request(&router, Method::GET, BASE_PATH, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "celestial_bodies": [] }));
}

#[tokio::test]
async fn created_body_is_listed_with_numbers() {
    let router = router();
    create(&router, mars()).await;

    let rows = list(&router).await;
    assert_eq!(rows.len(), 1);

    let row = &rows[0];
    assert!(row["id"].is_i64());
    assert_eq!(row["name"], "Mars");
    assert_eq!(row["body_type"], "planet");
    assert_eq!(row["mean_radius_km"], json!(3389.5));
    assert!(row["mean_radius_km"].is_number());
    assert_eq!(row["mass_kg"].as_f64(), Some(6.4171e23));
    assert_eq!(row["distance_from_sun_km"].as_f64(), Some(227939200.0));
}

#[tokio::test]
async fn missing_optional_fields_list_as_null() {
    let router = router();
    create(&router, json!({ "name": "Sedna" })).await;

    let rows = list(&router).await;
    let row = rows[0].as_object().unwrap();

    for field in ["body_type", "mean_radius_km", "mass_kg", "distance_from_sun_km"] {
        assert_eq!(row.get(field), Some(&Value::Null), "{field}");
    }
}

#[tokio::test]
async fn ids_are_unique() {
    let router = router();
    let first = create(&router, json!({ "name": "Phobos" })).await;
    let second = create(&router, json!({ "name": "Deimos" })).await;

    assert_ne!(first, second);
}

#[tokio::test]
async fn create_rejects_invalid_payloads() {
    let router = router();

    for body in [
        json!({}),
        json!({ "name": "" }),
        json!({ "name": "   " }),
        json!({ "name": 42 }),
        json!({ "name": "Vesta", "mass_kg": "heavy" }),
    ] {
        let (status, response) = request(&router, Method::POST, BASE_PATH, Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(response["message"].is_string());
    }

    assert!(list(&router).await.is_empty());
}

#[tokio::test]
async fn nul_characters_are_a_bad_request() {
    let router = router();

    for body in [
        json!({ "name": "Io\u{0}" }),
        json!({ "name": "Io", "body_type": "moon\u{0}" }),
    ] {
        let (status, response) = request(&router, Method::POST, BASE_PATH, Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(response["message"]
            .as_str()
            .unwrap()
            .contains("NUL"));
    }
    assert!(list(&router).await.is_empty());

    let id = create(&router, mars()).await;
    let (status, _) = request(
        &router,
        Method::PUT,
        BASE_PATH,
        Some(json!({ "id": id, "name": "Mars\u{0}" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(list(&router).await[0]["name"], "Mars");
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let router = router();

    let request = Request::builder()
        .method(Method::POST)
        .uri(BASE_PATH)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();
    let (status, _) = send(&router, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let request = Request::builder()
        .method(Method::POST)
        .uri(BASE_PATH)
        .body(Body::from(mars().to_string()))
        .unwrap();
    let (status, _) = send(&router, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_replaces_every_field() {
    let router = router();
    let id = create(&router, mars()).await;

    let (status, response) = request(
        &router,
        Method::PUT,
        BASE_PATH,
        Some(json!({ "id": id, "name": "Red Planet", "mean_radius_km": 3390.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response, json!({ "message": "Celestial body updated successfully" }));

    let rows = list(&router).await;
    assert_eq!(
        rows,
        vec![json!({
            "id": id,
            "name": "Red Planet",
            "body_type": null,
            "mean_radius_km": 3390.0,
            "mass_kg": null,
            "distance_from_sun_km": null,
        })]
    );
}

#[tokio::test]
async fn update_of_missing_id_is_not_found() {
    let router = router();
    create(&router, mars()).await;
    let before = list(&router).await;

    let (status, response) = request(
        &router,
        Method::PUT,
        BASE_PATH,
        Some(json!({ "id": 999, "name": "X", "body_type": null })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(response["message"]
        .as_str()
        .unwrap()
        .contains("not found"));
    assert_eq!(list(&router).await, before);
}

#[tokio::test]
async fn update_requires_id_and_name() {
    let router = router();
    let id = create(&router, mars()).await;

    let (status, _) = request(&router, Method::PUT, BASE_PATH, Some(json!({ "name": "X" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = request(&router, Method::PUT, BASE_PATH, Some(json!({ "id": id }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert_eq!(list(&router).await[0]["name"], "Mars");
}

#[tokio::test]
async fn delete_twice_is_ok_then_not_found() {
    let router = router();
    let id = create(&router, mars()).await;
    create(&router, json!({ "name": "Venus" })).await;

    let (status, response) =
        request(&router, Method::DELETE, BASE_PATH, Some(json!({ "id": id }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response, json!({ "message": "Celestial body deleted successfully" }));
    assert_eq!(list(&router).await.len(), 1);

    let (status, response) =
        request(&router, Method::DELETE, BASE_PATH, Some(json!({ "id": id }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        response,
        json!({ "message": format!("Celestial body {id} not found") })
    );
    assert_eq!(list(&router).await.len(), 1);
}

#[tokio::test]
async fn quotes_and_sql_are_stored_verbatim() {
    let router = router();
    let name = "Robert'); DROP TABLE celestial_bodies; --";
    let body_type = "dwarf \"planet\" \\ 'quoted'";

    create(&router, json!({ "name": name, "body_type": body_type })).await;

    let rows = list(&router).await;
    assert_eq!(rows[0]["name"], name);
    assert_eq!(rows[0]["body_type"], body_type);
}

#[tokio::test]
async fn collection_accepts_trailing_slash() {
    let router = router();

    let (status, _) =
        request(&router, Method::POST, "/api/", Some(json!({ "name": "Titan" }))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = request(&router, Method::GET, "/api/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["celestial_bodies"][0]["name"], "Titan");
}

#[tokio::test]
async fn status_reports_version() {
    let router = router();

    let (status, body) = request(&router, Method::GET, "/api/status", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["server_version"], env!("CARGO_PKG_VERSION"));
    assert!(body["up_since"].is_string());
}

#[tokio::test]
async fn unsupported_method_is_rejected() {
    let router = router();

    let (status, _) = request(&router, Method::PATCH, BASE_PATH, Some(mars())).await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn root_base_path_mounts_at_slash() {
    let router = Builder::default()
        .with_backend(MemoryBackend::default())
        .with_base_path("/")
        .build()
        .unwrap();

    let (status, _) = request(&router, Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = request(&router, Method::GET, "/status", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[test]
fn builder_needs_a_backend() {
    assert!(Builder::default().build().is_err());
}
