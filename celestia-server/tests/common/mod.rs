#![allow(dead_code)]

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
use serde_json::Value;
use tower::ServiceExt;

pub const BASE_PATH: &str = "/api";

pub async fn request(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);

    let request = match body {
        Some(payload) => {
            builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&payload).unwrap()))
                .unwrap()
        }
        None => builder.body(Body::empty()).unwrap(),
    };

    send(router, request).await
}

pub async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();

    let value = if body.is_empty() {
        Value::Null
    }
    else {
        serde_json::from_slice(&body).unwrap()
    };

    (status, value)
}

pub async fn list(router: &Router) -> Vec<Value> {
    let (status, body) = request(router, Method::GET, BASE_PATH, None).await;
    assert_eq!(status, StatusCode::OK);
    body["celestial_bodies"].as_array().unwrap().clone()
}

pub fn mars() -> Value {
    serde_json::json!({
        "name": "Mars",
        "body_type": "planet",
        "mean_radius_km": 3389.5,
        "mass_kg": 6.4171e23,
        "distance_from_sun_km": 227939200,
    })
}
