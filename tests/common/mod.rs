//! Shared fixtures for integration tests.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use pokedex_service::domain::model::Creature;
use pokedex_service::{build_router, AppState, Catalog, ServiceConfig};
use serde_json::Value;
use tower::ServiceExt;

pub const CLIENT_ORIGIN: &str = "http://localhost:5173";

/// 25 creatures numbered 1..=25, inserted in reverse order.
/// Odd numbers are Fire, even numbers Water; multiples of 5 also fly.
pub fn numbered_catalog() -> Catalog {
    let creatures = (1..=25)
        .rev()
        .map(|n| {
            let type_one = if n % 2 == 1 { "Fire" } else { "Water" };
            let creature = Creature::new(n, format!("Creature{:02}", n), type_one)
                .with_attribute("speed", 100 - n);
            if n % 5 == 0 {
                creature.with_type_two("Flying")
            } else {
                creature
            }
        })
        .collect();
    Catalog::new(creatures).unwrap()
}

pub fn test_state() -> AppState {
    AppState::new(numbered_catalog(), &ServiceConfig::default())
}

pub fn test_router(state: AppState) -> Router {
    build_router(state, &ServiceConfig::default()).unwrap()
}

pub async fn send(router: &Router, method: &str, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("origin", CLIENT_ORIGIN)
        .body(Body::empty())
        .unwrap();
    router.clone().oneshot(request).await.unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn send_json(router: &Router, method: &str, uri: &str) -> (StatusCode, Value) {
    let response = send(router, method, uri).await;
    let status = response.status();
    let text = body_text(response).await;
    (status, serde_json::from_str(&text).unwrap())
}

pub fn numbers(listing: &Value) -> Vec<i64> {
    listing["pokemon"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["number"].as_i64().unwrap())
        .collect()
}
