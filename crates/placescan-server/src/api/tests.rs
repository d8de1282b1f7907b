use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use placescan_core::{AppConfig, Environment};
use serde_json::json;
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;

fn test_config(base_url: &str, api_key: Option<&str>) -> AppConfig {
    AppConfig {
        env: Environment::Test,
        bind_addr: "127.0.0.1:0".parse().expect("socket addr"),
        log_level: "info".to_owned(),
        google_api_key: api_key.map(str::to_owned),
        places_base_url: base_url.to_owned(),
        request_timeout_secs: 5,
        user_agent: "placescan-test/0.1".to_owned(),
        page_delay_ms: 0,
        max_pages: 3,
        export_cache_size: 4,
    }
}

fn app(config: AppConfig) -> Router {
    build_app(AppState::new(Arc::new(config)))
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

fn post_form(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/search")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_owned()))
        .expect("request")
}

/// Pulls the `/download/<id>` href out of a rendered results page.
fn download_href(html: &str) -> Option<String> {
    let start = html.find("/download/")?;
    let rest = &html[start..];
    let end = rest.find('"')?;
    Some(rest[..end].to_owned())
}

#[tokio::test]
async fn index_renders_form_with_defaults() {
    let response = app(test_config("http://127.0.0.1:9", None))
        .oneshot(get("/"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("coach,Arzt,Trainer"));
    assert!(html.contains("51.0341"));
    assert!(html.contains("7.8578"));
    assert!(html.contains("35000"));
    assert!(html.contains("type=\"password\""));
}

#[tokio::test]
async fn index_hides_key_field_when_configured() {
    let response = app(test_config("http://127.0.0.1:9", Some("server-key")))
        .oneshot(get("/"))
        .await
        .expect("response");

    let html = body_text(response).await;
    assert!(!html.contains("type=\"password\""));
    assert!(!html.contains("server-key"));
}

#[tokio::test]
async fn health_returns_ok() {
    let response = app(test_config("http://127.0.0.1:9", None))
        .oneshot(get("/health"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
    let json: serde_json::Value =
        serde_json::from_str(&body_text(response).await).expect("json parse");
    assert_eq!(json, json!({ "status": "ok" }));
}

#[tokio::test]
async fn unknown_download_is_not_found() {
    let app = app(test_config("http://127.0.0.1:9", None));

    let response = app
        .clone()
        .oneshot(get(&format!("/download/{}", uuid::Uuid::new_v4())))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .oneshot(get("/download/not-a-uuid"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn search_without_any_key_rerenders_form() {
    let response = app(test_config("http://127.0.0.1:9", None))
        .oneshot(post_form(
            "queries=coach&lat=51.0341&lng=7.8578&radius=1000&api_key=",
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let html = body_text(response).await;
    assert!(html.contains("Kein API-Key"));
    assert!(html.contains("value=\"coach\""));
}

#[tokio::test]
async fn search_with_invalid_radius_is_bad_request() {
    let response = app(test_config("http://127.0.0.1:9", Some("k")))
        .oneshot(post_form("queries=coach&lat=51.0341&lng=7.8578&radius=0"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(response).await.contains("Radius"));
}

#[tokio::test]
async fn search_renders_results_and_serves_download() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/maps/api/place/nearbysearch/json"))
        .and(query_param("keyword", "coach"))
        .and(query_param("key", "form-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "results": [{
                "place_id": "p1",
                "name": "Coaching Müller",
                "geometry": { "location": { "lat": 51.0345, "lng": 7.8578 } }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/maps/api/place/details/json"))
        .and(query_param("place_id", "p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "result": {
                "name": "Coaching Müller",
                "formatted_address": "Hauptstraße 5, 57462 Olpe",
                "international_phone_number": "+49 2761 12345",
                "website": "https://coaching.example"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let app = app(test_config(&server.uri(), None));
    let response = app
        .clone()
        .oneshot(post_form(
            "queries=coach&lat=51.0341&lng=7.8578&radius=1000&website=on&api_key=form-key",
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Coaching Müller"));
    assert!(html.contains("Hauptstraße"));
    assert!(html.contains("57462"));
    assert!(html.contains("+49 2761 12345"));
    assert!(html.contains("coaching.example"));
    assert!(html.contains("<th>Website</th>"));

    let href = download_href(&html).expect("download link");
    let response = app.oneshot(get(&href)).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok()),
        Some(placescan_pipeline::XLSX_CONTENT_TYPE)
    );
    assert_eq!(
        response
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok()),
        Some("attachment; filename=\"results.xlsx\"")
    );
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    assert!(bytes.starts_with(b"PK"));
}

#[tokio::test]
async fn search_with_no_hits_shows_empty_notice() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/maps/api/place/nearbysearch/json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "status": "ZERO_RESULTS", "results": [] })),
        )
        .mount(&server)
        .await;

    let response = app(test_config(&server.uri(), Some("server-key")))
        .oneshot(post_form("queries=nichts&lat=51.0341&lng=7.8578&radius=1000"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Keine Ergebnisse gefunden."));
    assert!(download_href(&html).is_some());
}
