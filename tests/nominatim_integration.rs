//! LocationResolver against a mock Nominatim server.

use atlas_forecast::location::{LocationResolver, NominatimGeocoder, Resolution};
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const AGENT: &str = "atlas-forecast-tests/1.0";

fn resolver_for(base: &str) -> LocationResolver<NominatimGeocoder> {
    LocationResolver::with_geocoder(NominatimGeocoder::new(base, AGENT, Duration::from_secs(5)))
}

#[tokio::test(flavor = "multi_thread")]
async fn test_resolve_first_candidate() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "Lahore"))
        .and(query_param("format", "json"))
        .and(query_param("limit", "1"))
        .and(header("User-Agent", AGENT))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"lat": "31.5656822", "lon": "74.3141829", "display_name": "Lahore, Punjab, Pakistan"}
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let base = mock_server.uri();
    let (first, second, cached) = tokio::task::spawn_blocking(move || {
        let resolver = resolver_for(&base);
        let first = resolver.resolve("Lahore");
        let second = resolver.resolve("Lahore");
        (first, second, resolver.cached_queries())
    })
    .await
    .unwrap();

    let loc = first.unwrap();
    assert_eq!(loc.display_name, "Lahore, Punjab, Pakistan");
    assert!((loc.latitude - 31.5656822).abs() < 1e-9);
    assert!((loc.longitude - 74.3141829).abs() < 1e-9);
    assert_eq!(second, Some(loc));
    assert_eq!(cached, 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_empty_result_is_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let base = mock_server.uri();
    let (first, second) = tokio::task::spawn_blocking(move || {
        let resolver = resolver_for(&base);
        (resolver.resolve_detailed("Atlantis"), resolver.resolve_detailed("Atlantis"))
    })
    .await
    .unwrap();

    assert_eq!(first, Resolution::NotFound);
    assert_eq!(second, Resolution::NotFound);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_server_error_is_unavailable_and_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(503))
        .expect(2)
        .mount(&mock_server)
        .await;

    let base = mock_server.uri();
    let (first, second, cached) = tokio::task::spawn_blocking(move || {
        let resolver = resolver_for(&base);
        let first = resolver.resolve_detailed("Lahore");
        let second = resolver.resolve("Lahore");
        (first, second, resolver.cached_queries())
    })
    .await
    .unwrap();

    assert_eq!(first, Resolution::ServiceUnavailable);
    assert!(second.is_none());
    assert_eq!(cached, 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_malformed_coordinates_are_absent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"lat": "north", "lon": "74.3", "display_name": "Nowhere"}
        ])))
        .mount(&mock_server)
        .await;

    let base = mock_server.uri();
    let result = tokio::task::spawn_blocking(move || resolver_for(&base).resolve("Nowhere"))
        .await
        .unwrap();

    assert!(result.is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unreachable_host_is_absent() {
    let result = tokio::task::spawn_blocking(|| resolver_for("http://127.0.0.1:1").resolve("Lahore"))
        .await
        .unwrap();

    assert!(result.is_none());
}
