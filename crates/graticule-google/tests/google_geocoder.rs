//! Integration tests for `GoogleGeocoder::locate` using wiremock HTTP mocks.
//!
//! Each test serves one recorded XML response from `tests/fixtures/google/`
//! and checks either the normalized `Location` or the failure class.

use graticule_google::{ErrorKind, GeocodeError, GoogleGeocoder, Location, Precision};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GEO_PATH: &str = "/maps/geo";

fn fixture(name: &str) -> &'static str {
    match name {
        "success" => include_str!("fixtures/google/success.xml"),
        "encoding" => include_str!("fixtures/google/encoding.xml"),
        "success_multiple_results" => include_str!("fixtures/google/success_multiple_results.xml"),
        "only_coordinates" => include_str!("fixtures/google/only_coordinates.xml"),
        "partial" => include_str!("fixtures/google/partial.xml"),
        "missing_address" => include_str!("fixtures/google/missing_address.xml"),
        "unknown_address" => include_str!("fixtures/google/unknown_address.xml"),
        "unavailable" => include_str!("fixtures/google/unavailable.xml"),
        "badkey" => include_str!("fixtures/google/badkey.xml"),
        "limit" => include_str!("fixtures/google/limit.xml"),
        "server_error" => include_str!("fixtures/google/server_error.xml"),
        other => panic!("no fixture named {other}"),
    }
}

fn test_geocoder(server: &MockServer) -> GoogleGeocoder {
    GoogleGeocoder::with_base_url("APP_ID", 5, &format!("{}{GEO_PATH}", server.uri()))
        .expect("geocoder construction should not fail")
}

/// Starts a server that answers every geocode request with `fixture_name`.
async fn serve_fixture(fixture_name: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(GEO_PATH))
        .and(query_param("key", "APP_ID"))
        .and(query_param("output", "xml"))
        .and(query_param("oe", "utf-8"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(fixture(fixture_name), "text/xml; charset=UTF-8"),
        )
        .mount(&server)
        .await;
    server
}

async fn locate_error(fixture_name: &str) -> GeocodeError {
    let server = serve_fixture(fixture_name).await;
    test_geocoder(&server)
        .locate("x")
        .await
        .expect_err("fixture should produce an error")
}

// ---------------------------------------------------------------------------
// Successful lookups
// ---------------------------------------------------------------------------

#[tokio::test]
async fn locate_returns_full_address_match() {
    let server = serve_fixture("success").await;

    let location = test_geocoder(&server)
        .locate("1600 Amphitheatre Parkway, Mountain View, CA")
        .await
        .expect("should geocode");

    assert_eq!(
        location,
        Location {
            street: Some("1600 Amphitheatre Pkwy".to_string()),
            locality: Some("Mountain View".to_string()),
            region: Some("CA".to_string()),
            postal_code: Some("94043".to_string()),
            country: Some("US".to_string()),
            latitude: Some(37.423_139),
            longitude: Some(-122.085_035),
            precision: Precision::Address,
        }
    );
}

#[tokio::test]
async fn locate_round_trips_non_ascii_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(GEO_PATH))
        .and(query_param("q", "Rämistrasse 4, 8001 Zürich, Switzerland"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(fixture("encoding"), "text/xml; charset=UTF-8"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let location = test_geocoder(&server)
        .locate("Rämistrasse 4, 8001 Zürich, Switzerland")
        .await
        .expect("should geocode");

    assert_eq!(
        location,
        Location {
            street: Some("Rämistrasse 4".to_string()),
            locality: Some("Zürich".to_string()),
            region: Some("Zürich".to_string()),
            postal_code: Some("8001".to_string()),
            country: Some("CH".to_string()),
            latitude: Some(47.367_621_1),
            longitude: Some(8.545_718_6),
            precision: "address".parse().unwrap(),
        }
    );
}

/// The query is broad, so the response carries several street-level
/// placemarks. The first one wins and it has no postal code.
#[tokio::test]
async fn locate_uses_first_of_multiple_results() {
    let server = serve_fixture("success_multiple_results").await;

    let location = test_geocoder(&server)
        .locate("Queen St West, Toronto, ON CA")
        .await
        .expect("should geocode");

    assert_eq!(
        location,
        Location {
            street: Some("Queen St W".to_string()),
            locality: Some("Toronto".to_string()),
            region: Some("ON".to_string()),
            postal_code: None,
            country: Some("CA".to_string()),
            latitude: Some(43.645_503),
            longitude: Some(-79.412_559),
            precision: Precision::Street,
        }
    );
}

#[tokio::test]
async fn locate_with_only_coordinates() {
    let server = serve_fixture("only_coordinates").await;

    let location = test_geocoder(&server)
        .locate("15-17 & 16 Railroad Square, Nashua, NH, 03064")
        .await
        .expect("should geocode");

    assert_eq!(
        location,
        Location {
            latitude: Some(15.0),
            longitude: Some(-17.0),
            ..Location::default()
        }
    );
}

#[tokio::test]
async fn locate_partial_match() {
    let server = serve_fixture("partial").await;

    let location = test_geocoder(&server)
        .locate("sf ca")
        .await
        .expect("should geocode");

    assert_eq!(
        location,
        Location {
            locality: Some("San Francisco".to_string()),
            region: Some("CA".to_string()),
            country: Some("US".to_string()),
            latitude: Some(37.775_206),
            longitude: Some(-122.419_209),
            precision: Precision::Locality,
            ..Location::default()
        }
    );
}

#[tokio::test]
async fn locate_is_idempotent_for_identical_responses() {
    let server = serve_fixture("success").await;
    let geocoder = test_geocoder(&server);

    let first = geocoder
        .locate("1600 Amphitheatre Parkway, Mountain View, CA")
        .await
        .expect("first lookup");
    let second = geocoder
        .locate("1600 Amphitheatre Parkway, Mountain View, CA")
        .await
        .expect("second lookup");

    assert_eq!(first, second);
}

#[tokio::test]
async fn locate_location_formats_structured_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(GEO_PATH))
        .and(query_param("q", "1600 Amphitheatre Pkwy, Mountain View, CA 94043 US"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(fixture("success"), "text/xml; charset=UTF-8"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let query = Location {
        street: Some("1600 Amphitheatre Pkwy".to_string()),
        locality: Some("Mountain View".to_string()),
        region: Some("CA".to_string()),
        postal_code: Some("94043".to_string()),
        country: Some("US".to_string()),
        ..Location::default()
    };

    let location = test_geocoder(&server)
        .locate_location(&query)
        .await
        .expect("should geocode");

    assert_eq!(location.precision, Precision::Address);
    assert_eq!(location.coordinates(), Some((37.423_139, -122.085_035)));
}

// ---------------------------------------------------------------------------
// Provider status failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn locate_missing_address() {
    assert_eq!(locate_error("missing_address").await.kind(), ErrorKind::Address);
}

#[tokio::test]
async fn locate_unknown_address() {
    assert_eq!(locate_error("unknown_address").await.kind(), ErrorKind::Address);
}

#[tokio::test]
async fn locate_unavailable_address() {
    assert_eq!(locate_error("unavailable").await.kind(), ErrorKind::Address);
}

#[tokio::test]
async fn locate_bad_key() {
    assert_eq!(locate_error("badkey").await.kind(), ErrorKind::Credentials);
}

#[tokio::test]
async fn locate_too_many_queries() {
    assert_eq!(locate_error("limit").await.kind(), ErrorKind::Credentials);
}

#[tokio::test]
async fn locate_server_error_status() {
    let err = locate_error("server_error").await;
    assert_eq!(err.kind(), ErrorKind::General);
    assert!(
        matches!(err, GeocodeError::Service { .. }),
        "expected Service, got: {err:?}"
    );
}

#[tokio::test]
async fn locate_success_status_without_placemarks_is_address_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(GEO_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            "<kml><Response><Status><code>200</code></Status></Response></kml>",
            "text/xml",
        ))
        .mount(&server)
        .await;

    let err = test_geocoder(&server).locate("x").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Address);
}

#[tokio::test]
async fn locate_unrecognized_status_is_general_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(GEO_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            "<kml><Response><Status><code>999</code></Status></Response></kml>",
            "text/xml",
        ))
        .mount(&server)
        .await;

    let err = test_geocoder(&server).locate("x").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::General);
    assert!(err.to_string().contains("999"), "got: {err}");
}

// ---------------------------------------------------------------------------
// Transport and document failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn locate_http_5xx_is_general_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(GEO_PATH))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = test_geocoder(&server).locate("x").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::General);
    assert!(
        matches!(err, GeocodeError::Service { .. }),
        "expected Service, got: {err:?}"
    );
}

#[tokio::test]
async fn locate_http_404_is_unexpected_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(GEO_PATH))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = test_geocoder(&server).locate("x").await.unwrap_err();
    assert!(
        matches!(err, GeocodeError::UnexpectedStatus { status: 404 }),
        "expected UnexpectedStatus(404), got: {err:?}"
    );
    assert_eq!(err.kind(), ErrorKind::General);
}

#[tokio::test]
async fn locate_malformed_body_is_general_not_address_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(GEO_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw("<html><body>oops</body></html>", "text/html"),
        )
        .mount(&server)
        .await;

    let err = test_geocoder(&server).locate("x").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::General);
}
