//! HTTP-level tests for static content and the travel estimate.

mod common;

use axum::http::StatusCode;
use common::{body_json, get};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_services_listed(pool: PgPool) {
    let app = common::build_test_app(pool);

    let json = body_json(get(app, "/api/v1/services").await).await;
    let keys: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["key"].as_str().unwrap())
        .collect();
    assert!(keys.contains(&"maintenance"));
    assert!(keys.contains(&"financing"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_legal_pages(pool: PgPool) {
    let app = common::build_test_app(pool);

    for slug in ["legal-notice", "privacy-policy", "terms-of-sale"] {
        let response = get(app.clone(), &format!("/api/v1/legal/{slug}")).await;
        assert_eq!(response.status(), StatusCode::OK, "{slug}");
        let json = body_json(response).await;
        assert_eq!(json["data"]["slug"], slug);
        assert!(!json["data"]["sections"].as_array().unwrap().is_empty());
    }

    let response = get(app, "/api/v1/legal/cookies").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_travel_estimate(pool: PgPool) {
    let app = common::build_test_app(pool);

    // Versailles to central Paris.
    let response = get(app.clone(), "/api/v1/travel-estimate?lat=48.8049&lng=2.1204").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let km = json["data"]["distance_km"].as_f64().unwrap();
    assert!(km > 15.0 && km < 40.0, "unexpected distance {km}");
    assert!(json["data"]["minutes"].as_u64().unwrap() > 0);

    let response = get(app.clone(), "/api/v1/travel-estimate?lat=123&lng=2.0").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = get(app, "/api/v1/travel-estimate?lat=48.8").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
