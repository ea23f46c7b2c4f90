//! HTTP-level tests for the public catalog.

mod common;

use axum::http::StatusCode;
use common::{body_json, get};
use dealership_db::models::gear::CreateGearProduct;
use dealership_db::models::status::{GearStatus, VehicleStatus};
use dealership_db::models::vehicle::CreateVehicle;
use dealership_db::repositories::{GearProductRepo, VehicleRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_vehicle(
    pool: &PgPool,
    brand: &str,
    model: &str,
    price_cents: i64,
    engine_cc: i32,
    status: VehicleStatus,
    is_featured: bool,
) -> i64 {
    let input = CreateVehicle {
        slug: None,
        brand: brand.to_string(),
        model: model.to_string(),
        year: 2022,
        category: Some("roadster".to_string()),
        price_cents,
        mileage_km: 3_000,
        engine_cc: Some(engine_cc),
        power_hp: None,
        license_category: None,
        color: None,
        description: None,
        images: vec![],
        cover_image: None,
        status: Some(status),
        is_featured,
    };
    VehicleRepo::create(pool, &input).await.unwrap().id
}

async fn seed_gear(
    pool: &PgPool,
    title: &str,
    price_cents: i64,
    compare_price_cents: Option<i64>,
    status: GearStatus,
) -> i64 {
    let input = CreateGearProduct {
        slug: None,
        title: title.to_string(),
        brand: Some("Alpinestars".to_string()),
        category: "gloves".to_string(),
        product_type: None,
        description: None,
        price_cents,
        compare_price_cents,
        images: vec![],
        cover_image: None,
        sizes: vec![],
        status: Some(status),
        is_featured: true,
    };
    GearProductRepo::create(pool, &input).await.unwrap().id
}

async fn seed_showroom(pool: &PgPool) {
    seed_vehicle(pool, "Yamaha", "MT-07", 749_000, 689, VehicleStatus::Available, true).await;
    seed_vehicle(pool, "Ducati", "Panigale V4", 2_690_000, 1103, VehicleStatus::Available, false)
        .await;
    seed_vehicle(pool, "KTM", "390 Duke", 549_000, 373, VehicleStatus::Reserved, false).await;
    seed_vehicle(pool, "Honda", "CBR600RR", 1_299_000, 599, VehicleStatus::Sold, true).await;
}

fn prices(json: &serde_json::Value) -> Vec<i64> {
    json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["price_cents"].as_i64().unwrap())
        .collect()
}

// ---------------------------------------------------------------------------
// Vehicles
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_public_catalog_hides_sold(pool: PgPool) {
    seed_showroom(&pool).await;
    let app = common::build_test_app(pool);

    let json = body_json(get(app, "/api/v1/vehicles").await).await;
    let statuses: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["status"].as_str().unwrap())
        .collect();

    assert_eq!(statuses.len(), 3);
    assert!(!statuses.contains(&"sold"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_price_range_excludes_out_of_range(pool: PgPool) {
    seed_showroom(&pool).await;
    let app = common::build_test_app(pool);

    let response = get(
        app,
        "/api/v1/vehicles?min_price_cents=500000&max_price_cents=800000&sort=price_asc",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(prices(&json), vec![549_000, 749_000]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_brand_and_engine_filters(pool: PgPool) {
    seed_showroom(&pool).await;
    let app = common::build_test_app(pool);

    let json = body_json(get(app.clone(), "/api/v1/vehicles?brand=ducati,ktm").await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);

    let json = body_json(get(app, "/api/v1/vehicles?min_cc=600&sort=price_desc").await).await;
    assert_eq!(prices(&json), vec![2_690_000, 749_000]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_invalid_catalog_query_is_400(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app.clone(), "/api/v1/vehicles?sort=random").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = get(app, "/api/v1/vehicles?min_price_cents=10&max_price_cents=5").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_vehicle_detail_and_facets(pool: PgPool) {
    seed_showroom(&pool).await;
    let app = common::build_test_app(pool);

    let response = get(app.clone(), "/api/v1/vehicles/ktm-390-duke-2022").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "reserved");

    let response = get(app.clone(), "/api/v1/vehicles/honda-cbr600rr-2022").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(get(app, "/api/v1/vehicles/facets").await).await;
    assert_eq!(json["data"]["brands"], serde_json::json!(["Ducati", "KTM", "Yamaha"]));
    assert_eq!(json["data"]["min_price_cents"], 549_000);
    assert_eq!(json["data"]["max_price_cents"], 2_690_000);
}

// ---------------------------------------------------------------------------
// Gear and home
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_gear_discount_only_when_compare_is_higher(pool: PgPool) {
    seed_gear(&pool, "Summer gloves", 4_000, Some(5_000), GearStatus::Active).await;
    seed_gear(&pool, "Winter gloves", 6_000, Some(6_000), GearStatus::Active).await;
    seed_gear(&pool, "Race gloves", 9_000, None, GearStatus::Draft).await;
    let app = common::build_test_app(pool);

    let json = body_json(get(app.clone(), "/api/v1/gear?sort=title_asc").await).await;
    let items = json["data"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["title"], "Summer gloves");
    assert_eq!(items[0]["discount_percent"], 20);
    assert!(items[1]["discount_percent"].is_null());

    let response = get(app.clone(), "/api/v1/gear/race-gloves").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get(app, "/api/v1/gear/summer-gloves").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_home_lists_featured_available(pool: PgPool) {
    seed_showroom(&pool).await;
    seed_gear(&pool, "Summer gloves", 4_000, None, GearStatus::Active).await;
    let app = common::build_test_app(pool);

    let json = body_json(get(app, "/api/v1/home").await).await;
    let vehicles = json["data"]["featured_vehicles"].as_array().unwrap();
    assert_eq!(vehicles.len(), 1);
    assert_eq!(vehicles[0]["model"], "MT-07");
    assert_eq!(json["data"]["featured_gear"].as_array().unwrap().len(), 1);
}
