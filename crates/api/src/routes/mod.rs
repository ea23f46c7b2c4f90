pub mod admin;
pub mod catalog;
pub mod health;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{catalog as catalog_handlers, contact, content, orders};
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /home                          featured vehicles and gear
/// /vehicles                      public catalog (filter/sort query)
/// /vehicles/facets               brands, categories, price bounds
/// /vehicles/{slug}               detail
/// /gear                          public catalog (filter/sort query)
/// /gear/facets                   brands, categories, price bounds
/// /gear/{slug}                   detail
/// /contact                       submit contact form (POST)
/// /orders                        submit order (POST)
/// /services                      services content
/// /legal/{page}                  legal page content
/// /travel-estimate               distance and time to the dealership
///
/// /admin/login                   login (POST, public)
/// /admin/logout                  logout (POST, public)
/// /admin/session                 session status (public)
/// /admin/...                     see routes::admin::gated_router
/// ```
pub fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/home", get(catalog_handlers::home))
        .nest("/vehicles", catalog::vehicles_router())
        .nest("/gear", catalog::gear_router())
        .route("/contact", post(contact::submit_contact))
        .route("/orders", post(orders::submit_order))
        .route("/services", get(content::list_services))
        .route("/legal/{page}", get(content::get_legal_page))
        .route("/travel-estimate", get(content::travel_estimate))
        .nest(
            "/admin",
            admin::auth_router().merge(admin::gated_router(state)),
        )
}
