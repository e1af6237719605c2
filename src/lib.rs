pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod services;
pub mod state;
pub mod store;

use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use axum::routing::get;
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::route_not_found;
use crate::state::AppState;

/// Builds the full application router around `state`.
pub fn app(state: Arc<AppState>) -> Router {
    with_layers(api_routes(), state)
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/health",
            get(handlers::health::health).fallback(route_not_found),
        )
        .route(
            "/api/bookings",
            get(handlers::bookings::list_bookings)
                .post(handlers::bookings::create_booking)
                .fallback(route_not_found),
        )
        .route(
            "/api/bookings/:id",
            get(handlers::bookings::get_booking)
                .delete(handlers::bookings::delete_booking)
                .fallback(route_not_found),
        )
        .route(
            "/api/bookings/:id/calendar.ics",
            get(handlers::calendar::download_ics).fallback(route_not_found),
        )
}

/// Wraps `routes` with the JSON 404 fallback, panic recovery, CORS and
/// request tracing, then binds `state`.
pub fn with_layers(routes: Router<Arc<AppState>>, state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config.allowed_origins);

    routes
        .fallback(route_not_found)
        .layer(CatchPanicLayer::custom(handlers::handle_panic))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin = %o, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::DELETE,
            Method::PUT,
            Method::PATCH,
        ])
        .allow_headers([header::CONTENT_TYPE])
}
