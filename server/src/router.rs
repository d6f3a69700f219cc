//! Router Configuration
//!
//! Route configuration for the landing page API.

use axum::Router;
use axum::http::{HeaderValue, Method, header};
use axum::routing::{get, post, put};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::{ab_tests, health, landing};
use crate::state::AppState;

/// Mount point of the landing page API.
pub const API_PREFIX: &str = "/api/landing-page";

/// Routes relative to [`API_PREFIX`].
fn landing_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(landing::get_content).put(landing::update_content),
        )
        .route("/invalidate-cache", post(landing::invalidate_cache))
        .route("/contact-info", put(landing::update_contact_info))
        .route("/settings", put(landing::update_settings))
        .route("/sections", put(landing::update_sections))
        .route("/ab-tests", get(ab_tests::list).post(ab_tests::create))
        .route(
            "/ab-tests/{id}",
            get(ab_tests::get)
                .put(ab_tests::update)
                .delete(ab_tests::delete),
        )
        .route("/ab-tests/{id}/start", post(ab_tests::start))
        .route("/ab-tests/{id}/stop", post(ab_tests::stop))
        .route("/ab-tests/{id}/track", post(ab_tests::track))
}

fn cors_layer(origins: &[String]) -> Option<CorsLayer> {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("ignoring invalid CORS origin {origin:?}: {e}");
                None
            }
        })
        .collect();
    if origins.is_empty() {
        return None;
    }
    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]),
    )
}

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/health", get(health::health))
        .nest(API_PREFIX, landing_routes());

    if let Some(cors) = cors_layer(&state.config().cors_origins) {
        router = router.layer(cors);
    }

    router.layer(TraceLayer::new_for_http()).with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cors_disabled_without_origins() {
        assert!(cors_layer(&[]).is_none());
        assert!(cors_layer(&["bad\norigin".to_string()]).is_none());
        assert!(cors_layer(&["http://localhost:5173".to_string()]).is_some());
    }
}
