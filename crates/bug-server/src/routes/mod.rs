//! Router assembly.

pub mod bugs;
pub mod health;

use std::any::Any;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use tower::Layer;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::trace::TraceLayer;
use tracing::error;

use bug_core::responses::ErrorResponse;

use crate::state::AppState;

pub const ROUTE_NOT_FOUND_MESSAGE: &str = "Route not found";
pub const PANIC_MESSAGE: &str = "Something went wrong!";

/// The served application. Trailing slashes are trimmed before routing, so
/// `/api/bugs/` reaches the list handler.
pub type App = NormalizePath<Router>;

pub fn construct_app(state: AppState) -> App {
    NormalizePathLayer::trim_trailing_slash().layer(construct_router(state))
}

/// The full API with middleware.
pub fn construct_router(state: AppState) -> Router {
    let api = Router::new()
        .nest("/api/bugs", bugs::routes())
        .nest("/api/health", health::routes())
        .fallback(route_not_found)
        .with_state(state);
    apply_layers(api)
}

/// Wrap a router in the request tracing, panic and CORS layers.
pub fn apply_layers(router: Router) -> Router {
    router
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

async fn route_not_found() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: ROUTE_NOT_FOUND_MESSAGE.to_string(),
        }),
    )
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!(detail, "handler panicked");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: PANIC_MESSAGE.to_string(),
        }),
    )
        .into_response()
}
