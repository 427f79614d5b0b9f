//! Application router: user routes under `/api` plus the cross-cutting layers.

mod user;
pub use user::user_routes;

use crate::middleware::{panic_response, render_errors};
use crate::state::AppState;
use axum::{extract::DefaultBodyLimit, middleware::from_fn_with_state, Router};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

/// Full service. Layer order, innermost first: body limit, panic catcher,
/// error rendering, tracing. The body limit is enforced by the `Json`
/// extractor, so an oversized body surfaces as an `AppError` like any other.
pub fn app(state: AppState, body_limit_bytes: usize) -> Router {
    Router::new()
        .nest("/api", user_routes(state.clone()))
        .layer(DefaultBodyLimit::max(body_limit_bytes))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(from_fn_with_state(state, render_errors))
        .layer(TraceLayer::new_for_http())
}
