//! Routers per concern, merged by [`app`].

mod catalog;
mod common;
mod docs;

pub use catalog::{actor_routes, film_routes};
pub use common::common_routes_with_ready;
pub use docs::docs_routes;

use crate::state::AppState;
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Request bodies above this size are rejected with 413.
pub const BODY_LIMIT_BYTES: usize = 1024 * 1024;

/// The full application: every route plus body limit and request tracing.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(common_routes_with_ready(state.clone()))
        .merge(actor_routes(state.clone()))
        .merge(film_routes(state))
        .merge(docs_routes())
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
        .layer(TraceLayer::new_for_http())
}
