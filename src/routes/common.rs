//! Service routes: greeting, liveness, readiness, build info.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

#[derive(Serialize)]
struct Probe {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    catalog: Option<&'static str>,
}

#[derive(Serialize)]
struct BuildInfo {
    name: &'static str,
    version: &'static str,
    docs: &'static str,
}

async fn greeting() -> &'static str {
    "Hola mundo !"
}

async fn live() -> Json<Probe> {
    Json(Probe {
        status: "ok",
        catalog: None,
    })
}

/// 200 once the store answers and the catalog tables exist, 503 otherwise.
async fn ready(State(state): State<AppState>) -> (StatusCode, Json<Probe>) {
    match state.catalog.check_ready().await {
        Ok(()) => (
            StatusCode::OK,
            Json(Probe {
                status: "ok",
                catalog: Some("ready"),
            }),
        ),
        Err(err) => {
            tracing::warn!(error = %err, "catalog not ready");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(Probe {
                    status: "degraded",
                    catalog: Some("unavailable"),
                }),
            )
        }
    }
}

async fn build_info() -> Json<BuildInfo> {
    Json(BuildInfo {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        docs: crate::openapi::DOCS_PATH,
    })
}

/// GET /, /health, /ready, /version.
pub fn common_routes_with_ready(state: AppState) -> Router {
    Router::new()
        .route("/", get(greeting))
        .route("/health", get(live))
        .route("/ready", get(ready))
        .route("/version", get(build_info))
        .with_state(state)
}
