//! Swagger UI over the generated OpenAPI document.

use crate::openapi::{openapi, DOCS_PATH, OPENAPI_JSON_PATH};
use axum::Router;
use utoipa_swagger_ui::SwaggerUi;

/// GET /api-docs (redirects to the UI at /api-docs/) and /api-docs/openapi.json.
pub fn docs_routes() -> Router {
    Router::new().merge(SwaggerUi::new(DOCS_PATH).url(OPENAPI_JSON_PATH, openapi()))
}
