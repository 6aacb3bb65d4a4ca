//! OpenAPI document generated from the handler annotations.

use crate::error::ErrorBody;
use crate::model::{Actor, ActorInput, ActorWithFilms, Film, FilmActor, FilmInput, FilmWithActors};
use utoipa::OpenApi;

/// Swagger UI mount point.
pub const DOCS_PATH: &str = "/api-docs";
/// Raw OpenAPI document, also the URL the UI loads.
pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "API de Actores y Películas",
        version = env!("CARGO_PKG_VERSION"),
        description = "Documentación generada para la API de Actores y Películas"
    ),
    paths(
        crate::handlers::actors::list,
        crate::handlers::actors::list_with_films,
        crate::handlers::actors::bulk_create,
        crate::handlers::actors::create,
        crate::handlers::actors::read,
        crate::handlers::actors::read_with_films,
        crate::handlers::actors::attach_film,
        crate::handlers::actors::update,
        crate::handlers::actors::delete,
        crate::handlers::films::list,
        crate::handlers::films::create,
        crate::handlers::films::list_with_actors,
        crate::handlers::films::read,
        crate::handlers::films::read_with_actors,
        crate::handlers::films::update,
        crate::handlers::films::delete,
    ),
    components(schemas(
        Actor,
        ActorInput,
        ActorWithFilms,
        Film,
        FilmInput,
        FilmWithActors,
        FilmActor,
        ErrorBody,
    )),
    tags(
        (name = "actors", description = "Actores y sus películas"),
        (name = "films", description = "Películas y sus actores"),
    )
)]
pub struct ApiDoc;

#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
