//! Film handlers: list, create, read, update, delete, actors.

use crate::error::{fail, ApiError, ErrorBody};
use crate::handlers::{json_body, parse_id};
use crate::model::{Film, FilmInput, FilmWithActors};
use crate::response::{created, non_empty, ok};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::Value;

const NOT_FOUND: &str = "Película no encontrada";
const NONE_TO_LIST: &str = "No se encontraron películas para listar";

/// Obtener todas las películas.
#[utoipa::path(
    get,
    path = "/films",
    tag = "films",
    responses(
        (status = 200, description = "Lista de todas las películas", body = Vec<Film>),
        (status = 404, description = "No se encontraron películas para listar", body = ErrorBody),
        (status = 500, description = "Error al traer las películas", body = ErrorBody),
    )
)]
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let films = state
        .catalog
        .list_all::<Film>()
        .await
        .map_err(fail("no se pudieron traer las películas"))?;
    Ok(ok(non_empty(films, NONE_TO_LIST)?))
}

/// Crear una nueva película.
#[utoipa::path(
    post,
    path = "/films",
    tag = "films",
    request_body = FilmInput,
    responses(
        (status = 201, description = "Película creada exitosamente", body = Film),
        (status = 400, description = "Cuerpo inválido", body = ErrorBody),
        (status = 422, description = "Falta un campo requerido", body = ErrorBody),
        (status = 500, description = "Error al crear la película", body = ErrorBody),
    )
)]
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    const FAILED: &str = "no se pudo crear la película";
    let body = json_body(body).map_err(fail(FAILED))?;
    let film = state
        .catalog
        .create::<Film>(&body)
        .await
        .map_err(fail(FAILED))?;
    Ok(created(film))
}

/// Obtener todas las películas con sus actores asociados.
#[utoipa::path(
    get,
    path = "/films/actors",
    tag = "films",
    responses(
        (status = 200, description = "Películas con sus actores", body = Vec<FilmWithActors>),
        (status = 404, description = "No se encontraron películas para listar", body = ErrorBody),
        (status = 500, description = "Error al traer las películas con actores", body = ErrorBody),
    )
)]
pub async fn list_with_actors(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let films = state
        .catalog
        .list_with_related::<Film>()
        .await
        .map_err(fail("no se pudieron traer las películas con actores"))?;
    Ok(ok(non_empty(films, NONE_TO_LIST)?))
}

/// Obtener una película por ID.
#[utoipa::path(
    get,
    path = "/films/{film_id}",
    tag = "films",
    params(("film_id" = i32, Path, description = "ID de la película")),
    responses(
        (status = 200, description = "Datos de la película", body = Film),
        (status = 404, description = "Película no encontrada", body = ErrorBody),
        (status = 500, description = "Error al traer la película", body = ErrorBody),
    )
)]
pub async fn read(
    State(state): State<AppState>,
    Path(film_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    const FAILED: &str = "no se pudo obtener la película";
    let id = parse_id(&film_id).map_err(fail(FAILED))?;
    let film = state
        .catalog
        .get_by_key::<Film>(id)
        .await
        .map_err(fail(FAILED))?
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))?;
    Ok(ok(film))
}

/// Obtener los actores de una película específica.
#[utoipa::path(
    get,
    path = "/films/{film_id}/actors",
    tag = "films",
    params(("film_id" = i32, Path, description = "ID de la película")),
    responses(
        (status = 200, description = "Película con sus actores", body = FilmWithActors),
        (status = 404, description = "Película no encontrada", body = ErrorBody),
        (status = 500, description = "Error al traer los actores de la película", body = ErrorBody),
    )
)]
pub async fn read_with_actors(
    State(state): State<AppState>,
    Path(film_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    const FAILED: &str = "no se pudieron obtener los actores de la película";
    let id = parse_id(&film_id).map_err(fail(FAILED))?;
    let film = state
        .catalog
        .get_with_related::<Film>(id)
        .await
        .map_err(fail(FAILED))?
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))?;
    Ok(ok(film))
}

/// Actualizar una película.
#[utoipa::path(
    put,
    path = "/films/{film_id}",
    tag = "films",
    params(("film_id" = i32, Path, description = "ID de la película")),
    request_body = FilmInput,
    responses(
        (status = 200, description = "Película actualizada exitosamente", body = Film),
        (status = 404, description = "Película no encontrada", body = ErrorBody),
        (status = 400, description = "Cuerpo inválido", body = ErrorBody),
        (status = 422, description = "Falta un campo requerido", body = ErrorBody),
        (status = 500, description = "Error al actualizar la película", body = ErrorBody),
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(film_id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    const FAILED: &str = "no se pudo actualizar la película";
    let id = parse_id(&film_id).map_err(fail(FAILED))?;
    let body = json_body(body).map_err(fail(FAILED))?;
    let film = state
        .catalog
        .update::<Film>(id, &body)
        .await
        .map_err(fail(FAILED))?
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))?;
    Ok(ok(film))
}

/// Eliminar una película.
#[utoipa::path(
    delete,
    path = "/films/{film_id}",
    tag = "films",
    params(("film_id" = i32, Path, description = "ID de la película")),
    responses(
        (status = 204, description = "Película eliminada exitosamente"),
        (status = 404, description = "Película no encontrada", body = ErrorBody),
        (status = 500, description = "Error al eliminar la película", body = ErrorBody),
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    Path(film_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    const FAILED: &str = "no se pudo eliminar la película";
    let id = parse_id(&film_id).map_err(fail(FAILED))?;
    state
        .catalog
        .delete::<Film>(id)
        .await
        .map_err(fail(FAILED))?
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))?;
    Ok(StatusCode::NO_CONTENT)
}
