//! Actor handlers: list, create, bulk create, read, update, delete, films.

use crate::error::{fail, AppError, ApiError, ErrorBody};
use crate::handlers::{json_body, parse_id};
use crate::model::{Actor, ActorInput, ActorWithFilms, FilmActor};
use crate::response::{created, non_empty, ok};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::Value;

const NOT_FOUND: &str = "Actor no encontrado";
const NONE_TO_LIST: &str = "No se encontraron actores para listar";

/// Obtener todos los actores.
#[utoipa::path(
    get,
    path = "/actors",
    tag = "actors",
    responses(
        (status = 200, description = "Lista de actores", body = Vec<Actor>),
        (status = 404, description = "No se encontraron actores para listar", body = ErrorBody),
        (status = 500, description = "Error en el servidor", body = ErrorBody),
    )
)]
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let actors = state
        .catalog
        .list_all::<Actor>()
        .await
        .map_err(fail("Error en el servidor"))?;
    Ok(ok(non_empty(actors, NONE_TO_LIST)?))
}

/// Obtener todos los actores con sus películas asociadas.
#[utoipa::path(
    get,
    path = "/actors/films",
    tag = "actors",
    responses(
        (status = 200, description = "Actores con sus películas", body = Vec<ActorWithFilms>),
        (status = 404, description = "No se encontraron actores para listar", body = ErrorBody),
        (status = 500, description = "Error al traer los actores con películas", body = ErrorBody),
    )
)]
pub async fn list_with_films(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let actors = state
        .catalog
        .list_with_related::<Actor>()
        .await
        .map_err(fail("no se pudieron traer los actores con películas"))?;
    Ok(ok(non_empty(actors, NONE_TO_LIST)?))
}

/// Crear varios actores en bloque. Todo o nada.
#[utoipa::path(
    post,
    path = "/actors/bulk",
    tag = "actors",
    request_body = Vec<ActorInput>,
    responses(
        (status = 201, description = "Actores creados exitosamente", body = Vec<Actor>),
        (status = 400, description = "Cuerpo inválido", body = ErrorBody),
        (status = 422, description = "Falta un campo requerido", body = ErrorBody),
        (status = 500, description = "Error al crear los actores", body = ErrorBody),
    )
)]
pub async fn bulk_create(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    const FAILED: &str = "no se pudo crear los actores";
    let Value::Array(items) = json_body(body).map_err(fail(FAILED))? else {
        return Err(fail(FAILED)(AppError::BadRequest("body must be a JSON array".into())));
    };
    let actors = state
        .catalog
        .bulk_create::<Actor>(&items)
        .await
        .map_err(fail(FAILED))?;
    Ok(created(actors))
}

/// Crear un nuevo actor.
#[utoipa::path(
    post,
    path = "/actors",
    tag = "actors",
    request_body = ActorInput,
    responses(
        (status = 201, description = "Actor creado exitosamente", body = Actor),
        (status = 400, description = "Cuerpo inválido", body = ErrorBody),
        (status = 422, description = "Falta un campo requerido", body = ErrorBody),
        (status = 500, description = "Error al crear el actor", body = ErrorBody),
    )
)]
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    const FAILED: &str = "no se pudo crear el actor";
    let body = json_body(body).map_err(fail(FAILED))?;
    let actor = state
        .catalog
        .create::<Actor>(&body)
        .await
        .map_err(fail(FAILED))?;
    Ok(created(actor))
}

/// Obtener un actor por ID.
#[utoipa::path(
    get,
    path = "/actors/{actor_id}",
    tag = "actors",
    params(("actor_id" = i32, Path, description = "ID del actor")),
    responses(
        (status = 200, description = "Datos del actor", body = Actor),
        (status = 404, description = "Actor no encontrado", body = ErrorBody),
        (status = 500, description = "Error al traer el actor", body = ErrorBody),
    )
)]
pub async fn read(
    State(state): State<AppState>,
    Path(actor_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    const FAILED: &str = "No se pudo obtener el actor";
    let id = parse_id(&actor_id).map_err(fail(FAILED))?;
    let actor = state
        .catalog
        .get_by_key::<Actor>(id)
        .await
        .map_err(fail(FAILED))?
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))?;
    Ok(ok(actor))
}

/// Obtener las películas de un actor por su ID.
#[utoipa::path(
    get,
    path = "/actors/{actor_id}/films",
    tag = "actors",
    params(("actor_id" = i32, Path, description = "ID del actor")),
    responses(
        (status = 200, description = "Actor con sus películas", body = ActorWithFilms),
        (status = 404, description = "Actor no encontrado", body = ErrorBody),
        (status = 500, description = "Error al obtener las películas del actor", body = ErrorBody),
    )
)]
pub async fn read_with_films(
    State(state): State<AppState>,
    Path(actor_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    const FAILED: &str = "no se pudieron obtener las películas del actor";
    let id = parse_id(&actor_id).map_err(fail(FAILED))?;
    let actor = state
        .catalog
        .get_with_related::<Actor>(id)
        .await
        .map_err(fail(FAILED))?
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))?;
    Ok(ok(actor))
}

/// Asociar una película a un actor. Cada llamada crea un vínculo nuevo.
#[utoipa::path(
    post,
    path = "/actors/{actor_id}/films/{film_id}",
    tag = "actors",
    params(
        ("actor_id" = i32, Path, description = "ID del actor"),
        ("film_id" = i32, Path, description = "ID de la película"),
    ),
    responses(
        (status = 201, description = "Película asociada al actor", body = FilmActor),
        (status = 400, description = "ID inválido", body = ErrorBody),
        (status = 409, description = "El actor o la película no existen", body = ErrorBody),
        (status = 500, description = "Error al asociar la película", body = ErrorBody),
    )
)]
pub async fn attach_film(
    State(state): State<AppState>,
    Path((actor_id, film_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    const FAILED: &str = "no se pudo asociar la película al actor";
    let actor_id = parse_id(&actor_id).map_err(fail(FAILED))?;
    let film_id = parse_id(&film_id).map_err(fail(FAILED))?;
    let link = state
        .catalog
        .attach(actor_id, film_id)
        .await
        .map_err(fail(FAILED))?;
    Ok(created(link))
}

/// Actualizar un actor.
#[utoipa::path(
    put,
    path = "/actors/{actor_id}",
    tag = "actors",
    params(("actor_id" = i32, Path, description = "ID del actor")),
    request_body = ActorInput,
    responses(
        (status = 200, description = "Actor actualizado exitosamente", body = Actor),
        (status = 404, description = "Actor no encontrado", body = ErrorBody),
        (status = 400, description = "Cuerpo inválido", body = ErrorBody),
        (status = 422, description = "Falta un campo requerido", body = ErrorBody),
        (status = 500, description = "Error al actualizar el actor", body = ErrorBody),
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(actor_id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    const FAILED: &str = "No se pudo actualizar el actor";
    let id = parse_id(&actor_id).map_err(fail(FAILED))?;
    let body = json_body(body).map_err(fail(FAILED))?;
    let actor = state
        .catalog
        .update::<Actor>(id, &body)
        .await
        .map_err(fail(FAILED))?
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))?;
    Ok(ok(actor))
}

/// Eliminar un actor. Sus vínculos con películas se eliminan con él.
#[utoipa::path(
    delete,
    path = "/actors/{actor_id}",
    tag = "actors",
    params(("actor_id" = i32, Path, description = "ID del actor")),
    responses(
        (status = 204, description = "Actor eliminado exitosamente"),
        (status = 404, description = "Actor no encontrado", body = ErrorBody),
        (status = 500, description = "Error al eliminar el actor", body = ErrorBody),
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    Path(actor_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    const FAILED: &str = "No se pudo eliminar el actor";
    let id = parse_id(&actor_id).map_err(fail(FAILED))?;
    state
        .catalog
        .delete::<Actor>(id)
        .await
        .map_err(fail(FAILED))?
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))?;
    Ok(StatusCode::NO_CONTENT)
}
