//! Actor and film routes. Static segments (`/films`, `/bulk`, `/actors`) win over `:id`.

use crate::handlers::{actors, films};
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn actor_routes(state: AppState) -> Router {
    Router::new()
        .route("/actors", get(actors::list).post(actors::create))
        .route("/actors/films", get(actors::list_with_films))
        .route("/actors/bulk", post(actors::bulk_create))
        .route(
            "/actors/:actor_id",
            get(actors::read).put(actors::update).delete(actors::delete),
        )
        .route("/actors/:actor_id/films", get(actors::read_with_films))
        .route("/actors/:actor_id/films/:film_id", post(actors::attach_film))
        .with_state(state)
}

pub fn film_routes(state: AppState) -> Router {
    Router::new()
        .route("/films", get(films::list).post(films::create))
        .route("/films/actors", get(films::list_with_actors))
        .route(
            "/films/:film_id",
            get(films::read).put(films::update).delete(films::delete),
        )
        .route("/films/:film_id/actors", get(films::read_with_actors))
        .with_state(state)
}
