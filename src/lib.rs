//! Film catalog: actors, films and their many-to-many links over PostgreSQL,
//! exposed as a REST API with a generated OpenAPI document.

pub mod config;
pub mod error;
pub mod handlers;
pub mod migration;
pub mod model;
pub mod openapi;
pub mod response;
pub mod routes;
pub mod seed;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::Settings;
pub use error::{ApiError, AppError, ErrorBody};
pub use migration::apply_migrations;
pub use model::{Actor, ActorWithFilms, Film, FilmActor, FilmWithActors};
pub use routes::{actor_routes, app, common_routes_with_ready, docs_routes, film_routes};
pub use seed::seed_demo;
pub use service::Catalog;
pub use state::AppState;
pub use store::{connect, ensure_database_exists};
