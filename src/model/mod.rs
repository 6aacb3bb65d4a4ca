//! Entity definitions, the actor/film association and the typed records.

pub mod actor;
pub mod association;
pub mod film;
pub mod film_actor;
pub mod schema;

pub use actor::{Actor, ActorInput, ActorWithFilms};
pub use association::{Include, ManyToMany, Related, ACTOR_FILMS};
pub use film::{Film, FilmInput, FilmWithActors};
pub use film_actor::FilmActor;
pub use schema::{ColumnDef, ColumnKind, Entity, EntityDef, ForeignKey, ACTOR, ALL_ENTITIES, FILM, FILM_ACTOR};
