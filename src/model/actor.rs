use crate::model::association::{Include, Related, ACTOR_FILMS};
use crate::model::film::Film;
use crate::model::schema::{Entity, EntityDef, ACTOR};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::{FromRow, Row};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Actor {
    /// Unique actor id, assigned on creation.
    #[schema(example = 1)]
    pub actor_id: i32,
    #[schema(example = "John")]
    pub first_name: String,
    #[schema(example = "Doe")]
    pub last_name: String,
}

/// Request body for creating or replacing an actor.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ActorInput {
    #[schema(example = "John")]
    pub first_name: String,
    #[schema(example = "Doe")]
    pub last_name: String,
}

/// An actor together with every film it is linked to.
#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct ActorWithFilms {
    #[serde(flatten)]
    pub actor: Actor,
    #[serde(rename = "Films")]
    pub films: Vec<Film>,
}

impl<'r> FromRow<'r, PgRow> for ActorWithFilms {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let Json(films) = row.try_get::<Json<Vec<Film>>, _>(Actor::include().name)?;
        Ok(ActorWithFilms {
            actor: Actor::from_row(row)?,
            films,
        })
    }
}

impl Entity for Actor {
    fn def() -> &'static EntityDef {
        &ACTOR
    }
}

impl Related for Actor {
    type WithRelated = ActorWithFilms;

    fn include() -> Include {
        ACTOR_FILMS.from_left("Films")
    }
}
