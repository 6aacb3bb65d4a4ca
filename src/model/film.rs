use crate::model::actor::Actor;
use crate::model::association::{Include, Related, ACTOR_FILMS};
use crate::model::schema::{Entity, EntityDef, FILM};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::{FromRow, Row};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Film {
    /// Unique film id, assigned on creation.
    #[schema(example = 1)]
    pub film_id: i32,
    #[schema(example = "Avengers")]
    pub title: String,
    #[schema(example = "Superhero movie")]
    pub description: Option<String>,
    #[schema(example = 2012)]
    pub release_year: Option<i32>,
}

/// Request body for creating or replacing a film.
#[derive(Debug, Deserialize, ToSchema)]
pub struct FilmInput {
    #[schema(example = "Avengers")]
    pub title: String,
    #[schema(example = "Superhero movie")]
    pub description: Option<String>,
    #[schema(example = 2012)]
    pub release_year: Option<i32>,
}

#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct FilmWithActors {
    #[serde(flatten)]
    pub film: Film,
    #[serde(rename = "Actors")]
    pub actors: Vec<Actor>,
}

impl<'r> FromRow<'r, PgRow> for FilmWithActors {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let Json(actors) = row.try_get::<Json<Vec<Actor>>, _>(Film::include().name)?;
        Ok(FilmWithActors {
            film: Film::from_row(row)?,
            actors,
        })
    }
}

impl Entity for Film {
    fn def() -> &'static EntityDef {
        &FILM
    }
}

impl Related for Film {
    type WithRelated = FilmWithActors;

    fn include() -> Include {
        ACTOR_FILMS.from_right("Actors")
    }
}
