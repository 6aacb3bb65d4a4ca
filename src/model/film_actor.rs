use crate::model::schema::{Entity, EntityDef, FILM_ACTOR};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Link between one actor and one film. Created only by attach.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct FilmActor {
    pub id: i32,
    #[schema(example = 1)]
    pub actor_id: i32,
    #[schema(example = 1)]
    pub film_id: i32,
}

impl Entity for FilmActor {
    fn def() -> &'static EntityDef {
        &FILM_ACTOR
    }
}
