//! Demo data: one actor linked to one film.

use crate::error::AppError;
use crate::model::{Actor, Film, FilmActor};
use crate::service::Catalog;
use serde_json::json;

const INCEPTION_DESCRIPTION: &str = "Dom Cobb es un ladrón con una extraña habilidad para entrar a los sueños \
de la gente y robarles los secretos de sus subconscientes. Su habilidad lo ha vuelto muy popular en el mundo \
del espionaje corporativo, pero ha tenido un gran costo en la gente que ama. Cobb obtiene la oportunidad de redimirse";

/// Create Leo Di Caprio and Inception and attach them. Runs every time it is
/// called; nothing checks for an earlier seed.
pub async fn seed_demo(catalog: &Catalog) -> Result<(Actor, Film, FilmActor), AppError> {
    let actor: Actor = catalog
        .create(&json!({ "first_name": "Leo", "last_name": "Di Caprio" }))
        .await?;
    let film: Film = catalog
        .create(&json!({
            "title": "Inception",
            "description": INCEPTION_DESCRIPTION,
            "release_year": 2010
        }))
        .await?;
    let link = catalog.attach(actor.actor_id, film.film_id).await?;
    tracing::info!(actor_id = actor.actor_id, film_id = film.film_id, "demo data seeded");
    Ok((actor, film, link))
}
