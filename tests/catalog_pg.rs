//! End-to-end scenarios against a live PostgreSQL server.
//!
//! Run with `DATABASE_URL=postgres://... cargo test -- --ignored`. Each test
//! works in its own schema, dropped afterwards.

mod common;

use axum::http::StatusCode;
use axum::Router;
use common::{delete, get, post, put};
use film_catalog::{app, apply_migrations, seed_demo, AppError, AppState, Catalog};
use serde_json::{json, Value};
use sqlx::PgPool;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};

static SCHEMA_SEQ: AtomicUsize = AtomicUsize::new(0);

struct TestDb {
    pool: PgPool,
    schema: String,
    catalog: Catalog,
    router: Router,
}

impl TestDb {
    async fn new() -> Self {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for database tests");
        let pool = PgPool::connect(&url).await.expect("connect");
        let schema = format!(
            "catalog_test_{}_{}",
            std::process::id(),
            SCHEMA_SEQ.fetch_add(1, Ordering::SeqCst)
        );
        apply_migrations(&pool, &schema).await.expect("migrate");
        let catalog = Catalog::new(pool.clone(), schema.clone());
        let router = app(AppState::new(catalog.clone()));
        TestDb {
            pool,
            schema,
            catalog,
            router,
        }
    }

    async fn drop_schema(self) {
        sqlx::query(&format!("DROP SCHEMA \"{}\" CASCADE", self.schema))
            .execute(&self.pool)
            .await
            .expect("drop schema");
    }
}

fn id_of(body: &Value, key: &str) -> i64 {
    body[key].as_i64().unwrap_or_else(|| panic!("missing {key} in {body}"))
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn empty_store_lists_are_not_found() {
    let db = TestDb::new().await;
    let (status, body) = get(&db.router, "/actors").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "No se encontraron actores para listar" }));

    let (status, body) = get(&db.router, "/films").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "No se encontraron películas para listar");

    let (status, _) = get(&db.router, "/actors/films").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    db.drop_schema().await;
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn create_then_read_actor() {
    let db = TestDb::new().await;
    let (status, first) = post(&db.router, "/actors", json!({ "first_name": "Leo", "last_name": "Di Caprio" })).await;
    assert_eq!(status, StatusCode::CREATED);
    let (_, second) = post(&db.router, "/actors", json!({ "first_name": "Kate", "last_name": "Winslet" })).await;
    assert_ne!(id_of(&first, "actor_id"), id_of(&second, "actor_id"));

    let (status, body) = get(&db.router, &format!("/actors/{}", id_of(&first, "actor_id"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, first);
    assert_eq!(body["first_name"], "Leo");

    let (status, list) = get(&db.router, "/actors").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().map(Vec::len), Some(2));
    db.drop_schema().await;
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn delete_then_read_is_not_found() {
    let db = TestDb::new().await;
    let (_, film) = post(&db.router, "/films", json!({ "title": "Titanic", "release_year": 1997 })).await;
    let uri = format!("/films/{}", id_of(&film, "film_id"));

    let (status, body) = delete(&db.router, &uri).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, body) = get(&db.router, &uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Película no encontrada");

    let (status, _) = delete(&db.router, &uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    db.drop_schema().await;
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn update_missing_key_creates_nothing() {
    let db = TestDb::new().await;
    let (status, body) = put(&db.router, "/actors/4242", json!({ "first_name": "Leo", "last_name": "Di Caprio" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Actor no encontrado");
    assert!(db.catalog.list_all::<film_catalog::Actor>().await.unwrap().is_empty());
    db.drop_schema().await;
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn update_replaces_every_field() {
    let db = TestDb::new().await;
    let (_, film) = post(
        &db.router,
        "/films",
        json!({ "title": "Inceptio", "description": "typo", "release_year": 2009 }),
    )
    .await;
    let uri = format!("/films/{}", id_of(&film, "film_id"));
    let (status, body) = put(&db.router, &uri, json!({ "title": "Inception", "release_year": 2010 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["film_id"], film["film_id"]);
    assert_eq!(body["title"], "Inception");
    assert_eq!(body["description"], Value::Null);
    assert_eq!(body["release_year"], 2010);
    db.drop_schema().await;
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn bulk_create_assigns_distinct_ids() {
    let db = TestDb::new().await;
    let items = json!([
        { "first_name": "Leo", "last_name": "Di Caprio" },
        { "first_name": "Kate", "last_name": "Winslet" },
        { "first_name": "Tom", "last_name": "Hardy" }
    ]);
    let (status, body) = post(&db.router, "/actors/bulk", items).await;
    assert_eq!(status, StatusCode::CREATED);
    let created = body.as_array().expect("array");
    assert_eq!(created.len(), 3);
    let ids: HashSet<i64> = created.iter().map(|a| id_of(a, "actor_id")).collect();
    assert_eq!(ids.len(), 3);
    assert_eq!(created[2]["first_name"], "Tom");
    db.drop_schema().await;
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn attach_then_list_films_of_actor() {
    let db = TestDb::new().await;
    let (actor, film, _) = seed_demo(&db.catalog).await.expect("seed");

    let (status, body) = get(&db.router, &format!("/actors/{}/films", actor.actor_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["first_name"], "Leo");
    let films = body["Films"].as_array().expect("Films array");
    assert_eq!(films.len(), 1);
    assert_eq!(films[0]["title"], "Inception");
    assert_eq!(films[0]["release_year"], 2010);

    let (status, body) = get(&db.router, &format!("/films/{}/actors", film.film_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["Actors"][0]["last_name"], "Di Caprio");
    db.drop_schema().await;
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn repeated_attach_duplicates_links() {
    let db = TestDb::new().await;
    let (actor, film, _) = seed_demo(&db.catalog).await.expect("seed");
    let uri = format!("/actors/{}/films/{}", actor.actor_id, film.film_id);
    for _ in 0..2 {
        let (status, link) = post(&db.router, &uri, json!(null)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(link["film_id"], film.film_id);
    }
    let with_films = db.catalog.get_with_related::<film_catalog::Actor>(actor.actor_id).await.unwrap().unwrap();
    assert_eq!(with_films.films.len(), 3);
    assert!(with_films.films.iter().all(|f| f.film_id == film.film_id));
    db.drop_schema().await;
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn attach_to_missing_film_is_reference_error() {
    let db = TestDb::new().await;
    let (_, actor) = post(&db.router, "/actors", json!({ "first_name": "Leo", "last_name": "Di Caprio" })).await;
    let actor_id = id_of(&actor, "actor_id") as i32;
    let err = db.catalog.attach(actor_id, 9999).await.unwrap_err();
    assert!(matches!(err, AppError::Reference(_)), "{err:?}");

    let (status, body) = post(&db.router, &format!("/actors/{actor_id}/films/9999"), json!(null)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "no se pudo asociar la película al actor");
    db.drop_schema().await;
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn with_related_lists_always_carry_collection() {
    let db = TestDb::new().await;
    seed_demo(&db.catalog).await.expect("seed");
    post(&db.router, "/actors", json!({ "first_name": "Kate", "last_name": "Winslet" })).await;
    post(&db.router, "/films", json!({ "title": "Titanic" })).await;

    let (status, actors) = get(&db.router, "/actors/films").await;
    assert_eq!(status, StatusCode::OK);
    let actors = actors.as_array().expect("array");
    assert_eq!(actors.len(), 2);
    assert_eq!(actors[0]["Films"].as_array().map(Vec::len), Some(1));
    assert_eq!(actors[1]["Films"], json!([]));

    let (status, films) = get(&db.router, "/films/actors").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(films[1]["Actors"], json!([]));
    db.drop_schema().await;
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn deleting_actor_removes_links() {
    let db = TestDb::new().await;
    let (actor, film, _) = seed_demo(&db.catalog).await.expect("seed");
    let (status, _) = delete(&db.router, &format!("/actors/{}", actor.actor_id)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let film = db.catalog.get_with_related::<film_catalog::Film>(film.film_id).await.unwrap().unwrap();
    assert!(film.actors.is_empty());
    db.drop_schema().await;
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn bulk_create_is_all_or_nothing() {
    let db = TestDb::new().await;
    let items: Vec<Value> = vec![
        json!({ "first_name": "Leo", "last_name": "Di Caprio" }),
        json!({ "first_name": "Kate", "last_name": null }),
    ];
    let err = db.catalog.bulk_create::<film_catalog::Actor>(&items).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert!(db.catalog.list_all::<film_catalog::Actor>().await.unwrap().is_empty());
    db.drop_schema().await;
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn ready_requires_migrated_tables() {
    let db = TestDb::new().await;
    let (status, body) = get(&db.router, "/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok", "catalog": "ready" }));

    let bare = Catalog::new(db.pool.clone(), format!("{}_bare", db.schema));
    assert!(matches!(bare.check_ready().await, Err(AppError::Config(_))));
    db.drop_schema().await;
}
