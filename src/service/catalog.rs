//! Data access for actors, films and their links, against PostgreSQL.

use crate::error::AppError;
use crate::model::{Entity, FilmActor, Related, ACTOR_FILMS, ALL_ENTITIES};
use crate::service::validation::RequestValidator;
use crate::sql::{
    delete, insert, qualified_table, select_all, select_by_id, select_with_related, update, FieldValue, QueryBuf,
};
use serde_json::Value;
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::QueryAs;
use sqlx::{FromRow, PgPool, Postgres};

/// Upper bound on items accepted by one bulk create.
pub const BULK_LIMIT: usize = 100;

/// Store handle plus the schema holding the catalog tables. Cheap to clone.
#[derive(Clone, Debug)]
pub struct Catalog {
    pool: PgPool,
    schema: String,
}

impl Catalog {
    pub fn new(pool: PgPool, schema: impl Into<String>) -> Self {
        Catalog {
            pool,
            schema: schema.into(),
        }
    }

    /// Ok when the store answers and every catalog table exists in the schema.
    pub async fn check_ready(&self) -> Result<(), AppError> {
        for entity in ALL_ENTITIES {
            let table = qualified_table(&self.schema, entity.table);
            let (found,): (Option<String>,) = sqlx::query_as("SELECT to_regclass($1)::text")
                .bind(&table)
                .fetch_one(&self.pool)
                .await?;
            if found.is_none() {
                return Err(AppError::Config(format!("table {} is missing", table)));
            }
        }
        Ok(())
    }

    /// Every row ordered by primary key. Empty is a valid result.
    pub async fn list_all<E: Entity>(&self) -> Result<Vec<E>, AppError> {
        let q = select_all(E::def(), &self.schema);
        Ok(prepare::<E>(&q).fetch_all(&self.pool).await?)
    }

    /// One row by primary key; `None` when absent.
    pub async fn get_by_key<E: Entity>(&self, key: i32) -> Result<Option<E>, AppError> {
        let q = select_by_id(E::def(), &self.schema, key);
        Ok(prepare::<E>(&q).fetch_optional(&self.pool).await?)
    }

    /// One row with its related collection; `None` when absent.
    pub async fn get_with_related<E: Related>(&self, key: i32) -> Result<Option<E::WithRelated>, AppError> {
        let q = select_with_related(&E::include(), &self.schema, Some(key));
        Ok(prepare::<E::WithRelated>(&q).fetch_optional(&self.pool).await?)
    }

    /// Every row with its related collection, in a single query.
    pub async fn list_with_related<E: Related>(&self) -> Result<Vec<E::WithRelated>, AppError> {
        let q = select_with_related(&E::include(), &self.schema, None);
        Ok(prepare::<E::WithRelated>(&q).fetch_all(&self.pool).await?)
    }

    /// Validate `body` and insert it. Returns the row with its assigned key.
    pub async fn create<E: Entity>(&self, body: &Value) -> Result<E, AppError> {
        let values = RequestValidator::validate_value(body, E::def())?;
        let q = insert(E::def(), &self.schema, &values);
        let row: E = prepare::<E>(&q).fetch_one(&self.pool).await?;
        tracing::info!(entity = E::def().name, "created");
        Ok(row)
    }

    /// Insert many rows, all or nothing: every body is validated before the
    /// first insert and the inserts share one transaction.
    pub async fn bulk_create<E: Entity>(&self, bodies: &[Value]) -> Result<Vec<E>, AppError> {
        if bodies.len() > BULK_LIMIT {
            return Err(AppError::BadRequest(format!(
                "bulk create limited to {} items",
                BULK_LIMIT
            )));
        }
        let rows = bodies
            .iter()
            .map(|b| RequestValidator::validate_value(b, E::def()))
            .collect::<Result<Vec<_>, _>>()?;

        let mut out = Vec::with_capacity(rows.len());
        let mut tx = self.pool.begin().await?;
        for values in &rows {
            let q = insert(E::def(), &self.schema, values);
            let row: E = prepare::<E>(&q).fetch_one(&mut *tx).await?;
            out.push(row);
        }
        tx.commit().await?;
        tracing::info!(entity = E::def().name, count = out.len(), "bulk created");
        Ok(out)
    }

    /// Replace every writable column of the row with key `key`. Absent optional
    /// fields become NULL. `None` when the row does not exist; nothing is created.
    pub async fn update<E: Entity>(&self, key: i32, body: &Value) -> Result<Option<E>, AppError> {
        let values = RequestValidator::validate_value(body, E::def())?;
        let q = update(E::def(), &self.schema, key, &values);
        Ok(prepare::<E>(&q).fetch_optional(&self.pool).await?)
    }

    /// Remove the row with key `key`, returning it; `None` when absent.
    /// Link rows pointing at it go with it (ON DELETE CASCADE).
    pub async fn delete<E: Entity>(&self, key: i32) -> Result<Option<E>, AppError> {
        let q = delete(E::def(), &self.schema, key);
        let row = prepare::<E>(&q).fetch_optional(&self.pool).await?;
        if row.is_some() {
            tracing::info!(entity = E::def().name, key, "deleted");
        }
        Ok(row)
    }

    /// Link an actor to a film. Not idempotent: every call adds a link row.
    /// Fails with `Reference` when either key does not exist.
    pub async fn attach(&self, actor_key: i32, film_key: i32) -> Result<FilmActor, AppError> {
        let values = [
            (ACTOR_FILMS.left_key, FieldValue::key(actor_key)),
            (ACTOR_FILMS.right_key, FieldValue::key(film_key)),
        ];
        let q = insert(ACTOR_FILMS.through, &self.schema, &values);
        let link: FilmActor = prepare::<FilmActor>(&q).fetch_one(&self.pool).await?;
        tracing::info!(actor_id = actor_key, film_id = film_key, "attached");
        Ok(link)
    }
}

/// Bind the buffer's params in order onto a typed query.
fn prepare<'q, T>(q: &'q QueryBuf) -> QueryAs<'q, Postgres, T, PgArguments>
where
    T: for<'r> FromRow<'r, PgRow>,
{
    tracing::debug!(sql = %q.sql, params = ?q.params, "query");
    let mut query = sqlx::query_as::<Postgres, T>(&q.sql);
    for p in &q.params {
        query = query.bind(p.clone());
    }
    query
}
