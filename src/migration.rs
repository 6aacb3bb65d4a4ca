//! Create the catalog schema and tables from the entity definitions.
//! Tables are created in dependency order; every statement is idempotent (IF NOT EXISTS).

use crate::error::AppError;
use crate::model::{ColumnDef, ColumnKind, EntityDef, ALL_ENTITIES};
use crate::sql::qualified_table;
use sqlx::PgPool;

fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

fn column_ddl(schema: &str, entity: &EntityDef, c: &ColumnDef) -> String {
    let typ = if c.generated && c.kind == ColumnKind::Integer {
        "SERIAL"
    } else {
        c.kind.pg_type()
    };
    let mut def = format!("{} {}", quote(c.name), typ);
    if c.name == entity.primary_key {
        def.push_str(" PRIMARY KEY");
    } else if !c.nullable {
        def.push_str(" NOT NULL");
    }
    if let Some(fk) = c.references {
        def.push_str(&format!(
            " REFERENCES {} ({}) ON DELETE CASCADE",
            qualified_table(schema, fk.table),
            quote(fk.column)
        ));
    }
    def
}

/// CREATE TABLE statement for one entity.
pub fn create_table_sql(schema: &str, entity: &EntityDef) -> String {
    let cols: Vec<String> = entity
        .columns
        .iter()
        .map(|c| column_ddl(schema, entity, c))
        .collect();
    format!(
        "CREATE TABLE IF NOT EXISTS {} ({})",
        qualified_table(schema, entity.table),
        cols.join(", ")
    )
}

/// Index statements for foreign key columns (the join table's lookups).
pub fn index_sql(schema: &str, entity: &EntityDef) -> Vec<String> {
    entity
        .columns
        .iter()
        .filter(|c| c.references.is_some())
        .map(|c| {
            format!(
                "CREATE INDEX IF NOT EXISTS {} ON {} ({})",
                quote(&format!("{}_{}_idx", entity.table, c.name)),
                qualified_table(schema, entity.table),
                quote(c.name)
            )
        })
        .collect()
}

/// Ensure `schema` and all catalog tables exist.
pub async fn apply_migrations(pool: &PgPool, schema: &str) -> Result<(), AppError> {
    sqlx::query(&format!("CREATE SCHEMA IF NOT EXISTS {}", quote(schema)))
        .execute(pool)
        .await?;
    for entity in ALL_ENTITIES {
        let ddl = create_table_sql(schema, entity);
        tracing::debug!(sql = %ddl, "migration");
        sqlx::query(&ddl).execute(pool).await?;
        for idx in index_sql(schema, entity) {
            sqlx::query(&idx).execute(pool).await?;
        }
    }
    tracing::info!(schema, "catalog tables ready");
    Ok(())
}
