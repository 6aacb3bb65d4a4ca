//! Builds parameterized SELECT, INSERT, UPDATE, DELETE from entity definitions.

use crate::model::{EntityDef, Include};
use crate::sql::params::FieldValue;

const MAIN_ALIAS: &str = "main";
const RELATED_ALIAS: &str = "rel";
const LINK_ALIAS: &str = "link";

/// Quote identifier for PostgreSQL (safe: only from entity definitions and settings).
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Full qualified table name.
pub fn qualified_table(schema: &str, table: &str) -> String {
    format!("{}.{}", quoted(schema), quoted(table))
}

#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<FieldValue>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: FieldValue) -> usize {
        self.params.push(v);
        self.params.len()
    }
}

/// Column list in declaration order, optionally prefixed by a table alias.
fn select_column_list(entity: &EntityDef, alias: Option<&str>) -> String {
    entity
        .columns
        .iter()
        .map(|c| match alias {
            Some(a) => format!("{}.{}", a, quoted(c.name)),
            None => quoted(c.name),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// SELECT every row ordered by primary key.
pub fn select_all(entity: &EntityDef, schema: &str) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!(
        "SELECT {} FROM {} ORDER BY {}",
        select_column_list(entity, None),
        qualified_table(schema, entity.table),
        quoted(entity.primary_key)
    );
    q
}

/// SELECT by primary key.
pub fn select_by_id(entity: &EntityDef, schema: &str, id: i32) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(FieldValue::key(id));
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} = ${}",
        select_column_list(entity, None),
        qualified_table(schema, entity.table),
        quoted(entity.primary_key),
        n
    );
    q
}

/// Root rows (all, or the one with primary key `id`) each with its related
/// collection as a JSON array column named after the include. The collection
/// is a correlated scalar subquery over the join table, so every root gets
/// exactly one array, `[]` when nothing is linked. One element per link row,
/// in link creation order.
pub fn select_with_related(include: &Include, schema: &str, id: Option<i32>) -> QueryBuf {
    let mut q = QueryBuf::new();
    let root = include.root;
    let related = include.related;

    let mut select_parts: Vec<String> = root
        .columns
        .iter()
        .map(|c| format!("{}.{} AS {}", MAIN_ALIAS, quoted(c.name), quoted(c.name)))
        .collect();

    let related_table = qualified_table(schema, related.table);
    let link_table = qualified_table(schema, include.through.table);
    let subquery = format!(
        "(SELECT COALESCE(json_agg(row_to_json(sub)), '[]'::json) FROM (\
         SELECT {cols} FROM {related_table} {rel} \
         INNER JOIN {link_table} {link} ON {link}.{related_fk} = {rel}.{related_pk} \
         WHERE {link}.{root_fk} = {main}.{root_pk} \
         ORDER BY {link}.{link_pk}) sub)",
        cols = select_column_list(related, Some(RELATED_ALIAS)),
        rel = RELATED_ALIAS,
        link = LINK_ALIAS,
        main = MAIN_ALIAS,
        related_fk = quoted(include.related_fk),
        related_pk = quoted(related.primary_key),
        root_fk = quoted(include.root_fk),
        root_pk = quoted(root.primary_key),
        link_pk = quoted(include.through.primary_key),
    );
    select_parts.push(format!("{} AS {}", subquery, quoted(include.name)));

    let where_clause = match id {
        Some(id) => {
            let n = q.push_param(FieldValue::key(id));
            format!(" WHERE {}.{} = ${}", MAIN_ALIAS, quoted(root.primary_key), n)
        }
        None => String::new(),
    };

    q.sql = format!(
        "SELECT {} FROM {} {}{} ORDER BY {}.{}",
        select_parts.join(", "),
        qualified_table(schema, root.table),
        MAIN_ALIAS,
        where_clause,
        MAIN_ALIAS,
        quoted(root.primary_key)
    );
    q
}

/// INSERT one row. `values` holds (column, value) for every column written;
/// generated columns are left to the store.
pub fn insert(entity: &EntityDef, schema: &str, values: &[(&str, FieldValue)]) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut cols = Vec::with_capacity(values.len());
    let mut placeholders = Vec::with_capacity(values.len());
    for (name, v) in values {
        let Some(c) = entity.column(name) else { continue };
        if c.generated {
            continue;
        }
        let n = q.push_param(v.clone());
        cols.push(quoted(c.name));
        placeholders.push(format!("${}", n));
    }
    let table = qualified_table(schema, entity.table);
    let returning = select_column_list(entity, None);
    q.sql = if cols.is_empty() {
        format!("INSERT INTO {} DEFAULT VALUES RETURNING {}", table, returning)
    } else {
        format!(
            "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
            table,
            cols.join(", "),
            placeholders.join(", "),
            returning
        )
    };
    q
}

/// UPDATE by id: SET the given writable columns, return the updated row.
/// With nothing to set this degrades to a SELECT so "not found" still surfaces.
pub fn update(entity: &EntityDef, schema: &str, id: i32, values: &[(&str, FieldValue)]) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut sets = Vec::with_capacity(values.len());
    for (name, v) in values {
        let Some(c) = entity.column(name) else { continue };
        if c.generated {
            continue;
        }
        let n = q.push_param(v.clone());
        sets.push(format!("{} = ${}", quoted(c.name), n));
    }
    if sets.is_empty() {
        return select_by_id(entity, schema, id);
    }
    let id_param = q.push_param(FieldValue::key(id));
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = ${} RETURNING {}",
        qualified_table(schema, entity.table),
        sets.join(", "),
        quoted(entity.primary_key),
        id_param,
        select_column_list(entity, None)
    );
    q
}

/// DELETE by id, returning the removed row.
pub fn delete(entity: &EntityDef, schema: &str, id: i32) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(FieldValue::key(id));
    q.sql = format!(
        "DELETE FROM {} WHERE {} = ${} RETURNING {}",
        qualified_table(schema, entity.table),
        quoted(entity.primary_key),
        n,
        select_column_list(entity, None)
    );
    q
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Actor, Film, Related, ACTOR, FILM, FILM_ACTOR};

    #[test]
    fn select_all_orders_by_primary_key() {
        let q = select_all(&ACTOR, "public");
        assert_eq!(
            q.sql,
            r#"SELECT "actor_id", "first_name", "last_name" FROM "public"."actor" ORDER BY "actor_id""#
        );
        assert!(q.params.is_empty());
    }

    #[test]
    fn select_by_id_binds_key() {
        let q = select_by_id(&FILM, "catalog", 7);
        assert!(q.sql.ends_with(r#"FROM "catalog"."film" WHERE "film_id" = $1"#));
        assert_eq!(q.params, vec![FieldValue::Int(Some(7))]);
    }

    #[test]
    fn related_subquery_joins_through_link_table() {
        let q = select_with_related(&Actor::include(), "public", None);
        assert!(q.sql.contains(r#"COALESCE(json_agg(row_to_json(sub)), '[]'::json)"#));
        assert!(q.sql.contains(
            r#"INNER JOIN "public"."film_actor" link ON link."film_id" = rel."film_id""#
        ));
        assert!(q.sql.contains(r#"WHERE link."actor_id" = main."actor_id""#));
        assert!(q.sql.contains(r#"ORDER BY link."id") sub) AS "Films""#));
        assert!(q.sql.ends_with(r#"FROM "public"."actor" main ORDER BY main."actor_id""#));
        assert!(q.params.is_empty());
    }

    #[test]
    fn related_by_id_filters_root() {
        let q = select_with_related(&Film::include(), "public", Some(3));
        assert!(q.sql.contains(r#"SELECT rel."actor_id", rel."first_name", rel."last_name" FROM "public"."actor" rel"#));
        assert!(q.sql.contains(r#"WHERE link."film_id" = main."film_id""#));
        assert!(q.sql.contains(r#"AS "Actors" FROM "public"."film" main WHERE main."film_id" = $1"#));
        assert_eq!(q.params, vec![FieldValue::Int(Some(3))]);
    }

    #[test]
    fn insert_skips_generated_key() {
        let values = [
            ("actor_id", FieldValue::Int(Some(99))),
            ("first_name", FieldValue::Text(Some("Leo".into()))),
            ("last_name", FieldValue::Text(Some("Di Caprio".into()))),
        ];
        let q = insert(&ACTOR, "public", &values);
        assert_eq!(
            q.sql,
            r#"INSERT INTO "public"."actor" ("first_name", "last_name") VALUES ($1, $2) RETURNING "actor_id", "first_name", "last_name""#
        );
        assert_eq!(q.params.len(), 2);
    }

    #[test]
    fn insert_link_row() {
        let values = [("actor_id", FieldValue::key(1)), ("film_id", FieldValue::key(2))];
        let q = insert(&FILM_ACTOR, "public", &values);
        assert!(q.sql.starts_with(r#"INSERT INTO "public"."film_actor" ("actor_id", "film_id") VALUES ($1, $2)"#));
    }

    #[test]
    fn update_binds_key_last() {
        let values = [
            ("title", FieldValue::Text(Some("Inception".into()))),
            ("description", FieldValue::Text(None)),
            ("release_year", FieldValue::Int(Some(2010))),
        ];
        let q = update(&FILM, "public", 4, &values);
        assert!(q.sql.starts_with(
            r#"UPDATE "public"."film" SET "title" = $1, "description" = $2, "release_year" = $3 WHERE "film_id" = $4"#
        ));
        assert_eq!(q.params.last(), Some(&FieldValue::Int(Some(4))));
    }

    #[test]
    fn update_without_values_reads_row() {
        let q = update(&ACTOR, "public", 4, &[]);
        assert!(q.sql.starts_with("SELECT"));
        assert_eq!(q.params, vec![FieldValue::Int(Some(4))]);
    }

    #[test]
    fn delete_returns_row() {
        let q = delete(&FILM, "public", 5);
        assert!(q.sql.starts_with(r#"DELETE FROM "public"."film" WHERE "film_id" = $1 RETURNING"#));
    }

    #[test]
    fn identifiers_are_escaped() {
        assert_eq!(qualified_table("a\"b", "t"), r#""a""b"."t""#);
    }
}
