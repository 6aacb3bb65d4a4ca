//! Static entity definitions: tables, columns, keys. Drives SQL building, DDL and validation.

use serde::Serialize;
use sqlx::postgres::PgRow;
use sqlx::FromRow;

/// Column storage kind. Maps onto a PostgreSQL type and a JSON type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnKind {
    Integer,
    Text,
}

impl ColumnKind {
    pub fn pg_type(self) -> &'static str {
        match self {
            ColumnKind::Integer => "INTEGER",
            ColumnKind::Text => "TEXT",
        }
    }
}

/// Foreign key target of a column.
#[derive(Clone, Copy, Debug)]
pub struct ForeignKey {
    pub table: &'static str,
    pub column: &'static str,
}

#[derive(Clone, Copy, Debug)]
pub struct ColumnDef {
    pub name: &'static str,
    pub kind: ColumnKind,
    pub nullable: bool,
    /// Assigned by the store (SERIAL); never written by callers.
    pub generated: bool,
    pub references: Option<ForeignKey>,
}

impl ColumnDef {
    pub const fn new(name: &'static str, kind: ColumnKind) -> Self {
        ColumnDef {
            name,
            kind,
            nullable: true,
            generated: false,
            references: None,
        }
    }

    pub const fn required(mut self) -> Self {
        self.nullable = false;
        self
    }

    pub const fn generated(mut self) -> Self {
        self.generated = true;
        self.nullable = false;
        self
    }

    pub const fn references(mut self, table: &'static str, column: &'static str) -> Self {
        self.references = Some(ForeignKey { table, column });
        self
    }

    /// Must be present and non-null in create/update bodies.
    pub fn is_required_input(&self) -> bool {
        !self.nullable && !self.generated
    }
}

#[derive(Debug)]
pub struct EntityDef {
    /// Entity name used in messages and logs.
    pub name: &'static str,
    pub table: &'static str,
    pub primary_key: &'static str,
    pub columns: &'static [ColumnDef],
}

impl EntityDef {
    pub fn column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Columns a caller may write, in declaration order.
    pub fn writable_columns(&self) -> impl Iterator<Item = &ColumnDef> {
        self.columns.iter().filter(|c| !c.generated)
    }
}

pub static ACTOR: EntityDef = EntityDef {
    name: "actor",
    table: "actor",
    primary_key: "actor_id",
    columns: &[
        ColumnDef::new("actor_id", ColumnKind::Integer).generated(),
        ColumnDef::new("first_name", ColumnKind::Text).required(),
        ColumnDef::new("last_name", ColumnKind::Text).required(),
    ],
};

pub static FILM: EntityDef = EntityDef {
    name: "film",
    table: "film",
    primary_key: "film_id",
    columns: &[
        ColumnDef::new("film_id", ColumnKind::Integer).generated(),
        ColumnDef::new("title", ColumnKind::Text).required(),
        ColumnDef::new("description", ColumnKind::Text),
        ColumnDef::new("release_year", ColumnKind::Integer),
    ],
};

pub static FILM_ACTOR: EntityDef = EntityDef {
    name: "film_actor",
    table: "film_actor",
    primary_key: "id",
    columns: &[
        ColumnDef::new("id", ColumnKind::Integer).generated(),
        ColumnDef::new("actor_id", ColumnKind::Integer)
            .required()
            .references("actor", "actor_id"),
        ColumnDef::new("film_id", ColumnKind::Integer)
            .required()
            .references("film", "film_id"),
    ],
};

/// Every table, in creation order (referenced tables first).
pub static ALL_ENTITIES: [&EntityDef; 3] = [&ACTOR, &FILM, &FILM_ACTOR];

/// A record type backed by an [`EntityDef`].
pub trait Entity: for<'r> FromRow<'r, PgRow> + Serialize + Send + Unpin + 'static {
    fn def() -> &'static EntityDef;
}
