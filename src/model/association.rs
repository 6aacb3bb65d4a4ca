//! Many-to-many associations through a join table, navigable from either side.

use crate::model::schema::{Entity, EntityDef, ACTOR, FILM, FILM_ACTOR};
use serde::Serialize;
use sqlx::postgres::PgRow;
use sqlx::FromRow;

/// `left <-> right` through `through`. `left_key` and `right_key` are the
/// join table's foreign keys into `left` and `right`.
#[derive(Debug)]
pub struct ManyToMany {
    pub through: &'static EntityDef,
    pub left: &'static EntityDef,
    pub left_key: &'static str,
    pub right: &'static EntityDef,
    pub right_key: &'static str,
}

pub static ACTOR_FILMS: ManyToMany = ManyToMany {
    through: &FILM_ACTOR,
    left: &ACTOR,
    left_key: "actor_id",
    right: &FILM,
    right_key: "film_id",
};

/// One traversal direction of a [`ManyToMany`]: rows of `related` joined to a `root` row.
#[derive(Clone, Copy, Debug)]
pub struct Include {
    /// Response field holding the related collection.
    pub name: &'static str,
    pub root: &'static EntityDef,
    pub related: &'static EntityDef,
    pub through: &'static EntityDef,
    /// Join table column pointing at the root's primary key.
    pub root_fk: &'static str,
    /// Join table column pointing at the related primary key.
    pub related_fk: &'static str,
}

impl ManyToMany {
    /// Left to right, e.g. an actor's films.
    pub fn from_left(&'static self, name: &'static str) -> Include {
        Include {
            name,
            root: self.left,
            related: self.right,
            through: self.through,
            root_fk: self.left_key,
            related_fk: self.right_key,
        }
    }

    /// Right to left, e.g. a film's actors.
    pub fn from_right(&'static self, name: &'static str) -> Include {
        Include {
            name,
            root: self.right,
            related: self.left,
            through: self.through,
            root_fk: self.right_key,
            related_fk: self.left_key,
        }
    }
}

/// An entity with a related collection reachable through an association.
pub trait Related: Entity {
    /// The entity plus its related collection, decoded from one row.
    type WithRelated: for<'r> FromRow<'r, PgRow> + Serialize + Send + Unpin + 'static;

    fn include() -> Include;
}
