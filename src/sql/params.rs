//! Convert request JSON into values sqlx can bind, typed by the target column.

use crate::error::AppError;
use crate::model::{ColumnDef, ColumnKind};
use serde_json::Value;
use sqlx::encode::{Encode, IsNull};
use sqlx::error::BoxDynError;
use sqlx::postgres::{PgTypeInfo, Postgres};
use sqlx::{Database, Type};

/// A column value ready to bind. `None` binds SQL NULL of the column's type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldValue {
    Int(Option<i32>),
    Text(Option<String>),
}

impl FieldValue {
    pub fn key(id: i32) -> Self {
        FieldValue::Int(Some(id))
    }

    /// Typed value for `column`. Integers accept JSON integers or integer
    /// strings within `i32` range; text accepts strings without NUL, which
    /// PostgreSQL cannot store.
    pub fn from_json(column: &ColumnDef, v: &Value) -> Result<Self, AppError> {
        match column.kind {
            ColumnKind::Integer => {
                let n = match v {
                    Value::Null => return Ok(FieldValue::Int(None)),
                    Value::Number(n) => n.as_i64(),
                    Value::String(s) => s.trim().parse::<i64>().ok(),
                    _ => None,
                };
                n.and_then(|n| i32::try_from(n).ok())
                    .map(|n| FieldValue::Int(Some(n)))
                    .ok_or_else(|| AppError::Validation(format!("{} must be an integer", column.name)))
            }
            ColumnKind::Text => match v {
                Value::Null => Ok(FieldValue::Text(None)),
                Value::String(s) if s.contains('\0') => Err(AppError::Validation(format!(
                    "{} must not contain NUL characters",
                    column.name
                ))),
                Value::String(s) => Ok(FieldValue::Text(Some(s.clone()))),
                _ => Err(AppError::Validation(format!("{} must be a string", column.name))),
            },
        }
    }

    /// NULL of the column's type.
    pub fn null(column: &ColumnDef) -> Self {
        match column.kind {
            ColumnKind::Integer => FieldValue::Int(None),
            ColumnKind::Text => FieldValue::Text(None),
        }
    }
}

impl<'q> Encode<'q, Postgres> for FieldValue {
    fn encode_by_ref(
        &self,
        buf: &mut <Postgres as Database>::ArgumentBuffer<'q>,
    ) -> Result<IsNull, BoxDynError> {
        match self {
            FieldValue::Int(n) => <Option<i32> as Encode<Postgres>>::encode_by_ref(n, buf),
            FieldValue::Text(s) => <Option<String> as Encode<Postgres>>::encode_by_ref(s, buf),
        }
    }

    fn produces(&self) -> Option<PgTypeInfo> {
        Some(match self {
            FieldValue::Int(_) => <i32 as Type<Postgres>>::type_info(),
            FieldValue::Text(_) => <String as Type<Postgres>>::type_info(),
        })
    }
}

impl Type<Postgres> for FieldValue {
    fn type_info() -> PgTypeInfo {
        <String as Type<Postgres>>::type_info()
    }

    fn compatible(ty: &PgTypeInfo) -> bool {
        <i32 as Type<Postgres>>::compatible(ty) || <String as Type<Postgres>>::compatible(ty)
    }
}
