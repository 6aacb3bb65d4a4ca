//! Request validation against entity definitions.

use crate::error::AppError;
use crate::model::EntityDef;
use crate::sql::FieldValue;
use serde_json::{Map, Value};

/// Column/value pairs for every writable column of an entity, in declaration order.
pub type Assignments = Vec<(&'static str, FieldValue)>;

pub struct RequestValidator;

impl RequestValidator {
    /// Validate a full-record body. Every required column must be present and
    /// non-null; present values must match the column kind. Absent optional
    /// columns become NULL. Unknown keys and generated columns are ignored.
    pub fn validate(body: &Map<String, Value>, entity: &'static EntityDef) -> Result<Assignments, AppError> {
        let mut out = Vec::with_capacity(entity.columns.len());
        for col in entity.writable_columns() {
            let value = match body.get(col.name) {
                None | Some(Value::Null) if col.is_required_input() => {
                    return Err(AppError::Validation(format!("{} is required", col.name)));
                }
                None => FieldValue::null(col),
                Some(v) => FieldValue::from_json(col, v)?,
            };
            out.push((col.name, value));
        }
        Ok(out)
    }

    /// Validate a JSON body that must be an object.
    pub fn validate_value(body: &Value, entity: &'static EntityDef) -> Result<Assignments, AppError> {
        match body {
            Value::Object(map) => Self::validate(map, entity),
            _ => Err(AppError::BadRequest("body must be a JSON object".into())),
        }
    }
}
