//! HTTP handlers for actors and films.

pub mod actors;
pub mod films;

use crate::error::AppError;
use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde_json::Value;

/// Parse a path id. Keys are positive integers assigned by the store.
pub(crate) fn parse_id(id_str: &str) -> Result<i32, AppError> {
    id_str
        .trim()
        .parse::<i32>()
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(|| AppError::BadRequest(format!("invalid id '{}'", id_str)))
}

/// Unwrap a JSON body. Malformed JSON or a missing content type becomes
/// `BadRequest` so the reply keeps the usual error body.
pub(crate) fn json_body(body: Result<Json<Value>, JsonRejection>) -> Result<Value, AppError> {
    body.map(|Json(value)| value)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}
