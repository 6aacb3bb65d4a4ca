//! Success response helpers.

use crate::error::ApiError;
use axum::{http::StatusCode, Json};
use serde::Serialize;

pub fn ok<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::OK, Json(data))
}

pub fn created<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::CREATED, Json(data))
}

/// Collection endpoints answer 404 with `message` instead of an empty array.
pub fn non_empty<T>(rows: Vec<T>, message: &str) -> Result<Vec<T>, ApiError> {
    if rows.is_empty() {
        tracing::warn!("{}", message);
        return Err(ApiError::not_found(message));
    }
    Ok(rows)
}
