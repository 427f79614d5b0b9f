//! Success response helpers.

use axum::{http::StatusCode, Json};
use serde::Serialize;

#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct MessageBody {
    pub message: String,
}

pub fn created<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::CREATED, Json(data))
}

pub fn ok<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::OK, Json(data))
}

pub fn message(text: impl Into<String>) -> (StatusCode, Json<MessageBody>) {
    ok(MessageBody { message: text.into() })
}
