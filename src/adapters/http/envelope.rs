use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;

/// Success body: `{ "status": <code>, "data": [ ... ] }`.
///
/// `data` is always an array, even for a single record.
pub struct Envelope<T> {
    status: StatusCode,
    data: Vec<T>,
}

impl<T: Serialize> Envelope<T> {
    pub fn ok(record: T) -> Self {
        Self {
            status: StatusCode::OK,
            data: vec![record],
        }
    }

    pub fn created(record: T) -> Self {
        Self {
            status: StatusCode::CREATED,
            data: vec![record],
        }
    }

    pub fn list(records: Vec<T>) -> Self {
        Self {
            status: StatusCode::OK,
            data: records,
        }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(json!({ "status": self.status.as_u16(), "data": self.data })),
        )
            .into_response()
    }
}
