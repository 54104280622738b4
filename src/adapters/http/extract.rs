use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::app_error::{AppError, AppResult};

/// `Json` whose rejections render through `AppError`, so malformed bodies get
/// the same envelope as every other failure.
pub struct AppJson<T>(pub T);

impl<T, S> FromRequest<S> for AppJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(AppJson(value))
    }
}

/// An id sent in a JSON body, either as a number or as a numeric string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LooseId {
    Number(i64),
    Text(String),
}

impl LooseId {
    pub fn to_id(&self) -> Option<i32> {
        match self {
            LooseId::Number(n) => i32::try_from(*n).ok(),
            LooseId::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// Range of a PostgreSQL `TIMESTAMPTZ` in epoch milliseconds, end exclusive.
const PG_TIMESTAMP_MILLIS: std::ops::Range<i64> = -210_866_803_200_000..9_225_264_700_800_000;

/// Meetup start time: epoch milliseconds or an RFC 3339 string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum HappeningOn {
    Millis(i64),
    Text(String),
}

impl HappeningOn {
    /// `None` when unparseable or outside what the database can store.
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        let parsed = match self {
            HappeningOn::Millis(ms) => DateTime::from_timestamp_millis(*ms),
            HappeningOn::Text(s) => {
                let s = s.trim();
                DateTime::parse_from_rfc3339(s)
                    .map(|dt| dt.with_timezone(&Utc))
                    .ok()
                    .or_else(|| s.parse().ok().and_then(DateTime::from_timestamp_millis))
            }
        };
        parsed.filter(|dt| PG_TIMESTAMP_MILLIS.contains(&dt.timestamp_millis()))
    }
}

/// Parses a path id, rejecting anything that is not an `i32`.
pub fn parse_id(raw: &str, what: &str) -> AppResult<i32> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid {what} id")))
}
