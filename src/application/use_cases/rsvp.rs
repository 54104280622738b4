use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use tracing::instrument;

use crate::{
    app_error::{AppError, AppResult, MEETUP_NOT_FOUND},
    domain::entities::rsvp_response::RsvpResponse,
    use_cases::meetup::MeetupRepo,
};

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Rsvp {
    pub user_id: i32,
    pub meetup_id: i32,
    pub topic: String,
    pub response: RsvpResponse,
    pub responded_on: DateTime<Utc>,
}

#[async_trait]
pub trait RsvpRepo: Send + Sync {
    /// Inserts or replaces the user's response for the meetup.
    async fn upsert(
        &self,
        user_id: i32,
        meetup_id: i32,
        response: RsvpResponse,
    ) -> AppResult<Rsvp>;
}

pub struct RsvpUseCases {
    repo: Arc<dyn RsvpRepo>,
    meetup_repo: Arc<dyn MeetupRepo>,
}

impl RsvpUseCases {
    pub fn new(repo: Arc<dyn RsvpRepo>, meetup_repo: Arc<dyn MeetupRepo>) -> Self {
        Self { repo, meetup_repo }
    }

    #[instrument(skip(self))]
    pub async fn respond(
        &self,
        user_id: i32,
        meetup_id: i32,
        response: RsvpResponse,
    ) -> AppResult<Rsvp> {
        if self.meetup_repo.get_by_id(meetup_id).await?.is_none() {
            return Err(AppError::NotFound(MEETUP_NOT_FOUND.into()));
        }
        let rsvp = self.repo.upsert(user_id, meetup_id, response).await?;
        tracing::info!(attending = rsvp.response.is_attending(), "RSVP recorded");
        Ok(rsvp)
    }
}
