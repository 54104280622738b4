use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use tracing::instrument;

use crate::{
    app_error::{AppError, AppResult, MEETUP_NOT_FOUND},
    use_cases::user::AuthUser,
};

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Meetup {
    pub id: i32,
    pub created_on: DateTime<Utc>,
    pub location: String,
    pub topic: String,
    pub description: String,
    pub happening_on: DateTime<Utc>,
    pub images: Vec<String>,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct NewMeetup {
    pub location: String,
    pub topic: String,
    pub description: String,
    pub happening_on: DateTime<Utc>,
    pub images: Vec<String>,
    pub tags: Vec<String>,
}

#[async_trait]
pub trait MeetupRepo: Send + Sync {
    async fn create(&self, meetup: NewMeetup) -> AppResult<Meetup>;
    async fn get_by_id(&self, meetup_id: i32) -> AppResult<Option<Meetup>>;
    async fn list_all(&self) -> AppResult<Vec<Meetup>>;
    /// Meetups happening after `now`, soonest first.
    async fn list_upcoming(&self, now: DateTime<Utc>) -> AppResult<Vec<Meetup>>;
    /// Returns false when nothing was deleted.
    async fn delete(&self, meetup_id: i32) -> AppResult<bool>;
}

pub struct MeetupUseCases {
    repo: Arc<dyn MeetupRepo>,
}

impl MeetupUseCases {
    pub fn new(repo: Arc<dyn MeetupRepo>) -> Self {
        Self { repo }
    }

    #[instrument(skip(self, meetup), fields(topic = %meetup.topic))]
    pub async fn create_meetup(&self, meetup: NewMeetup) -> AppResult<Meetup> {
        let created = self.repo.create(meetup).await?;
        tracing::info!(meetup_id = created.id, "Meetup created");
        Ok(created)
    }

    pub async fn get_meetup(&self, meetup_id: i32) -> AppResult<Meetup> {
        self.repo
            .get_by_id(meetup_id)
            .await?
            .ok_or_else(|| AppError::NotFound(MEETUP_NOT_FOUND.into()))
    }

    pub async fn list_meetups(&self) -> AppResult<Vec<Meetup>> {
        self.repo.list_all().await
    }

    pub async fn list_upcoming(&self) -> AppResult<Vec<Meetup>> {
        self.repo.list_upcoming(Utc::now()).await
    }

    #[instrument(skip(self))]
    pub async fn delete_meetup(&self, actor: AuthUser, meetup_id: i32) -> AppResult<()> {
        if !actor.is_admin {
            return Err(AppError::Forbidden("Only admins can delete meetups".into()));
        }
        if !self.repo.delete(meetup_id).await? {
            return Err(AppError::NotFound(MEETUP_NOT_FOUND.into()));
        }
        tracing::info!(meetup_id, admin_id = actor.id, "Meetup deleted");
        Ok(())
    }
}
