use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use tracing::instrument;

use crate::{
    app_error::{AppError, AppResult, MEETUP_DOES_NOT_EXIST, MEETUP_NOT_FOUND, QUESTION_NOT_FOUND},
    use_cases::meetup::MeetupRepo,
};

// Serialized in row shape; clients read `user_id` and `votes` directly.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Question {
    pub id: i32,
    pub created_on: DateTime<Utc>,
    pub user_id: i32,
    pub meetup_id: i32,
    pub title: String,
    pub body: String,
    pub votes: i32,
}

#[derive(Debug, Clone)]
pub struct NewQuestion {
    pub user_id: i32,
    pub meetup_id: i32,
    pub title: String,
    pub body: String,
}

#[async_trait]
pub trait QuestionRepo: Send + Sync {
    async fn create(&self, question: NewQuestion) -> AppResult<Question>;
    async fn get_by_id(&self, question_id: i32) -> AppResult<Option<Question>>;
    /// Newest first.
    async fn list_all(&self) -> AppResult<Vec<Question>>;
    /// Highest voted first.
    async fn list_by_meetup(&self, meetup_id: i32) -> AppResult<Vec<Question>>;
}

pub struct QuestionUseCases {
    repo: Arc<dyn QuestionRepo>,
    meetup_repo: Arc<dyn MeetupRepo>,
}

impl QuestionUseCases {
    pub fn new(repo: Arc<dyn QuestionRepo>, meetup_repo: Arc<dyn MeetupRepo>) -> Self {
        Self { repo, meetup_repo }
    }

    #[instrument(skip(self, question), fields(user_id = question.user_id, meetup_id = question.meetup_id))]
    pub async fn create_question(&self, question: NewQuestion) -> AppResult<Question> {
        if self.meetup_repo.get_by_id(question.meetup_id).await?.is_none() {
            return Err(AppError::BadRequest(MEETUP_DOES_NOT_EXIST.into()));
        }

        let created = self.repo.create(question).await?;
        tracing::info!(question_id = created.id, "Question created");
        Ok(created)
    }

    pub async fn get_question(&self, question_id: i32) -> AppResult<Question> {
        self.repo
            .get_by_id(question_id)
            .await?
            .ok_or_else(|| AppError::NotFound(QUESTION_NOT_FOUND.into()))
    }

    pub async fn list_questions(&self) -> AppResult<Vec<Question>> {
        self.repo.list_all().await
    }

    pub async fn list_meetup_questions(&self, meetup_id: i32) -> AppResult<Vec<Question>> {
        if self.meetup_repo.get_by_id(meetup_id).await?.is_none() {
            return Err(AppError::NotFound(MEETUP_NOT_FOUND.into()));
        }
        self.repo.list_by_meetup(meetup_id).await
    }
}
