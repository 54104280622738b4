use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use tracing::instrument;

use crate::{
    app_error::{AppError, AppResult, QUESTION_DOES_NOT_EXIST, QUESTION_NOT_FOUND},
    use_cases::question::QuestionRepo,
};

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Comment {
    pub id: i32,
    pub created_on: DateTime<Utc>,
    pub user_id: i32,
    pub question_id: i32,
    pub comment: String,
}

/// A new comment echoed back with the question it belongs to.
#[derive(Debug, Clone, Serialize)]
pub struct CommentOnQuestion {
    #[serde(flatten)]
    pub comment: Comment,
    pub title: String,
    pub body: String,
}

#[async_trait]
pub trait CommentRepo: Send + Sync {
    async fn create(&self, user_id: i32, question_id: i32, comment: &str) -> AppResult<Comment>;
    /// Oldest first.
    async fn list_by_question(&self, question_id: i32) -> AppResult<Vec<Comment>>;
}

pub struct CommentUseCases {
    repo: Arc<dyn CommentRepo>,
    question_repo: Arc<dyn QuestionRepo>,
}

impl CommentUseCases {
    pub fn new(repo: Arc<dyn CommentRepo>, question_repo: Arc<dyn QuestionRepo>) -> Self {
        Self {
            repo,
            question_repo,
        }
    }

    #[instrument(skip(self, text))]
    pub async fn create_comment(
        &self,
        user_id: i32,
        question_id: i32,
        text: &str,
    ) -> AppResult<CommentOnQuestion> {
        let question = self
            .question_repo
            .get_by_id(question_id)
            .await?
            .ok_or_else(|| AppError::BadRequest(QUESTION_DOES_NOT_EXIST.into()))?;

        let comment = self.repo.create(user_id, question_id, text).await?;
        Ok(CommentOnQuestion {
            comment,
            title: question.title,
            body: question.body,
        })
    }

    pub async fn list_comments(&self, question_id: i32) -> AppResult<Vec<Comment>> {
        if self.question_repo.get_by_id(question_id).await?.is_none() {
            return Err(AppError::NotFound(QUESTION_NOT_FOUND.into()));
        }
        self.repo.list_by_question(question_id).await
    }
}
