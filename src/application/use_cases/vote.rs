use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;

use crate::{
    app_error::{AppError, AppResult, QUESTION_DOES_NOT_EXIST},
    domain::entities::vote::{VoteDirection, VoteTransition},
    use_cases::question::Question,
};

/// Result of applying a vote: the question with its updated tally.
#[derive(Debug, Clone)]
pub struct CastVote {
    pub question: Question,
    pub transition: VoteTransition,
}

#[async_trait]
pub trait VoteRepo: Send + Sync {
    /// Moves the user's vote on the question into `direction` and adjusts the
    /// question's tally by the transition delta, as one atomic unit.
    ///
    /// Returns `None` when the question does not exist.
    async fn cast_vote(
        &self,
        user_id: i32,
        question_id: i32,
        direction: VoteDirection,
    ) -> AppResult<Option<CastVote>>;
}

pub struct VoteUseCases {
    repo: Arc<dyn VoteRepo>,
}

impl VoteUseCases {
    pub fn new(repo: Arc<dyn VoteRepo>) -> Self {
        Self { repo }
    }

    pub async fn upvote(&self, user_id: i32, question_id: i32) -> AppResult<Question> {
        self.cast(user_id, question_id, VoteDirection::Up).await
    }

    pub async fn downvote(&self, user_id: i32, question_id: i32) -> AppResult<Question> {
        self.cast(user_id, question_id, VoteDirection::Down).await
    }

    #[instrument(skip(self))]
    async fn cast(
        &self,
        user_id: i32,
        question_id: i32,
        direction: VoteDirection,
    ) -> AppResult<Question> {
        // Missing questions on vote routes are rejected as forbidden, not 404.
        let cast = self
            .repo
            .cast_vote(user_id, question_id, direction)
            .await?
            .ok_or_else(|| AppError::Forbidden(QUESTION_DOES_NOT_EXIST.into()))?;

        tracing::info!(
            from = ?cast.transition.from,
            to = ?cast.transition.to,
            delta = cast.transition.delta,
            votes = cast.question.votes,
            "Vote applied"
        );
        Ok(cast.question)
    }
}
