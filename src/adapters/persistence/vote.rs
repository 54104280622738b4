use async_trait::async_trait;

use crate::{
    adapters::persistence::{PostgresPersistence, question::SELECT_COLS},
    app_error::{AppError, AppResult},
    domain::entities::vote::{VoteDirection, VoteState},
    use_cases::{
        question::Question,
        vote::{CastVote, VoteRepo},
    },
};

#[async_trait]
impl VoteRepo for PostgresPersistence {
    async fn cast_vote(
        &self,
        user_id: i32,
        question_id: i32,
        direction: VoteDirection,
    ) -> AppResult<Option<CastVote>> {
        let mut tx = self.pool().begin().await.map_err(AppError::from)?;

        // Row lock on the question serializes every vote on it until commit.
        let locked: Option<i32> =
            sqlx::query_scalar("SELECT id FROM questions WHERE id = $1 FOR UPDATE")
                .bind(question_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(AppError::from)?;
        if locked.is_none() {
            // Dropping the transaction rolls it back.
            return Ok(None);
        }

        let current: Option<VoteDirection> = sqlx::query_scalar(
            "SELECT direction FROM votes WHERE user_id = $1 AND question_id = $2",
        )
        .bind(user_id)
        .bind(question_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::from)?;

        let transition = VoteState::from(current).cast(direction);

        let question = if transition.is_noop() {
            sqlx::query_as::<_, Question>(&format!(
                "SELECT {SELECT_COLS} FROM questions WHERE id = $1"
            ))
            .bind(question_id)
            .fetch_one(&mut *tx)
            .await
            .map_err(AppError::from)?
        } else {
            sqlx::query(
                r#"
                    INSERT INTO votes (user_id, question_id, direction)
                    VALUES ($1, $2, $3)
                    ON CONFLICT (user_id, question_id)
                    DO UPDATE SET direction = EXCLUDED.direction, voted_on = NOW()
                "#,
            )
            .bind(user_id)
            .bind(question_id)
            .bind(direction)
            .execute(&mut *tx)
            .await
            .map_err(AppError::from)?;

            sqlx::query_as::<_, Question>(&format!(
                "UPDATE questions SET votes = votes + $2 WHERE id = $1 RETURNING {SELECT_COLS}"
            ))
            .bind(question_id)
            .bind(transition.delta)
            .fetch_one(&mut *tx)
            .await
            .map_err(AppError::from)?
        };

        tx.commit().await.map_err(AppError::from)?;

        Ok(Some(CastVote {
            question,
            transition,
        }))
    }
}
