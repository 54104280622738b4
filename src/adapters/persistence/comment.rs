use async_trait::async_trait;

use crate::{
    adapters::persistence::PostgresPersistence,
    app_error::{AppError, AppResult},
    use_cases::comment::{Comment, CommentRepo},
};

#[async_trait]
impl CommentRepo for PostgresPersistence {
    async fn create(&self, user_id: i32, question_id: i32, comment: &str) -> AppResult<Comment> {
        sqlx::query_as::<_, Comment>(
            r#"
                INSERT INTO comments (user_id, question_id, comment)
                VALUES ($1, $2, $3)
                RETURNING id, created_on, user_id, question_id, comment
            "#,
        )
        .bind(user_id)
        .bind(question_id)
        .bind(comment)
        .fetch_one(self.pool())
        .await
        .map_err(AppError::from)
    }

    async fn list_by_question(&self, question_id: i32) -> AppResult<Vec<Comment>> {
        sqlx::query_as::<_, Comment>(
            r#"
                SELECT id, created_on, user_id, question_id, comment
                FROM comments
                WHERE question_id = $1
                ORDER BY created_on ASC, id ASC
            "#,
        )
        .bind(question_id)
        .fetch_all(self.pool())
        .await
        .map_err(AppError::from)
    }
}
