use async_trait::async_trait;

use crate::{
    adapters::persistence::PostgresPersistence,
    app_error::{AppError, AppResult},
    use_cases::question::{NewQuestion, Question, QuestionRepo},
};

pub(crate) const SELECT_COLS: &str = "id, created_on, user_id, meetup_id, title, body, votes";

#[async_trait]
impl QuestionRepo for PostgresPersistence {
    async fn create(&self, question: NewQuestion) -> AppResult<Question> {
        sqlx::query_as::<_, Question>(&format!(
            r#"
                INSERT INTO questions (user_id, meetup_id, title, body)
                VALUES ($1, $2, $3, $4)
                RETURNING {SELECT_COLS}
            "#
        ))
        .bind(question.user_id)
        .bind(question.meetup_id)
        .bind(&question.title)
        .bind(&question.body)
        .fetch_one(self.pool())
        .await
        .map_err(AppError::from)
    }

    async fn get_by_id(&self, question_id: i32) -> AppResult<Option<Question>> {
        sqlx::query_as::<_, Question>(&format!(
            "SELECT {SELECT_COLS} FROM questions WHERE id = $1"
        ))
        .bind(question_id)
        .fetch_optional(self.pool())
        .await
        .map_err(AppError::from)
    }

    async fn list_all(&self) -> AppResult<Vec<Question>> {
        sqlx::query_as::<_, Question>(&format!(
            "SELECT {SELECT_COLS} FROM questions ORDER BY created_on DESC, id DESC"
        ))
        .fetch_all(self.pool())
        .await
        .map_err(AppError::from)
    }

    async fn list_by_meetup(&self, meetup_id: i32) -> AppResult<Vec<Question>> {
        sqlx::query_as::<_, Question>(&format!(
            r#"
                SELECT {SELECT_COLS} FROM questions
                WHERE meetup_id = $1
                ORDER BY votes DESC, id ASC
            "#
        ))
        .bind(meetup_id)
        .fetch_all(self.pool())
        .await
        .map_err(AppError::from)
    }
}
