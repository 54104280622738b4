use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::{
    adapters::persistence::PostgresPersistence,
    app_error::{AppError, AppResult},
    use_cases::meetup::{Meetup, MeetupRepo, NewMeetup},
};

const SELECT_COLS: &str =
    "id, created_on, location, topic, description, happening_on, images, tags";

#[async_trait]
impl MeetupRepo for PostgresPersistence {
    async fn create(&self, meetup: NewMeetup) -> AppResult<Meetup> {
        sqlx::query_as::<_, Meetup>(&format!(
            r#"
                INSERT INTO meetups (location, topic, description, happening_on, images, tags)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING {SELECT_COLS}
            "#
        ))
        .bind(&meetup.location)
        .bind(&meetup.topic)
        .bind(&meetup.description)
        .bind(meetup.happening_on)
        .bind(&meetup.images)
        .bind(&meetup.tags)
        .fetch_one(self.pool())
        .await
        .map_err(AppError::from)
    }

    async fn get_by_id(&self, meetup_id: i32) -> AppResult<Option<Meetup>> {
        sqlx::query_as::<_, Meetup>(&format!("SELECT {SELECT_COLS} FROM meetups WHERE id = $1"))
            .bind(meetup_id)
            .fetch_optional(self.pool())
            .await
            .map_err(AppError::from)
    }

    async fn list_all(&self) -> AppResult<Vec<Meetup>> {
        sqlx::query_as::<_, Meetup>(&format!("SELECT {SELECT_COLS} FROM meetups ORDER BY id"))
            .fetch_all(self.pool())
            .await
            .map_err(AppError::from)
    }

    async fn list_upcoming(&self, now: DateTime<Utc>) -> AppResult<Vec<Meetup>> {
        sqlx::query_as::<_, Meetup>(&format!(
            r#"
                SELECT {SELECT_COLS} FROM meetups
                WHERE happening_on > $1
                ORDER BY happening_on ASC
            "#
        ))
        .bind(now)
        .fetch_all(self.pool())
        .await
        .map_err(AppError::from)
    }

    async fn delete(&self, meetup_id: i32) -> AppResult<bool> {
        // Questions, votes, comments and RSVPs go with it via ON DELETE CASCADE.
        let result = sqlx::query("DELETE FROM meetups WHERE id = $1")
            .bind(meetup_id)
            .execute(self.pool())
            .await
            .map_err(AppError::from)?;
        Ok(result.rows_affected() > 0)
    }
}
