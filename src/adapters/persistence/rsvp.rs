use async_trait::async_trait;

use crate::{
    adapters::persistence::PostgresPersistence,
    app_error::{AppError, AppResult},
    domain::entities::rsvp_response::RsvpResponse,
    use_cases::rsvp::{Rsvp, RsvpRepo},
};

#[async_trait]
impl RsvpRepo for PostgresPersistence {
    async fn upsert(
        &self,
        user_id: i32,
        meetup_id: i32,
        response: RsvpResponse,
    ) -> AppResult<Rsvp> {
        sqlx::query_as::<_, Rsvp>(
            r#"
            WITH saved AS (
                INSERT INTO rsvps (user_id, meetup_id, response)
                VALUES ($1, $2, $3)
                ON CONFLICT (user_id, meetup_id)
                DO UPDATE SET response = EXCLUDED.response, responded_on = NOW()
                RETURNING user_id, meetup_id, response, responded_on
            )
            SELECT s.user_id, s.meetup_id, m.topic, s.response, s.responded_on
            FROM saved s
            JOIN meetups m ON m.id = s.meetup_id
            "#,
        )
        .bind(user_id)
        .bind(meetup_id)
        .bind(response)
        .fetch_one(self.pool())
        .await
        .map_err(AppError::from)
    }
}
