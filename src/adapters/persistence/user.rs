use async_trait::async_trait;

use crate::{
    adapters::persistence::PostgresPersistence,
    app_error::{AppError, AppResult},
    use_cases::user::{NewUser, UserProfile, UserRepo, UserWithPassword},
};

const PROFILE_COLS: &str =
    "id, firstname, lastname, email, phone_number, username, registered_on, is_admin";

#[async_trait]
impl UserRepo for PostgresPersistence {
    async fn create(&self, user: NewUser) -> AppResult<UserProfile> {
        sqlx::query_as::<_, UserProfile>(&format!(
            r#"
                INSERT INTO users (firstname, lastname, email, password, phone_number, username)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING {PROFILE_COLS}
            "#
        ))
        .bind(&user.firstname)
        .bind(&user.lastname)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.phone_number)
        .bind(&user.username)
        .fetch_one(self.pool())
        .await
        .map_err(AppError::from)
    }

    async fn get_by_email(&self, email: &str) -> AppResult<Option<UserWithPassword>> {
        sqlx::query_as::<_, UserWithPassword>(&format!(
            "SELECT {PROFILE_COLS}, password FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(self.pool())
        .await
        .map_err(AppError::from)
    }
}
