use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use secrecy::SecretString;
use serde::Serialize;
use sqlx::FromRow;
use time::Duration;
use tracing::instrument;

use crate::{
    app_error::{AppError, AppResult},
    application::{jwt, password},
};

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: i32,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub username: Option<String>,
    pub registered_on: DateTime<Utc>,
    pub is_admin: bool,
}

/// A user row together with its password hash. Never serialized.
#[derive(Debug, Clone, FromRow)]
pub struct UserWithPassword {
    #[sqlx(flatten)]
    pub profile: UserProfile,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub password_hash: String,
    pub phone_number: Option<String>,
    pub username: Option<String>,
}

/// Signup input after request validation; the password is still plain text.
#[derive(Debug, Clone)]
pub struct SignupInput {
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub password: String,
    pub phone_number: Option<String>,
    pub username: Option<String>,
}

/// Identity resolved from a valid access token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub id: i32,
    pub is_admin: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthSession {
    pub token: String,
    pub user: UserProfile,
}

#[async_trait]
pub trait UserRepo: Send + Sync {
    async fn create(&self, user: NewUser) -> AppResult<UserProfile>;
    async fn get_by_email(&self, email: &str) -> AppResult<Option<UserWithPassword>>;
}

pub struct AuthUseCases {
    repo: Arc<dyn UserRepo>,
    jwt_secret: SecretString,
    token_ttl: Duration,
}

impl AuthUseCases {
    pub fn new(repo: Arc<dyn UserRepo>, jwt_secret: SecretString, token_ttl: Duration) -> Self {
        Self {
            repo,
            jwt_secret,
            token_ttl,
        }
    }

    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn signup(&self, input: SignupInput) -> AppResult<AuthSession> {
        let email = normalize_email(&input.email);
        if self.repo.get_by_email(&email).await?.is_some() {
            return Err(AppError::BadRequest("User already exists".into()));
        }

        let password_hash = password::hash_password_blocking(input.password).await?;
        let user = self
            .repo
            .create(NewUser {
                firstname: input.firstname,
                lastname: input.lastname,
                email,
                password_hash,
                phone_number: input.phone_number,
                username: input.username,
            })
            .await?;

        tracing::info!(user_id = user.id, "User registered");
        self.session_for(user)
    }

    #[instrument(skip(self, raw_password))]
    pub async fn login(&self, email: &str, raw_password: &str) -> AppResult<AuthSession> {
        let record = self.repo.get_by_email(&normalize_email(email)).await?;

        // Unknown emails still pay for a full verification.
        let (profile, stored_hash) = match record {
            Some(record) => (Some(record.profile), record.password),
            None => (None, password::DUMMY_HASH.to_string()),
        };
        let verified =
            password::verify_password_blocking(raw_password.to_string(), stored_hash).await?;

        match profile {
            Some(profile) if verified => self.session_for(profile),
            _ => Err(AppError::InvalidCredentials),
        }
    }

    /// Resolves the caller from an access token without touching the database.
    pub fn authenticate(&self, token: &str) -> AppResult<AuthUser> {
        let claims = jwt::verify(token, &self.jwt_secret)?;
        let id = claims.sub.parse().map_err(|_| AppError::InvalidToken)?;
        Ok(AuthUser {
            id,
            is_admin: claims.is_admin,
        })
    }

    fn session_for(&self, user: UserProfile) -> AppResult<AuthSession> {
        let token = jwt::issue(user.id, user.is_admin, &self.jwt_secret, self.token_ttl)?;
        Ok(AuthSession { token, user })
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
