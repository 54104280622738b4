//! Test app state builder for HTTP-level testing.
//!
//! `TestAppStateBuilder` wires every use case to one shared
//! `InMemoryDatabase`, so fixtures inserted before `build()` are visible to
//! the routes under test.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::HeaderValue;
use secrecy::SecretString;
use time::Duration;

use crate::{
    adapters::http::app_state::AppState,
    application::jwt,
    infra::config::AppConfig,
    test_utils::InMemoryDatabase,
    use_cases::{
        comment::CommentUseCases, meetup::MeetupUseCases, question::QuestionUseCases,
        rsvp::RsvpUseCases, user::AuthUseCases, vote::VoteUseCases,
    },
};

pub const TEST_JWT_SECRET: &str = "test_jwt_secret";

/// Sign an access token the test app state will accept.
pub fn test_token(user_id: i32, is_admin: bool) -> String {
    jwt::issue(
        user_id,
        is_admin,
        &SecretString::new(TEST_JWT_SECRET.into()),
        Duration::hours(1),
    )
    .unwrap()
}

/// Builder for creating `AppState` backed by the in-memory database.
///
/// # Example
///
/// ```ignore
/// let db = Arc::new(InMemoryDatabase::new());
/// let meetup = db.insert_meetup(create_test_meetup(|_| {}));
/// let app_state = TestAppStateBuilder::new().with_database(db.clone()).build();
/// ```
pub struct TestAppStateBuilder {
    db: Arc<InMemoryDatabase>,
}

impl TestAppStateBuilder {
    pub fn new() -> Self {
        Self {
            db: Arc::new(InMemoryDatabase::new()),
        }
    }

    /// Share a database the test keeps a handle on for seeding and assertions.
    pub fn with_database(mut self, db: Arc<InMemoryDatabase>) -> Self {
        self.db = db;
        self
    }

    pub fn build(self) -> AppState {
        let db = self.db;

        let config = Arc::new(AppConfig {
            database_url: String::new(),
            db_max_connections: 1,
            jwt_secret: SecretString::new(TEST_JWT_SECRET.into()),
            access_token_ttl: Duration::hours(1),
            bind_addr: "127.0.0.1:7000".parse::<SocketAddr>().unwrap(),
            cors_origin: HeaderValue::from_static("http://localhost:3000"),
            log_file: String::new(),
            seed_password: "questioner40".to_string(),
        });

        AppState {
            auth_use_cases: Arc::new(AuthUseCases::new(
                db.clone(),
                SecretString::new(TEST_JWT_SECRET.into()),
                config.access_token_ttl,
            )),
            meetup_use_cases: Arc::new(MeetupUseCases::new(db.clone())),
            question_use_cases: Arc::new(QuestionUseCases::new(db.clone(), db.clone())),
            vote_use_cases: Arc::new(VoteUseCases::new(db.clone())),
            rsvp_use_cases: Arc::new(RsvpUseCases::new(db.clone(), db.clone())),
            comment_use_cases: Arc::new(CommentUseCases::new(db.clone(), db)),
            config,
        }
    }
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
