//! Test data factories for creating valid test fixtures.
//!
//! Each factory function creates a complete, valid object with sensible defaults.
//! Use the closure parameter to override specific fields as needed. Ids are
//! placeholders; the in-memory database assigns real ones on insert.

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::use_cases::{meetup::Meetup, question::Question, user::UserProfile};

/// Create a test user with sensible defaults.
pub fn create_test_user(overrides: impl FnOnce(&mut UserProfile)) -> UserProfile {
    let mut user = UserProfile {
        id: 0,
        firstname: "Ernest".to_string(),
        lastname: "Genius".to_string(),
        email: "e.genius@gmail.com".to_string(),
        phone_number: Some("08030000000".to_string()),
        username: None,
        registered_on: test_datetime(),
        is_admin: false,
    };
    overrides(&mut user);
    user
}

/// Create a test meetup one week in the future.
pub fn create_test_meetup(overrides: impl FnOnce(&mut Meetup)) -> Meetup {
    let mut meetup = Meetup {
        id: 0,
        created_on: test_datetime(),
        location: "Gbagada".to_string(),
        topic: "NodeJS Gurus".to_string(),
        description: "Monthly meetup for people who ship NodeJS".to_string(),
        happening_on: Utc::now() + Duration::days(7),
        images: vec![],
        tags: vec!["nodejs".to_string()],
    };
    overrides(&mut meetup);
    meetup
}

/// Create a test question owned by `user_id` on `meetup_id`.
pub fn create_test_question(
    user_id: i32,
    meetup_id: i32,
    overrides: impl FnOnce(&mut Question),
) -> Question {
    let mut question = Question {
        id: 0,
        created_on: test_datetime(),
        user_id,
        meetup_id,
        title: "Event loop".to_string(),
        body: "How does the event loop handle blocking calls?".to_string(),
        votes: 0,
    };
    overrides(&mut question);
    question
}

fn test_datetime() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}
