//! Relational schema and demo data.
//!
//! `create_tables` is idempotent and runs at every startup. `seed_tables`
//! only writes into an empty database.

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use tracing::info;

use crate::{
    app_error::{AppError, AppResult},
    application::password,
    domain::entities::{rsvp_response::RsvpResponse, vote::VoteDirection},
};

const CREATE_SQL: &str = r#"
    DO $$ BEGIN
        CREATE TYPE vote_direction AS ENUM ('up', 'down');
    EXCEPTION WHEN duplicate_object THEN NULL;
    END $$;

    DO $$ BEGIN
        CREATE TYPE rsvp_response AS ENUM ('yes', 'no', 'maybe');
    EXCEPTION WHEN duplicate_object THEN NULL;
    END $$;

    CREATE TABLE IF NOT EXISTS users (
        id              INT GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY,
        firstname       VARCHAR(255) NOT NULL,
        lastname        VARCHAR(255) NOT NULL,
        email           VARCHAR(100) NOT NULL UNIQUE,
        password        VARCHAR(255) NOT NULL,
        phone_number    VARCHAR(15),
        username        VARCHAR(100) UNIQUE,
        registered_on   TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        is_admin        BOOLEAN NOT NULL DEFAULT FALSE
    );

    CREATE TABLE IF NOT EXISTS meetups (
        id              INT GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY,
        created_on      TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        location        VARCHAR(255) NOT NULL,
        topic           VARCHAR(255) NOT NULL,
        description     TEXT NOT NULL,
        happening_on    TIMESTAMPTZ NOT NULL,
        images          TEXT[] NOT NULL DEFAULT '{}',
        tags            TEXT[] NOT NULL DEFAULT '{}'
    );

    CREATE INDEX IF NOT EXISTS idx_meetups_happening_on ON meetups(happening_on);

    CREATE TABLE IF NOT EXISTS questions (
        id              INT GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY,
        created_on      TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        user_id         INT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        meetup_id       INT NOT NULL REFERENCES meetups(id) ON DELETE CASCADE,
        title           VARCHAR(255) NOT NULL,
        body            TEXT NOT NULL,
        votes           INT NOT NULL DEFAULT 0
    );

    CREATE INDEX IF NOT EXISTS idx_questions_meetup ON questions(meetup_id, votes DESC);

    CREATE TABLE IF NOT EXISTS rsvps (
        user_id         INT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        meetup_id       INT NOT NULL REFERENCES meetups(id) ON DELETE CASCADE,
        response        rsvp_response NOT NULL,
        responded_on    TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        PRIMARY KEY (user_id, meetup_id)
    );

    CREATE TABLE IF NOT EXISTS comments (
        id              INT GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY,
        created_on      TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        user_id         INT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        question_id     INT NOT NULL REFERENCES questions(id) ON DELETE CASCADE,
        comment         TEXT NOT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_comments_question ON comments(question_id, created_on);

    CREATE TABLE IF NOT EXISTS votes (
        user_id         INT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        question_id     INT NOT NULL REFERENCES questions(id) ON DELETE CASCADE,
        direction       vote_direction NOT NULL,
        voted_on        TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        PRIMARY KEY (user_id, question_id)
    );
"#;

const DROP_SQL: &str = r#"
    DROP TABLE IF EXISTS votes CASCADE;
    DROP TABLE IF EXISTS comments CASCADE;
    DROP TABLE IF EXISTS rsvps CASCADE;
    DROP TABLE IF EXISTS questions CASCADE;
    DROP TABLE IF EXISTS meetups CASCADE;
    DROP TABLE IF EXISTS users CASCADE;
    DROP TYPE IF EXISTS vote_direction;
    DROP TYPE IF EXISTS rsvp_response;
"#;

pub async fn create_tables(pool: &PgPool) -> AppResult<()> {
    sqlx::raw_sql(CREATE_SQL).execute(pool).await?;
    info!("Database schema ready");
    Ok(())
}

pub async fn drop_tables(pool: &PgPool) -> AppResult<()> {
    sqlx::raw_sql(DROP_SQL).execute(pool).await?;
    info!("Database schema dropped");
    Ok(())
}

struct SeedUser {
    firstname: &'static str,
    lastname: &'static str,
    email: &'static str,
    is_admin: bool,
}

struct SeedMeetup {
    location: &'static str,
    topic: &'static str,
    description: &'static str,
    happening_on_ms: i64,
    tags: &'static [&'static str],
}

const SEED_USERS: &[SeedUser] = &[
    SeedUser {
        firstname: "Chukwudi",
        lastname: "Ume",
        email: "chukwudi.ume@gmail.com",
        is_admin: true,
    },
    SeedUser {
        firstname: "Ernest",
        lastname: "Genius",
        email: "e.genius@gmail.com",
        is_admin: false,
    },
    SeedUser {
        firstname: "Chike",
        lastname: "Bad guy",
        email: "c.guy@gmail.com",
        is_admin: false,
    },
];

const SEED_MEETUPS: &[SeedMeetup] = &[
    SeedMeetup {
        location: "Gbagada",
        topic: "NodeJS Gurus",
        description: "Deep dives into the NodeJS runtime",
        happening_on_ms: 1_547_078_599_932,
        tags: &["nodejs", "javascript"],
    },
    SeedMeetup {
        location: "The zone",
        topic: "Food Lovers",
        description: "Meet other people who love food",
        happening_on_ms: 1_547_878_599_932,
        tags: &["food"],
    },
    SeedMeetup {
        location: "Maryland Mall",
        topic: "Movie Critics",
        description: "Watch, then argue about it",
        happening_on_ms: 1_547_578_599_932,
        tags: &["movies"],
    },
];

// (user, meetup, title, body) as indexes into the seeded users and meetups.
const SEED_QUESTIONS: &[(usize, usize, &str, &str)] = &[
    (0, 1, "What about", "Okay. this is not so great. Is it?"),
    (1, 0, "Transportation", "Will transport be provided?"),
    (0, 2, "Item 7", "Will item 7 be provided?"),
];

const SEED_RSVPS: &[(usize, usize, RsvpResponse)] = &[
    (0, 1, RsvpResponse::Yes),
    (0, 0, RsvpResponse::No),
    (1, 0, RsvpResponse::Maybe),
];

// (user, question, text)
const SEED_COMMENTS: &[(usize, usize, &str)] = &[
    (1, 0, "Beautiful question"),
    (0, 1, "Very thoughtful"),
    (0, 0, "This question is a question"),
];

// (user, question, direction)
const SEED_VOTES: &[(usize, usize, VoteDirection)] = &[
    (0, 1, VoteDirection::Up),
    (1, 1, VoteDirection::Up),
    (0, 0, VoteDirection::Down),
];

/// Populates an empty database with demo users, meetups, questions, RSVPs,
/// comments and votes. Every seeded user gets `seed_password`.
pub async fn seed_tables(pool: &PgPool, seed_password: &str) -> AppResult<()> {
    let already_seeded: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users)")
        .fetch_one(pool)
        .await?;
    if already_seeded {
        info!("Users table is not empty, skipping seed");
        return Ok(());
    }

    let password_hash = password::hash_password_blocking(seed_password.to_string()).await?;
    let mut tx = pool.begin().await?;

    let mut user_ids = Vec::with_capacity(SEED_USERS.len());
    for user in SEED_USERS {
        let id: i32 = sqlx::query_scalar(
            r#"
                INSERT INTO users (firstname, lastname, email, password, is_admin)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING id
            "#,
        )
        .bind(user.firstname)
        .bind(user.lastname)
        .bind(user.email)
        .bind(&password_hash)
        .bind(user.is_admin)
        .fetch_one(&mut *tx)
        .await?;
        user_ids.push(id);
    }

    let mut meetup_ids = Vec::with_capacity(SEED_MEETUPS.len());
    for meetup in SEED_MEETUPS {
        let happening_on = DateTime::<Utc>::from_timestamp_millis(meetup.happening_on_ms)
            .ok_or_else(|| AppError::Internal("seed timestamp out of range".into()))?;
        let tags: Vec<String> = meetup.tags.iter().map(|t| t.to_string()).collect();
        let id: i32 = sqlx::query_scalar(
            r#"
                INSERT INTO meetups (location, topic, description, happening_on, tags)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING id
            "#,
        )
        .bind(meetup.location)
        .bind(meetup.topic)
        .bind(meetup.description)
        .bind(happening_on)
        .bind(&tags)
        .fetch_one(&mut *tx)
        .await?;
        meetup_ids.push(id);
    }

    let mut question_ids = Vec::with_capacity(SEED_QUESTIONS.len());
    for &(user, meetup, title, body) in SEED_QUESTIONS {
        let id: i32 = sqlx::query_scalar(
            r#"
                INSERT INTO questions (user_id, meetup_id, title, body)
                VALUES ($1, $2, $3, $4)
                RETURNING id
            "#,
        )
        .bind(user_ids[user])
        .bind(meetup_ids[meetup])
        .bind(title)
        .bind(body)
        .fetch_one(&mut *tx)
        .await?;
        question_ids.push(id);
    }

    for &(user, meetup, response) in SEED_RSVPS {
        sqlx::query("INSERT INTO rsvps (user_id, meetup_id, response) VALUES ($1, $2, $3)")
            .bind(user_ids[user])
            .bind(meetup_ids[meetup])
            .bind(response)
            .execute(&mut *tx)
            .await?;
    }

    for &(user, question, text) in SEED_COMMENTS {
        sqlx::query("INSERT INTO comments (user_id, question_id, comment) VALUES ($1, $2, $3)")
            .bind(user_ids[user])
            .bind(question_ids[question])
            .bind(text)
            .execute(&mut *tx)
            .await?;
    }

    for &(user, question, direction) in SEED_VOTES {
        sqlx::query("INSERT INTO votes (user_id, question_id, direction) VALUES ($1, $2, $3)")
            .bind(user_ids[user])
            .bind(question_ids[question])
            .bind(direction)
            .execute(&mut *tx)
            .await?;
    }

    recount_votes(&mut tx).await?;
    tx.commit().await?;

    info!(
        users = user_ids.len(),
        meetups = meetup_ids.len(),
        questions = question_ids.len(),
        "Database seeded"
    );
    Ok(())
}

/// Rebuilds every `questions.votes` tally from the votes table.
async fn recount_votes(tx: &mut Transaction<'_, Postgres>) -> AppResult<()> {
    sqlx::query(
        r#"
            UPDATE questions q
            SET votes = COALESCE((
                SELECT SUM(CASE v.direction WHEN 'up' THEN 1 ELSE -1 END)::INT
                FROM votes v
                WHERE v.question_id = q.id
            ), 0)
        "#,
    )
    .execute(&mut **tx)
    .await?;
    Ok(())
}
