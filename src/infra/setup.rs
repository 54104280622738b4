use std::fs::File;
use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    adapters::{http::app_state::AppState, persistence::schema},
    infra::{config::AppConfig, error::InfraError, postgres_persistence},
    use_cases::{
        comment::CommentUseCases, meetup::MeetupUseCases, question::QuestionUseCases,
        rsvp::RsvpUseCases, user::AuthUseCases, vote::VoteUseCases,
    },
};

pub async fn init_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let postgres_arc =
        Arc::new(postgres_persistence(&config.database_url, config.db_max_connections).await?);

    schema::create_tables(postgres_arc.pool())
        .await
        .map_err(InfraError::Schema)?;

    let auth_use_cases = AuthUseCases::new(
        postgres_arc.clone(),
        SecretString::new(config.jwt_secret.expose_secret().into()),
        config.access_token_ttl,
    );
    let meetup_use_cases = MeetupUseCases::new(postgres_arc.clone());
    let question_use_cases = QuestionUseCases::new(postgres_arc.clone(), postgres_arc.clone());
    let vote_use_cases = VoteUseCases::new(postgres_arc.clone());
    let rsvp_use_cases = RsvpUseCases::new(postgres_arc.clone(), postgres_arc.clone());
    let comment_use_cases = CommentUseCases::new(postgres_arc.clone(), postgres_arc);

    Ok(AppState {
        config: Arc::new(config),
        auth_use_cases: Arc::new(auth_use_cases),
        meetup_use_cases: Arc::new(meetup_use_cases),
        question_use_cases: Arc::new(question_use_cases),
        vote_use_cases: Arc::new(vote_use_cases),
        rsvp_use_cases: Arc::new(rsvp_use_cases),
        comment_use_cases: Arc::new(comment_use_cases),
    })
}

pub fn init_tracing(log_file: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "questioner=debug,tower_http=debug".into());

    // Console (pretty logs)
    let console_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .pretty();

    // File (structured JSON logs); console only when the file cannot be created.
    let json_layer = match File::create(log_file) {
        Ok(file) => Some(
            fmt::layer()
                .json()
                .with_writer(Arc::new(file))
                .with_current_span(true)
                .with_span_list(true),
        ),
        Err(err) => {
            eprintln!("cannot create log file {log_file}: {err}");
            None
        }
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(json_layer)
        .try_init()
        .ok();
}
