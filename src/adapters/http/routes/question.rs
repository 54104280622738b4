use axum::{
    Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::{get, patch, post},
};
use serde::Deserialize;

use crate::{
    adapters::http::{
        app_state::AppState,
        envelope::Envelope,
        extract::{AppJson, LooseId, parse_id},
    },
    app_error::{AppError, AppResult},
    application::validators::required_text,
    use_cases::{question::NewQuestion, user::AuthUser},
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_question).get(list_questions))
        .route("/{id}", get(get_question))
        .route("/{id}/upvote", patch(upvote))
        .route("/{id}/downvote", patch(downvote))
        .route("/{id}/comments", get(list_comments))
}

#[derive(Deserialize)]
struct CreateQuestionPayload {
    #[serde(rename = "meetupID", alias = "meetupId", alias = "meetup_id")]
    meetup_id: Option<LooseId>,
    title: Option<String>,
    body: Option<String>,
}

impl CreateQuestionPayload {
    fn validate(self, user_id: i32) -> AppResult<NewQuestion> {
        let (Some(meetup_id), Some(title), Some(body)) = (
            self.meetup_id,
            required_text(self.title),
            required_text(self.body),
        ) else {
            return Err(AppError::required_fields());
        };

        let meetup_id = meetup_id
            .to_id()
            .ok_or_else(|| AppError::BadRequest("meetupID must be an integer".into()))?;

        Ok(NewQuestion {
            user_id,
            meetup_id,
            title,
            body,
        })
    }
}

/// POST /api/v1/questions
async fn create_question(
    user: AuthUser,
    State(app_state): State<AppState>,
    AppJson(payload): AppJson<CreateQuestionPayload>,
) -> AppResult<impl IntoResponse> {
    let question = payload.validate(user.id)?;
    let created = app_state.question_use_cases.create_question(question).await?;
    Ok(Envelope::created(created))
}

/// GET /api/v1/questions
async fn list_questions(State(app_state): State<AppState>) -> AppResult<impl IntoResponse> {
    let questions = app_state.question_use_cases.list_questions().await?;
    Ok(Envelope::list(questions))
}

/// GET /api/v1/questions/{id}
async fn get_question(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = parse_id(&id, "question")?;
    let question = app_state.question_use_cases.get_question(id).await?;
    Ok(Envelope::ok(question))
}

/// PATCH /api/v1/questions/{id}/upvote
async fn upvote(
    user: AuthUser,
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = parse_id(&id, "question")?;
    let question = app_state.vote_use_cases.upvote(user.id, id).await?;
    Ok(Envelope::ok(question))
}

/// PATCH /api/v1/questions/{id}/downvote
async fn downvote(
    user: AuthUser,
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = parse_id(&id, "question")?;
    let question = app_state.vote_use_cases.downvote(user.id, id).await?;
    Ok(Envelope::ok(question))
}

/// GET /api/v1/questions/{id}/comments
async fn list_comments(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = parse_id(&id, "question")?;
    let comments = app_state.comment_use_cases.list_comments(id).await?;
    Ok(Envelope::list(comments))
}
