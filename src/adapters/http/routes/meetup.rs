use axum::{
    Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::json;

use crate::{
    adapters::http::{
        app_state::AppState,
        envelope::Envelope,
        extract::{AppJson, HappeningOn, parse_id},
    },
    app_error::{AppError, AppResult, MEETUP_NOT_FOUND},
    application::validators::{clean_list, required_text},
    domain::entities::rsvp_response::RsvpResponse,
    use_cases::{meetup::NewMeetup, user::AuthUser},
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_meetup).get(list_meetups))
        .route("/upcoming", get(list_upcoming))
        .route("/{id}", get(get_meetup).delete(delete_meetup))
        .route("/{id}/questions", get(list_meetup_questions))
        .route("/{id}/rsvps", post(respond))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateMeetupPayload {
    location: Option<String>,
    topic: Option<String>,
    description: Option<String>,
    happening_on: Option<HappeningOn>,
    tags: Option<Vec<String>>,
    images: Option<Vec<String>>,
}

impl CreateMeetupPayload {
    fn validate(self) -> AppResult<NewMeetup> {
        let (Some(location), Some(topic), Some(description)) = (
            required_text(self.location),
            required_text(self.topic),
            required_text(self.description),
        ) else {
            return Err(AppError::required_fields());
        };

        let happening_on = self
            .happening_on
            .ok_or_else(AppError::required_fields)?
            .to_datetime()
            .ok_or_else(|| AppError::BadRequest("happeningOn must be a valid date".into()))?;

        Ok(NewMeetup {
            location,
            topic,
            description,
            happening_on,
            images: clean_list(self.images),
            tags: clean_list(self.tags),
        })
    }
}

#[derive(Deserialize)]
struct RsvpPayload {
    response: Option<String>,
}

impl RsvpPayload {
    fn validate(self) -> AppResult<RsvpResponse> {
        let raw = required_text(self.response).ok_or_else(AppError::required_fields)?;
        raw.parse()
            .map_err(|_| AppError::BadRequest("Response must be yes, no or maybe".into()))
    }
}

/// A meetup id that does not parse cannot name an existing meetup.
fn meetup_id(raw: &str) -> AppResult<i32> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::NotFound(MEETUP_NOT_FOUND.into()))
}

/// POST /api/v1/meetups
async fn create_meetup(
    State(app_state): State<AppState>,
    AppJson(payload): AppJson<CreateMeetupPayload>,
) -> AppResult<impl IntoResponse> {
    let meetup = payload.validate()?;
    let created = app_state.meetup_use_cases.create_meetup(meetup).await?;
    Ok(Envelope::created(created))
}

/// GET /api/v1/meetups
async fn list_meetups(State(app_state): State<AppState>) -> AppResult<impl IntoResponse> {
    let meetups = app_state.meetup_use_cases.list_meetups().await?;
    Ok(Envelope::list(meetups))
}

/// GET /api/v1/meetups/upcoming
async fn list_upcoming(State(app_state): State<AppState>) -> AppResult<impl IntoResponse> {
    let meetups = app_state.meetup_use_cases.list_upcoming().await?;
    Ok(Envelope::list(meetups))
}

/// GET /api/v1/meetups/{id}
async fn get_meetup(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let meetup = app_state.meetup_use_cases.get_meetup(meetup_id(&id)?).await?;
    Ok(Envelope::ok(meetup))
}

/// DELETE /api/v1/meetups/{id}
/// Admin only. Removes the meetup with its questions, votes, comments and RSVPs.
async fn delete_meetup(
    actor: AuthUser,
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = parse_id(&id, "meetup")?;
    app_state.meetup_use_cases.delete_meetup(actor, id).await?;
    Ok(Envelope::ok(json!({ "id": id, "message": "Meetup deleted" })))
}

/// GET /api/v1/meetups/{id}/questions
async fn list_meetup_questions(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let questions = app_state
        .question_use_cases
        .list_meetup_questions(meetup_id(&id)?)
        .await?;
    Ok(Envelope::list(questions))
}

/// POST /api/v1/meetups/{id}/rsvps
async fn respond(
    user: AuthUser,
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<RsvpPayload>,
) -> AppResult<impl IntoResponse> {
    let id = parse_id(&id, "meetup")?;
    let response = payload.validate()?;
    let rsvp = app_state.rsvp_use_cases.respond(user.id, id, response).await?;
    Ok(Envelope::created(rsvp))
}
