use axum::{Router, extract::State, response::IntoResponse, routing::post};
use serde::Deserialize;

use crate::{
    adapters::http::{
        app_state::AppState,
        envelope::Envelope,
        extract::{AppJson, LooseId},
    },
    app_error::{AppError, AppResult},
    application::validators::required_text,
    use_cases::user::AuthUser,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(create_comment))
}

#[derive(Deserialize)]
struct CreateCommentPayload {
    #[serde(rename = "questionID", alias = "questionId", alias = "question_id")]
    question_id: Option<LooseId>,
    comment: Option<String>,
}

impl CreateCommentPayload {
    fn validate(self) -> AppResult<(i32, String)> {
        let (Some(question_id), Some(comment)) = (self.question_id, required_text(self.comment))
        else {
            return Err(AppError::required_fields());
        };
        let question_id = question_id
            .to_id()
            .ok_or_else(|| AppError::BadRequest("questionID must be an integer".into()))?;
        Ok((question_id, comment))
    }
}

/// POST /api/v1/comments
async fn create_comment(
    user: AuthUser,
    State(app_state): State<AppState>,
    AppJson(payload): AppJson<CreateCommentPayload>,
) -> AppResult<impl IntoResponse> {
    let (question_id, comment) = payload.validate()?;
    let created = app_state
        .comment_use_cases
        .create_comment(user.id, question_id, &comment)
        .await?;
    Ok(Envelope::created(created))
}
