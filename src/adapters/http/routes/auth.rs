use axum::{Router, extract::State, response::IntoResponse, routing::post};
use serde::Deserialize;

use crate::{
    adapters::http::{app_state::AppState, envelope::Envelope, extract::AppJson},
    app_error::{AppError, AppResult},
    application::validators::{MIN_PASSWORD_LEN, is_valid_email, required_text},
    use_cases::user::SignupInput,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignupPayload {
    firstname: Option<String>,
    lastname: Option<String>,
    email: Option<String>,
    password: Option<String>,
    phone_number: Option<String>,
    username: Option<String>,
}

impl SignupPayload {
    fn validate(self) -> AppResult<SignupInput> {
        let (Some(firstname), Some(lastname), Some(email), Some(password)) = (
            required_text(self.firstname),
            required_text(self.lastname),
            required_text(self.email),
            required_text(self.password),
        ) else {
            return Err(AppError::required_fields());
        };

        if !is_valid_email(&email) {
            return Err(AppError::Validation("Invalid email".into()));
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AppError::Validation(format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }

        Ok(SignupInput {
            firstname,
            lastname,
            email,
            password,
            phone_number: required_text(self.phone_number),
            username: required_text(self.username),
        })
    }
}

#[derive(Deserialize)]
struct LoginPayload {
    email: Option<String>,
    password: Option<String>,
}

/// POST /api/v1/auth/signup
async fn signup(
    State(app_state): State<AppState>,
    AppJson(payload): AppJson<SignupPayload>,
) -> AppResult<impl IntoResponse> {
    let input = payload.validate()?;
    let session = app_state.auth_use_cases.signup(input).await?;
    Ok(Envelope::created(session))
}

/// POST /api/v1/auth/login
async fn login(
    State(app_state): State<AppState>,
    AppJson(payload): AppJson<LoginPayload>,
) -> AppResult<impl IntoResponse> {
    let (Some(email), Some(password)) = (
        required_text(payload.email),
        required_text(payload.password),
    ) else {
        return Err(AppError::required_fields());
    };

    let session = app_state.auth_use_cases.login(&email, &password).await?;
    Ok(Envelope::ok(session))
}
