use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, request::Parts},
};

use crate::{
    adapters::http::app_state::AppState,
    app_error::{AppError, AppResult},
    use_cases::user::AuthUser,
};

pub const ACCESS_TOKEN_HEADER: &str = "x-access-token";

/// Reads the access token header. Only an absent or empty header counts as
/// not provided; anything else that is not a usable token is invalid.
pub fn access_token(headers: &HeaderMap) -> AppResult<&str> {
    let value = headers
        .get(ACCESS_TOKEN_HEADER)
        .filter(|value| !value.is_empty())
        .ok_or(AppError::MissingToken)?;
    value.to_str().map_err(|_| AppError::InvalidToken)
}

/// Auth gate for protected handlers. Put it before `Path` and body extractors
/// so a missing token is reported ahead of a malformed request.
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<AuthUser>() {
            return Ok(*user);
        }

        let token = access_token(&parts.headers)?;
        let user = state.auth_use_cases.authenticate(token)?;
        parts.extensions.insert(user);
        Ok(user)
    }
}
