use thiserror::Error;

pub const REQUIRED_FIELDS_EMPTY: &str = "Required fields are empty";
pub const MEETUP_NOT_FOUND: &str = "Meetup not found";
pub const MEETUP_DOES_NOT_EXIST: &str = "Meetup does not exist";
pub const QUESTION_NOT_FOUND: &str = "Question not found";
pub const QUESTION_DOES_NOT_EXIST: &str = "Question does not exist";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(String),

    /// Missing, empty or malformed request fields.
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Token not provided")]
    MissingToken,

    #[error("Invalid token")]
    InvalidToken,

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn required_fields() -> Self {
        AppError::Validation(REQUIRED_FIELDS_EMPTY.into())
    }
}

pub type AppResult<T> = Result<T, AppError>;
