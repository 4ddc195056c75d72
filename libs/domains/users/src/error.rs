use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("user email already exist")]
    DuplicateEmail,

    #[error("this phone no. is already in use")]
    DuplicatePhone,

    /// Unknown email and wrong password share one message
    #[error("login or password incorrect")]
    InvalidCredentials,

    #[error("the user did not get created")]
    NotCreated(String),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Token error: {0}")]
    Token(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("request timed out")]
    Timeout,
}

pub type UserResult<T> = Result<T, UserError>;

impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::Validation(errors) => AppError::ValidationError(errors),
            UserError::DuplicateEmail | UserError::DuplicatePhone => {
                AppError::BadRequest(err.to_string())
            }
            UserError::InvalidCredentials => AppError::Unauthorized(err.to_string()),
            UserError::NotCreated(ref cause) => {
                tracing::error!(error = %cause, "User insert failed");
                AppError::Database(err.to_string())
            }
            UserError::PasswordHash(cause) => {
                tracing::error!(error = %cause, "Password hashing failed");
                AppError::InternalServerError("failed to process password".to_string())
            }
            UserError::Token(cause) => {
                tracing::error!(error = %cause, "Token generation failed");
                AppError::InternalServerError("failed to issue tokens".to_string())
            }
            UserError::Database(cause) => {
                tracing::error!(error = %cause, "User store query failed");
                AppError::Database("Database error occurred".to_string())
            }
            UserError::Timeout => AppError::DatabaseTimeout(err.to_string()),
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for UserError {
    fn from(err: mongodb::error::Error) -> Self {
        UserError::Database(err.to_string())
    }
}

impl From<mongodb::bson::ser::Error> for UserError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        UserError::Database(err.to_string())
    }
}
