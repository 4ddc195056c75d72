use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("search query `name` must not be empty")]
    EmptyQuery,

    #[error("the product did not get added")]
    NotCreated(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("request timed out")]
    Timeout,
}

pub type ProductResult<T> = Result<T, ProductError>;

impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::Validation(errors) => AppError::ValidationError(errors),
            ProductError::EmptyQuery => AppError::BadRequest(err.to_string()),
            ProductError::NotCreated(ref cause) => {
                tracing::error!(error = %cause, "Product insert failed");
                AppError::Database(err.to_string())
            }
            ProductError::Database(cause) => {
                tracing::error!(error = %cause, "Product query failed");
                AppError::Database("Database error occurred".to_string())
            }
            ProductError::Timeout => AppError::DatabaseTimeout(err.to_string()),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for ProductError {
    fn from(err: mongodb::error::Error) -> Self {
        ProductError::Database(err.to_string())
    }
}
