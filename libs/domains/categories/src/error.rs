use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_helpers::AppError;
use thiserror::Error;

use crate::models::MessageResponse;

#[derive(Debug, Error)]
pub enum CategoryError {
    #[error("Category [{0}] is already exists!")]
    DuplicateName(String),

    #[error("Category not found!")]
    NotFound,

    #[error("Invalid category id: {0}")]
    InvalidId(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type CategoryResult<T> = Result<T, CategoryError>;

/// Not-found and duplicate-name answer with the `{success:false, message}`
/// envelope; everything else goes through the generic [`AppError`] stage.
impl IntoResponse for CategoryError {
    fn into_response(self) -> Response {
        match self {
            CategoryError::DuplicateName(_) | CategoryError::NotFound => {
                tracing::info!(error = %self, "Category request rejected");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(MessageResponse::failure(self.to_string())),
                )
                    .into_response()
            }
            CategoryError::InvalidId(raw) => AppError::InvalidIdentifier(raw).into_response(),
            CategoryError::Database(msg) => AppError::Database(msg).into_response(),
        }
    }
}

impl From<mongodb::error::Error> for CategoryError {
    fn from(err: mongodb::error::Error) -> Self {
        CategoryError::Database(err.to_string())
    }
}
