//! Typed path parameter extractor.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
    response::{IntoResponse, Response},
};
use std::str::FromStr;

/// Extracts a single path parameter and parses it with `T::from_str`.
///
/// A value that does not parse is rejected with
/// [`AppError::InvalidIdentifier`] (400) before the handler runs.
///
/// ```ignore
/// use axum_helpers::extractors::ParsedPath;
///
/// async fn delete(ParsedPath(id): ParsedPath<CategoryId>) -> String {
///     format!("Deleting {}", id)
/// }
///
/// let app = Router::new().route("/categories/{id}", delete(delete));
/// ```
pub struct ParsedPath<T>(pub T);

impl<T, S> FromRequestParts<S> for ParsedPath<T>
where
    T: FromStr + Send,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| e.into_response())?;

        match raw.parse::<T>() {
            Ok(value) => Ok(ParsedPath(value)),
            Err(_) => Err(AppError::InvalidIdentifier(raw).into_response()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::Request, http::StatusCode, routing::get};
    use tower::ServiceExt;

    async fn echo(ParsedPath(n): ParsedPath<u32>) -> String {
        n.to_string()
    }

    fn app() -> Router {
        Router::new().route("/{n}", get(echo))
    }

    #[tokio::test]
    async fn test_parsed_path_accepts_valid_value() {
        let response = app()
            .oneshot(Request::get("/42").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_parsed_path_rejects_invalid_value() {
        let response = app()
            .oneshot(Request::get("/forty-two").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
