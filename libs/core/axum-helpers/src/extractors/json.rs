//! JSON body extractor with standardized rejections.

use crate::errors::AppError;
use axum::{
    extract::{FromRequest, Json, OptionalFromRequest, Request},
    http::header::CONTENT_LENGTH,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;

/// JSON body extractor whose rejection is an [`AppError`] response.
///
/// Syntax errors answer 400, a missing/wrong content type 415, and bodies that
/// do not match `T` (missing or unknown fields) 422.
///
/// As `Option<AppJson<T>>` a request without a body (no `Content-Type`, or
/// `Content-Length: 0`) extracts as `None`.
///
/// ```ignore
/// use axum_helpers::extractors::AppJson;
///
/// async fn create(AppJson(payload): AppJson<CreateCategory>) -> String {
///     format!("Creating {}", payload.name)
/// }
/// ```
pub struct AppJson<T>(pub T);

impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = <Json<T> as FromRequest<S>>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::from(rejection).into_response())?;

        Ok(AppJson(data))
    }
}

impl<T, S> OptionalFromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Option<Self>, Self::Rejection> {
        let empty = req
            .headers()
            .get(CONTENT_LENGTH)
            .is_some_and(|len| len.as_bytes() == b"0");
        if empty {
            return Ok(None);
        }

        let data = <Json<T> as OptionalFromRequest<S>>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::from(rejection).into_response())?;

        Ok(data.map(|Json(data)| AppJson(data)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::StatusCode, routing::post};
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize)]
    struct Payload {
        name: String,
    }

    async fn echo(AppJson(payload): AppJson<Payload>) -> String {
        payload.name
    }

    async fn echo_optional(payload: Option<AppJson<Payload>>) -> String {
        payload.map_or_else(|| "none".to_string(), |AppJson(payload)| payload.name)
    }

    async fn send_optional(request: axum::http::Request<Body>) -> (StatusCode, String) {
        let response = Router::new()
            .route("/", post(echo_optional))
            .oneshot(request)
            .await
            .unwrap();
        let status = response.status();
        let bytes = http_body_util::BodyExt::collect(response.into_body())
            .await
            .unwrap()
            .to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    async fn send(body: &'static str, content_type: Option<&str>) -> StatusCode {
        let mut request = axum::http::Request::post("/");
        if let Some(content_type) = content_type {
            request = request.header("content-type", content_type);
        }

        Router::new()
            .route("/", post(echo))
            .oneshot(request.body(Body::from(body)).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_app_json_accepts_valid_body() {
        let status = send(r#"{"name":"Senjata Api"}"#, Some("application/json")).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_app_json_rejects_syntax_error() {
        let status = send(r#"{"name":"#, Some("application/json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_app_json_rejects_missing_field() {
        let status = send(r#"{"title":"x"}"#, Some("application/json")).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_app_json_requires_content_type() {
        let status = send(r#"{"name":"x"}"#, None).await;
        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[tokio::test]
    async fn test_optional_app_json_without_body_is_none() {
        let request = axum::http::Request::post("/").body(Body::empty()).unwrap();
        assert_eq!(
            send_optional(request).await,
            (StatusCode::OK, "none".to_string())
        );

        let request = axum::http::Request::post("/")
            .header("content-type", "application/json")
            .header("content-length", "0")
            .body(Body::empty())
            .unwrap();
        assert_eq!(
            send_optional(request).await,
            (StatusCode::OK, "none".to_string())
        );
    }

    #[tokio::test]
    async fn test_optional_app_json_parses_body() {
        let request = axum::http::Request::post("/")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"name":"Senjata Api"}"#))
            .unwrap();
        assert_eq!(
            send_optional(request).await,
            (StatusCode::OK, "Senjata Api".to_string())
        );

        let request = axum::http::Request::post("/")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"title":"x"}"#))
            .unwrap();
        assert_eq!(send_optional(request).await.0, StatusCode::UNPROCESSABLE_ENTITY);
    }
}
