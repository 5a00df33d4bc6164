//! JSON body extractor whose rejections use the shared error format.

use crate::errors::AppError;
use axum::extract::{FromRequest, Json, Request};
use serde::de::DeserializeOwned;

/// Like [`axum::Json`], but a malformed body yields an [`AppError`] so the client
/// sees the usual `{code, error, message}` envelope.
///
/// The status follows axum's rejection: 400 for syntax errors, 415 for a missing
/// `Content-Type: application/json`, 422 for type mismatches.
///
/// # Example
/// ```ignore
/// use axum_helpers::JsonBody;
///
/// async fn create(JsonBody(input): JsonBody<CreateProduct>) -> impl IntoResponse {
///     // ...
/// }
/// ```
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state).await?;
        Ok(JsonBody(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::StatusCode, routing::post};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    #[derive(serde::Deserialize)]
    struct Payload {
        name: String,
    }

    fn app() -> Router {
        Router::new().route(
            "/",
            post(|JsonBody(p): JsonBody<Payload>| async move { p.name }),
        )
    }

    fn request(content_type: Option<&str>, body: &'static str) -> Request {
        let mut builder = axum::http::Request::builder().method("POST").uri("/");
        if let Some(ct) = content_type {
            builder = builder.header("content-type", ct);
        }
        builder.body(Body::from(body)).unwrap()
    }

    async fn error_of(response: axum::response::Response) -> crate::ErrorResponse {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_valid_body_passes_through() {
        let response = app()
            .oneshot(request(Some("application/json"), r#"{"name":"Pen"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], b"Pen");
    }

    #[tokio::test]
    async fn test_syntax_error_is_400_with_json_envelope() {
        let response = app()
            .oneshot(request(Some("application/json"), "{not json"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = error_of(response).await;
        assert_eq!(body.error, "JSON_EXTRACTION");
        assert!(!body.message.is_empty());
    }

    #[tokio::test]
    async fn test_missing_content_type_is_415() {
        let response = app()
            .oneshot(request(None, r#"{"name":"Pen"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[tokio::test]
    async fn test_type_mismatch_is_422() {
        let response = app()
            .oneshot(request(Some("application/json"), r#"{"name":42}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
