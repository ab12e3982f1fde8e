//! Validated request extractors.
//!
//! `ValidatedJson` deserializes a JSON body and runs `validator` rules on
//! it, rejecting into `AppError` so failures render through the standard
//! error response format.

use axum::Json;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::{AppError, AppResult};

/// JSON extractor that validates the payload after deserialization.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> AppResult<Self> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest {
                message: rejection.body_text(),
            })?;

        value.validate().map_err(first_validation_error)?;
        Ok(ValidatedJson(value))
    }
}

/// Reduces a `validator` error set to the first field violation.
fn first_validation_error(errors: validator::ValidationErrors) -> AppError {
    let (field, field_errors) = match errors.field_errors().into_iter().next() {
        Some(entry) => entry,
        None => {
            return AppError::Validation {
                field: "body".to_string(),
                reason: "validation failed".to_string(),
            };
        }
    };

    let reason = field_errors
        .first()
        .and_then(|e| e.message.as_ref())
        .map(|m| m.to_string())
        .unwrap_or_else(|| "validation failed".to_string());

    AppError::Validation {
        field: field.to_string(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Method, header};
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    struct TestPayload {
        #[validate(length(min = 1, message = "Name is required"))]
        name: String,
        #[validate(range(min = 1, max = 480, message = "Duration must be 1-480 minutes"))]
        duration: u32,
    }

    fn json_request(body: &str) -> Request {
        Request::builder()
            .method(Method::POST)
            .uri("/test")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn accepts_valid_payload() {
        let request = json_request(r#"{"name":"Coupe","duration":45}"#);
        let result = ValidatedJson::<TestPayload>::from_request(request, &()).await;

        let ValidatedJson(payload) = result.unwrap();
        assert_eq!(payload.name, "Coupe");
        assert_eq!(payload.duration, 45);
    }

    #[tokio::test]
    async fn rejects_failing_validation_rule() {
        let request = json_request(r#"{"name":"","duration":45}"#);
        let result = ValidatedJson::<TestPayload>::from_request(request, &()).await;

        match result.unwrap_err() {
            AppError::Validation { field, reason } => {
                assert_eq!(field, "name");
                assert!(reason.contains("required"));
            }
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn rejects_malformed_json_as_bad_request() {
        let request = json_request("{not json");
        let result = ValidatedJson::<TestPayload>::from_request(request, &()).await;

        assert!(matches!(result.unwrap_err(), AppError::BadRequest { .. }));
    }

    #[tokio::test]
    async fn rejects_missing_content_type() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/test")
            .body(Body::from(r#"{"name":"Coupe","duration":45}"#))
            .unwrap();
        let result = ValidatedJson::<TestPayload>::from_request(request, &()).await;

        assert!(matches!(result.unwrap_err(), AppError::BadRequest { .. }));
    }
}
