use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Response,
    routing, Json, Router,
};
use folio_core_contact_contracts::{ContactFeatureService, ContactSubmitError};
use serde_json::Value;
use tracing::debug;

use super::{internal_error, success, validation_error};
use crate::models::{contact::ApiContactMessage, ApiFieldError};

const MALFORMED_BODY: ApiFieldError = ApiFieldError {
    field: "body",
    message: "Request body must be a valid JSON object",
};

pub fn router(service: Arc<impl ContactFeatureService>) -> Router<()> {
    Router::new()
        .route("/api/contact", routing::post(submit_message))
        .with_state(service)
}

async fn submit_message(
    service: State<Arc<impl ContactFeatureService>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(rejection) => {
            debug!(%rejection, "rejected malformed contact request");
            return validation_error([MALFORMED_BODY]);
        }
    };

    match service.submit_message(payload).await {
        Ok(message) => success(
            StatusCode::CREATED,
            "Contact message saved successfully",
            ApiContactMessage::from(message),
        ),
        Err(ContactSubmitError::Validation(err)) => {
            validation_error(err.errors.into_iter().map(Into::into))
        }
        Err(ContactSubmitError::Other(err)) => {
            internal_error(err, "Failed to save contact message")
        }
    }
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;
    use axum::{body::Body, http::Request};
    use chrono::DateTime;
    use folio_core_contact_contracts::MockContactFeatureService;
    use folio_core_contact_impl::ContactFeatureServiceImpl;
    use folio_models::contact::{ContactMessage, ContactMessageId, ContactSubmission};
    use folio_persistence_contracts::{
        contact::MockContactRepository, MockDatabase, MockTransaction,
    };
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tower::ServiceExt;

    use super::*;

    async fn send(
        service: impl ContactFeatureService,
        content_type: Option<&str>,
        body: impl Into<Body>,
    ) -> (StatusCode, Value) {
        let mut request = Request::post("/api/contact");
        if let Some(content_type) = content_type {
            request = request.header("Content-Type", content_type);
        }

        let response = router(Arc::new(service))
            .oneshot(request.body(body.into()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    async fn send_json(
        service: impl ContactFeatureService,
        payload: &Value,
    ) -> (StatusCode, Value) {
        send(service, Some("application/json"), payload.to_string()).await
    }

    type Feature = ContactFeatureServiceImpl<MockDatabase, MockContactRepository<MockTransaction>>;

    fn stored(payload: &Value) -> ContactMessage {
        ContactMessage {
            id: ContactMessageId::from(1),
            submission: ContactSubmission::validate(payload).unwrap(),
            created_at: DateTime::from_timestamp(1729166400, 0).unwrap(),
        }
    }

    fn alice() -> Value {
        json!({
            "name": "Alice",
            "email": "alice@example.com",
            "subject": "Hi",
            "message": "Hello there, nice site!",
        })
    }

    #[tokio::test]
    async fn created() {
        // Arrange
        let payload = alice();
        let service = MockContactFeatureService::new()
            .with_submit_message(payload.clone(), Ok(stored(&payload)));

        // Act
        let (status, body) = send_json(service, &payload).await;

        // Assert
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(
            body,
            json!({
                "success": true,
                "message": "Contact message saved successfully",
                "data": {
                    "id": 1,
                    "name": "Alice",
                    "email": "alice@example.com",
                    "subject": "Hi",
                    "message": "Hello there, nice site!",
                    "created_at": "2024-10-17T12:00:00Z",
                },
            })
        );
    }

    #[tokio::test]
    async fn extra_fields_are_dropped() {
        // Arrange
        let mut payload = alice();
        payload["foo"] = json!("bar");
        let service = MockContactFeatureService::new()
            .with_submit_message(payload.clone(), Ok(stored(&alice())));

        // Act
        let (status, body) = send_json(service, &payload).await;

        // Assert
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["name"], "Alice");
        assert!(body["data"].get("foo").is_none());
    }

    #[tokio::test]
    async fn invalid_submission() {
        // Arrange
        let payload = json!({
            "name": "",
            "email": "bad-email",
            "subject": "Hi",
            "message": "short",
        });
        let err = ContactSubmission::validate(&payload).unwrap_err();
        let service = MockContactFeatureService::new()
            .with_submit_message(payload.clone(), Err(ContactSubmitError::Validation(err)));

        // Act
        let (status, body) = send_json(service, &payload).await;

        // Assert
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({
                "success": false,
                "message": "Validation error",
                "errors": [
                    {"field": "name", "message": "Name is required"},
                    {"field": "email", "message": "Invalid email address"},
                    {"field": "message", "message": "Message must be at least 10 characters"},
                ],
            })
        );
    }

    #[tokio::test]
    async fn storage_error() {
        // Arrange
        let payload = alice();
        let service = MockContactFeatureService::new().with_submit_message(
            payload.clone(),
            Err(ContactSubmitError::Other(anyhow!(
                "Failed to insert contact message: relation \"contacts\" does not exist"
            ))),
        );

        // Act
        let (status, body) = send_json(service, &payload).await;

        // Assert
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            json!({"success": false, "message": "Failed to save contact message"})
        );
    }

    #[tokio::test]
    async fn invalid_json() {
        // Arrange
        let service = MockContactFeatureService::new();

        // Act
        let (status, body) = send(service, Some("application/json"), "{\"name\": ").await;

        // Assert
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({
                "success": false,
                "message": "Validation error",
                "errors": [{"field": "body", "message": "Request body must be a valid JSON object"}],
            })
        );
    }

    #[tokio::test]
    async fn missing_content_type() {
        // Arrange
        let service = MockContactFeatureService::new();

        // Act
        let (status, body) = send(service, None, alice().to_string()).await;

        // Assert
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"][0]["field"], "body");
    }

    #[tokio::test]
    async fn feature_drops_extra_fields() {
        // Arrange
        let mut payload = alice();
        payload["foo"] = json!("bar");
        let expected = stored(&alice());

        let service: Feature = ContactFeatureServiceImpl::new(
            MockDatabase::build(true),
            MockContactRepository::new()
                .with_create(expected.submission.clone(), expected.clone()),
        );

        // Act
        let (status, body) = send_json(service, &payload).await;

        // Assert
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["id"], 1);
        assert_eq!(body["data"]["name"], "Alice");
        assert_eq!(body["data"]["created_at"], "2024-10-17T12:00:00Z");
        assert!(body["data"].get("foo").is_none());
    }

    #[tokio::test]
    async fn feature_storage_error() {
        // Arrange
        let payload = alice();
        let submission = ContactSubmission::validate(&payload).unwrap();

        let service: Feature = ContactFeatureServiceImpl::new(
            MockDatabase::build(false),
            MockContactRepository::new().with_create_error(
                submission,
                anyhow!("Failed to insert contact message: connection reset by peer"),
            ),
        );

        // Act
        let (status, body) = send_json(service, &payload).await;

        // Assert
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            json!({"success": false, "message": "Failed to save contact message"})
        );
    }

    #[tokio::test]
    async fn feature_rejects_invalid_submission_without_storage() {
        // Arrange
        let payload = json!({
            "name": "",
            "email": "bad-email",
            "subject": "Hi",
            "message": "short",
        });

        let service: Feature =
            ContactFeatureServiceImpl::new(MockDatabase::new(), MockContactRepository::new());

        // Act
        let (status, body) = send_json(service, &payload).await;

        // Assert
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let fields = body["errors"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["field"].as_str().unwrap())
            .collect::<Vec<_>>();
        assert_eq!(fields, ["name", "email", "message"]);
    }
}
