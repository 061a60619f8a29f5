use axum::{
    response::{IntoResponse, Response},
    Json,
};
use http::StatusCode;
use serde::{Deserialize, Serialize};
use std::any::Any;
use tracing::{error, warn};

use crate::error::{ErrorKind, RentalsError};

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ApiError {
    pub details: String,
    pub status: u16,
    pub title: String,
}

impl IntoResponse for RentalsError {
    fn into_response(self) -> Response {
        let (status, details) = match self.kind() {
            ErrorKind::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            ErrorKind::InvalidInput => {
                warn!("rejected rentals request: {}", self);
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            ErrorKind::Internal => {
                // cause is logged, never sent
                error!(error = %self, "rentals request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        api_error(status, details)
    }
}

fn api_error(status: StatusCode, details: String) -> Response {
    let body = ApiError {
        details,
        status: status.as_u16(),
        title: status.canonical_reason().unwrap_or("Error").to_string(),
    };
    (status, Json(body)).into_response()
}

pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!(panic = message, "rentals handler panicked");
    api_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        "internal server error".to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_of(err: RentalsError) -> (StatusCode, ApiError) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn not_found_keeps_message() {
        let (status, body) = body_of(RentalsError::rental_not_found(404)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body,
            ApiError {
                details: "rental with id 404 not found".to_string(),
                status: 404,
                title: "Not Found".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn invalid_input_is_a_bad_request() {
        let (status, body) =
            body_of(RentalsError::InvalidInput("unsupported sort field 'x'".to_string())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.title, "Bad Request");
        assert_eq!(body.details, "unsupported sort field 'x'");
    }

    #[tokio::test]
    async fn internal_details_are_scrubbed() {
        let err = RentalsError::internal(
            "failed to get rentals",
            sqlx::Error::Protocol("relation \"rentals\" does not exist".to_string()),
        );
        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.details, "internal server error");
        assert_eq!(body.title, "Internal Server Error");
        assert_eq!(body.status, 500);
    }

    #[tokio::test]
    async fn panics_get_the_scrubbed_body() {
        let response = panic_response(Box::new("index out of bounds".to_string()));
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: ApiError = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.details, "internal server error");
        assert_eq!(body.title, "Internal Server Error");
    }
}
