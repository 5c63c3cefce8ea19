//! HTTP error response mapping.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use flicker_domain::error::{FlickerError, ValidationError};

/// JSON error body returned by every route.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`FlickerError`] to an HTTP response with appropriate status code.
///
/// A confirmation timeout is `408 Request Timeout` on every route, power and
/// heat alike.
#[derive(Debug)]
pub struct ApiError(FlickerError);

impl From<FlickerError> for ApiError {
    fn from(err: FlickerError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(ValidationError::MalformedRequest(rejection.body_text()).into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            FlickerError::Validation(_) => StatusCode::BAD_REQUEST,
            FlickerError::NotFound(_) => StatusCode::NOT_FOUND,
            FlickerError::Timeout(err) => {
                tracing::warn!(error = %err, "confirmation timed out");
                StatusCode::REQUEST_TIMEOUT
            }
            FlickerError::Sensor(_)
            | FlickerError::Dispatch(_)
            | FlickerError::UnexpectedState(_) => {
                tracing::error!(error = ?self.0, "appliance error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (
            status,
            Json(ErrorBody {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}
