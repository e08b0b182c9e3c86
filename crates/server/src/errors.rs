use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use configs::ErrorStatusMode;
use service::auth::errors::AuthError;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::error;

const INTERNAL: &str = "Internal server error";

/// Error answer of every handler, rendered as `{"message": ...}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    pub fn bad_request(message: impl Into<String>) -> Self { Self::new(StatusCode::BAD_REQUEST, message) }

    fn internal(detail: &str) -> Self {
        error!(error = %detail, "internal error");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL)
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(_) | ServiceError::NotMember => Self::new(StatusCode::BAD_REQUEST, e.to_string()),
            ServiceError::GroupNotFound | ServiceError::UserNotFound | ServiceError::NotInGroup => {
                Self::new(StatusCode::NOT_FOUND, e.to_string())
            }
            ServiceError::AlreadyMember | ServiceError::Conflict(_) => Self::new(StatusCode::CONFLICT, e.to_string()),
            ServiceError::GroupsUnavailable => Self::new(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            ServiceError::Db(detail) => Self::internal(&detail),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Validation(_) | AuthError::MissingToken => Self::new(StatusCode::BAD_REQUEST, e.to_string()),
            AuthError::Conflict => Self::new(StatusCode::CONFLICT, e.to_string()),
            AuthError::Unauthorized | AuthError::InvalidToken => Self::new(StatusCode::UNAUTHORIZED, e.to_string()),
            AuthError::HashError(_) | AuthError::TokenError(_) | AuthError::Repository(_) => {
                Self::internal(&format!("auth error {}: {}", e.code(), e))
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(serde_json::json!({ "message": self.message }))).into_response()
    }
}

/// In legacy mode every error response goes out as 200, body unchanged.
pub async fn apply_error_status(State(mode): State<ErrorStatusMode>, req: Request, next: Next) -> Response {
    let mut resp = next.run(req).await;
    if mode == ErrorStatusMode::Legacy && (resp.status().is_client_error() || resp.status().is_server_error()) {
        *resp.status_mut() = StatusCode::OK;
    }
    resp
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database unavailable: {0}")]
    Database(String),
}
