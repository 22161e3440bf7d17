use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    #[error("Recommendation server error ({status}): {message}")]
    ServerFault { status: u16, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("External API error: {0}")]
    ExternalApi(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::Unauthenticated(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
            AppError::ExternalApi(msg) => (StatusCode::BAD_GATEWAY, msg),
            AppError::HttpClient(_) | AppError::ServerFault { .. } => {
                (StatusCode::BAD_GATEWAY, self.to_string())
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

/// Failure classes a recommendation load can end in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadErrorKind {
    NetworkUnreachable,
    Unauthenticated,
    ServerFault,
    Generic,
}

impl LoadErrorKind {
    /// Classifies a service error into the load taxonomy
    pub fn classify(error: &AppError) -> Self {
        match error {
            AppError::HttpClient(e) if e.is_connect() || e.is_timeout() => {
                LoadErrorKind::NetworkUnreachable
            }
            AppError::HttpClient(e) => match e.status().map(|s| s.as_u16()) {
                Some(401) => LoadErrorKind::Unauthenticated,
                Some(status) if status >= 500 => LoadErrorKind::ServerFault,
                Some(_) => LoadErrorKind::Generic,
                None if e.is_request() => LoadErrorKind::NetworkUnreachable,
                None => LoadErrorKind::Generic,
            },
            AppError::Unauthenticated(_) => LoadErrorKind::Unauthenticated,
            AppError::ServerFault { .. } => LoadErrorKind::ServerFault,
            _ => LoadErrorKind::Generic,
        }
    }

    /// Message shown to the user for this kind of failure
    pub fn user_message(self) -> &'static str {
        match self {
            LoadErrorKind::NetworkUnreachable => {
                "Cannot reach the recommendation server. Check your connection and try again."
            }
            LoadErrorKind::Unauthenticated => "Your session has expired. Please log in again.",
            LoadErrorKind::ServerFault => {
                "The recommendation server ran into a problem. Please try again later."
            }
            LoadErrorKind::Generic => "Could not load recommendations. Please try again.",
        }
    }
}

/// User-facing error stored on the recommendation state after a failed load
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadError {
    pub kind: LoadErrorKind,
    pub message: String,
}

impl From<&AppError> for LoadError {
    fn from(error: &AppError) -> Self {
        let kind = LoadErrorKind::classify(error);
        Self {
            kind,
            message: kind.user_message().to_string(),
        }
    }
}
