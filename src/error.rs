use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    /// Required configuration (the upstream API key) is missing.
    #[error("{0}")]
    Config(String),

    #[error("{0}")]
    Validation(String),

    #[error("invalid or missing tool: '{0}'")]
    UnknownTool(String),

    /// Upstream answered with a non-success status. `body` is the raw response text.
    #[error("upstream error ({status}): {body}")]
    Upstream { status: u16, body: String },

    #[error("{0}")]
    Transport(String),

    #[error("unexpected upstream payload: {0}")]
    UnexpectedShape(String),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, GatewayError>;

impl GatewayError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Config(_) | Self::Transport(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Validation(_) | Self::UnknownTool(_) => StatusCode::BAD_REQUEST,
            Self::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            Self::UnexpectedShape(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        // Drop the URL from the message; it is fixed and uninteresting to callers.
        Self::Transport(err.without_url().to_string())
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            Self::Upstream { body, .. } => json!({
                "ok": false,
                "error": "upstream error",
                "details": body,
            }),
            other => json!({ "ok": false, "error": other.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}
