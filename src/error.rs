use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Uniform error body returned by every endpoint.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "error": "Invalid request",
    "message": "Missing idToken",
    "status": 422
}))]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
    pub status: u16,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Blank token, missing query parameter, unreadable body.
    #[error("{0}")]
    MalformedRequest(String),

    /// Rejected by the tokeninfo endpoint, unverified email, or not registered.
    #[error("{0}")]
    AuthenticationFailure(String),

    /// Could not talk to the tokeninfo endpoint.
    #[error("tokeninfo request failed: {0}")]
    Transport(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ApiError {
    pub fn transport<E: std::fmt::Display>(err: E) -> Self {
        Self::Transport(err.to_string())
    }

    fn label(&self) -> &'static str {
        match self {
            ApiError::MalformedRequest(_) => "Invalid request",
            ApiError::AuthenticationFailure(_) => "Unauthorized",
            ApiError::Transport(_) | ApiError::Database(_) => "Internal Server Error",
        }
    }

    /// Server-side failures keep their detail in the logs only.
    fn client_message(&self) -> String {
        match self {
            ApiError::MalformedRequest(m) | ApiError::AuthenticationFailure(m) => m.clone(),
            ApiError::Transport(_) => "Token validation failed".to_string(),
            ApiError::Database(_) => "An unexpected error occurred".to_string(),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MalformedRequest(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::AuthenticationFailure(_) => StatusCode::UNAUTHORIZED,
            ApiError::Transport(_) | ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::warn!(error = %self, status = status.as_u16(), "Request rejected");
        }

        HttpResponse::build(status).json(ErrorBody {
            error: self.label().to_string(),
            message: self.client_message(),
            status: status.as_u16(),
        })
    }
}

pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::MalformedRequest(err.to_string()).into()
}

pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::MalformedRequest(err.to_string()).into()
}

pub fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::MalformedRequest(err.to_string()).into()
}
