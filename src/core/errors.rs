use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Bad Request: {0}")]
    BadRequest(String),
    #[error("Not Found: {0}")]
    NotFound(String),
    #[error("Backend error: {0}")]
    Backend(#[from] anyhow::Error),
}

impl FeedError {
    /// Message shown to the client. Backend details stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            FeedError::BadRequest(msg) | FeedError::NotFound(msg) => msg.clone(),
            FeedError::Backend(_) => "Internal server error".to_string(),
        }
    }
}

impl ResponseError for FeedError {
    fn status_code(&self) -> StatusCode {
        match self {
            FeedError::BadRequest(_) => StatusCode::BAD_REQUEST,
            FeedError::NotFound(_) => StatusCode::NOT_FOUND,
            FeedError::Backend(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let FeedError::Backend(err) = self {
            tracing::error!(error = %err, "backend request failed");
        }
        HttpResponse::build(self.status_code())
            .json(serde_json::json!({ "error": self.public_message() }))
    }
}

pub type FeedResult<T> = Result<T, FeedError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_variant() {
        assert_eq!(
            FeedError::BadRequest("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            FeedError::NotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        let backend: FeedError = anyhow::anyhow!("lock poisoned").into();
        assert_eq!(backend.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(backend.public_message(), "Internal server error");
    }
}
