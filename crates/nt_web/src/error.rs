use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use nt_core::Error;
use serde_json::json;
use tracing::{error, warn};

/// Request-level failure rendered as `{"detail": "..."}`.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            Error::MissingKeyword => StatusCode::UNPROCESSABLE_ENTITY,
            Error::NoArticles { .. } => StatusCode::NOT_FOUND,
            Error::Summarization(_) | Error::Http(_) | Error::Inference(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if self.0.is_request_level() {
            warn!(error = %self.0, %status, "Request rejected");
        } else {
            error!(error = %self.0, %status, "Request failed");
        }
        (status, Json(json!({ "detail": self.0.to_string() }))).into_response()
    }
}
