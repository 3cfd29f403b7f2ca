use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain::setting::SettingsError;
use serde_json::json;
use serve::render::RenderError;
use serve::Error as ServeError;
use std::io;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("serve error: {0}")]
    ServeError(#[from] ServeError),

    #[error("render error: {0}")]
    Render(#[from] RenderError),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("live preview is disabled")]
    PreviewDisabled,

    #[error("page {0:?} not found")]
    PageNotFound(String),
}

impl Error {
    pub fn to_status(&self) -> StatusCode {
        match self {
            Error::ServeError(e) => e.to_status(),
            Error::BadRequest(_) => StatusCode::BAD_REQUEST,
            Error::PreviewDisabled => StatusCode::FORBIDDEN,
            Error::PageNotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.to_status();
        if status.is_server_error() {
            error!("request failed: {}", self);
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_the_underlying_error() {
        let upstream = Error::from(ServeError::GraphQl(vec!["down".into()]));
        assert_eq!(upstream.to_status(), StatusCode::BAD_GATEWAY);

        let bad_path = Error::from(ServeError::InvalidPath("/..".into()));
        assert_eq!(bad_path.to_status(), StatusCode::NOT_FOUND);

        assert_eq!(Error::BadRequest("x".into()).to_status(), StatusCode::BAD_REQUEST);
        assert_eq!(Error::Config("x".into()).to_status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
