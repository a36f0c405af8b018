//! Error type shared by templates, the registry and the HTTP layer.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, QuizError>;

#[derive(Debug, Error)]
pub enum QuizError {
    /// Empty category selection or a name the quiz does not define.
    #[error("Invalid category: {0}")]
    InvalidCategory(String),

    /// A seed this template cannot have produced.
    #[error("Invalid seed: {0}")]
    InvalidSeed(String),

    /// Request bodies that are not valid JSON or do not fit the expected shape.
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unknown quiz: {0}")]
    UnknownQuiz(String),

    /// Startup-time problems: empty banks, bad registration paths, bad config files.
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl QuizError {
    pub fn status(&self) -> StatusCode {
        match self {
            QuizError::InvalidCategory(_) | QuizError::InvalidSeed(_) | QuizError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            QuizError::UnknownQuiz(_) => StatusCode::NOT_FOUND,
            QuizError::Configuration(_) | QuizError::Io(_) | QuizError::Toml(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<JsonRejection> for QuizError {
    fn from(rejection: JsonRejection) -> Self {
        QuizError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for QuizError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
