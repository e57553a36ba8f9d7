use serde_json::error::Category;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("request body is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),
    #[error("request body must be a JSON object")]
    NotAnObject,
    #[error("request body has the wrong shape: {0}")]
    InvalidShape(#[source] serde_json::Error),
}

impl DispatchError {
    /// Wire text reported to HTTP clients; the detailed reason stays in logs.
    pub fn public_message(&self) -> &'static str {
        "Invalid request"
    }
}

impl From<serde_json::Error> for DispatchError {
    fn from(error: serde_json::Error) -> Self {
        match error.classify() {
            Category::Data => Self::InvalidShape(error),
            Category::Io | Category::Syntax | Category::Eof => Self::InvalidJson(error),
        }
    }
}
