use std::fmt::{self, Display};

/// Errors produced by model constructors and validation routines.
#[derive(Debug)]
pub enum ModelError {
    Json(serde_json::Error),
    InvalidEventId(String),
    InvalidFrame(String),
    InvalidDocument(String),
}

impl Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::Json(err) => write!(f, "json error: {err}"),
            ModelError::InvalidEventId(id) => {
                write!(f, "invalid event id: '{id}'")
            }
            ModelError::InvalidFrame(msg) => write!(f, "invalid frame: {msg}"),
            ModelError::InvalidDocument(msg) => {
                write!(f, "invalid document: {msg}")
            }
        }
    }
}

impl std::error::Error for ModelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ModelError::Json(err) => Some(err),
            ModelError::InvalidEventId(_)
            | ModelError::InvalidFrame(_)
            | ModelError::InvalidDocument(_) => None,
        }
    }
}

impl From<serde_json::Error> for ModelError {
    fn from(err: serde_json::Error) -> Self {
        ModelError::Json(err)
    }
}

pub type Result<T> = std::result::Result<T, ModelError>;
