use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Model error: {0}")]
    Model(#[from] passport_model::ModelError),

    #[error("Document store error: {0}")]
    Store(String),

    #[error("Identity provider error: {0}")]
    Identity(String),

    #[error("Camera error: {0}")]
    Camera(String),

    #[error("Barcode decode failed: {0}")]
    Decode(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
