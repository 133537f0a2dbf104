use thiserror::Error;

/// Errors surfaced at the API boundary. Engine operations themselves degrade
/// to empty results or no-ops on bad input; these cover malformed requests
/// and serialization failures only.
#[derive(Error, Debug)]
pub enum BoardError {
    #[error("Invalid formation: {0}")]
    InvalidFormation(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

impl From<serde_json::Error> for BoardError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() {
            BoardError::Deserialization(err.to_string())
        } else {
            BoardError::Serialization(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, BoardError>;
