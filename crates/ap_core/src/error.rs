use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Transport, credential or status failure talking to a generation backend.
    #[error("Generation backend unavailable: {0}")]
    BackendUnavailable(String),

    /// The backend answered but the labeled sections could not be found.
    #[error("Unparseable backend response: {0}")]
    UnparseableResponse(String),

    #[error("Unable to generate article with unique title after {attempts} attempts")]
    GenerationExhausted { attempts: usize },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Article job already initialized")]
    AlreadyInitialized,

    #[error("External error: {0}")]
    External(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
