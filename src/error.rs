use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("no places supplied")]
    EmptyInput,
    #[error("start place not found: {name}")]
    UnknownStart { name: String },
    #[error("place {name} has coordinates out of range: {lat},{lon}")]
    InvalidCoordinate { name: String, lat: f64, lon: f64 },
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}
