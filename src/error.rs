use thiserror::Error;

#[derive(Error, Debug)]
pub enum MemnavError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Robot service error: {0}")]
    Robot(String),

    #[error("Search error: {0}")]
    Search(String),

    #[error("Run interrupted by user")]
    Interrupted,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MemnavError>;
