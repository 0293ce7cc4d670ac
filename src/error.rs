use thiserror::Error;

#[derive(Error, Debug)]
pub enum CheckoutError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("No unused transaction id after {0} attempts")]
    IdSpaceExhausted(u32),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CheckoutError>;
