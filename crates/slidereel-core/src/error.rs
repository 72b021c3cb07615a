use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Structural error: {0}")]
    Structural(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid switch target: {0}")]
    InvalidTarget(String),
}

pub type Result<T> = std::result::Result<T, Error>;
