use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    #[error("Login error: {0}")]
    Login(String),

    #[error("Rusqlite error: {0}")]
    Rusqlite(#[from] rusqlite::Error),
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
