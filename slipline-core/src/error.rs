//! Error types for slipline

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Statement text is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Invalid statement profile: {0}")]
    Profile(String),
}

pub type Result<T> = std::result::Result<T, Error>;
