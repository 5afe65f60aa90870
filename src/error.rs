use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthenticityError {
    #[error("Image decode error: {0}")]
    Decode(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Empty input buffer")]
    EmptyInput,

    #[error("Image has zero area")]
    ZeroArea,

    #[error("Source fetch failed: {0}")]
    Fetch(String),

    #[error("Operation timed out after {0:?}")]
    Timeout(Duration),
}

pub type Result<T> = std::result::Result<T, AuthenticityError>;
