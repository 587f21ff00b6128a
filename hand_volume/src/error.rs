//! Application-level errors.

use thiserror::Error;

use crate::audio::AudioError;
use crate::source::SourceError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("window error: {0}")]
    Window(String),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Audio(#[from] AudioError),

    #[error("giving up after {0} consecutive frame failures")]
    TooManyFrameFailures(u32),
}

impl From<minifb::Error> for AppError {
    fn from(e: minifb::Error) -> Self {
        AppError::Window(e.to_string())
    }
}
