use thiserror::Error;

use crate::booking::ClientError;
use engine::ContentionError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("booking service error: {0}")]
    Client(#[from] ClientError),

    #[error("contention error: {0}")]
    Contention(#[from] ContentionError),
}
