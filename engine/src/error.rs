use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContentionError {
    #[error("cannot sample {requested} seats from a roster of {available}")]
    InsufficientSeats { requested: usize, available: usize },

    #[error("invalid contention config: {0}")]
    InvalidConfig(String),
}
