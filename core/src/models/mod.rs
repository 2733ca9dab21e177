use std::fmt;

use serde::{Deserialize, Serialize};

pub mod booking;
pub mod round;

pub use booking::*;
pub use round::*;

/// Synthetic claimant identity attached to every mutation of a batch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Owner(String);

impl Owner {
    pub fn new(v: impl Into<String>) -> Self {
        Self(v.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Owner {
    fn from(v: &str) -> Self {
        Self(v.to_string())
    }
}
