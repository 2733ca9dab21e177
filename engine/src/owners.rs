use std::fmt;
use std::str::FromStr;

use corelib::Owner;
use rand::Rng;

use crate::error::ContentionError;

/// Fixed pool of synthetic owners, `locust-0 .. locust-{n-1}`.
///
/// Built once at startup and shared read-only by every simulated user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerPool {
    owners: Vec<Owner>,
}

impl OwnerPool {
    pub fn new(num_owners: usize) -> Result<Self, ContentionError> {
        if num_owners == 0 {
            return Err(ContentionError::InvalidConfig(
                "owner pool cannot be empty".into(),
            ));
        }

        let owners = (0..num_owners)
            .map(|i| Owner::new(format!("locust-{i}")))
            .collect();

        Ok(Self { owners })
    }

    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }

    pub fn owners(&self) -> &[Owner] {
        &self.owners
    }

    /// Uniform draw from the pool.
    pub fn choose<R>(&self, rng: &mut R) -> &Owner
    where
        R: Rng + ?Sized,
    {
        // Non-empty by construction.
        &self.owners[rng.gen_range(0..self.owners.len())]
    }
}

/// When a simulated user draws its owner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OwnerAssignment {
    /// Fresh draw for every batch, i.e. once per cycle.
    #[default]
    PerBatch,

    /// One draw when the user starts, reused for all its cycles.
    PerUser,
}

impl FromStr for OwnerAssignment {
    type Err = ContentionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "per-batch" | "per_batch" | "batch" => Ok(Self::PerBatch),
            "per-user" | "per_user" | "user" => Ok(Self::PerUser),
            other => Err(ContentionError::InvalidConfig(format!(
                "unknown owner assignment `{other}`"
            ))),
        }
    }
}

impl fmt::Display for OwnerAssignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PerBatch => f.write_str("per-batch"),
            Self::PerUser => f.write_str("per-user"),
        }
    }
}
