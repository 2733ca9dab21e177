use crate::error::ContentionError;

/// Tunables of the contention generator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentionConfig {
    /// Size of the synthetic owner pool (`locust-0 .. locust-{n-1}`).
    pub num_owners: usize,

    /// Exact number of mutations per batch.
    ///
    /// This is a load parameter: a roster smaller than this fails the
    /// cycle instead of producing a shorter batch.
    pub num_blocks: usize,

    /// How far below the observed counter a proposal may fall.
    ///
    /// Kept large relative to `over` so a good share of writes carry a
    /// stale version and get rejected by the service.
    pub under: u32,

    /// How far above the observed counter a proposal may rise.
    pub over: u32,
}

impl Default for ContentionConfig {
    fn default() -> Self {
        Self {
            num_owners: 10,
            num_blocks: 500,
            under: 5,
            over: 1,
        }
    }
}

impl ContentionConfig {
    pub fn validate(&self) -> Result<(), ContentionError> {
        if self.num_owners == 0 {
            return Err(ContentionError::InvalidConfig(
                "num_owners must be at least 1".into(),
            ));
        }
        if self.num_blocks == 0 {
            return Err(ContentionError::InvalidConfig(
                "num_blocks must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
