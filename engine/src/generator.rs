use corelib::{BookingMutation, Owner, Seat};
use rand::Rng;
use tracing::debug;

use crate::config::ContentionConfig;
use crate::counter::evolve_counter;
use crate::error::ContentionError;
use crate::owners::OwnerPool;
use crate::selector::select_seats;

/// One request worth of mutations, all claimed by the same owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    owner: Owner,
    mutations: Vec<BookingMutation>,
}

impl Batch {
    pub fn owner(&self) -> &Owner {
        &self.owner
    }

    pub fn mutations(&self) -> &[BookingMutation] {
        &self.mutations
    }

    pub fn len(&self) -> usize {
        self.mutations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mutations.is_empty()
    }

    pub fn into_mutations(self) -> Vec<BookingMutation> {
        self.mutations
    }
}

/// Builds contention batches from fetched rosters.
///
/// Holds only immutable configuration; all per-cycle randomness comes from
/// the `rng` passed to each call, so one generator can back any number of
/// simulated users.
#[derive(Debug, Clone)]
pub struct ContentionGenerator {
    config: ContentionConfig,
    owners: OwnerPool,
}

impl ContentionGenerator {
    pub fn new(config: ContentionConfig) -> Result<Self, ContentionError> {
        config.validate()?;
        let owners = OwnerPool::new(config.num_owners)?;

        Ok(Self { config, owners })
    }

    pub fn config(&self) -> &ContentionConfig {
        &self.config
    }

    pub fn owners(&self) -> &OwnerPool {
        &self.owners
    }

    pub fn pick_owner<R>(&self, rng: &mut R) -> Owner
    where
        R: Rng + ?Sized,
    {
        self.owners.choose(rng).clone()
    }

    /// Samples seats, draws one owner for the whole batch, then evolves
    /// each selected seat's counter.
    pub fn generate<R>(&self, roster: &[Seat], rng: &mut R) -> Result<Batch, ContentionError>
    where
        R: Rng + ?Sized,
    {
        let selected = select_seats(roster, self.config.num_blocks, rng)?;
        let owner = self.pick_owner(rng);

        Ok(self.assemble(selected, owner, rng))
    }

    /// Same as [`generate`](Self::generate) with a caller-fixed owner.
    pub fn generate_for<R>(
        &self,
        roster: &[Seat],
        owner: &Owner,
        rng: &mut R,
    ) -> Result<Batch, ContentionError>
    where
        R: Rng + ?Sized,
    {
        let selected = select_seats(roster, self.config.num_blocks, rng)?;

        Ok(self.assemble(selected, owner.clone(), rng))
    }

    fn assemble<R>(&self, selected: Vec<&Seat>, owner: Owner, rng: &mut R) -> Batch
    where
        R: Rng + ?Sized,
    {
        let ContentionConfig { under, over, .. } = self.config;

        let mutations: Vec<BookingMutation> = selected
            .into_iter()
            .map(|seat| BookingMutation {
                seat_id: seat.seat_id.clone(),
                owner: owner.clone(),
                counter: evolve_counter(seat.observed_counter(), under, over, rng),
            })
            .collect();

        debug!(
            owner = %owner,
            mutations = mutations.len(),
            "contention batch assembled"
        );

        Batch { owner, mutations }
    }
}
