//! Version proposal for a single seat.
//!
//! The proposal is the observed counter plus a step drawn uniformly from
//! `-under..=over`. With `under > over` the walk drifts downwards, so many
//! proposals are at or below the version the service already holds and get
//! rejected as conflicts. Proposals never go below 1.

use rand::Rng;

/// Proposed counter for a seat whose current version is `observed`.
///
/// `None` and `Some(0)` both mean the seat was never booked; the proposal
/// is then always 1.
pub fn evolve_counter<R>(observed: Option<u64>, under: u32, over: u32, rng: &mut R) -> u64
where
    R: Rng + ?Sized,
{
    let Some(current) = observed.filter(|c| *c > 0) else {
        return 1;
    };

    let step: i64 = rng.gen_range(-i64::from(under)..=i64::from(over));

    let candidate = if step < 0 {
        current.saturating_sub(step.unsigned_abs())
    } else {
        current.saturating_add(step as u64)
    };

    candidate.max(1)
}
