//! Seat selection.
//!
//! Seats are drawn uniformly without replacement and the current counters
//! are ignored: load is spread over the whole roster regardless of booking
//! state. Ordering by ascending counter (fight over the least contested
//! seats first) is the obvious alternative policy; it is not implemented.

use corelib::Seat;
use rand::Rng;
use rand::seq::index;

use crate::error::ContentionError;

/// Picks exactly `num_blocks` distinct seats from `roster`, in draw order.
///
/// Fails when the roster is smaller than `num_blocks`; the batch is never
/// silently truncated.
pub fn select_seats<'a, R>(
    roster: &'a [Seat],
    num_blocks: usize,
    rng: &mut R,
) -> Result<Vec<&'a Seat>, ContentionError>
where
    R: Rng + ?Sized,
{
    if num_blocks > roster.len() {
        return Err(ContentionError::InsufficientSeats {
            requested: num_blocks,
            available: roster.len(),
        });
    }

    Ok(index::sample(rng, roster.len(), num_blocks)
        .into_iter()
        .map(|i| &roster[i])
        .collect())
}
