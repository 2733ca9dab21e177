use serde::{Deserialize, Serialize};

use super::Owner;

/// One bookable unit as returned by `GET /api/booking`.
///
/// The service returns more columns (`id`, `round`, `owner`, `updated`);
/// only the seat code and its version counter matter here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    #[serde(rename = "seat")]
    pub seat_id: String,

    /// Optimistic-concurrency version. `None` (or `0`) means never booked.
    #[serde(default)]
    pub counter: Option<u64>,
}

impl Seat {
    pub fn new(seat_id: impl Into<String>, counter: Option<u64>) -> Self {
        Self {
            seat_id: seat_id.into(),
            counter,
        }
    }

    /// Observed counter with the "falsy" cases folded into `None`.
    pub fn observed_counter(&self) -> Option<u64> {
        self.counter.filter(|c| *c > 0)
    }
}

/// A proposed write: claim `seat_id` for `owner` at version `counter`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingMutation {
    #[serde(rename = "seat")]
    pub seat_id: String,
    pub owner: Owner,
    pub counter: u64,
}

/// Per-seat verdict returned by `POST /api/makeBookings`.
///
/// Rejected entries carry `error` (e.g. "Cannot take over seat") when the
/// proposed counter was not ahead of the stored one.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BookingOutcome {
    pub seat: String,

    #[serde(default)]
    pub round: Option<String>,

    #[serde(default)]
    pub owner: Option<String>,

    /// Counter stored before the write was attempted.
    #[serde(default)]
    pub counter: Option<u64>,

    #[serde(default, rename = "newCounter")]
    pub new_counter: Option<u64>,

    #[serde(default)]
    pub error: Option<String>,
}

impl BookingOutcome {
    pub fn is_accepted(&self) -> bool {
        self.error.is_none()
    }
}
