//! Boundary to the remote booking service.
//!
//! [`BookingApi`] is the seam the cycle runner talks to; [`BookingClient`]
//! is the HTTP implementation. Tests plug in their own implementations.

pub mod client;
pub mod errors;

pub use client::BookingClient;
pub use errors::ClientError;

use async_trait::async_trait;
use corelib::{BookingMutation, BookingOutcome, NewRoundRequest, OwnerStanding, RoundInfo, Seat};

#[async_trait]
pub trait BookingApi: Send + Sync {
    /// Current roster of the active round (`GET /api/booking`).
    async fn fetch_roster(&self) -> Result<Vec<Seat>, ClientError>;

    /// Submits one batch in a single request (`POST /api/makeBookings`).
    async fn submit_batch(&self, batch: &[BookingMutation]) -> Result<SubmitReport, ClientError>;

    /// Starts a fresh round with `rows × cols` unbooked seats.
    async fn new_round(&self, req: NewRoundRequest) -> Result<RoundInfo, ClientError>;

    /// Owners ranked by how many seats they hold.
    async fn fetch_owners(&self) -> Result<Vec<OwnerStanding>, ClientError>;
}

/// What came back from a successful submit.
///
/// The service is only required to answer with a success status; per-seat
/// outcomes are kept when the body happens to contain them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmitReport {
    pub outcomes: Option<Vec<BookingOutcome>>,
}

impl SubmitReport {
    pub fn from_body(body: &str) -> Self {
        Self {
            outcomes: serde_json::from_str(body).ok(),
        }
    }

    pub fn accepted(&self) -> u64 {
        self.count(|o| o.is_accepted())
    }

    pub fn rejected(&self) -> u64 {
        self.count(|o| !o.is_accepted())
    }

    fn count(&self, pred: impl Fn(&BookingOutcome) -> bool) -> u64 {
        self.outcomes
            .as_deref()
            .map(|all| all.iter().filter(|o| pred(o)).count() as u64)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_counts_per_seat_verdicts() {
        let body = r#"[
            {"round":"r","seat":"A0000","owner":"locust-1","counter":null,"newCounter":1},
            {"round":"r","seat":"A0001","owner":"locust-1","counter":2,"newCounter":3},
            {"error":"Cannot take over seat","round":"r","seat":"A0002","counter":9,"owner":"locust-1","newCounter":4}
        ]"#;

        let report = SubmitReport::from_body(body);
        assert_eq!(report.accepted(), 2);
        assert_eq!(report.rejected(), 1);
    }

    #[test]
    fn unknown_body_is_not_an_error() {
        let report = SubmitReport::from_body("OK");
        assert!(report.outcomes.is_none());
        assert_eq!(report.accepted(), 0);
        assert_eq!(report.rejected(), 0);
    }
}
