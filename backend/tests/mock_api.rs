#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use backend::booking::{BookingApi, ClientError, SubmitReport};
use corelib::{BookingMutation, NewRoundRequest, OwnerStanding, RoundInfo, Seat};

/// In-memory booking service double.
///
/// Serves a configurable roster (or failure status) and records every
/// submitted batch and round reset.
#[derive(Default)]
pub struct MockBookingApi {
    pub roster: Mutex<Vec<Seat>>,
    pub fetch_status: Mutex<Option<u16>>,
    pub submit_status: Mutex<Option<u16>>,
    pub submit_body: Mutex<String>,
    pub owners: Mutex<Option<Vec<OwnerStanding>>>,

    pub fetch_calls: AtomicUsize,
    pub submits: Mutex<Vec<Vec<BookingMutation>>>,
    pub rounds: Mutex<Vec<NewRoundRequest>>,
}

impl MockBookingApi {
    pub fn with_roster(roster: Vec<Seat>) -> Self {
        let api = Self::default();
        *api.roster.lock().unwrap() = roster;
        api
    }

    pub fn failing_fetch(status: u16) -> Self {
        let api = Self::default();
        *api.fetch_status.lock().unwrap() = Some(status);
        api
    }

    pub fn submit_count(&self) -> usize {
        self.submits.lock().unwrap().len()
    }

    pub fn fetch_count(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }
}

fn status_err(status: u16) -> ClientError {
    ClientError::Status {
        status,
        url: "mock://booking".into(),
    }
}

#[async_trait]
impl BookingApi for MockBookingApi {
    async fn fetch_roster(&self) -> Result<Vec<Seat>, ClientError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(status) = *self.fetch_status.lock().unwrap() {
            return Err(status_err(status));
        }
        Ok(self.roster.lock().unwrap().clone())
    }

    async fn submit_batch(&self, batch: &[BookingMutation]) -> Result<SubmitReport, ClientError> {
        self.submits.lock().unwrap().push(batch.to_vec());

        if let Some(status) = *self.submit_status.lock().unwrap() {
            return Err(status_err(status));
        }
        Ok(SubmitReport::from_body(&self.submit_body.lock().unwrap()))
    }

    async fn new_round(&self, req: NewRoundRequest) -> Result<RoundInfo, ClientError> {
        self.rounds.lock().unwrap().push(req);

        let roster: Vec<Seat> = (0..req.rows)
            .flat_map(|r| {
                (0..req.cols).map(move |c| {
                    let row = char::from(b'A' + (r % 26) as u8);
                    Seat::new(format!("{row}{c:04}"), None)
                })
            })
            .collect();
        let seats = roster.len() as u64;
        *self.roster.lock().unwrap() = roster;

        Ok(RoundInfo {
            round_id: "mockround1".into(),
            seats,
        })
    }

    async fn fetch_owners(&self) -> Result<Vec<OwnerStanding>, ClientError> {
        self.owners
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| status_err(404))
    }
}
