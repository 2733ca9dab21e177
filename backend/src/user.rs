//! One simulated booking user.
//!
//! Each cycle fetches the roster, turns it into a contention batch and
//! submits it. Nothing carries over between cycles except the RNG state and,
//! with [`OwnerAssignment::PerUser`], the owner drawn at start-up.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use corelib::Owner;
use engine::{ContentionGenerator, OwnerAssignment};
use rand::Rng;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{Instrument, error, info, warn};

use crate::booking::BookingApi;
use crate::error::AppError;
use crate::logger::{TraceId, annotate_span, cycle_span, warn_if_slow};
use crate::metrics::counters::{CounterSnapshot, Counters};

/// Service calls slower than this are flagged on the `performance` target.
const SLOW_CALL: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Roster fetch failed; nothing was generated or submitted.
    Skipped { status: Option<u16> },

    /// Batch went out. `accepted`/`rejected` are 0 when the service did not
    /// report per-seat outcomes.
    Submitted {
        mutations: usize,
        accepted: u64,
        rejected: u64,
    },
}

pub struct BookingUser<A, R> {
    api: Arc<A>,
    generator: Arc<ContentionGenerator>,
    rng: R,
    counters: Counters,
    sticky_owner: Option<Owner>,
    cycles_run: u64,
}

impl<A, R> BookingUser<A, R>
where
    A: BookingApi,
    R: Rng + Send,
{
    pub fn new(
        api: Arc<A>,
        generator: Arc<ContentionGenerator>,
        assignment: OwnerAssignment,
        mut rng: R,
        counters: Counters,
    ) -> Self {
        let sticky_owner = match assignment {
            OwnerAssignment::PerBatch => None,
            OwnerAssignment::PerUser => Some(generator.pick_owner(&mut rng)),
        };

        Self {
            api,
            generator,
            rng,
            counters,
            sticky_owner,
            cycles_run: 0,
        }
    }

    /// Owner fixed for this user's lifetime, if any.
    pub fn owner(&self) -> Option<&Owner> {
        self.sticky_owner.as_ref()
    }

    pub fn counters(&self) -> &Counters {
        &self.counters
    }

    pub fn cycles_run(&self) -> u64 {
        self.cycles_run
    }

    /// Fetch → generate → submit, once.
    ///
    /// A failed fetch is not an error: the cycle is skipped and counted.
    /// A roster smaller than the batch size fails the cycle before anything
    /// is submitted.
    pub async fn run_cycle(&mut self) -> Result<CycleOutcome, AppError> {
        self.cycles_run += 1;
        let span = cycle_span(&TraceId::random(), self.cycles_run);

        self.cycle_inner().instrument(span).await
    }

    async fn cycle_inner(&mut self) -> Result<CycleOutcome, AppError> {
        Counters::incr(&self.counters.cycles);

        let roster = match warn_if_slow("fetch_roster", SLOW_CALL, self.api.fetch_roster()).await {
            Ok(roster) => roster,
            Err(e) => {
                Counters::incr(&self.counters.fetch_failed);
                warn!(error = %e, "roster fetch failed; skipping cycle");
                return Ok(CycleOutcome::Skipped { status: e.status() });
            }
        };
        annotate_span(None, Some(roster.len()));

        let generated = match &self.sticky_owner {
            Some(owner) => self.generator.generate_for(&roster, owner, &mut self.rng),
            None => self.generator.generate(&roster, &mut self.rng),
        };

        let batch = match generated {
            Ok(batch) => batch,
            Err(e) => {
                Counters::incr(&self.counters.cycles_failed);
                error!(error = %e, "cannot build contention batch");
                return Err(e.into());
            }
        };
        annotate_span(Some(batch.owner().as_str()), None);

        let report = match warn_if_slow(
            "submit_batch",
            SLOW_CALL,
            self.api.submit_batch(batch.mutations()),
        )
        .await
        {
            Ok(report) => report,
            Err(e) => {
                Counters::incr(&self.counters.submit_failed);
                warn!(error = %e, mutations = batch.len(), "batch submit failed");
                return Err(e.into());
            }
        };

        let (accepted, rejected) = (report.accepted(), report.rejected());

        Counters::incr(&self.counters.cycles_submitted);
        Counters::add(&self.counters.mutations_sent, batch.len() as u64);
        Counters::add(&self.counters.bookings_accepted, accepted);
        Counters::add(&self.counters.bookings_rejected, rejected);

        info!(
            mutations = batch.len(),
            accepted, rejected, "contention batch submitted"
        );

        Ok(CycleOutcome::Submitted {
            mutations: batch.len(),
            accepted,
            rejected,
        })
    }
}

/// Runs cycles on a fixed cadence until `max_cycles` is reached or
/// `shutdown` resolves, whichever comes first.
///
/// Failed cycles are logged and counted; the loop keeps going.
pub async fn run_booking_user<A, R, S>(
    mut user: BookingUser<A, R>,
    every: Duration,
    max_cycles: Option<u64>,
    shutdown: S,
) -> CounterSnapshot
where
    A: BookingApi,
    R: Rng + Send,
    S: Future<Output = ()>,
{
    let mut ticker = interval(every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    tokio::pin!(shutdown);

    info!(
        every_ms = every.as_millis() as u64,
        max_cycles = ?max_cycles,
        owner = ?user.owner(),
        "booking user started"
    );

    loop {
        if max_cycles.is_some_and(|max| user.cycles_run() >= max) {
            break;
        }

        tokio::select! {
            _ = &mut shutdown => {
                info!("shutdown requested; stopping booking user");
                break;
            }
            _ = ticker.tick() => {}
        }

        if let Err(e) = user.run_cycle().await {
            error!(error = %e, cycle = user.cycles_run(), "cycle failed");
        }
    }

    let snapshot = user.counters().snapshot();
    info!(cycles = snapshot.cycles, "booking user stopped");
    snapshot
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::{ClientError, SubmitReport};
    use async_trait::async_trait;
    use corelib::{BookingMutation, NewRoundRequest, OwnerStanding, RoundInfo, Seat};
    use engine::ContentionConfig;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::sync::Mutex;
    use tracing_test::traced_test;

    /// Serves a fixed roster (or a fixed failure) and records submits.
    struct FixedApi {
        roster: Result<Vec<Seat>, u16>,
        submits: Mutex<Vec<Vec<BookingMutation>>>,
    }

    impl FixedApi {
        fn serving(roster: Result<Vec<Seat>, u16>) -> Arc<Self> {
            Arc::new(Self {
                roster,
                submits: Mutex::new(Vec::new()),
            })
        }

        fn submit_count(&self) -> usize {
            self.submits.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl BookingApi for FixedApi {
        async fn fetch_roster(&self) -> Result<Vec<Seat>, ClientError> {
            self.roster.clone().map_err(|status| ClientError::Status {
                status,
                url: "fixed".into(),
            })
        }

        async fn submit_batch(
            &self,
            batch: &[BookingMutation],
        ) -> Result<SubmitReport, ClientError> {
            self.submits.lock().unwrap().push(batch.to_vec());
            Ok(SubmitReport::default())
        }

        async fn new_round(&self, req: NewRoundRequest) -> Result<RoundInfo, ClientError> {
            Ok(RoundInfo {
                round_id: "fixed".into(),
                seats: u64::from(req.rows * req.cols),
            })
        }

        async fn fetch_owners(&self) -> Result<Vec<OwnerStanding>, ClientError> {
            Ok(Vec::new())
        }
    }

    fn generator(num_blocks: usize) -> Arc<ContentionGenerator> {
        Arc::new(
            ContentionGenerator::new(ContentionConfig {
                num_owners: 4,
                num_blocks,
                under: 5,
                over: 1,
            })
            .unwrap(),
        )
    }

    fn seats(n: usize) -> Vec<Seat> {
        (0..n).map(|i| Seat::new(format!("B{:04}", i), Some(2))).collect()
    }

    #[tokio::test]
    #[traced_test]
    async fn failed_fetch_skips_cycle_and_is_logged() {
        let api = FixedApi::serving(Err(500));
        let mut user = BookingUser::new(
            api.clone(),
            generator(3),
            OwnerAssignment::PerBatch,
            ChaCha8Rng::seed_from_u64(1),
            Counters::default(),
        );

        let outcome = user.run_cycle().await.unwrap();

        assert_eq!(outcome, CycleOutcome::Skipped { status: Some(500) });
        assert_eq!(api.submit_count(), 0);
        assert_eq!(user.counters().snapshot().fetch_failed, 1);
        assert!(logs_contain("skipping cycle"));
    }

    #[tokio::test]
    async fn per_user_owner_is_drawn_once() {
        let api = FixedApi::serving(Ok(seats(20)));
        let mut user = BookingUser::new(
            api.clone(),
            generator(5),
            OwnerAssignment::PerUser,
            ChaCha8Rng::seed_from_u64(17),
            Counters::default(),
        );
        let owner = user.owner().cloned().unwrap();

        for _ in 0..10 {
            user.run_cycle().await.unwrap();
        }

        let submits = api.submits.lock().unwrap();
        assert_eq!(submits.len(), 10);
        assert!(submits.iter().flatten().all(|m| m.owner == owner));
    }

    #[tokio::test]
    async fn per_batch_user_has_no_fixed_owner() {
        let user = BookingUser::new(
            FixedApi::serving(Ok(seats(5))),
            generator(5),
            OwnerAssignment::PerBatch,
            ChaCha8Rng::seed_from_u64(17),
            Counters::default(),
        );
        assert!(user.owner().is_none());
    }
}
