//! Contention Generator.
//!
//! Turns one fetched roster into one batch of booking mutations that is
//! meant to collide with other writers:
//! - [`selector`] samples which seats to fight over,
//! - [`counter`] proposes a version per seat, biased towards stale values,
//! - [`owners`] picks the claimant,
//! - [`generator`] glues them into a [`Batch`].
//!
//! Every random draw goes through a caller-supplied [`rand::Rng`].

pub mod config;
pub mod counter;
pub mod error;
pub mod generator;
pub mod owners;
pub mod selector;

pub use config::ContentionConfig;
pub use error::ContentionError;
pub use generator::{Batch, ContentionGenerator};
pub use owners::{OwnerAssignment, OwnerPool};
