pub mod booking;
pub mod config;
pub mod metrics;
pub mod run;
pub mod user;

pub mod error;
pub mod logger;
