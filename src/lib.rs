//! Client for a remote compatibility scoring service.
//!
//! [`matching::MatchSession`] holds the form state and runs submissions; the
//! `love-match` binary drives it from the command line.

mod cli;
pub mod config;
pub mod error;
mod infra;
pub mod matching;
pub mod telemetry;

use error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
