#![doc(test(attr(deny(warnings))))]

//! Finledger keeps account balances in lockstep with a ledger of income and
//! expense operations, and derives statistics from that history.

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod export;
pub mod import;
pub mod utils;

pub use crate::core::Finance;
pub use errors::{LedgerError, LedgerResult};

/// Initializes global tracing with the default filter.
pub fn init() {
    utils::init_tracing(utils::DEFAULT_LOG_FILTER);
    tracing::debug!("Finledger tracing initialized.");
}
