#![doc(test(attr(deny(warnings))))]

//! FinFlow Core turns purchases, installment plans and recurring fixed expenses
//! into dated transactions, and keeps installment groups consistent when one of
//! their members is edited.

pub mod cli;
pub mod config;
pub mod core;
pub mod currency;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;

pub use crate::core::FinanceTracker;
pub use errors::{FinanceError, Result};

/// Initializes global tracing; repeated calls are no-ops.
pub fn init() {
    utils::init_tracing();
}
