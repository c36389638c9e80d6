//! Interactive and scripted command shell over [`FinanceTracker`](crate::FinanceTracker).

pub mod commands;
pub mod core;
pub mod output;
pub mod registry;
mod shell;

pub use shell::{run_cli, SCRIPT_ENV};
