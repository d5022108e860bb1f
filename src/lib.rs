#![doc(test(attr(deny(warnings))))]

//! Shop Ledger keeps purchase and sale records for a small food business:
//! filtering, totals, category breakdowns, CSV export and a command shell.
//!
//! Most callers only need [`RecordsManager`] over a [`RecordStore`]; the shell
//! in [`cli`] is a thin layer on top of it.

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod export;
pub mod forms;
pub mod storage;
pub mod utils;

pub use crate::core::RecordsManager;
pub use crate::errors::LedgerError;
pub use crate::storage::{JsonStore, MemoryStore, RecordStore};

/// Installs the tracing subscriber and logs the running build. Safe to call repeatedly.
pub fn init() {
    utils::init_tracing();
    let build = utils::build_info::current();
    tracing::debug!(
        version = build.version,
        git = build.git_hash,
        profile = build.profile,
        "shop ledger initialized"
    );
}
