#![doc(test(attr(deny(warnings))))]

//! Keepr offers double-entry bookkeeping primitives: accounts, balanced
//! journals, a hierarchical classification tree of account groups, and a
//! polymorphic binding that lets host-application entities participate in
//! the ledger without the core knowing them concretely.

pub mod core;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Keepr tracing initialized.");
    });
}
