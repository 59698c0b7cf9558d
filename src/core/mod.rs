//! Business logic services operating on the in-memory ledger.

pub mod services;
