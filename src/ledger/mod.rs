//! Ledger domain models and the in-memory book aggregate.

pub mod account;
pub mod accountable;
pub mod group;
pub mod journal;
#[allow(clippy::module_inception)]
pub mod ledger;
pub mod validation;

pub use account::{Account, AccountKind};
pub use accountable::{
    Accountable, AccountableRef, BookedIndex, HasAccount, HasManyAccounts, Journaled,
};
pub use group::{Group, GroupTarget};
pub use journal::{Journal, Posting, Side};
pub use ledger::Ledger;
pub use validation::{ValidationCode, ValidationErrors, ValidationIssue};
