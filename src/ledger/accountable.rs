//! Binding between host-application entities and the ledger.
//!
//! The ledger never holds native references to host types. It stores a
//! (type tag, id) pair, and host types opt into ledger capabilities by
//! implementing the traits below.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    account::Account,
    journal::{Journal, Posting},
    ledger::Ledger,
};

/// Polymorphic reference to a host-application entity.
///
/// The type tag participates in equality and hashing, so two host types
/// sharing an id value are never confused.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountableRef {
    pub host_type: String,
    pub host_id: u64,
}

impl AccountableRef {
    pub fn new(host_type: impl Into<String>, host_id: u64) -> Self {
        Self {
            host_type: host_type.into(),
            host_id,
        }
    }
}

impl fmt::Display for AccountableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.host_type, self.host_id)
    }
}

/// Implemented by host entity types that participate in the ledger.
pub trait Accountable {
    /// Stable runtime type name, e.g. `"Contact"`.
    fn host_type(&self) -> &'static str;

    fn host_id(&self) -> u64;

    fn accountable_ref(&self) -> AccountableRef {
        AccountableRef::new(self.host_type(), self.host_id())
    }
}

/// Host types bound to at most one account.
pub trait HasAccount: Accountable {
    /// The account bound to this entity, if any.
    fn account<'a>(&self, ledger: &'a Ledger) -> Option<&'a Account> {
        let wanted = self.accountable_ref();
        ledger
            .accounts
            .iter()
            .find(|account| account.accountable.as_ref() == Some(&wanted))
    }

    /// Postings of the bound account, in document order.
    fn postings<'a>(&self, ledger: &'a Ledger) -> Vec<&'a Posting> {
        match self.account(ledger) {
            Some(account) => ledger
                .postings()
                .filter(|posting| posting.account_id == account.id)
                .collect(),
            None => Vec::new(),
        }
    }
}

/// Host types bound to zero or many accounts.
pub trait HasManyAccounts: Accountable {
    /// Every account bound to this entity, in creation order.
    fn accounts<'a>(&self, ledger: &'a Ledger) -> Vec<&'a Account> {
        let wanted = self.accountable_ref();
        ledger
            .accounts
            .iter()
            .filter(|account| account.accountable.as_ref() == Some(&wanted))
            .collect()
    }

    /// Postings of all bound accounts, in document order.
    fn postings<'a>(&self, ledger: &'a Ledger) -> Vec<&'a Posting> {
        let account_ids: HashSet<Uuid> = self
            .accounts(ledger)
            .iter()
            .map(|account| account.id)
            .collect();
        ledger
            .postings()
            .filter(|posting| account_ids.contains(&posting.account_id))
            .collect()
    }
}

/// Host types that can originate journals.
pub trait Journaled: Accountable {
    /// Journals recorded against this entity, in creation order.
    fn journals<'a>(&self, ledger: &'a Ledger) -> Vec<&'a Journal> {
        let wanted = self.accountable_ref();
        ledger
            .journals
            .iter()
            .filter(|journal| journal.accountable.as_ref() == Some(&wanted))
            .collect()
    }

    /// Whether at least one journal has been recorded against this entity.
    fn booked(&self, ledger: &Ledger) -> bool {
        let wanted = self.accountable_ref();
        ledger
            .journals
            .iter()
            .any(|journal| journal.accountable.as_ref() == Some(&wanted))
    }
}

/// Index of every accountable reference that owns at least one journal.
///
/// Replaces join-based booked/unbooked filtering with set membership; build
/// it once per ledger snapshot when classifying many hosts.
#[derive(Debug, Clone)]
pub struct BookedIndex {
    refs: HashSet<AccountableRef>,
}

impl BookedIndex {
    pub fn from_ledger(ledger: &Ledger) -> Self {
        let refs = ledger
            .journals
            .iter()
            .filter_map(|journal| journal.accountable.clone())
            .collect();
        Self { refs }
    }

    pub fn is_booked(&self, accountable: &AccountableRef) -> bool {
        self.refs.contains(accountable)
    }

    /// Hosts with at least one associated journal.
    pub fn booked<'a, T: Journaled>(&self, hosts: &'a [T]) -> Vec<&'a T> {
        hosts
            .iter()
            .filter(|host| self.is_booked(&host.accountable_ref()))
            .collect()
    }

    /// Hosts with no associated journal.
    pub fn unbooked<'a, T: Journaled>(&self, hosts: &'a [T]) -> Vec<&'a T> {
        hosts
            .iter()
            .filter(|host| !self.is_booked(&host.accountable_ref()))
            .collect()
    }
}
