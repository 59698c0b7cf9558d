use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    account::Account,
    group::Group,
    journal::{Journal, Posting},
};

const CURRENT_SCHEMA_VERSION: u8 = 1;

/// The in-memory book: accounts, their classification tree, and every
/// committed journal. Vec order is creation order and doubles as the
/// document order the aggregation queries rely on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ledger {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub groups: Vec<Group>,
    #[serde(default)]
    pub journals: Vec<Journal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default = "Ledger::schema_version_default")]
    pub schema_version: u8,
}

impl Ledger {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            accounts: Vec::new(),
            groups: Vec::new(),
            journals: Vec::new(),
            created_at: now,
            updated_at: now,
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }

    pub fn add_account(&mut self, account: Account) -> Uuid {
        let id = account.id;
        self.accounts.push(account);
        self.touch();
        id
    }

    pub fn add_group(&mut self, group: Group) -> Uuid {
        let id = group.id;
        self.groups.push(group);
        self.touch();
        id
    }

    pub fn add_journal(&mut self, journal: Journal) -> Uuid {
        let id = journal.id;
        self.journals.push(journal);
        self.touch();
        id
    }

    pub fn account(&self, id: Uuid) -> Option<&Account> {
        self.accounts.iter().find(|account| account.id == id)
    }

    pub fn account_mut(&mut self, id: Uuid) -> Option<&mut Account> {
        self.accounts.iter_mut().find(|account| account.id == id)
    }

    pub fn account_by_number(&self, number: u32) -> Option<&Account> {
        self.accounts.iter().find(|account| account.number == number)
    }

    pub fn group(&self, id: Uuid) -> Option<&Group> {
        self.groups.iter().find(|group| group.id == id)
    }

    pub fn group_mut(&mut self, id: Uuid) -> Option<&mut Group> {
        self.groups.iter_mut().find(|group| group.id == id)
    }

    pub fn journal(&self, id: Uuid) -> Option<&Journal> {
        self.journals.iter().find(|journal| journal.id == id)
    }

    /// Every posting of the book in document order: journal creation order,
    /// then intra-journal order.
    pub fn postings(&self) -> impl Iterator<Item = &Posting> {
        self.journals.iter().flat_map(|journal| journal.postings.iter())
    }

    pub fn journal_count(&self) -> usize {
        self.journals.len()
    }

    pub fn posting_count(&self) -> usize {
        self.postings().count()
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }
}
