use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{accountable::AccountableRef, journal::Side, ledger::Ledger};

/// High-level account kind (determines the normal balance side).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountKind {
    Asset,
    Liability,
    Equity,
    Revenue,
    Expense,
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AccountKind::Asset => "Asset",
            AccountKind::Liability => "Liability",
            AccountKind::Equity => "Equity",
            AccountKind::Revenue => "Revenue",
            AccountKind::Expense => "Expense",
        };
        f.write_str(label)
    }
}

/// A ledger account accumulating postings; may belong to one group and may be
/// bound to one host-application entity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Account {
    pub id: Uuid,
    /// Chart-of-accounts number, unique within a ledger.
    pub number: u32,
    pub name: String,
    pub kind: AccountKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accountable: Option<AccountableRef>,
    pub created_at: DateTime<Utc>,
}

impl Account {
    pub fn new(number: u32, name: impl Into<String>, kind: AccountKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            number,
            name: name.into(),
            kind,
            group_id: None,
            accountable: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_group(mut self, group_id: Uuid) -> Self {
        self.group_id = Some(group_id);
        self
    }

    pub fn with_accountable(mut self, accountable: AccountableRef) -> Self {
        self.accountable = Some(accountable);
        self
    }

    /// Signed balance of the account: debit total minus credit total.
    pub fn balance(&self, ledger: &Ledger) -> Decimal {
        ledger
            .postings()
            .filter(|posting| posting.account_id == self.id)
            .fold(Decimal::ZERO, |total, posting| match posting.side {
                Side::Debit => total + posting.amount,
                Side::Credit => total - posting.amount,
            })
    }
}
