use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::accountable::AccountableRef;

/// Which side of the books a posting lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Debit,
    Credit,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Side::Debit => "Debit",
            Side::Credit => "Credit",
        };
        f.write_str(label)
    }
}

/// A single debit or credit line against one account within one journal.
/// Immutable once its journal is committed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Posting {
    pub id: Uuid,
    pub account_id: Uuid,
    pub amount: Decimal,
    pub side: Side,
}

/// One atomic, balanced transaction record composed of postings.
///
/// Journals are created together with their full posting set and are
/// append-only afterwards; no mutation API exists.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Journal {
    pub id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accountable: Option<AccountableRef>,
    /// Postings in the order they were supplied at creation.
    pub postings: Vec<Posting>,
    pub created_at: DateTime<Utc>,
}

impl Journal {
    /// Debit-side postings in creation order.
    pub fn debit_postings(&self) -> Vec<&Posting> {
        self.postings
            .iter()
            .filter(|posting| posting.side == Side::Debit)
            .collect()
    }

    /// Credit-side postings in creation order.
    pub fn credit_postings(&self) -> Vec<&Posting> {
        self.postings
            .iter()
            .filter(|posting| posting.side == Side::Credit)
            .collect()
    }

    pub fn debit_total(&self) -> Decimal {
        self.side_total(Side::Debit)
    }

    pub fn credit_total(&self) -> Decimal {
        self.side_total(Side::Credit)
    }

    fn side_total(&self, side: Side) -> Decimal {
        self.postings
            .iter()
            .filter(|posting| posting.side == side)
            .map(|posting| posting.amount)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn posting(side: Side, amount: Decimal) -> Posting {
        Posting {
            id: Uuid::new_v4(),
            account_id: Uuid::new_v4(),
            amount,
            side,
        }
    }

    #[test]
    fn side_helpers_preserve_creation_order() {
        let journal = Journal {
            id: Uuid::new_v4(),
            number: None,
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            subject: None,
            note: None,
            accountable: None,
            postings: vec![
                posting(Side::Debit, dec!(70)),
                posting(Side::Credit, dec!(100)),
                posting(Side::Debit, dec!(30)),
            ],
            created_at: Utc::now(),
        };

        let debits = journal.debit_postings();
        assert_eq!(debits.len(), 2);
        assert_eq!(debits[0].amount, dec!(70));
        assert_eq!(debits[1].amount, dec!(30));
        assert_eq!(journal.credit_postings().len(), 1);
        assert_eq!(journal.debit_total(), journal.credit_total());
    }
}
