//! Atomic creation of balanced journals.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::ledger::validation::{ValidationCode, ValidationErrors};
use crate::ledger::{AccountableRef, Journal, Ledger, Posting, Side};

use super::{ServiceError, ServiceResult};

/// One posting of a journal under construction.
#[derive(Debug, Clone)]
pub struct PostingDraft {
    pub account_id: Uuid,
    pub amount: Decimal,
    pub side: Side,
}

impl PostingDraft {
    pub fn debit(account_id: Uuid, amount: Decimal) -> Self {
        Self {
            account_id,
            amount,
            side: Side::Debit,
        }
    }

    pub fn credit(account_id: Uuid, amount: Decimal) -> Self {
        Self {
            account_id,
            amount,
            side: Side::Credit,
        }
    }
}

/// Input for an atomic journal creation.
#[derive(Debug, Clone)]
pub struct JournalDraft {
    pub number: Option<String>,
    pub date: NaiveDate,
    pub subject: Option<String>,
    pub note: Option<String>,
    pub accountable: Option<AccountableRef>,
    pub postings: Vec<PostingDraft>,
}

impl JournalDraft {
    pub fn new(date: NaiveDate, postings: Vec<PostingDraft>) -> Self {
        Self {
            number: None,
            date,
            subject: None,
            note: None,
            accountable: None,
            postings,
        }
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn with_number(mut self, number: impl Into<String>) -> Self {
        self.number = Some(number.into());
        self
    }

    pub fn with_accountable(mut self, accountable: AccountableRef) -> Self {
        self.accountable = Some(accountable);
        self
    }
}

pub struct JournalService;

impl JournalService {
    /// Validates and commits a journal with its full posting set as one
    /// unit. Nothing is written unless every check passes; on failure the
    /// journal and posting counts are unchanged.
    pub fn add(ledger: &mut Ledger, draft: JournalDraft) -> ServiceResult<Uuid> {
        for posting in &draft.postings {
            if ledger.account(posting.account_id).is_none() {
                return Err(ServiceError::NotFound(format!(
                    "account {}",
                    posting.account_id
                )));
            }
        }

        let mut errors = ValidationErrors::new();
        if draft.postings.len() < 2 {
            errors.add(Some("postings"), ValidationCode::TooFewPostings);
        }
        let mut debit_total = Decimal::ZERO;
        let mut credit_total = Decimal::ZERO;
        for posting in &draft.postings {
            if posting.amount <= Decimal::ZERO {
                errors.add(Some("amount"), ValidationCode::AmountNotPositive);
            }
            match posting.side {
                Side::Debit => debit_total += posting.amount,
                Side::Credit => credit_total += posting.amount,
            }
        }
        if debit_total != credit_total {
            errors.add(None, ValidationCode::UnbalancedJournal);
        }
        if !errors.is_empty() {
            return Err(ServiceError::Validation(errors));
        }

        let journal = Journal {
            id: Uuid::new_v4(),
            number: draft.number,
            date: draft.date,
            subject: draft.subject,
            note: draft.note,
            accountable: draft.accountable,
            postings: draft
                .postings
                .into_iter()
                .map(|posting| Posting {
                    id: Uuid::new_v4(),
                    account_id: posting.account_id,
                    amount: posting.amount,
                    side: posting.side,
                })
                .collect(),
            created_at: Utc::now(),
        };
        tracing::debug!(
            journal = %journal.id,
            postings = journal.postings.len(),
            total = %debit_total,
            "journal committed"
        );
        Ok(ledger.add_journal(journal))
    }

    pub fn list<'a>(ledger: &'a Ledger) -> Vec<&'a Journal> {
        ledger.journals.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{Account, AccountKind};
    use rust_decimal_macros::dec;

    fn ledger_with_accounts() -> (Ledger, Uuid, Uuid) {
        let mut ledger = Ledger::new("Journals");
        let cash = ledger.add_account(Account::new(1000, "Cash", AccountKind::Asset));
        let sales = ledger.add_account(Account::new(8400, "Sales", AccountKind::Revenue));
        (ledger, cash, sales)
    }

    #[test]
    fn rejects_single_posting() {
        let (mut ledger, cash, _) = ledger_with_accounts();
        let draft = JournalDraft::new(
            NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
            vec![PostingDraft::debit(cash, dec!(10))],
        );
        let err = JournalService::add(&mut ledger, draft).unwrap_err();
        let errors = err.validation_errors().expect("validation failure");
        assert!(errors.contains(Some("postings"), ValidationCode::TooFewPostings));
        assert_eq!(ledger.journal_count(), 0);
    }

    #[test]
    fn rejects_zero_amounts() {
        let (mut ledger, cash, sales) = ledger_with_accounts();
        let draft = JournalDraft::new(
            NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
            vec![
                PostingDraft::debit(cash, dec!(0)),
                PostingDraft::credit(sales, dec!(0)),
            ],
        );
        let err = JournalService::add(&mut ledger, draft).unwrap_err();
        let errors = err.validation_errors().expect("validation failure");
        assert!(errors.contains(Some("amount"), ValidationCode::AmountNotPositive));
    }

    #[test]
    fn rejects_unknown_account() {
        let (mut ledger, cash, _) = ledger_with_accounts();
        let draft = JournalDraft::new(
            NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
            vec![
                PostingDraft::debit(cash, dec!(10)),
                PostingDraft::credit(Uuid::new_v4(), dec!(10)),
            ],
        );
        let err = JournalService::add(&mut ledger, draft).unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        assert_eq!(ledger.journal_count(), 0);
    }
}
