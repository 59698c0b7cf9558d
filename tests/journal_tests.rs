mod common;

use keepr::core::services::{
    AccountService, JournalDraft, JournalService, PostingDraft, ServiceError,
};
use keepr::ledger::{AccountKind, GroupTarget, Side, ValidationCode};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use common::{account_in, balanced_journal, book, date, group};

#[test]
fn unbalanced_journal_persists_nothing() {
    let mut ledger = book();
    let assets = group(&mut ledger, "Assets", GroupTarget::Asset);
    let cash = account_in(&mut ledger, 1000, "Cash", AccountKind::Asset, assets);
    let bank = account_in(&mut ledger, 1200, "Bank", AccountKind::Asset, assets);

    let draft = JournalDraft::new(
        date(2024, 4, 1),
        vec![
            PostingDraft::debit(cash, dec!(100)),
            PostingDraft::credit(bank, dec!(90)),
        ],
    );
    let err = JournalService::add(&mut ledger, draft).unwrap_err();
    let errors = err.validation_errors().expect("validation failure");
    assert!(errors.contains(None, ValidationCode::UnbalancedJournal));
    assert_eq!(ledger.journal_count(), 0);
    assert_eq!(ledger.posting_count(), 0);
}

#[test]
fn balanced_journal_commits_atomically() {
    let mut ledger = book();
    let assets = group(&mut ledger, "Assets", GroupTarget::Asset);
    let cash = account_in(&mut ledger, 1000, "Cash", AccountKind::Asset, assets);
    let bank = account_in(&mut ledger, 1200, "Bank", AccountKind::Asset, assets);

    let draft = JournalDraft::new(
        date(2024, 4, 1),
        vec![
            PostingDraft::debit(cash, dec!(70)),
            PostingDraft::debit(bank, dec!(30)),
            PostingDraft::credit(cash, dec!(100)),
        ],
    )
    .with_subject("Split booking");
    let journal_id = JournalService::add(&mut ledger, draft).expect("create journal");

    assert_eq!(ledger.journal_count(), 1);
    assert_eq!(ledger.posting_count(), 3);
    let journal = ledger.journal(journal_id).unwrap();
    assert_eq!(journal.subject.as_deref(), Some("Split booking"));

    let debits = journal.debit_postings();
    assert_eq!(debits.len(), 2);
    assert_eq!(debits[0].amount, dec!(70));
    assert_eq!(debits[1].amount, dec!(30));
    assert_eq!(journal.credit_postings().len(), 1);
}

#[test]
fn committed_journals_always_balance() {
    let mut ledger = book();
    let assets = group(&mut ledger, "Assets", GroupTarget::Asset);
    let nominal = group(&mut ledger, "Earnings", GroupTarget::ProfitAndLoss);
    let cash = account_in(&mut ledger, 1000, "Cash", AccountKind::Asset, assets);
    let sales = account_in(&mut ledger, 8400, "Sales", AccountKind::Revenue, nominal);

    for amount in [dec!(0.01), dec!(100.99), dec!(1234.56)] {
        balanced_journal(&mut ledger, cash, sales, amount);
    }

    for journal in &ledger.journals {
        assert_eq!(journal.debit_total(), journal.credit_total());
    }
    let total: Decimal = ledger
        .postings()
        .map(|posting| match posting.side {
            Side::Debit => posting.amount,
            Side::Credit => -posting.amount,
        })
        .sum();
    assert_eq!(total, Decimal::ZERO);
}

#[test]
fn account_balance_nets_debits_against_credits() {
    let mut ledger = book();
    let assets = group(&mut ledger, "Assets", GroupTarget::Asset);
    let nominal = group(&mut ledger, "Earnings", GroupTarget::ProfitAndLoss);
    let cash = account_in(&mut ledger, 1000, "Cash", AccountKind::Asset, assets);
    let sales = account_in(&mut ledger, 8400, "Sales", AccountKind::Revenue, nominal);

    balanced_journal(&mut ledger, cash, sales, dec!(100.99));
    balanced_journal(&mut ledger, cash, sales, dec!(9.01));

    assert_eq!(AccountService::balance(&ledger, cash).unwrap(), dec!(110));
    assert_eq!(AccountService::balance(&ledger, sales).unwrap(), dec!(-110));
}

#[test]
fn account_with_postings_cannot_be_removed() {
    let mut ledger = book();
    let assets = group(&mut ledger, "Assets", GroupTarget::Asset);
    let cash = account_in(&mut ledger, 1000, "Cash", AccountKind::Asset, assets);
    let bank = account_in(&mut ledger, 1200, "Bank", AccountKind::Asset, assets);
    balanced_journal(&mut ledger, cash, bank, dec!(25));

    let err = AccountService::remove(&mut ledger, cash).unwrap_err();
    assert!(matches!(err, ServiceError::Constraint(_)));
    assert_eq!(ledger.accounts.len(), 2);
}
