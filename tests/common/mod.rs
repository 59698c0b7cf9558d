#![allow(dead_code)]

use chrono::NaiveDate;
use keepr::core::services::{
    AccountService, GroupService, JournalDraft, JournalService, PostingDraft,
};
use keepr::ledger::{Account, AccountKind, Group, GroupTarget, Ledger};
use rust_decimal::Decimal;
use uuid::Uuid;

pub fn book() -> Ledger {
    Ledger::new("Test book")
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub fn group(ledger: &mut Ledger, name: &str, target: GroupTarget) -> Uuid {
    GroupService::add(ledger, Group::new(name, target)).expect("create group")
}

pub fn child_group(ledger: &mut Ledger, parent: Uuid, name: &str) -> Uuid {
    GroupService::add_child(ledger, parent, name).expect("create child group")
}

pub fn account_in(
    ledger: &mut Ledger,
    number: u32,
    name: &str,
    kind: AccountKind,
    group: Uuid,
) -> Uuid {
    AccountService::add(ledger, Account::new(number, name, kind).with_group(group))
        .expect("create account")
}

/// Books one journal debiting `debit` and crediting `credit` over `amount`.
pub fn balanced_journal(ledger: &mut Ledger, debit: Uuid, credit: Uuid, amount: Decimal) -> Uuid {
    let draft = JournalDraft::new(
        date(2024, 3, 1),
        vec![
            PostingDraft::debit(debit, amount),
            PostingDraft::credit(credit, amount),
        ],
    );
    JournalService::add(ledger, draft).expect("create journal")
}
