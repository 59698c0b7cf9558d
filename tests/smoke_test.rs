use keepr::core::services::{
    AccountService, GroupService, JournalDraft, JournalService, PostingDraft,
};
use keepr::init;
use keepr::ledger::{Account, AccountKind, Group, GroupTarget, Ledger};
use chrono::NaiveDate;
use rust_decimal_macros::dec;

#[test]
fn bookkeeping_smoke() {
    init();

    let mut ledger = Ledger::new("SmokeTest");
    let assets = GroupService::add(&mut ledger, Group::new("Assets", GroupTarget::Asset)).unwrap();
    let nominal = GroupService::add(
        &mut ledger,
        Group::new("Earnings", GroupTarget::ProfitAndLoss),
    )
    .unwrap();

    let cash = AccountService::add(
        &mut ledger,
        Account::new(1000, "Cash", AccountKind::Asset).with_group(assets),
    )
    .unwrap();
    let sales = AccountService::add(
        &mut ledger,
        Account::new(8400, "Sales", AccountKind::Revenue).with_group(nominal),
    )
    .unwrap();

    let journal = JournalService::add(
        &mut ledger,
        JournalDraft::new(
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            vec![
                PostingDraft::debit(cash, dec!(42)),
                PostingDraft::credit(sales, dec!(42)),
            ],
        )
        .with_subject("Opening sale"),
    )
    .unwrap();

    assert!(ledger.journal(journal).is_some());
    assert_eq!(ledger.account_by_number(8400).unwrap().name, "Sales");
    assert_eq!(AccountService::balance(&ledger, cash).unwrap(), dec!(42));
    let postings = GroupService::postings(&ledger, assets).unwrap();
    assert_eq!(postings.len(), 1);
}
