#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use finledger::domain::{AccountKind, CategoryKind, EntityId, Identifiable, OperationDraft, OperationKind};
use finledger::Finance;
use rust_decimal::Decimal;

pub fn at(year: i32, month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .expect("valid date")
        .and_hms_opt(12, 0, 0)
        .expect("valid time")
}

/// A fresh book with one checking account holding `balance`.
pub fn finance_with_account(balance: Decimal) -> (Finance, EntityId) {
    let mut finance = Finance::new();
    let account = finance
        .accounts
        .create("Main", balance, AccountKind::Checking)
        .expect("create account")
        .id();
    (finance, account)
}

pub fn category(finance: &mut Finance, kind: CategoryKind, name: &str) -> EntityId {
    finance
        .categories
        .create(kind, name)
        .expect("create category")
        .id()
}

pub fn record(
    finance: &mut Finance,
    kind: OperationKind,
    account: EntityId,
    amount: Decimal,
    date: NaiveDateTime,
    category: EntityId,
) -> EntityId {
    finance
        .create_operation(OperationDraft::new(kind, account, amount, date, category))
        .expect("create operation")
        .id()
}
