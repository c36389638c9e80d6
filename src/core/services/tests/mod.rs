mod budget_service_tests;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::ledger::{Category, Transaction, TransactionDraft};

pub(super) fn txn(id: u128, draft: TransactionDraft) -> Transaction {
    Transaction::from_draft(Uuid::from_u128(id), draft)
}

pub(super) fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub(super) fn sample_transactions() -> Vec<Transaction> {
    vec![
        txn(1, TransactionDraft::income(Category::Salary, 500_000, "Salary", date(2024, 6, 5))),
        txn(2, TransactionDraft::expense(Category::Housing, 120_000, "Rent", date(2024, 6, 1))),
        txn(3, TransactionDraft::expense(Category::Food, 15_000, "Market", date(2024, 6, 10))),
        txn(4, TransactionDraft::expense(Category::Food, 70_000, "Restaurant", date(2024, 6, 30))),
        txn(5, TransactionDraft::expense(Category::Transport, 5_000, "Uber", date(2024, 6, 12))),
        txn(6, TransactionDraft::expense(Category::Food, 99_999, "Last month", date(2024, 5, 31))),
        txn(7, TransactionDraft::expense(Category::Food, 88_888, "Next month", date(2024, 7, 1))),
    ]
}
