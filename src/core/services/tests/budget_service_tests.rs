use uuid::Uuid;

use super::{date, sample_transactions, txn};
use crate::core::services::BudgetService;
use crate::ledger::{Budget, Category, TransactionDraft, YearMonth};

#[test]
fn spending_counts_only_expenses_inside_the_month() {
    let june = YearMonth::new(2024, 6).unwrap();
    let spending = BudgetService::spending_by_category(&sample_transactions(), june);
    assert_eq!(spending.get(&Category::Food), Some(&85_000));
    assert_eq!(spending.get(&Category::Transport), Some(&5_000));
    assert_eq!(spending.get(&Category::Salary), None);
}

#[test]
fn statuses_flag_exceeded_limits() {
    let june = YearMonth::new(2024, 6).unwrap();
    let budgets = vec![
        Budget::new(Uuid::from_u128(10), Category::Food, 80_000).unwrap(),
        Budget::new(Uuid::from_u128(11), Category::Transport, 40_000).unwrap(),
        Budget::new(Uuid::from_u128(12), Category::Entertainment, 30_000).unwrap(),
    ];
    let statuses = BudgetService::statuses(&budgets, &sample_transactions(), june);

    assert_eq!(statuses.len(), 3);
    let food = &statuses[0];
    assert!(food.over_limit);
    assert_eq!(food.spent_cents, 85_000);
    assert_eq!(food.remaining_cents, -5_000);
    assert!((food.percent_used - 106.25).abs() < 1e-9);

    let transport = &statuses[1];
    assert!(!transport.over_limit);
    assert_eq!(transport.remaining_cents, 35_000);

    let entertainment = &statuses[2];
    assert_eq!(entertainment.spent_cents, 0);
    assert_eq!(entertainment.percent_used, 0.0);
}

#[test]
fn spending_exactly_at_the_limit_is_not_over() {
    let june = YearMonth::new(2024, 6).unwrap();
    let budgets = vec![Budget::new(Uuid::from_u128(1), Category::Pets, 2_000).unwrap()];
    let transactions = vec![txn(
        1,
        TransactionDraft::expense(Category::Pets, 2_000, "Food", date(2024, 6, 3)),
    )];
    let statuses = BudgetService::statuses(&budgets, &transactions, june);
    assert!(!statuses[0].over_limit);
    assert_eq!(statuses[0].remaining_cents, 0);
}
