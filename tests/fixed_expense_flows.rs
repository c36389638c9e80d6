mod common;

use common::{date, setup_tracker};
use finflow_core::ledger::{Category, InstallmentPlan, TransactionDraft, YearMonth};

#[test]
fn day_31_clamps_to_february_and_generation_is_idempotent() {
    let (tracker, _path) = setup_tracker();
    let rent = tracker
        .add_fixed_expense("Rent", 150_000, Category::Housing, 31)
        .unwrap();
    let february = YearMonth::new(2025, 2).unwrap();

    let first = tracker.generate_fixed_transactions(february).unwrap();
    assert_eq!(first.len(), 1);
    assert_eq!(first[0].date, date(2025, 2, 28));
    assert_eq!(first[0].fixed_expense_id, Some(rent.id));
    assert_eq!(first[0].amount_cents, 150_000);

    let second = tracker.generate_fixed_transactions(february).unwrap();
    assert!(second.is_empty());
    assert_eq!(tracker.transactions_in(february).unwrap().len(), 1);

    let march = tracker
        .generate_fixed_transactions(YearMonth::new(2025, 3).unwrap())
        .unwrap();
    assert_eq!(march[0].date, date(2025, 3, 31));
}

#[test]
fn removing_a_definition_keeps_generated_transactions() {
    let (tracker, _path) = setup_tracker();
    let gym = tracker
        .add_fixed_expense("Gym", 8_000, Category::Health, 5)
        .unwrap();
    let month = YearMonth::new(2025, 1).unwrap();
    tracker.generate_fixed_transactions(month).unwrap();

    tracker.delete_fixed_expense(gym.id).unwrap();

    assert!(tracker.fixed_expenses().unwrap().is_empty());
    let kept = tracker.transactions_in(month).unwrap();
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].fixed_expense_id, Some(gym.id));
    assert!(tracker
        .generate_fixed_transactions(YearMonth::new(2025, 2).unwrap())
        .unwrap()
        .is_empty());
}

#[test]
fn budgets_track_generated_and_manual_spending() {
    let (tracker, _path) = setup_tracker();
    let month = YearMonth::new(2025, 1).unwrap();
    let budget = tracker.set_budget(Category::Housing, 160_000).unwrap();
    tracker
        .add_fixed_expense("Rent", 150_000, Category::Housing, 1)
        .unwrap();
    tracker.generate_fixed_transactions(month).unwrap();
    tracker
        .add_transaction(
            TransactionDraft::expense(Category::Housing, 20_000, "Plumber", date(2025, 1, 9)),
            InstallmentPlan::single(),
        )
        .unwrap();

    let statuses = tracker.budget_statuses(month).unwrap();
    assert_eq!(statuses.len(), 1);
    assert_eq!(statuses[0].spent_cents, 170_000);
    assert_eq!(statuses[0].remaining_cents, -10_000);
    assert!(statuses[0].over_limit);

    let raised = tracker.set_budget(Category::Housing, 200_000).unwrap();
    assert_eq!(raised.id, budget.id);
    assert_eq!(tracker.budgets().unwrap().len(), 1);

    let summary = tracker.monthly_summary(month).unwrap();
    assert_eq!(summary.expense_cents, 170_000);
    assert_eq!(summary.balance_cents, -170_000);
}
