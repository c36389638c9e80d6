mod common;

use common::{date, setup_tracker, tracker_at};
use finflow_core::{
    ledger::{AmountMode, Category, InstallmentPlan, TransactionDraft, YearMonth},
    FinanceError,
};

#[test]
fn purchase_splits_into_end_of_month_installments() {
    let (tracker, _path) = setup_tracker();
    let draft = TransactionDraft::expense(Category::Education, 100_000, "Laptop", date(2024, 1, 31));

    let created = tracker
        .add_transaction(draft, InstallmentPlan::new(3, AmountMode::Total))
        .unwrap();

    let amounts: Vec<i64> = created.iter().map(|txn| txn.amount_cents).collect();
    assert_eq!(amounts, vec![33_333, 33_333, 33_334]);
    assert_eq!(amounts.iter().sum::<i64>(), 100_000);

    let dates: Vec<_> = created.iter().map(|txn| txn.date).collect();
    assert_eq!(
        dates,
        vec![date(2024, 1, 31), date(2024, 2, 29), date(2024, 3, 31)]
    );
    assert_eq!(created[1].description, "Laptop (2/3)");

    let group = created[0].group_id().unwrap();
    assert!(created.iter().all(|txn| txn.group_id() == Some(group)));
    assert_eq!(tracker.transactions().unwrap().len(), 3);
}

#[test]
fn per_installment_amounts_multiply_into_the_total() {
    let (tracker, _path) = setup_tracker();
    let draft = TransactionDraft::expense(Category::Health, 2_500, "Therapy", date(2025, 3, 10));

    let created = tracker
        .add_transaction(draft, InstallmentPlan::new(4, AmountMode::PerInstallment))
        .unwrap();

    assert_eq!(created.len(), 4);
    assert!(created.iter().all(|txn| txn.amount_cents == 2_500));
    assert_eq!(created[3].date, date(2025, 6, 10));
}

#[test]
fn editing_one_installment_rewrites_the_group() {
    let (tracker, _path) = setup_tracker();
    let draft = TransactionDraft::expense(Category::Education, 90_000, "Course", date(2025, 1, 31));
    let created = tracker
        .add_transaction(draft, InstallmentPlan::new(3, AmountMode::Total))
        .unwrap();

    let mut edited = created[1].clone();
    edited.description = "Bootcamp".into();
    edited.category = Category::Other;
    edited.amount_cents = 40_000;
    edited.date = date(2025, 2, 27);

    let written = tracker.update_transaction(edited).unwrap();
    assert_eq!(written.len(), 3);

    let mut stored = tracker.transactions().unwrap();
    stored.sort_by_key(|txn| txn.date);
    let descriptions: Vec<&str> = stored.iter().map(|txn| txn.description.as_str()).collect();
    assert_eq!(
        descriptions,
        vec!["Bootcamp (1/3)", "Bootcamp (2/3)", "Bootcamp (3/3)"]
    );
    assert!(stored.iter().all(|txn| txn.category == Category::Other));
    assert!(stored.iter().all(|txn| txn.amount_cents == 40_000));
    // Only the edited member moves; its siblings keep their dates.
    let dates: Vec<_> = stored.iter().map(|txn| txn.date).collect();
    assert_eq!(
        dates,
        vec![date(2025, 1, 31), date(2025, 2, 27), date(2025, 3, 31)]
    );
}

#[test]
fn editing_a_single_transaction_touches_only_it() {
    let (tracker, _path) = setup_tracker();
    let first = tracker
        .add_transaction(
            TransactionDraft::expense(Category::Food, 1_200, "Lunch", date(2025, 1, 5)),
            InstallmentPlan::single(),
        )
        .unwrap();
    tracker
        .add_transaction(
            TransactionDraft::income(Category::Salary, 500_000, "Payroll", date(2025, 1, 5)),
            InstallmentPlan::single(),
        )
        .unwrap();

    let mut edited = first[0].clone();
    edited.amount_cents = 1_500;
    tracker.update_transaction(edited).unwrap();

    let stored = tracker.transactions().unwrap();
    let lunch = stored.iter().find(|txn| txn.description == "Lunch").unwrap();
    let payroll = stored.iter().find(|txn| txn.description == "Payroll").unwrap();
    assert_eq!(lunch.amount_cents, 1_500);
    assert_eq!(payroll.amount_cents, 500_000);
}

#[test]
fn income_ignores_installment_plans() {
    let (tracker, _path) = setup_tracker();
    let created = tracker
        .add_transaction(
            TransactionDraft::income(Category::Salary, 300_000, "Bonus", date(2025, 1, 20)),
            InstallmentPlan::new(3, AmountMode::Total),
        )
        .unwrap();

    assert_eq!(created.len(), 1);
    assert!(created[0].installment_info.is_none());
    assert_eq!(created[0].description, "Bonus");
}

#[test]
fn invalid_input_is_rejected_before_storage() {
    let (tracker, _path) = setup_tracker();
    let err = tracker
        .add_transaction(
            TransactionDraft::expense(Category::Food, 0, "Nothing", date(2025, 1, 1)),
            InstallmentPlan::single(),
        )
        .unwrap_err();
    assert!(matches!(err, FinanceError::Validation(_)));
    assert!(tracker.transactions().unwrap().is_empty());
}

#[test]
fn installments_survive_a_reopened_store() {
    let (tracker, path) = setup_tracker();
    tracker
        .add_transaction(
            TransactionDraft::expense(Category::Clothing, 30_000, "Coat", date(2024, 11, 30)),
            InstallmentPlan::new(3, AmountMode::Total),
        )
        .unwrap();

    let reopened = tracker_at(&path, date(2025, 1, 15), 1_000);
    let january = YearMonth::new(2025, 1).unwrap();
    let in_january = reopened.transactions_in(january).unwrap();
    assert_eq!(in_january.len(), 1);
    assert_eq!(in_january[0].description, "Coat (3/3)");
    assert_eq!(in_january[0].date, date(2025, 1, 30));
}
